use lildb::doc;
use lildb::filter::{all, field};
use lildb_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};

#[test]
fn test_remove_matching() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            let removed = db.remove(doc! { "$lt": { age: 18 } })?;
            assert_eq!(removed.len(), 1);
            assert_eq!(removed[0].get("first_name").and_then(|v| v.as_string()).map(|s| s.as_str()), Some("fn3"));
            assert_eq!(db.count(), 2);
            assert!(db.get_by_id("p3").is_none());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_remove_all() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            assert_eq!(db.remove(all())?.len(), 3);
            assert_eq!(db.count(), 0);
            assert!(db.find(doc! {})?.is_empty());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_remove_no_match_keeps_clean() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            db.save()?;
            assert!(db.remove(field("age").gt(100))?.is_empty());
            assert!(!db.is_dirty());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_removed_id_can_be_reused() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            db.remove(doc! { _id: "p1" })?;
            db.insert(doc! { _id: "p1", first_name: "again" })?;
            assert_eq!(db.count(), 3);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}
