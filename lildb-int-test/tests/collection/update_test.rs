use lildb::filter::field;
use lildb::{doc, LilDb, Value};
use lildb_int_test::test_util::{cleanup, create_test_context, create_test_docs, db_file, run_test};

#[test]
fn test_update_merges_nested_documents() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            let updated = db.update(doc! { _id: "p1" }, doc! { address: { country: "FR" } })?;
            assert_eq!(updated.len(), 1);

            let p1 = db.get_by_id("p1").unwrap();
            assert_eq!(p1.get("address.city"), Some(&Value::from("Paris")));
            assert_eq!(p1.get("address.country"), Some(&Value::from("FR")));
            assert_eq!(p1, updated[0]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_update_replaces_arrays_and_scalars() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            db.update(doc! { _id: "p1" }, doc! { tags: ["ops"], age: 31 })?;

            let p1 = db.get_by_id("p1").unwrap();
            assert_eq!(p1.get("tags"), Some(&Value::from(vec!["ops"])));
            assert_eq!(p1.get("age"), Some(&Value::from(31)));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_update_all_matches() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            let updated = db.update(field("last_name").eq("ln2"), doc! { family: true })?;
            assert_eq!(updated.len(), 2);
            assert_eq!(db.find(doc! { family: true })?.len(), 2);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_update_keeps_id() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            db.update(doc! { _id: "p2" }, doc! { _id: "other", age: 26 })?;
            assert!(db.get_by_id("other").is_none());
            assert_eq!(db.get_by_id("p2").unwrap().get("age"), Some(&Value::from(26)));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_update_cannot_nest_under_id() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(doc! { _id: "k1", name: "x" })?;
            let updated = db.update(doc! { _id: "k1" }, doc! { "_id.x": 1, name: "y" })?;
            assert_eq!(updated, vec![doc! { _id: "k1", name: "y" }]);
            assert_eq!(db.find(doc! { _id: "k1" })?.len(), 1);

            db.close()?;
            let reopened = LilDb::connect(db_file(&ctx))?;
            assert_eq!(reopened.get_by_id("k1"), Some(doc! { _id: "k1", name: "y" }));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_update_no_match() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            db.save()?;
            let updated = db.update(doc! { _id: "missing" }, doc! { age: 1 })?;
            assert!(updated.is_empty());
            assert!(!db.is_dirty());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}
