use lildb::errors::ErrorKind;
use lildb::{doc, Value};
use lildb_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};

#[test]
fn test_insert_empty_document() {
    run_test(
        || create_test_context(),
        |ctx| {
            let inserted = ctx.db().insert(doc! {})?;
            assert_eq!(inserted.len(), 1);
            assert_eq!(inserted[0].size(), 1);
            assert!(inserted[0].get("_id").map(|v| v.is_string()).unwrap_or(false));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_insert_many_keeps_order() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            let inserted = db.insert(create_test_docs())?;
            assert_eq!(inserted.len(), 3);

            let ids: Vec<_> = db
                .all_documents()
                .iter()
                .map(|d| d.get("_id").and_then(|v| v.as_string()).cloned())
                .collect();
            assert_eq!(
                ids,
                vec![Some("p1".to_string()), Some("p2".to_string()), Some("p3".to_string())]
            );
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_generated_ids_are_unique() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            let docs: Vec<_> = (0..200).map(|i| doc! { n: i }).collect();
            db.insert(docs)?;

            let mut ids: Vec<String> = db
                .all_documents()
                .iter()
                .filter_map(|d| d.get("_id").and_then(|v| v.as_string()).cloned())
                .collect();
            assert!(ids.iter().all(|id| id.len() == 32));
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 200);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_insert_duplicate_id_rejects_whole_batch() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(doc! { _id: "a" })?;

            let err = db
                .insert(vec![doc! { _id: "b" }, doc! { _id: "a" }])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DuplicateId);
            assert_eq!(db.count(), 1);
            assert!(db.get_by_id("b").is_none());

            let err = db
                .insert(vec![doc! { _id: "c" }, doc! { _id: "c" }])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DuplicateId);
            assert_eq!(db.count(), 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_insert_non_string_id() {
    run_test(
        || create_test_context(),
        |ctx| {
            let err = ctx.db().insert(doc! { _id: 42 }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidId);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_insert_invalid_data() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            assert_eq!(db.insert(Value::Null).unwrap_err().kind(), &ErrorKind::InvalidDataType);
            assert_eq!(
                db.insert(vec![Value::from(1), Value::from(2)]).unwrap_err().kind(),
                &ErrorKind::InvalidDataType
            );
            assert_eq!(db.count(), 0);
            assert!(!db.is_dirty());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_upsert_replaces_existing() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            db.upsert(vec![doc! { _id: "p1", first_name: "changed" }, doc! { _id: "p4" }])?;

            assert_eq!(db.count(), 4);
            let p1 = db.get_by_id("p1").unwrap();
            assert_eq!(p1, doc! { _id: "p1", first_name: "changed" });
            assert!(p1.get("age").is_none());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_inserted_documents_are_copies() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            let mut inserted = db.insert(doc! { _id: "a", n: 1 })?;
            inserted[0].put("n", 2)?;
            assert_eq!(db.get_by_id("a").unwrap().get("n"), Some(&Value::from(1)));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}
