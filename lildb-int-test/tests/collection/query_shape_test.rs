use lildb::collection::{group_by, order_by, FindOptions};
use lildb::common::stream::Projection;
use lildb::common::SortOrder;
use lildb::{doc, Value};
use lildb_int_test::test_util::{cleanup, create_test_context, create_test_docs, is_sorted, run_test};

#[test]
fn test_sort_ascending_and_descending() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;

            let ages = |options: &FindOptions| -> Vec<i64> {
                db.query(doc! {}, options)
                    .unwrap()
                    .into_documents()
                    .iter()
                    .filter_map(|d| d.get("age").and_then(|v| v.as_i64()).copied())
                    .collect()
            };

            let ascending = ages(&order_by("age", SortOrder::Ascending));
            assert_eq!(ascending, vec![17, 25, 30]);
            assert!(is_sorted(ascending, true));

            let descending = ages(&FindOptions::new().sort_desc("age"));
            assert!(is_sorted(descending, false));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_sort_missing_values_last() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            let sorted = db
                .query(doc! {}, &FindOptions::new().sort_asc("address.city"))?
                .into_documents();
            let ids: Vec<_> = sorted
                .iter()
                .filter_map(|d| d.get("_id").and_then(|v| v.as_string()).cloned())
                .collect();
            assert_eq!(ids, vec!["p2", "p1", "p3"]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_group_by_field() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            let result = db.query(doc! {}, &group_by("last_name"))?;
            let groups = result.groups().unwrap();

            assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec!["ln1", "ln2"]);
            assert_eq!(groups["ln2"].len(), 2);
            assert_eq!(result.len(), 2);

            let result = db.query(doc! {}, &group_by("address.city"))?;
            let groups = result.groups().unwrap();
            assert_eq!(groups["undefined"].len(), 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_group_sorted_members() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            let result = db.query(doc! {}, &group_by("last_name").sort_asc("age"))?;
            let ln2 = &result.groups().unwrap()["ln2"];
            assert_eq!(ln2[0].get("_id"), Some(&Value::from("p3")));
            assert_eq!(ln2[1].get("_id"), Some(&Value::from("p2")));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_projection_renames_and_flattens() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            let projection = Projection::from_document(&doc! { name: "first_name", city: "address.city" })?;
            let result = db
                .query(doc! { _id: "p1" }, &FindOptions::new().project(projection))?
                .into_documents();
            assert_eq!(result, vec![doc! { name: "fn1", city: "Paris" }]);

            let result = db
                .query(doc! { _id: "p3" }, &FindOptions::new().project(Projection::new().field("city", "address.city")))?
                .into_documents();
            assert_eq!(result, vec![doc! { city: null }]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_group_with_projection() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            let options = group_by("last_name").project(Projection::new().field("who", "first_name"));
            let result = db.query(doc! {}, &options)?;
            let groups = result.groups().unwrap();
            assert_eq!(groups["ln2"], vec![doc! { who: "fn2" }, doc! { who: "fn3" }]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}
