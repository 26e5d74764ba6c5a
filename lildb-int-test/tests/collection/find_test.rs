use lildb::errors::ErrorKind;
use lildb::filter::{and, field, not, or};
use lildb::{doc, Document, LilDb, Value};
use lildb_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};

fn ids(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|d| d.get("_id").and_then(|v| v.as_string()).cloned())
        .collect()
}

fn seeded(db: &LilDb) {
    db.insert(create_test_docs()).unwrap();
}

#[test]
fn test_find_all_with_empty_query() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            assert_eq!(ids(&db.find(doc! {})?), vec!["p1", "p2", "p3"]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_find_by_equality() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            assert_eq!(ids(&db.find(doc! { last_name: "ln2" })?), vec!["p2", "p3"]);
            assert_eq!(ids(&db.find(doc! { last_name: "ln2", age: 25 })?), vec!["p2"]);
            assert!(db.find(doc! { last_name: "ln9" })?.is_empty());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_find_by_nested_path() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            assert_eq!(ids(&db.find(doc! { "address.city": "Paris" })?), vec!["p1"]);
            assert_eq!(
                ids(&db.find(doc! { "$regex": { "address.zip": "^1" } })?),
                vec!["p2"]
            );
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_find_by_comparison() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            assert_eq!(ids(&db.find(doc! { "$gte": { age: 25 } })?), vec!["p1", "p2"]);
            assert_eq!(ids(&db.find(doc! { "$gt": { age: 25 } })?), vec!["p1"]);
            assert_eq!(ids(&db.find(doc! { "$lt": { age: 25 } })?), vec!["p3"]);
            assert_eq!(ids(&db.find(doc! { "$lte": { age: 25 } })?), vec!["p2", "p3"]);
            assert_eq!(
                ids(&db.find(doc! { "$gt": { age: 18 }, "$lt": { age: 30 } })?),
                vec!["p2"]
            );
            assert_eq!(
                ids(&db.find(doc! { age: { "$gt": 18, "$lt": 30 } })?),
                vec!["p2"]
            );
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_find_with_logical_operators() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            let found = db.find(doc! { "$or": [{ first_name: "fn1" }, { age: 17 }] })?;
            assert_eq!(ids(&found), vec!["p1", "p3"]);

            let found = db.find(doc! { "$and": [{ last_name: "ln2" }, { "$ne": { age: 17 } }] })?;
            assert_eq!(ids(&found), vec!["p2"]);

            let found = db.find(doc! { "$not": { last_name: "ln2" } })?;
            assert_eq!(ids(&found), vec!["p1"]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_find_with_membership_operators() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            let found = db.find(doc! { "$in": { first_name: ["fn1", "fn3"] } })?;
            assert_eq!(ids(&found), vec!["p1", "p3"]);

            let found = db.find(doc! { "$in": { first_name: ["fn2"], age: [25, 30] } })?;
            assert_eq!(ids(&found), vec!["p2"]);

            let found = db.find(doc! { "$nin": { first_name: ["fn1", "fn3"] } })?;
            assert_eq!(ids(&found), vec!["p2"]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_find_null_and_size() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            assert_eq!(ids(&db.find(doc! { "$null": "address" })?), vec!["p3"]);
            assert_eq!(ids(&db.find(doc! { "$null": "nickname" })?), vec!["p1", "p2", "p3"]);
            assert_eq!(ids(&db.find(doc! { "$size": { tags: 1 } })?), vec!["p2"]);
            assert_eq!(ids(&db.find(doc! { "$size": { tags: 0 } })?), vec!["p3"]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_fluent_filters_match_query_documents() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            let fluent = or(vec![
                and(vec![field("last_name").eq("ln2"), field("age").gte(18)]),
                not(field("tags").size(0).or(field("tags").size(1))),
            ]);
            let parsed = doc! {
                "$or": [
                    { last_name: "ln2", "$gte": { age: 18 } },
                    { "$not": { "$or": [{ "$size": { tags: 0 } }, { "$size": { tags: 1 } }] } },
                ]
            };
            assert_eq!(ids(&db.find(fluent)?), ids(&db.find(parsed)?));
            assert_eq!(ids(&db.find(field("age").in_array(vec![17, 30]))?), vec!["p1", "p3"]);
            assert_eq!(ids(&db.find(field("first_name").regex("3$")?)?), vec!["p3"]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_find_invalid_queries() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            let invalid = vec![
                Value::from("text"),
                Value::from(doc! { "$or": { a: 1 } }),
                Value::from(doc! { "$in": { a: 1 } }),
                Value::from(doc! { "$gt": 5 }),
                Value::from(doc! { "$null": 1 }),
                Value::from(doc! { "$regex": { a: "(" } }),
                Value::from(doc! { "$where": "x" }),
            ];
            for query in invalid {
                let err = db.find(&query).unwrap_err();
                assert_eq!(err.kind(), &ErrorKind::InvalidQuery, "query {}", query);
            }
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_find_returns_copies() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            seeded(&db);
            let mut found = db.find(doc! { _id: "p1" })?;
            found[0].put("address.city", "Lyon")?;
            let stored = db.get_by_id("p1").unwrap();
            assert_eq!(stored.get("address.city"), Some(&Value::from("Paris")));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}
