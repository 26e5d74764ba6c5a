use lildb::errors::ErrorKind;
use lildb::{doc, LilDb, Value};
use lildb_int_test::test_util::{cleanup, create_test_context, create_test_docs, db_file, random_dir, run_test};
use std::fs;

#[test]
fn test_connect_creates_empty_file() {
    run_test(
        || create_test_context(),
        |ctx| {
            let path = db_file(&ctx);
            assert!(path.exists());
            assert_eq!(fs::read_to_string(&path)?, "");
            assert!(ctx.db().last_saved().is_some());
            assert!(!ctx.db().is_dirty());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_save_writes_one_document_per_line() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(vec![doc! { _id: "a", n: 1 }, doc! { _id: "b", list: [1, "x", null] }])?;
            assert!(db.is_dirty());
            assert!(db.save()?);
            assert!(!db.is_dirty());

            let content = fs::read_to_string(db_file(&ctx))?;
            assert_eq!(
                content,
                "{\"_id\":\"a\",\"n\":1}\n{\"_id\":\"b\",\"list\":[1,\"x\",null]}\n"
            );
            assert!(!db.save()?);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_round_trip_through_file() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            db.update(doc! { _id: "p2" }, doc! { address: { street: "Main" } })?;
            db.remove(doc! { _id: "p3" })?;
            db.close()?;

            let reopened = LilDb::connect(db_file(&ctx))?;
            assert_eq!(reopened.count(), 2);
            assert_eq!(reopened.all_documents(), db.all_documents());
            assert_eq!(
                reopened.get_by_id("p2").unwrap().get("address.street"),
                Some(&Value::from("Main"))
            );
            assert!(!reopened.is_dirty());
            reopened.close()?;
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_load_skips_blank_lines_and_duplicates_win_last() {
    let dir = random_dir();
    let path = dir.join("db.jsonl");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        &path,
        "{\"_id\":\"a\",\"v\":1}\n\n{\"_id\":\"b\",\"v\":2}\n   \n{\"_id\":\"a\",\"v\":3}\n",
    )
    .unwrap();

    let db = LilDb::connect(&path).unwrap();
    assert_eq!(db.count(), 2);
    assert_eq!(db.get_by_id("a").unwrap().get("v"), Some(&Value::from(3)));

    // the collapsed collection is written back on close
    assert!(db.is_dirty());
    db.close().unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\"_id\":\"a\",\"v\":3}\n{\"_id\":\"b\",\"v\":2}\n"
    );
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_load_corrupt_file_fails() {
    let dir = random_dir();
    let path = dir.join("db.jsonl");
    fs::create_dir_all(&dir).unwrap();
    fs::write(&path, "{\"_id\":\"a\"}\n{broken\n").unwrap();

    let err = LilDb::connect(&path).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EncodingError);
    assert!(err.message().contains("line 2"));
    // the file is left untouched
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"_id\":\"a\"}\n{broken\n");
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_load_generates_missing_ids() {
    let dir = random_dir();
    let path = dir.join("db.jsonl");
    fs::create_dir_all(&dir).unwrap();
    fs::write(&path, "{\"name\":\"no id\"}\n").unwrap();

    let db = LilDb::connect(&path).unwrap();
    let docs = db.all_documents();
    assert_eq!(docs.len(), 1);
    assert!(docs[0].get("_id").map(|v| v.is_string()).unwrap_or(false));
    assert!(db.is_dirty());
    db.close().unwrap();

    let reopened = LilDb::connect(&path).unwrap();
    assert!(!reopened.is_dirty());
    assert_eq!(reopened.all_documents(), docs);
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_save_in_memory_store_fails() {
    let db = LilDb::new();
    db.insert(doc! { a: 1 }).unwrap();
    assert_eq!(db.save().unwrap_err().kind(), &ErrorKind::NoBackingFile);
    assert!(db.is_dirty());
    db.close().unwrap();
}

#[test]
fn test_close_persists_pending_changes() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(doc! { _id: "a" })?;
            db.close()?;
            assert!(!db.is_dirty());
            assert_eq!(fs::read_to_string(db_file(&ctx))?, "{\"_id\":\"a\"}\n");
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}
