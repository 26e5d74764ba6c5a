use lildb::errors::ErrorKind;
use lildb::{doc, LilDb};
use lildb_int_test::test_util::{cleanup, create_test_context, create_test_docs, db_file, random_dir, run_test};
use std::fs;

#[test]
fn test_save_as_switches_backing_file() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(create_test_docs())?;
            db.save()?;

            let copy = ctx.path().join("copy.jsonl");
            db.save_as(&copy, false)?;
            assert_eq!(db.location(), Some(copy.display().to_string()));
            assert_eq!(LilDb::connect(&copy)?.count(), 3);

            // later saves go to the new file only
            db.insert(doc! { _id: "p4" })?;
            db.save()?;
            assert_eq!(LilDb::connect(&copy)?.count(), 4);
            assert_eq!(LilDb::connect(db_file(&ctx))?.count(), 3);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_save_as_writes_even_when_clean() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(doc! { _id: "a" })?;
            db.save()?;
            assert!(!db.is_dirty());

            let copy = ctx.path().join("nested").join("copy.jsonl");
            db.save_as(&copy, true)?;
            assert_eq!(fs::read_to_string(&copy)?, "{\"_id\":\"a\"}\n");
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_save_as_refuses_existing_file() {
    run_test(
        || create_test_context(),
        |ctx| {
            let db = ctx.db();
            db.insert(doc! { _id: "a" })?;

            let existing = ctx.path().join("existing.jsonl");
            fs::write(&existing, "{\"_id\":\"keep\"}\n")?;

            let err = db.save_as(&existing, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::FileExists);
            assert_eq!(fs::read_to_string(&existing)?, "{\"_id\":\"keep\"}\n");
            assert_eq!(db.location(), Some(db_file(&ctx).display().to_string()));
            assert!(db.is_dirty());

            db.save_as(&existing, true)?;
            assert_eq!(fs::read_to_string(&existing)?, "{\"_id\":\"a\"}\n");
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
}

#[test]
fn test_save_as_gives_memory_store_a_backing_file() {
    let dir = random_dir();
    let path = dir.join("db.jsonl");

    let db = LilDb::new();
    db.insert(doc! { _id: "a" }).unwrap();
    db.save_as(&path, false).unwrap();
    assert!(!db.is_dirty());
    assert!(db.last_saved().is_some());

    db.insert(doc! { _id: "b" }).unwrap();
    assert!(db.save().unwrap());
    assert_eq!(LilDb::connect(&path).unwrap().count(), 2);
    fs::remove_dir_all(dir).unwrap();
}
