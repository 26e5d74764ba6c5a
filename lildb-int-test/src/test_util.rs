use lildb::collection::Document;
use lildb::errors::LilDbResult;
use lildb::{doc, LilDb};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::backtrace::Backtrace;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use std::{env, fs, thread};

/// Runs a test with retry logic and error handling.
/// Tests run on the current thread so a failing attempt never leaks a timer thread.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> LilDbResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> LilDbResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> LilDbResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    const MAX_RETRIES: u32 = 3;
    let mut last_error: Option<String> = None;

    for attempt in 1..=MAX_RETRIES {
        let start_time = Instant::now();

        let result = std::panic::catch_unwind(|| {
            let backtrace = Backtrace::capture();
            match before() {
                Ok(ctx) => match test(ctx.clone()) {
                    Ok(_) => after(ctx)
                        .map_err(|e| (format!("After run failed: {:?}", e), backtrace.to_string())),
                    Err(e) => {
                        let _ = after(ctx);
                        Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                    }
                },
                Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
            }
        });

        let elapsed = start_time.elapsed();
        let error = match result {
            Ok(Ok(_)) => return,
            Ok(Err((e, bt))) => {
                if !bt.is_empty() && !bt.contains("disabled") {
                    format!("{}\n{}", e, bt)
                } else {
                    e
                }
            }
            Err(panic_err) => {
                let msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_err.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                format!("Panic: {}", msg)
            }
        };

        if attempt < MAX_RETRIES {
            eprintln!(
                "\n========== Test Attempt {}/{} Failed (took {:?}) ==========",
                attempt, MAX_RETRIES, elapsed
            );
            eprintln!("{}", error);
            eprintln!("Retrying in {}ms...\n", 100 * attempt);
            thread::sleep(Duration::from_millis(100 * attempt as u64));
        }
        last_error = Some(error);
    }

    panic!(
        "Test failed after {} attempts. Last error: {}",
        MAX_RETRIES,
        last_error.unwrap_or_default()
    );
}

#[derive(Clone)]
pub struct TestContext {
    path: PathBuf,
    db: LilDb,
}

impl TestContext {
    pub fn new(path: PathBuf, db: LilDb) -> Self {
        Self { path, db }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn db(&self) -> LilDb {
        self.db.clone()
    }
}

/// A fresh directory under the system temp dir. Nothing is created on disk.
pub fn random_dir() -> PathBuf {
    let id: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    env::temp_dir().join(format!("lildb-it-{}", id))
}

/// Opens a store backed by `db.jsonl` inside a fresh directory.
pub fn create_test_context() -> LilDbResult<TestContext> {
    let dir = random_dir();
    let db = LilDb::connect(dir.join("db.jsonl"))?;
    Ok(TestContext::new(dir, db))
}

pub fn db_file(ctx: &TestContext) -> PathBuf {
    ctx.path().join("db.jsonl")
}

pub fn cleanup(ctx: TestContext) -> LilDbResult<()> {
    if let Err(e) = ctx.db().close() {
        eprintln!("Warning: Failed to close store: {:?}", e);
    }

    match fs::remove_dir_all(ctx.path()) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            eprintln!(
                "Warning: Failed to remove test directory {}: {:?}",
                ctx.path().display(),
                e
            );
            Ok(())
        }
    }
}

pub fn create_test_docs() -> Vec<Document> {
    vec![
        doc! {
            _id: "p1",
            first_name: "fn1",
            last_name: "ln1",
            age: 30,
            tags: ["admin", "dev"],
            address: { city: "Paris", zip: "75001" },
        },
        doc! {
            _id: "p2",
            first_name: "fn2",
            last_name: "ln2",
            age: 25,
            tags: ["dev"],
            address: { city: "Berlin", zip: "10115" },
        },
        doc! {
            _id: "p3",
            first_name: "fn3",
            last_name: "ln2",
            age: 17,
            tags: [],
            nickname: null,
        },
    ]
}

pub fn is_sorted<T: PartialOrd>(iterable: impl IntoIterator<Item = T>, ascending: bool) -> bool {
    let mut iter = iterable.into_iter();
    if let Some(mut prev) = iter.next() {
        for current in iter {
            if (ascending && prev > current) || (!ascending && prev < current) {
                return false;
            }
            prev = current;
        }
    }
    true
}
