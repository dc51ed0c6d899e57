// Integration tests for the connection guard's access discipline

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;

use boxstash_core::ExErrorKind;
use boxstash_store::{Database, Params, Result, StoreConfig, Writer};
use tempfile::TempDir;

fn setup_file_db(dir: &TempDir, readers: usize) -> Arc<Database> {
    let config = StoreConfig::new(dir.path().join("guard.db")).with_readers(readers);
    let db = Database::open(&config).expect("Failed to open file database");
    db.write_once(|w| w.execute_batch("CREATE TABLE scratch (n INTEGER NOT NULL);"))
        .unwrap();
    Arc::new(db)
}

fn scratch_count(db: &Database) -> i64 {
    db.view(|r| r.query_opt("SELECT COUNT(*) FROM scratch", &Params::new(), |row| row.get(0)))
        .unwrap()
        .unwrap_or(0)
}

#[test]
fn test_writes_never_overlap() {
    // Given: Several threads writing through the same guard
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir, 2);
    let active = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));

    // When: Each thread holds write access for a while
    let handles: Vec<_> = (0..6)
        .map(|i| {
            let db = Arc::clone(&db);
            let active = Arc::clone(&active);
            let max_seen = Arc::clone(&max_seen);
            thread::spawn(move || {
                db.write_once(|w| {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(10));
                    w.execute(
                        "INSERT INTO scratch (n) VALUES (:n)",
                        &Params::new().with("n", i as i64),
                    )?;
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                })
                .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // Then: At most one writer was ever active
    assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    assert_eq!(scratch_count(&db), 6);
}

#[test]
fn test_views_overlap() {
    // Given: A file database with three read-only connections
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir, 3);
    let barrier = Arc::new(Barrier::new(3));

    // When: Three views each wait for the others while inside the guard
    let handles: Vec<_> = (0..3)
        .map(|_| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                db.view(|r| {
                    barrier.wait();
                    r.query_opt("SELECT COUNT(*) FROM scratch", &Params::new(), |row| {
                        row.get::<_, i64>(0)
                    })
                })
                .unwrap()
            })
        })
        .collect();

    // Then: All three complete, so they held shared access at the same time
    for h in handles {
        assert_eq!(h.join().unwrap(), Some(0));
    }
}

#[test]
fn test_view_waits_for_write() {
    // Given: A writer holding exclusive access
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir, 2);
    let writing = Arc::new(AtomicBool::new(false));
    let (started_tx, started_rx) = mpsc::channel();

    let writer = {
        let db = Arc::clone(&db);
        let writing = Arc::clone(&writing);
        thread::spawn(move || {
            db.write_once(|w| {
                writing.store(true, Ordering::SeqCst);
                started_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(50));
                w.execute("INSERT INTO scratch (n) VALUES (1)", &Params::new())?;
                writing.store(false, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        })
    };

    // When: A view starts while the write is in progress
    started_rx.recv().unwrap();
    let (overlapped, count) = db
        .view(|r| {
            let overlapped = writing.load(Ordering::SeqCst);
            let count = r.query_opt("SELECT COUNT(*) FROM scratch", &Params::new(), |row| {
                row.get::<_, i64>(0)
            })?;
            Ok((overlapped, count))
        })
        .unwrap();
    writer.join().unwrap();

    // Then: The view only ran after the write finished
    assert!(!overlapped);
    assert_eq!(count, Some(1));
}

fn timed_insert(
    w: &Writer<'_>,
    n: i64,
    active: &AtomicUsize,
    max_seen: &AtomicUsize,
) -> Result<()> {
    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
    max_seen.fetch_max(now, Ordering::SeqCst);
    thread::sleep(Duration::from_millis(10));
    w.execute("INSERT INTO scratch (n) VALUES (:n)", &Params::new().with("n", n))?;
    active.fetch_sub(1, Ordering::SeqCst);
    Ok(())
}

#[test]
fn test_transact_and_write_once_never_overlap() {
    // Given: Threads alternating between transactions and single writes
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir, 2);
    let active = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));

    // When: Each thread holds write access for a while
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let db = Arc::clone(&db);
            let active = Arc::clone(&active);
            let max_seen = Arc::clone(&max_seen);
            thread::spawn(move || {
                let n = i as i64;
                if i % 2 == 0 {
                    db.transact(|w| timed_insert(w, n, &active, &max_seen)).unwrap();
                } else {
                    db.write_once(|w| timed_insert(w, n, &active, &max_seen)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // Then: At most one writer of either kind was ever active
    assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    assert_eq!(scratch_count(&db), 8);
}

#[test]
fn test_view_waits_for_transact() {
    // Given: A transaction holding exclusive access
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir, 2);
    let writing = Arc::new(AtomicBool::new(false));
    let (started_tx, started_rx) = mpsc::channel();

    let writer = {
        let db = Arc::clone(&db);
        let writing = Arc::clone(&writing);
        thread::spawn(move || {
            db.transact(|w| {
                writing.store(true, Ordering::SeqCst);
                started_tx.send(()).unwrap();
                w.execute("INSERT INTO scratch (n) VALUES (1)", &Params::new())?;
                thread::sleep(Duration::from_millis(50));
                w.execute("INSERT INTO scratch (n) VALUES (2)", &Params::new())?;
                writing.store(false, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        })
    };

    // When: A view starts while the transaction is open
    started_rx.recv().unwrap();
    let (overlapped, count) = db
        .view(|r| {
            let overlapped = writing.load(Ordering::SeqCst);
            let count = r.query_opt("SELECT COUNT(*) FROM scratch", &Params::new(), |row| {
                row.get::<_, i64>(0)
            })?;
            Ok((overlapped, count))
        })
        .unwrap();
    writer.join().unwrap();

    // Then: The view only ran after commit and saw both rows
    assert!(!overlapped);
    assert_eq!(count, Some(2));
}

#[test]
fn test_transact_rolls_back_on_error() {
    // Given: A transaction whose second statement fails
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir, 1);

    // When: It runs
    let err = db
        .transact(|w| {
            w.execute("INSERT INTO scratch (n) VALUES (1)", &Params::new())?;
            w.execute("INSERT INTO scratch (n) VALUES (NULL)", &Params::new())
        })
        .unwrap_err();

    // Then: The error is returned and the first insert is not persisted
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(scratch_count(&db), 0);
}

#[test]
fn test_transact_rolls_back_on_panic_and_resumes_it() {
    // Given: A transaction body that panics after writing
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir, 1);

    // When: It runs
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        db.transact(|w| {
            w.execute("INSERT INTO scratch (n) VALUES (1)", &Params::new())?;
            let body_fails = true;
            if body_fails {
                panic!("body failed");
            }
            Ok(())
        })
    }));

    // Then: The panic reaches the caller
    let payload = outcome.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"body failed"));

    // And: Nothing was committed and the guard remains usable
    assert_eq!(scratch_count(&db), 0);
    db.write_once(|w| w.execute("INSERT INTO scratch (n) VALUES (2)", &Params::new()))
        .unwrap();
    assert_eq!(scratch_count(&db), 1);
}

#[test]
fn test_readers_reject_writes() {
    // Given: A file database served by read-only connections
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir, 1);

    // When: A write is attempted through a view
    let result = db.view(|r| {
        r.query_opt("INSERT INTO scratch (n) VALUES (1) RETURNING n", &Params::new(), |row| {
            row.get::<_, i64>(0)
        })
    });

    // Then: It fails and nothing is written
    assert!(result.is_err());
    assert_eq!(scratch_count(&db), 0);
}
