//! A built config shared across threads, with per-thread scoped flags.

use std::sync::{Arc, Barrier};
use std::thread;

use ordo_core::{Config, MapSource, ResolveError, expressions, secrets};

fn shared_config() -> Arc<Config> {
    let config = Config::builder()
        .with_source(MapSource::new(
            "app",
            100,
            [
                ("db.password", "hunter2"),
                ("db.user", "admin"),
                ("dsn", "${db.user}@db"),
                ("port", "80"),
                ("%prod.port", "443"),
            ],
        ))
        .with_profiles(["prod"])
        .with_secret_keys(["db.password"])
        .build()
        .unwrap();
    Arc::new(config)
}

#[test]
fn test_concurrent_lookups_agree() {
    let config = shared_config();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                for _ in 0..200 {
                    assert_eq!(config.get_value("dsn").unwrap().as_deref(), Some("admin@db"));
                    assert_eq!(config.get_value("port").unwrap().as_deref(), Some("443"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_unlock_on_one_thread_does_not_leak() {
    let config = shared_config();
    let barrier = Arc::new(Barrier::new(2));

    let unlocked = {
        let config = Arc::clone(&config);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            secrets::with_unlocked(|| {
                barrier.wait();
                let value = config.get_value("db.password");
                barrier.wait();
                value
            })
        })
    };
    let locked = {
        let config = Arc::clone(&config);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            let value = config.get_value("db.password");
            barrier.wait();
            value
        })
    };

    let unlocked = unlocked.join().unwrap();
    let locked = locked.join().unwrap();
    assert_eq!(unlocked.unwrap().as_deref(), Some("hunter2"));
    assert!(matches!(locked, Err(ResolveError::AccessDenied { .. })));
}

#[test]
fn test_disabled_expansion_on_one_thread_does_not_leak() {
    let config = shared_config();
    let barrier = Arc::new(Barrier::new(2));

    let raw = {
        let config = Arc::clone(&config);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            expressions::without_expansion(|| {
                barrier.wait();
                config.get_value("dsn")
            })
        })
    };
    let expanded = {
        let config = Arc::clone(&config);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            config.get_value("dsn")
        })
    };

    assert_eq!(raw.join().unwrap().unwrap().as_deref(), Some("${db.user}@db"));
    assert_eq!(expanded.join().unwrap().unwrap().as_deref(), Some("admin@db"));
}

#[test]
fn test_enumeration_is_stable_across_threads() {
    let config = shared_config();
    let expected = config.property_names().unwrap();
    assert_eq!(expected, vec!["db.user", "dsn", "port"]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = Arc::clone(&config);
            thread::spawn(move || config.property_names().unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
