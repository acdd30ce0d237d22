//! Integration tests for the behaviour callers rely on.
//!
//! These tests go through the facade crate only.

use event_emitter::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<Vec<Value>>>>;

fn push_into(calls: &Calls) -> impl Fn(&[Value]) -> Result<(), ListenerError> + Send + Sync + 'static {
    let calls = calls.clone();
    move |args: &[Value]| {
        calls.lock().unwrap().push(args.to_vec());
        Ok(())
    }
}

// =============================================================================
// Registration and emission
// =============================================================================

#[test]
fn test_register_then_emit_records_arguments() {
    let calls = Arc::new(Mutex::new(Vec::new()));

    let emitted = EventEmitter::new()
        .register("x", push_into(&calls))
        .emit("x", &[json!(42)]);

    assert!(emitted);
    assert_eq!(*calls.lock().unwrap(), vec![vec![json!(42)]]);
}

#[test]
fn test_two_listeners_both_run_in_order() {
    let emitter = EventEmitter::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for name in ["first", "second"] {
        let order = order.clone();
        emitter.register("ready", move |_| {
            order.lock().unwrap().push(name);
            Ok(())
        });
    }

    emitter.emit("ready", &[]);
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn test_same_closure_code_registered_twice_runs_twice() {
    let emitter = EventEmitter::new();
    let hits = Arc::new(AtomicUsize::new(0));

    for _ in 0..2 {
        let hits = hits.clone();
        emitter.register("x", move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }

    emitter.emit("x", &[]);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn test_register_returns_the_same_emitter() {
    let emitter = EventEmitter::new();
    assert!(std::ptr::eq(emitter.register("x", |_| Ok(())), &emitter));
    assert!(std::ptr::eq(emitter.register("", |_| Ok(())), &emitter));
}

// =============================================================================
// Failure absorption
// =============================================================================

#[test]
fn test_unregistered_event_is_harmless() {
    let emitter = EventEmitter::with_config(EmitterConfig {
        logging: Some(false),
    });
    assert!(emitter.emit("never-registered", &[]));
    assert!(emitter.is_empty());
}

#[test]
fn test_empty_identifier_is_rejected_quietly() {
    let emitter = EventEmitter::new();
    emitter.register("", |_| Ok(()));

    assert_eq!(emitter.event_count(), 0);
    assert!(emitter.emit("", &[]));
}

#[test]
fn test_invalid_json_identifiers_are_rejected() {
    for value in [json!(""), json!(1), json!(true), json!(null), json!(["x"]), json!({"x": 1})] {
        assert!(EventId::try_from(&value).is_err(), "{value} accepted");
    }
}

#[test]
fn test_failing_listeners_do_not_reach_the_caller() {
    let emitter = EventEmitter::new();
    let calls = Arc::new(Mutex::new(Vec::new()));

    emitter
        .register("err", |_| Err(ListenerError::failed("nope")))
        .register("panic", |_| panic!("listener bug"))
        .register("ok", push_into(&calls));

    assert!(emitter.emit("err", &[]));
    assert!(emitter.emit("panic", &[]));
    assert!(emitter.emit("ok", &[json!("still works")]));

    assert_eq!(*calls.lock().unwrap(), vec![vec![json!("still works")]]);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_unknown_configuration_key_fails_construction() {
    let err = EventEmitter::from_value(Some(&json!({"verbose": true}))).unwrap_err();
    assert!(matches!(err, EmitterError::InvalidConfig(_)));
}

#[test]
fn test_configuration_sources_agree() {
    let value: Value = serde_json::from_str(r#"{"logging": true}"#).unwrap();

    let from_value = EmitterConfig::from_value(Some(&value)).unwrap();
    let from_toml = EmitterConfig::from_toml_str("logging = true").unwrap();

    assert_eq!(from_value, from_toml);
    assert!(from_value.validate().is_ok());
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn test_diagnostics_follow_logging_flag() {
    let sink = MemorySink::new();
    let emitter = EventEmitter::builder()
        .logging(true)
        .sink(Arc::new(sink.clone()))
        .build();

    emitter.register("a", |_| Ok(()));
    emitter.emit("b", &[]);

    assert_eq!(
        sink.messages(),
        vec![
            r#"[event-emitter] events: [{"event":"a","listeners":1}]"#.to_string(),
            "[event-emitter] Assertion failed: unknown event: b".to_string(),
        ]
    );
}

#[test]
fn test_tokens_keep_events_apart() {
    let emitter = EventEmitter::new();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let login = Token::new("auth");
    let logout = Token::new("auth");

    emitter
        .register(&login, push_into(&calls))
        .register("auth", |_| Err(ListenerError::failed("text id")));

    assert_eq!(emitter.try_emit(&login, &[json!("in")]).unwrap(), 1);
    assert!(matches!(
        emitter.try_emit(&logout, &[]),
        Err(EmitterError::UnknownEvent(_))
    ));
    assert_eq!(*calls.lock().unwrap(), vec![vec![json!("in")]]);
}

#[test]
fn test_emitter_shared_across_threads() {
    let emitter = EventEmitter::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    emitter.register("work", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let emitter = emitter.clone();
            std::thread::spawn(move || emitter.emit("work", &[]))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}
