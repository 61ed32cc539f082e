//! Behaviour of a UI context running on its own thread

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rstest::rstest;
use ui_dispatch::{DispatchConfig, DispatchError, UiContext};

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn test_tasks_run_in_fifo_order_on_named_thread() {
    let context = UiContext::spawn(DispatchConfig::default().with_thread_name("ui-fifo")).unwrap();
    let (tx, rx) = mpsc::channel();

    for i in 0..50 {
        let tx = tx.clone();
        context
            .post(move || {
                let name = thread::current().name().map(str::to_string);
                tx.send((i, name)).unwrap();
            })
            .unwrap();
    }

    for expected in 0..50 {
        let (i, name) = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(i, expected);
        assert_eq!(name.as_deref(), Some("ui-fifo"));
    }
    context.shutdown();
}

#[test]
fn test_caller_is_not_ui_thread() {
    let context = UiContext::spawn(DispatchConfig::default()).unwrap();
    assert!(!context.is_ui_thread());

    let (tx, rx) = mpsc::channel();
    let inner = context.clone();
    context
        .post(move || tx.send(inner.is_ui_thread()).unwrap())
        .unwrap();
    assert!(rx.recv_timeout(WAIT).unwrap());
    context.shutdown();
}

#[test]
fn test_panicking_task_does_not_stop_loop() {
    let context = UiContext::spawn(DispatchConfig::default()).unwrap();
    let (tx, rx) = mpsc::channel();

    context.post(|| panic!("task failure")).unwrap();
    context.post(move || tx.send("still running").unwrap()).unwrap();

    assert_eq!(rx.recv_timeout(WAIT).unwrap(), "still running");
    context.shutdown();
}

#[test]
fn test_shutdown_drains_queued_tasks_then_closes() {
    let context = UiContext::spawn(DispatchConfig::default()).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    for _ in 0..10 {
        let counter = Arc::clone(&counter);
        context
            .post(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
    }
    context.shutdown();

    assert_eq!(counter.load(Ordering::SeqCst), 10);
    assert!(context.is_closed());
    assert!(matches!(context.post(|| {}), Err(DispatchError::Closed)));
}

#[rstest]
#[case(1)]
#[case(4)]
fn test_background_results_return_to_ui_thread(#[case] threads: usize) {
    let context =
        UiContext::spawn(DispatchConfig::default().with_background_threads(threads)).unwrap();
    let (tx, rx) = mpsc::channel();

    for i in 0..8 {
        let poster = context.poster();
        let ui = context.clone();
        let tx = tx.clone();
        context
            .spawn_background(move || {
                let on_pool = !ui.is_ui_thread();
                let _ = poster.post(move || tx.send((i, on_pool, ui.is_ui_thread())).unwrap());
            })
            .unwrap();
    }

    let mut seen: Vec<_> = (0..8).map(|_| rx.recv_timeout(WAIT).unwrap()).collect();
    seen.sort_by_key(|(i, _, _)| *i);
    for (i, (index, on_pool, on_ui)) in seen.into_iter().enumerate() {
        assert_eq!(index, i);
        assert!(on_pool);
        assert!(on_ui);
    }
    context.shutdown();
}
