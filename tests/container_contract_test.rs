//! Behavior shared by every container consumer: ordering, single delivery,
//! composability, cancellation.

use std::future::IntoFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::{stream, StreamExt};
use reactive_people::{Flux, Mono, ReactiveError, Signal, Termination};

#[test]
fn test_filter_then_reduce_matches_reduce_of_filtered_list() {
    let source: Vec<i32> = vec![4, 8, 15, 16, 23, 42];

    for wanted in [4, 15, 42, 7] {
        let filtered: Vec<i32> = source.iter().copied().filter(|v| *v == wanted).collect();

        let next = Flux::just(source.clone()).filter(move |v| *v == wanted).next().block();
        assert_eq!(next, Ok(filtered.first().copied()));

        let single = Flux::just(source.clone()).filter(move |v| *v == wanted).single().block();
        match filtered.len() {
            1 => assert_eq!(single, Ok(Some(wanted))),
            _ => assert!(single.unwrap_err().is_ambiguous_or_empty()),
        }
    }
}

#[test]
fn test_mono_terminal_event_is_computed_once() {
    let evaluations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evaluations);
    let mono = Mono::from_future(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Some("done"))
    });

    let observers: Vec<_> = (0..4).map(|_| mono.clone()).collect();
    for observer in observers {
        assert_eq!(observer.block(), Ok(Some("done")));
    }
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_flux_restarts_for_each_observer() {
    let passes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&passes);
    let flux = Flux::defer(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        stream::iter(vec![Ok(1), Ok(2)])
    });

    assert_eq!(flux.clone().count().block(), Ok(Some(2)));
    assert_eq!(flux.block_last(), Ok(Some(2)));
    assert_eq!(passes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_mono_await_from_spawned_tasks() {
    let mono = Mono::just(5).map(|v| v * 2);

    let a = tokio::spawn(mono.clone().into_future());
    let b = tokio::spawn(mono.into_future());

    assert_eq!(a.await.unwrap(), Ok(Some(10)));
    assert_eq!(b.await.unwrap(), Ok(Some(10)));
}

#[tokio::test]
async fn test_flux_subscribe_with_reports_completion_after_elements() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let on_next = Arc::clone(&events);
    let on_complete = Arc::clone(&events);

    let subscription = Flux::just(vec!["a", "b"]).subscribe_with(
        move |v| on_next.lock().unwrap().push(v.to_string()),
        |err| panic!("unexpected error {err}"),
        move || on_complete.lock().unwrap().push("complete".to_string()),
    );

    assert_eq!(subscription.done().await, Ok(Termination::Completed));
    assert_eq!(*events.lock().unwrap(), vec!["a", "b", "complete"]);
}

#[tokio::test]
async fn test_flux_error_skips_completion_handler() {
    let completed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completed);
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);

    let subscription = Flux::<i32>::error(ReactiveError::upstream("boom")).subscribe_with(
        |_| {},
        move |err| sink.lock().unwrap().push(err),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    assert_eq!(subscription.done().await, Ok(Termination::ErrorHandled));
    assert_eq!(completed.load(Ordering::SeqCst), 0);
    assert_eq!(errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unhandled_flux_error_is_returned_to_caller() {
    let subscription = Flux::just(vec!["1", "two"])
        .try_map(str::parse::<u8>)
        .subscribe(|_| {});

    assert!(matches!(
        subscription.done().await,
        Err(ReactiveError::TransformFailure(_))
    ));
}

#[tokio::test]
async fn test_dispose_stops_delivery_without_terminal_handler() {
    let delivered = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&delivered);
    let completed = Arc::new(AtomicUsize::new(0));
    let completion = Arc::clone(&completed);

    let slow = Flux::defer(|| {
        stream::iter(1..=100).then(|v| async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(v)
        })
    });

    let subscription = slow.subscribe_with(
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
        |err| panic!("unexpected error {err}"),
        move || {
            completion.fetch_add(1, Ordering::SeqCst);
        },
    );

    tokio::time::sleep(Duration::from_millis(50)).await;
    subscription.dispose();
    assert!(subscription.is_disposed());

    assert_eq!(subscription.done().await, Ok(Termination::Cancelled));
    assert!(delivered.load(Ordering::SeqCst) < 100);
    assert_eq!(completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_dropping_receiver_stops_channel_producer() {
    let produced = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&produced);
    let flux = Flux::just(0..1000).map(move |v| {
        counter.fetch_add(1, Ordering::SeqCst);
        v
    });

    let mut rx = flux.to_channel(1);
    assert_eq!(rx.recv().await, Some(Signal::Next(0)));
    drop(rx);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(produced.load(Ordering::SeqCst) < 1000);
}

#[tokio::test]
async fn test_into_stream_preserves_order() {
    let items: Vec<_> = Flux::just(vec![3, 1, 2])
        .into_stream()
        .collect::<Vec<_>>()
        .await;

    assert_eq!(items, vec![Ok(3), Ok(1), Ok(2)]);
}
