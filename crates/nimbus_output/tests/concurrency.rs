//! Concurrent resolution tests for `nimbus_output`.
//!
//! These tests verify that outputs are resolved exactly once no matter how
//! many tasks or threads wait on them.

use core::sync::atomic::{AtomicUsize, Ordering};
use core::time::Duration;
use std::sync::Arc;
use std::thread;

use nimbus_output::{DependencySet, Output, OutputData, Resource, apply};

/// Test many tasks awaiting the same output on a multi-threaded runtime.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_share_one_resolution() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let output = Output::from_future(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(OutputData::known("vpc-123".to_string()))
    });

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let output = output.clone();
            tokio::spawn(async move { output.resolve().await })
        })
        .collect();

    let mut resolved = Vec::new();
    for handle in handles {
        resolved.push(handle.await.expect("task panicked").unwrap());
    }

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    for data in &resolved {
        assert!(Arc::ptr_eq(data, &resolved[0]));
    }
}

/// Test that a deferred output can be resolved from a plain thread.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn resolver_can_move_to_another_thread() {
    let engine = Resource::new("aws:ec2/vpc:Vpc", "main");
    let (output, resolver) = Output::<String>::deferred();
    let derived = output.map(|id| format!("{id}/subnets"));

    let producer_engine = engine.clone();
    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        resolver.resolve(OutputData::create(
            "vpc-1".to_string(),
            true,
            false,
            DependencySet::single(producer_engine),
        ));
    });

    let data = derived.resolve().await.unwrap();
    producer.join().expect("producer thread panicked");

    assert_eq!(data.value().map(String::as_str), Some("vpc-1/subnets"));
    assert!(data.dependencies().contains(&engine));
}

/// Test that completion order of `apply` inputs does not affect the result.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn apply_result_is_independent_of_completion_order() {
    let a = Resource::new("test:index:Thing", "a");
    let b = Resource::new("test:index:Thing", "b");

    let slow = {
        let a = a.clone();
        Output::from_future(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(OutputData::create(1, true, true, DependencySet::single(a)))
        })
    };
    let fast = {
        let b = b.clone();
        Output::from_future(async move {
            Ok(OutputData::create(2, true, false, DependencySet::single(b)))
        })
    };

    let forward = apply((slow.clone(), fast.clone()), |(x, y)| x + y);
    let backward = apply((fast, slow), |(y, x)| x + y);

    let (forward, backward) = tokio::join!(forward.resolve(), backward.resolve());
    let (forward, backward) = (forward.unwrap(), backward.unwrap());

    assert_eq!(forward.value(), backward.value());
    assert_eq!(forward.is_secret(), backward.is_secret());
    assert_eq!(forward.dependencies(), backward.dependencies());
    assert!(forward.dependencies().contains(&a) && forward.dependencies().contains(&b));
}

/// Test that a long chain of derived outputs evaluates each step once.
#[tokio::test]
async fn derived_chain_runs_each_transform_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut output = Output::known(0_u32);
    for _ in 0..10 {
        let calls = Arc::clone(&calls);
        output = output.map(move |x| {
            calls.fetch_add(1, Ordering::SeqCst);
            x + 1
        });
    }

    let first = output.resolve().await.unwrap();
    let second = output.resolve().await.unwrap();

    assert_eq!(first.value(), Some(&10));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}
