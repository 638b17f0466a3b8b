//! Stress tests for the queue and the pool.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sumsq::prelude::*;

#[test]
fn test_queue_survives_racing_push_pop() {
    const PUSHERS: usize = 4;
    const POPPERS: usize = 4;
    const PER_PUSHER: i64 = 2_000;

    let queue = SharedQueue::new();
    let done = Arc::new(AtomicBool::new(false));

    let mut popped_sums = Vec::new();

    thread::scope(|s| {
        let mut pushers = Vec::new();
        for p in 0..PUSHERS {
            let queue = queue.clone();
            pushers.push(s.spawn(move || {
                for i in 0..PER_PUSHER {
                    queue.push(Task::compute(p as i64 * PER_PUSHER + i));
                }
            }));
        }

        let mut poppers = Vec::new();
        for _ in 0..POPPERS {
            let queue = queue.clone();
            let done = done.clone();
            poppers.push(s.spawn(move || {
                let mut sum = 0i64;
                loop {
                    match queue.pop() {
                        Some(task) => sum += task.value(),
                        None if done.load(Ordering::Acquire) && queue.is_empty() => break,
                        None => thread::yield_now(),
                    }
                }
                sum
            }));
        }

        for pusher in pushers {
            pusher.join().unwrap();
        }
        done.store(true, Ordering::Release);

        for popper in poppers {
            popped_sums.push(popper.join().unwrap());
        }
    });

    // No task lost, none duplicated.
    let total = (PUSHERS as i64 * PER_PUSHER) * (PUSHERS as i64 * PER_PUSHER - 1) / 2;
    assert_eq!(popped_sums.iter().sum::<i64>(), total);
    assert!(queue.is_empty());
}

#[test]
fn test_large_run_matches_sequential_truth() {
    const N: i64 = 1_000;

    let mut source = String::new();
    for v in 0..N {
        source.push_str(&format!("p {}\n", v));
    }

    let config = Config::builder()
        .workers(8)
        .time_unit(Duration::ZERO)
        .build()
        .unwrap();
    let coord = Coordinator::new(config).unwrap();
    coord.load(Cursor::new(source)).unwrap();
    let report = coord.run().unwrap();

    let expected: i64 = (0..N).map(|v| v * v).sum();
    assert_eq!(report.stats.sum, expected);
    assert_eq!(report.stats.odd_count, (N / 2) as u64);
    assert_eq!(report.stats.min, Some(0));
    assert_eq!(report.stats.max, Some(N - 1));
    assert_eq!(report.tasks_executed, N as u64);
}

#[test]
#[ignore] // Run with --ignored flag
fn stress_test_interleaved_waits() {
    let mut source = String::new();
    for v in 0..500 {
        source.push_str(&format!("p {}\n", v));
        if v % 25 == 0 {
            source.push_str("w 0\n");
        }
    }

    for _ in 0..20 {
        let config = Config::builder()
            .workers(4)
            .time_unit(Duration::ZERO)
            .build()
            .unwrap();
        let coord = Coordinator::new(config).unwrap();
        coord.load(Cursor::new(source.as_str())).unwrap();
        let report = coord.run().unwrap();

        assert_eq!(report.stats.sum, (0..500i64).map(|v| v * v).sum::<i64>());
        assert!(report.all_workers_ok());
    }
}

#[test]
#[ignore]
fn stress_test_many_short_runs() {
    for workers in 1..=16 {
        let config = Config::builder()
            .workers(workers)
            .time_unit(Duration::ZERO)
            .build()
            .unwrap();
        let coord = Coordinator::new(config).unwrap();
        coord.load(Cursor::new("p 3\np 4\nw 0\np 5\n")).unwrap();
        let report = coord.run().unwrap();

        assert_eq!(report.stats.sum, 50, "workers={}", workers);
    }
}
