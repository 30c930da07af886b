//! Component tests: share partition, done signal, replicator pool,
//! digest pool, aggregator.

use blockmill::pipeline::{
    done_signal, drain_records, spawn_digesters, spawn_replicators, share_for,
};
use blockmill::types::{Block, DigestRecord};
use crossbeam_channel::{TryRecvError, bounded};
use std::thread;
use std::time::Duration;

fn block(label: &str, data: &[u8]) -> Block {
    Block::from_vec(label, data.to_vec())
}

// --- share_for ---

#[test]
fn test_share_exact_division() {
    for i in 0..2 {
        assert_eq!(share_for(6, 2, i), 3);
    }
}

#[test]
fn test_share_remainder_goes_to_first_producers() {
    assert_eq!(share_for(10, 4, 0), 3);
    assert_eq!(share_for(10, 4, 1), 3);
    assert_eq!(share_for(10, 4, 2), 2);
    assert_eq!(share_for(10, 4, 3), 2);
}

#[test]
fn test_share_more_producers_than_replicas() {
    let shares: Vec<usize> = (0..5).map(|i| share_for(2, 5, i)).collect();
    assert_eq!(shares, vec![1, 1, 0, 0, 0]);
}

#[test]
fn test_share_zero_replicas() {
    for i in 0..3 {
        assert_eq!(share_for(0, 3, i), 0);
    }
}

#[test]
fn test_shares_always_sum_to_replicas() {
    for replicas in [0, 1, 7, 50, 1000] {
        for producers in [1, 2, 3, 10, 17] {
            let sum: usize = (0..producers).map(|i| share_for(replicas, producers, i)).sum();
            assert_eq!(sum, replicas, "r={replicas} p={producers}");
        }
    }
}

// --- done signal ---

#[test]
fn test_done_signal_starts_lowered() {
    let (guard, signal) = done_signal();
    assert!(!guard.is_raised());
    assert!(!signal.is_raised());
}

#[test]
fn test_done_signal_raise_is_idempotent() {
    let (mut guard, signal) = done_signal();
    guard.raise();
    guard.raise();
    assert!(guard.is_raised());
    assert!(signal.is_raised());
}

#[test]
fn test_done_signal_guard_drop_raises() {
    let (guard, signal) = done_signal();
    let other = signal.clone();
    drop(guard);
    assert!(signal.is_raised());
    assert!(other.is_raised());
}

// --- replicator pool ---

#[test]
fn test_replicators_conserve_replica_count() {
    let block = block("b", b"xyz");
    let (data_tx, data_rx) = bounded::<Block>(64);
    let handles = spawn_replicators(&data_tx, &block, 24, 3);
    drop(data_tx);

    let mut received = 0;
    while data_rx.recv().is_ok() {
        received += 1;
    }
    assert_eq!(received, 24);

    let pushed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(pushed, 24);
}

#[test]
fn test_data_channel_closes_after_last_producer() {
    let block = block("b", b"xyz");
    let (data_tx, data_rx) = bounded::<Block>(8);
    let handles = spawn_replicators(&data_tx, &block, 4, 2);
    drop(data_tx);

    for h in handles {
        h.join().unwrap();
    }
    for _ in 0..4 {
        assert!(data_rx.recv().is_ok());
    }
    assert!(data_rx.recv().is_err(), "channel should be closed and empty");
}

#[test]
fn test_producers_block_on_full_channel() {
    let block = block("b", b"xyz");
    let (data_tx, data_rx) = bounded::<Block>(4);
    let handles = spawn_replicators(&data_tx, &block, 32, 2);
    drop(data_tx);

    // No consumer yet: the channel fills to capacity and the producers park.
    thread::sleep(Duration::from_millis(200));
    assert_eq!(data_rx.len(), 4);
    assert!(handles.iter().any(|h| !h.is_finished()));

    let mut received = 0;
    while data_rx.recv().is_ok() {
        received += 1;
    }
    assert_eq!(received, 32);
    for h in handles {
        h.join().unwrap();
    }
}

// --- digest pool ---

#[test]
fn test_digesters_deliver_one_record_per_copy() {
    let block = block("b", b"hello world!");
    let (data_tx, data_rx) = bounded::<Block>(16);
    for _ in 0..5 {
        data_tx.send(block.clone()).unwrap();
    }
    drop(data_tx);

    let (record_tx, record_rx) = bounded::<DigestRecord>(16);
    let (_guard, done) = done_signal();
    let handles = spawn_digesters(&data_rx, &record_tx, &done, 2, true);
    drop(record_tx);

    let mut records = Vec::new();
    while let Ok(record) = record_rx.recv() {
        records.push(record);
    }
    assert_eq!(records.len(), 5);
    for record in &records {
        assert_eq!(record.identity, "b");
        assert_eq!(record.size, 12);
        assert!(record.digest.is_some());
    }

    let delivered: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(delivered, 5);
}

#[test]
fn test_size_only_records_have_no_digest() {
    let block = block("b", b"data");
    let (data_tx, data_rx) = bounded::<Block>(4);
    data_tx.send(block).unwrap();
    drop(data_tx);

    let (record_tx, record_rx) = bounded::<DigestRecord>(4);
    let (_guard, done) = done_signal();
    let handles = spawn_digesters(&data_rx, &record_tx, &done, 1, false);
    drop(record_tx);

    let record = record_rx.recv().unwrap();
    assert_eq!(record.size, 4);
    assert!(record.digest.is_none());
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn test_record_channel_closes_after_last_digester() {
    let (data_tx, data_rx) = bounded::<Block>(1);
    drop(data_tx); // already closed and empty

    let (record_tx, record_rx) = bounded::<DigestRecord>(1);
    let (_guard, done) = done_signal();
    let handles = spawn_digesters(&data_rx, &record_tx, &done, 3, true);
    drop(record_tx);

    assert!(record_rx.recv().is_err(), "closes once all workers exit");
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn test_raised_signal_abandons_parked_send() {
    let block = block("b", b"payload");
    let (data_tx, data_rx) = bounded::<Block>(4);
    for _ in 0..3 {
        data_tx.send(block.clone()).unwrap();
    }
    drop(data_tx);

    // Rendezvous record channel with no aggregator: the worker digests the
    // first copy and parks in the send.
    let (record_tx, record_rx) = bounded::<DigestRecord>(0);
    let (mut guard, done) = done_signal();
    let handles = spawn_digesters(&data_rx, &record_tx, &done, 1, true);
    drop(record_tx);

    thread::sleep(Duration::from_millis(100));
    guard.raise();

    let delivered: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(delivered, 0, "in-flight record is dropped, not delivered");
    assert!(matches!(
        record_rx.try_recv(),
        Err(TryRecvError::Disconnected)
    ));
}

// --- aggregator ---

fn record(identity: &str, size: u64) -> DigestRecord {
    DigestRecord {
        identity: identity.to_string(),
        digest: None,
        size,
    }
}

#[test]
fn test_aggregator_empty_channel() {
    let (record_tx, record_rx) = bounded::<DigestRecord>(1);
    drop(record_tx);
    assert!(drain_records(record_rx).is_empty());
}

#[test]
fn test_aggregator_last_write_wins_and_counts() {
    let (record_tx, record_rx) = bounded::<DigestRecord>(8);
    for size in [1, 2, 3] {
        record_tx.send(record("same", size)).unwrap();
    }
    drop(record_tx);

    let summary = drain_records(record_rx);
    assert_eq!(summary.len(), 1);
    let stats = &summary["same"];
    assert_eq!(stats.size, 3);
    assert_eq!(stats.records, 3);
}

#[test]
fn test_aggregator_distinct_identities() {
    let (record_tx, record_rx) = bounded::<DigestRecord>(8);
    record_tx.send(record("a", 10)).unwrap();
    record_tx.send(record("b", 20)).unwrap();
    record_tx.send(record("a", 10)).unwrap();
    drop(record_tx);

    let summary = drain_records(record_rx);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary["a"].records, 2);
    assert_eq!(summary["b"].records, 1);
}
