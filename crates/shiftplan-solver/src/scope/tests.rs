//! Tests for the search scope.

use super::*;
use crate::termination::{NoTermination, NodeCountTermination};
use shiftplan_core::ShiftPattern;

#[test]
fn test_node_counting() {
    let scope = SearchScope::new(NoTermination);
    scope.record_nodes(10);
    scope.record_nodes(5);
    assert_eq!(scope.node_count(), 15);
    assert!(!scope.should_terminate());
}

#[test]
fn test_termination_latches() {
    let scope = SearchScope::new(NodeCountTermination::new(3));
    assert!(!scope.should_terminate());
    scope.record_nodes(3);
    assert!(!scope.is_terminated());
    assert!(scope.should_terminate());
    assert!(scope.is_terminated());
    assert!(scope.should_terminate());
}

#[test]
fn test_ticker_flushes_in_batches() {
    let scope = SearchScope::new(NoTermination);
    {
        let mut ticker = NodeTicker::new(&scope);
        for _ in 0..POLL_INTERVAL - 1 {
            assert!(!ticker.tick());
        }
        assert_eq!(scope.node_count(), 0);
        assert!(!ticker.tick());
        assert_eq!(scope.node_count(), POLL_INTERVAL);
        ticker.tick();
    }
    assert_eq!(scope.node_count(), POLL_INTERVAL + 1);
}

#[test]
fn test_ticker_stops_after_termination() {
    let scope = SearchScope::new(NodeCountTermination::new(POLL_INTERVAL));
    let mut ticker = NodeTicker::new(&scope);
    let mut ticks = 0;
    while !ticker.tick() {
        ticks += 1;
    }
    assert_eq!(ticks, POLL_INTERVAL - 1);
    assert!(ticker.is_stopped());
    assert!(NodeTicker::new(&scope).tick());
}

#[test]
fn test_offer_installs_improvements_only() {
    let scope = SearchScope::new(NoTermination).with_thread_count(0);
    assert_eq!(scope.thread_count(), 1);

    let long = ShiftPattern::new(6, 0, 6).unwrap();
    let short = ShiftPattern::new(6, 0, 4).unwrap();
    let a = Assignment::from_counts(6, &[long], &[1]).unwrap();
    let b = Assignment::from_counts(6, &[short], &[1]).unwrap();

    assert!(scope.offer(0, a.clone()));
    assert!(scope.offer(0, b));
    assert!(!scope.offer(0, a));
    assert_eq!(scope.incumbent().upper_bound(), 4);
}

#[test]
fn test_tickers_on_many_workers_sum_up() {
    let scope = SearchScope::new(NoTermination).with_thread_count(4);

    rayon::scope(|s| {
        for _ in 0..4 {
            s.spawn(|_| {
                let mut ticker = NodeTicker::new(&scope);
                for _ in 0..1000 {
                    ticker.tick();
                }
            });
        }
    });

    assert_eq!(scope.node_count(), 4000);
    assert!(!scope.is_terminated());
}
