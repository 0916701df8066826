// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::backends::stub::{
    InitWitness, Journal, Panicking, Recorder, Recording, Relay, ScriptedSource, Tally, Ticker,
};
use crate::backends::BuiltinRegistry;
use crate::config::{Config, ExecutorOptions, Link};
use crate::engine::{Hub, HubState};
use crate::errors::{HubError, PartError};
use crate::traits::{nothing, Part, PartContext, Produced};

/// End-to-end tests that run a real hub on real threads with scripted parts
#[cfg(test)]
mod tests {
    use super::*;

    fn config(modules: &[&str], links: &[(&str, &str)]) -> Config {
        Config {
            module_path: vec![],
            modules: modules.iter().map(|m| m.to_string()).collect(),
            module_map: links.iter().map(|(p, c)| Link::new(*p, *c)).collect(),
            executor_options: ExecutorOptions {
                idle_backoff_ms: Some(1),
                shutdown_grace_ms: Some(2_000),
            },
        }
    }

    fn recorder(registry: BuiltinRegistry, name: &str) -> (BuiltinRegistry, Recording) {
        let recording = Recording::default();
        let shared = Arc::clone(&recording);
        let registry = registry.register(name, move |_| Ok(Box::new(Recorder::new(Arc::clone(&shared)))));
        (registry, recording)
    }

    fn texts(recording: &Recording) -> Vec<String> {
        recording
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.as_text().unwrap_or("<opaque>").to_string())
            .collect()
    }

    fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        condition()
    }

    const PATIENCE: Duration = Duration::from_secs(5);

    #[test]
    fn test_producer_reaches_only_its_listener_in_order() {
        let registry = BuiltinRegistry::new()
            .register("a", |_| Ok(Box::new(ScriptedSource::new(vec![Ok(vec!["x", "y"])]))));
        let (registry, b) = recorder(registry, "b");
        let (registry, c) = recorder(registry, "c");

        let mut hub = Hub::new(config(&["a", "b", "c"], &[("a", "b")]), Arc::new(registry));
        hub.start().unwrap();
        assert_eq!(hub.state(), HubState::Running);
        assert_eq!(hub.part_names(), ["a", "b", "c"]);
        assert_eq!(hub.listeners_of("a"), vec!["b"]);

        assert!(wait_until(PATIENCE, || texts(&b).len() == 2));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(texts(&b), vec!["x", "y"]);
        assert!(texts(&c).is_empty());

        let report = hub.shutdown();
        assert!(report.is_clean(), "stalled: {:?}", report.stalled);
        assert_eq!(report.stopped.len(), 3);
        assert_eq!(hub.state(), HubState::Stopped);
    }

    #[test]
    fn test_fan_out_delivers_one_shared_copy_per_listener() {
        let registry = BuiltinRegistry::new()
            .register("source", |_| Ok(Box::new(ScriptedSource::new(vec![Ok(vec!["m"])]))));
        let (registry, left) = recorder(registry, "left");
        let (registry, right) = recorder(registry, "right");

        let mut hub = Hub::new(
            config(&["source", "left", "right"], &[("source", "left"), ("source", "right")]),
            Arc::new(registry),
        );
        hub.start().unwrap();

        assert!(wait_until(PATIENCE, || {
            texts(&left).len() == 1 && texts(&right).len() == 1
        }));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(texts(&left), vec!["m"]);
        assert_eq!(texts(&right), vec!["m"]);

        let l = left.lock().unwrap()[0].clone();
        let r = right.lock().unwrap()[0].clone();
        assert!(l.same_payload(&r));

        assert!(hub.shutdown().is_clean());
    }

    #[test]
    fn test_relay_chain_and_many_producers() {
        let registry = BuiltinRegistry::new()
            .register("first", |_| Ok(Box::new(ScriptedSource::new(vec![Ok(vec!["1a", "1b", "1c"])]))))
            .register("second", |_| Ok(Box::new(ScriptedSource::new(vec![Ok(vec!["2a", "2b"])]))))
            .register("relay", |_| Ok(Box::new(Relay)));
        let (registry, sink) = recorder(registry, "sink");

        let mut hub = Hub::new(
            config(
                &["first", "second", "relay", "sink"],
                &[("first", "relay"), ("second", "relay"), ("relay", "sink")],
            ),
            Arc::new(registry),
        );
        hub.start().unwrap();

        assert!(wait_until(PATIENCE, || texts(&sink).len() == 5));
        let received = texts(&sink);
        let from_first: Vec<_> = received.iter().filter(|t| t.starts_with('1')).collect();
        let from_second: Vec<_> = received.iter().filter(|t| t.starts_with('2')).collect();
        assert_eq!(from_first, ["1a", "1b", "1c"]);
        assert_eq!(from_second, ["2a", "2b"]);

        assert!(hub.shutdown().is_clean());
    }

    #[test]
    fn test_failing_cycles_do_not_stop_the_context() {
        let registry = BuiltinRegistry::new()
            .register("flaky", |_| {
                Ok(Box::new(ScriptedSource::new(vec![
                    Err(PartError::failed("first cycle fails")),
                    Ok(vec!["after error"]),
                ])))
            })
            .register("panicky", |_| Ok(Box::new(Panicking::on_cycle(1))));
        let (registry, sink) = recorder(registry, "sink");

        let mut hub = Hub::new(
            config(&["flaky", "panicky", "sink"], &[("flaky", "sink"), ("panicky", "sink")]),
            Arc::new(registry),
        );
        hub.start().unwrap();

        assert!(wait_until(PATIENCE, || texts(&sink).len() == 2));
        let mut received = texts(&sink);
        received.sort();
        assert_eq!(received, vec!["after error", "survived"]);

        assert!(hub.shutdown().is_clean());
    }

    #[test]
    fn test_every_init_finishes_before_any_produce() {
        let journal = Journal::default();
        let mut registry = BuiltinRegistry::new();
        for (name, delay_ms) in [("fast", 0u64), ("medium", 30), ("slow", 80)] {
            let journal = Arc::clone(&journal);
            registry = registry.register(name, move |_| {
                Ok(Box::new(
                    InitWitness::new(name, Arc::clone(&journal)).slow(Duration::from_millis(delay_ms)),
                ))
            });
        }

        let mut hub = Hub::new(config(&["fast", "medium", "slow"], &[]), Arc::new(registry));
        hub.start().unwrap();
        assert!(hub.signals().is_ready());

        assert!(wait_until(PATIENCE, || journal.lock().unwrap().len() == 6));
        let events = journal.lock().unwrap().clone();
        let last_init = events.iter().rposition(|e| e.starts_with("init:")).unwrap();
        let first_produce = events.iter().position(|e| e.starts_with("produce:")).unwrap();
        assert!(last_init < first_produce, "events out of order: {events:?}");
        assert!(events
            .iter()
            .filter(|e| e.starts_with("produce:"))
            .all(|e| e.ends_with(":ready")));

        assert!(hub.shutdown().is_clean());
    }

    #[test]
    fn test_unknown_reference_fails_before_any_context_exists() {
        let journal = Journal::default();
        let witness_journal = Arc::clone(&journal);
        let registry = BuiltinRegistry::new()
            .register("a", move |_| Ok(Box::new(InitWitness::new("a", Arc::clone(&witness_journal)))));

        let mut hub = Hub::new(config(&["a"], &[("a", "ghost")]), Arc::new(registry));
        match hub.start() {
            Err(HubError::UnknownPartReference { missing, .. }) => assert_eq!(missing, "ghost"),
            other => panic!("expected UnknownPartReference, got {other:?}"),
        }

        assert_eq!(hub.state(), HubState::Stopped);
        assert!(!hub.signals().is_ready());
        thread::sleep(Duration::from_millis(20));
        assert!(journal.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_plugin_is_skipped() {
        let registry = BuiltinRegistry::new()
            .register("a", |_| Ok(Box::new(ScriptedSource::new(vec![Ok(vec!["x"])]))));
        let (registry, b) = recorder(registry, "b");

        let mut hub = Hub::new(config(&["a", "b", "not_installed"], &[("a", "b")]), Arc::new(registry));
        hub.start().unwrap();
        assert_eq!(hub.part_names(), ["a", "b"]);
        assert!(wait_until(PATIENCE, || texts(&b) == vec!["x"]));

        assert!(hub.shutdown().is_clean());
    }

    #[test]
    fn test_link_to_skipped_plugin_is_fatal() {
        let registry = BuiltinRegistry::new()
            .register("a", |_| Ok(Box::new(ScriptedSource::new(vec![]))));

        let mut hub = Hub::new(config(&["a", "broken"], &[("a", "broken")]), Arc::new(registry));
        assert!(matches!(hub.start(), Err(HubError::UnknownPartReference { .. })));
    }

    #[test]
    fn test_hub_runs_once() {
        let registry = BuiltinRegistry::new()
            .register("a", |_| Ok(Box::new(ScriptedSource::new(vec![]))));
        let mut hub = Hub::new(config(&["a"], &[]), Arc::new(registry));

        hub.start().unwrap();
        assert!(matches!(hub.start(), Err(HubError::AlreadyStarted)));
        assert!(hub.shutdown().is_clean());
        assert!(matches!(hub.start(), Err(HubError::AlreadyStarted)));
    }

    #[test]
    fn test_shutdown_before_start() {
        let mut hub = Hub::new(config(&[], &[]), Arc::new(BuiltinRegistry::new()));
        assert_eq!(hub.state(), HubState::Created);

        let report = hub.shutdown();
        assert!(report.stopped.is_empty() && report.stalled.is_empty());
        assert_eq!(hub.state(), HubState::Stopped);
        assert!(matches!(hub.start(), Err(HubError::AlreadyStarted)));
    }

    #[test]
    fn test_empty_hub_starts_and_stops() {
        let mut hub = Hub::new(config(&[], &[]), Arc::new(BuiltinRegistry::new()));
        hub.start().unwrap();
        assert!(hub.signals().is_ready());
        assert!(hub.part_names().is_empty());
        assert!(hub.shutdown().is_clean());
    }

    #[test]
    fn test_failed_init_does_not_block_startup() {
        let journal = Journal::default();
        let witness_journal = Arc::clone(&journal);
        let registry = BuiltinRegistry::new()
            .register("broken", move |_| {
                Ok(Box::new(InitWitness::new("broken", Arc::clone(&witness_journal)).failing()))
            })
            .register("a", |_| Ok(Box::new(ScriptedSource::new(vec![Ok(vec!["still works"])]))));
        let (registry, b) = recorder(registry, "b");

        let mut hub = Hub::new(
            config(&["broken", "a", "b"], &[("a", "b"), ("broken", "b")]),
            Arc::new(registry),
        );
        hub.start().unwrap();

        assert!(wait_until(PATIENCE, || texts(&b) == vec!["still works"]));
        thread::sleep(Duration::from_millis(30));
        assert_eq!(*journal.lock().unwrap(), vec!["init:broken"]);

        assert!(hub.shutdown().is_clean());
    }

    #[test]
    fn test_messages_for_failed_init_consumer_are_not_retained() {
        let tally = Arc::new(Tally::default());
        let source_tally = Arc::clone(&tally);
        let registry = BuiltinRegistry::new()
            .register("ticker", move |_| Ok(Box::new(Ticker(Arc::clone(&source_tally)))))
            .register("broken", |_| Ok(Box::new(InitWitness::new("broken", Journal::default()).failing())));

        let mut hub = Hub::new(
            config(&["ticker", "broken"], &[("ticker", "broken")]),
            Arc::new(registry),
        );
        hub.start().unwrap();

        assert!(wait_until(PATIENCE, || tally.made() >= 50));
        assert!(tally.retained() <= 2, "retained {} of {}", tally.retained(), tally.made());

        assert!(hub.shutdown().is_clean());
        assert_eq!(tally.retained(), 0);
    }

    #[test]
    fn test_shutdown_wakes_consumers_blocked_on_empty_inbox() {
        let registry = BuiltinRegistry::new()
            .register("quiet", |_| Ok(Box::new(ScriptedSource::new(vec![]))));
        let (registry, _first) = recorder(registry, "first");
        let (registry, _second) = recorder(registry, "second");

        let mut hub = Hub::new(
            config(&["quiet", "first", "second"], &[("quiet", "first"), ("quiet", "second")]),
            Arc::new(registry),
        );
        hub.start().unwrap();
        thread::sleep(Duration::from_millis(30));

        let began = Instant::now();
        let report = hub.shutdown();
        assert!(report.is_clean());
        assert_eq!(report.stopped, ["first", "quiet", "second"]);
        assert!(began.elapsed() < Duration::from_secs(1));
        assert!(hub.signals().is_finished());
    }

    /// Ignores the hub entirely and sleeps through every cycle.
    struct Sleepy(Duration);

    impl Part for Sleepy {
        fn produce(&mut self, _ctx: &mut PartContext<'_>) -> Produced {
            thread::sleep(self.0);
            nothing()
        }

        fn kind(&self) -> &'static str {
            "sleepy"
        }
    }

    #[test]
    fn test_stalled_context_is_reported_and_retried() {
        let registry = BuiltinRegistry::new()
            .register("sleepy", |_| Ok(Box::new(Sleepy(Duration::from_millis(600)))));
        let (registry, _sink) = recorder(registry, "sink");

        let mut cfg = config(&["sleepy", "sink"], &[("sleepy", "sink")]);
        cfg.executor_options.shutdown_grace_ms = Some(100);
        let mut hub = Hub::new(cfg, Arc::new(registry));
        hub.start().unwrap();
        thread::sleep(Duration::from_millis(20));

        let first = hub.shutdown();
        assert_eq!(first.stalled, ["sleepy"]);
        assert_eq!(first.stopped, ["sink"]);
        assert_eq!(hub.state(), HubState::ShuttingDown);

        thread::sleep(Duration::from_millis(800));
        let second = hub.shutdown();
        assert!(second.is_clean());
        assert_eq!(second.stopped, ["sleepy"]);
        assert_eq!(hub.state(), HubState::Stopped);
    }
}
