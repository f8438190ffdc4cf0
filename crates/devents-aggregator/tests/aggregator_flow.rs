//! End-to-end dispatch loop tests: events and fault signals in, counter
//! state out.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use async_trait::async_trait;
use tokio::sync::mpsc;

use devents_aggregator::aggregator::Aggregator;
use devents_aggregator::collector::Collector;
use devents_aggregator::config::MetricsSection;
use devents_core::{DeventsError, Event, EventType};

fn test_config(labels: &[&str]) -> MetricsSection {
    MetricsSection {
        path: "/metrics".into(),
        // OS-assigned port keeps parallel tests from colliding.
        port: 0,
        labels: labels.iter().map(|s| s.to_string()).collect(),
    }
}

fn event(kind: EventType, action: &str, attrs: &[(&str, &str)]) -> Event {
    Event {
        kind,
        action: action.to_string(),
        attributes: attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Feed faults then events through the dispatch loop, close the producers,
/// and return the rendered exposition document once the loop has drained.
async fn dispatch(agg: Aggregator, faults: Vec<DeventsError>, events: Vec<Event>) -> String {
    let metrics = agg.metrics();

    let (event_tx, event_rx) = mpsc::channel(64);
    let (error_tx, error_rx) = mpsc::channel(16);

    let loop_task = tokio::spawn(agg.run(event_rx, error_rx));

    for fault in faults {
        error_tx.send(fault).await.unwrap();
    }
    for ev in events {
        event_tx.send(ev).await.unwrap();
    }
    drop(event_tx);
    drop(error_tx);

    loop_task.await.unwrap();
    metrics.render().unwrap()
}

#[tokio::test]
async fn container_event_with_custom_label() {
    let agg = Aggregator::new(&test_config(&["team"])).unwrap();
    let doc = dispatch(
        agg,
        vec![],
        vec![event(EventType::Container, "start", &[("team", "infra")])],
    )
    .await;

    assert_eq!(
        common::sample(
            &doc,
            "devents_container_action",
            &[("action", "start"), ("team", "infra")]
        ),
        Some(1)
    );
}

#[tokio::test]
async fn container_event_without_custom_label() {
    let agg = Aggregator::new(&test_config(&["team"])).unwrap();
    let doc = dispatch(
        agg,
        vec![],
        vec![event(EventType::Container, "start", &[])],
    )
    .await;

    assert_eq!(
        common::sample(
            &doc,
            "devents_container_action",
            &[("action", "start"), ("team", "")]
        ),
        Some(1)
    );
}

#[tokio::test]
async fn network_event_fixed_schema() {
    let agg = Aggregator::new(&test_config(&[])).unwrap();
    let doc = dispatch(
        agg,
        vec![],
        vec![event(
            EventType::Network,
            "connect",
            &[("name", "bridge"), ("type", "overlay")],
        )],
    )
    .await;

    assert_eq!(
        common::sample(
            &doc,
            "devents_network_action",
            &[("action", "connect"), ("name", "bridge"), ("type", "overlay")]
        ),
        Some(1)
    );
}

#[tokio::test]
async fn unrecognized_category_touches_nothing() {
    let agg = Aggregator::new(&test_config(&[])).unwrap();
    let doc = dispatch(
        agg,
        vec![],
        vec![event(EventType::Other, "x", &[])],
    )
    .await;

    assert!(!doc.contains("devents_"));
}

#[tokio::test]
async fn repeated_volume_events_accumulate() {
    let agg = Aggregator::new(&test_config(&[])).unwrap();
    let events = (0..100)
        .map(|_| event(EventType::Volume, "mount", &[("driver", "local")]))
        .collect();
    let doc = dispatch(agg, vec![], events).await;

    assert_eq!(
        common::sample(
            &doc,
            "devents_volume_action",
            &[("action", "mount"), ("driver", "local")]
        ),
        Some(100)
    );
}

#[tokio::test]
async fn loop_survives_source_errors() {
    let agg = Aggregator::new(&test_config(&[])).unwrap();
    let doc = dispatch(
        agg,
        vec![
            DeventsError::Source("stream reset".into()),
            DeventsError::Source("stream reset again".into()),
        ],
        vec![event(EventType::Image, "pull", &[])],
    )
    .await;

    assert_eq!(
        common::sample(&doc, "devents_image_action", &[("action", "pull")]),
        Some(1)
    );
}

/// In-memory producer standing in for a platform poller.
struct ScriptedCollector {
    events: Vec<Event>,
}

#[async_trait]
impl Collector for ScriptedCollector {
    async fn run(
        self: Box<Self>,
        events: mpsc::Sender<Event>,
        errors: mpsc::Sender<DeventsError>,
    ) {
        let _ = errors
            .send(DeventsError::Source("poll hiccup".into()))
            .await;
        for ev in self.events {
            if events.send(ev).await.is_err() {
                return;
            }
        }
    }
}

#[tokio::test]
async fn collector_seam_feeds_the_loop() {
    let agg = Aggregator::new(&test_config(&[])).unwrap();
    let metrics = agg.metrics();

    let (event_tx, event_rx) = mpsc::channel(64);
    let (error_tx, error_rx) = mpsc::channel(16);

    let producer = Box::new(ScriptedCollector {
        events: vec![
            event(EventType::Plugin, "enable", &[("name", "rex")]),
            event(EventType::Plugin, "disable", &[("name", "rex")]),
        ],
    });
    tokio::spawn(producer.run(event_tx, error_tx));

    agg.run(event_rx, error_rx).await;

    let doc = metrics.render().unwrap();
    assert_eq!(
        common::sample(
            &doc,
            "devents_plugin_action",
            &[("action", "enable"), ("name", "rex")]
        ),
        Some(1)
    );
    assert_eq!(
        common::sample(
            &doc,
            "devents_plugin_action",
            &[("action", "disable"), ("name", "rex")]
        ),
        Some(1)
    );
}

#[tokio::test]
async fn loop_survives_server_bind_failure() {
    // Occupy a port so the metrics server cannot bind it.
    let blocker = std::net::TcpListener::bind(("0.0.0.0", 0)).unwrap();
    let port = blocker.local_addr().unwrap().port();

    let cfg = MetricsSection {
        path: "/metrics".into(),
        port,
        labels: vec![],
    };
    let agg = Aggregator::new(&cfg).unwrap();

    let doc = dispatch(
        agg,
        vec![],
        vec![
            event(EventType::Volume, "mount", &[("driver", "local")]),
            event(EventType::Image, "pull", &[]),
        ],
    )
    .await;

    assert_eq!(
        common::sample(
            &doc,
            "devents_volume_action",
            &[("action", "mount"), ("driver", "local")]
        ),
        Some(1)
    );
    assert_eq!(
        common::sample(&doc, "devents_image_action", &[("action", "pull")]),
        Some(1)
    );
}
