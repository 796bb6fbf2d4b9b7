//! The time-sorted event store and per-series queries.

use devscope::foundation::{Event, TransitionKind, Value};
use devscope::trace::{TraceLoader, TraceStore};
use proptest::prelude::*;

const QUEUE: &str = include_str!("../fixtures/queue.xml");

fn queue_store() -> TraceStore {
    TraceStore::new(TraceLoader::new().load_str(QUEUE).unwrap())
}

#[test]
fn models_and_paths_in_first_seen_order() {
    let store = queue_store();
    assert_eq!(store.models_present(), vec!["root.queue", "root.server"]);
    assert_eq!(
        store.paths_for("root.queue"),
        vec!["length", "open", "job.id", "job.size", "job.owner"]
    );
    assert_eq!(store.paths_for("root.server"), vec!["phase"]);
    assert!(store.paths_for("root").is_empty());
}

#[test]
fn series_queries() {
    let store = queue_store();
    let series = store.series_for("root.queue", "length");
    assert_eq!(series.len(), 4);
    assert_eq!(series.times().collect::<Vec<_>>(), vec![0.0, 1.5, 4.0, 6.0]);
    assert_eq!(series.time_before(4.0), Some(1.5));
    assert_eq!(series.time_after(4.0), Some(6.0));
    assert_eq!(series.time_before(0.0), None);
    assert_eq!(series.time_after(6.0), None);
    assert_eq!(series.between(1.0, 4.0).len(), 2);
    assert_eq!(series.at(6.0)[0].value, Value::Int(2));
}

#[test]
fn unknown_series_is_empty() {
    let store = queue_store();
    assert!(!store.has_series("root.server", "length"));
    let series = store.series_for("root.server", "length");
    assert!(series.is_empty());
    assert_eq!(series.first_time(), None);
}

#[test]
fn time_range_spans_all_models() {
    assert_eq!(queue_store().time_range(), Some((0.0, 6.0)));
    assert_eq!(TraceStore::new(Vec::new()).time_range(), None);
}

proptest! {
    #[test]
    fn store_sort_is_stable(times in prop::collection::vec(0u8..8, 0..40)) {
        let events: Vec<Event> = times
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                Event::new(f64::from(t), "m", TransitionKind::Internal, "p", 0_i64).with_record(i)
            })
            .collect();
        let store = TraceStore::new(events);

        for pair in store.events().windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
            if pair[0].time.total_cmp(&pair[1].time).is_eq() {
                prop_assert!(pair[0].record < pair[1].record);
            }
        }
    }
}
