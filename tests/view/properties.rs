//! Property tests over arbitrary series.

use devscope::view::{Cursor, ViewConfig, Window, view_of_series};
use proptest::prelude::*;

use crate::series_store;

fn points() -> impl Strategy<Value = Vec<(f64, i64)>> {
    prop::collection::vec((0.001f64..1000.0, -50i64..50), 1..60)
}

proptest! {
    #[test]
    fn next_from_first_visits_every_time_once(points in points()) {
        let store = series_store(&points);
        let series = store.series_for("m", "p");
        let mut expected: Vec<f64> = series.times().collect();
        expected.dedup();

        let mut cursor = Cursor::at(50.0);
        let mut visited = Vec::new();
        let mut previous = cursor.first(&series);
        loop {
            let now = cursor.next(&series);
            if now == previous {
                break;
            }
            prop_assert!(now > previous);
            visited.push(now);
            previous = now;
        }
        prop_assert_eq!(visited, expected);
        prop_assert_eq!(cursor.time(), series.last_time().unwrap());
    }

    #[test]
    fn prev_returns_to_at_or_before_start(points in points(), start in 0.0f64..1000.0) {
        let store = series_store(&points);
        let series = store.series_for("m", "p");

        let mut cursor = Cursor::at(start);
        let moved = cursor.next(&series);
        prop_assume!(moved > start);
        let back = cursor.prev(&series);
        match series.time_before(moved) {
            Some(time) => {
                prop_assert_eq!(back, time);
                prop_assert!(time <= start);
            }
            None => prop_assert_eq!(back, moved),
        }
    }

    #[test]
    fn selection_covers_the_nominal_window(
        points in points(),
        cursor in 0.0f64..1000.0,
        width in 0.0f64..100.0,
    ) {
        let store = series_store(&points);
        let series = store.series_for("m", "p");
        let window = Window::around(cursor, width);
        let windowed = window.select(&series);

        prop_assert!(windowed.effective_lower <= window.lower);
        prop_assert!(windowed.effective_upper >= window.upper);
        for time in series.times().filter(|&t| window.contains(t)) {
            prop_assert!(windowed.events().iter().any(|e| e.time == time));
        }
        prop_assert!(windowed.events().windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn view_is_idempotent(points in points(), cursor in 0.0f64..1000.0) {
        let store = series_store(&points);
        let series = store.series_for("m", "p");
        let config = ViewConfig::new();

        let first = view_of_series(&series, cursor, &config);
        let second = view_of_series(&series, cursor, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn views_are_well_formed(
        points in points(),
        cursor in -10.0f64..1100.0,
        width in -5.0f64..200.0,
    ) {
        let store = series_store(&points);
        let series = store.series_for("m", "p");
        let config = ViewConfig::new().with_window_width(width);

        if let Some(view) = view_of_series(&series, cursor, &config).into_view() {
            prop_assert!(view.x_limits.0 <= view.x_limits.1);
            prop_assert!(view.y_limits.0 < view.y_limits.1);
            prop_assert_eq!(view.step.segments.len() % 2, usize::from(view.step.hold_end.is_some()));
            let markers = view.step.internal.len() + view.step.external.len();
            prop_assert_eq!(markers, view.event_count);
            prop_assert!(view.arrows.len() <= view.event_count.saturating_sub(2));
        }
    }
}
