//! Value scales and tick labelling through full views.

use devscope::foundation::Value;
use devscope::view::{TickPolicy, ValueScale, ViewConfig, view_of_series};

use crate::series_store;

#[test]
fn categorical_values_sit_at_sorted_indices() {
    let store = series_store(&[(0.0, "C"), (1.0, "A"), (2.0, "B"), (3.0, "A")]);
    let view = view_of_series(&store.series_for("m", "p"), 1.5, &ViewConfig::new())
        .into_view()
        .unwrap();

    assert_eq!(
        view.scale,
        ValueScale::Categorical(vec!["A".into(), "B".into(), "C".into()])
    );
    let labels: Vec<(f64, &str)> = view
        .y_ticks
        .iter()
        .map(|t| (t.position, t.label.as_str()))
        .collect();
    assert_eq!(labels, vec![(0.0, "A"), (1.0, "B"), (2.0, "C")]);
    assert_eq!(view.y_limits, (-0.5, 2.5));
}

#[test]
fn numeric_strings_use_a_numeric_scale() {
    let store = series_store(&[(0.0, "1.0"), (4.0, "2.5")]);
    let view = view_of_series(&store.series_for("m", "p"), 2.0, &ViewConfig::new())
        .into_view()
        .unwrap();

    assert_eq!(view.scale, ValueScale::Numeric);
    let positions: Vec<f64> = view.y_ticks.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1.0, 2.5]);
    assert_eq!(view.y_limits, (0.5, 3.0));
}

#[test]
fn one_text_value_makes_the_scale_categorical() {
    let values = [Value::Int(3), Value::from("n/a"), Value::Float(1.5)];
    assert_eq!(
        ValueScale::for_values(&values),
        ValueScale::Categorical(vec!["1.5".into(), "3".into(), "n/a".into()])
    );
}

#[test]
fn many_values_collapse_to_extremes() {
    let values: Vec<Value> = (0..30).map(Value::Int).collect();
    let ticks = TickPolicy::new(20).value_ticks(&ValueScale::Numeric, &values);
    let positions: Vec<f64> = ticks.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![0.0, 29.0]);

    let categories: Vec<String> = (0..25).map(|i| format!("s{i:02}")).collect();
    let ticks = TickPolicy::new(20).value_ticks(
        &ValueScale::Categorical(categories),
        std::iter::empty::<&Value>(),
    );
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["s00", "s24"]);
}

#[test]
fn dense_time_axis_uses_limits() {
    let points: Vec<(f64, i64)> = (0..40).map(|i| (f64::from(i) * 0.25, i64::from(i))).collect();
    let store = series_store(&points);
    let view = view_of_series(&store.series_for("m", "p"), 5.0, &ViewConfig::new())
        .into_view()
        .unwrap();

    let positions: Vec<f64> = view.x_ticks.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![view.x_limits.0, view.x_limits.1]);
}

#[test]
fn bordering_events_count_toward_the_time_tick_limit() {
    // 19 times inside [15, 25] plus one bordering event on each side.
    let mut points: Vec<(f64, i64)> = vec![(10.0, 0)];
    points.extend((0..19).map(|i| (15.5 + f64::from(i) * 0.5, i64::from(i))));
    points.push((30.0, 0));
    let store = series_store(&points);

    let view = view_of_series(&store.series_for("m", "p"), 20.0, &ViewConfig::new())
        .into_view()
        .unwrap();
    assert_eq!(view.event_count, 21);
    assert_eq!(view.x_limits, (15.0, 25.0));
    let positions: Vec<f64> = view.x_ticks.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![15.0, 25.0]);
}
