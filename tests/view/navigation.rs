//! Cursor navigation over a series.

use devscope::view::Cursor;

use crate::series_store;

#[test]
fn walk_forward_and_back() {
    let store = series_store(&[(0.5, 1_i64), (2.0, 2), (2.0, 3), (7.5, 4)]);
    let series = store.series_for("m", "p");
    let mut cursor = Cursor::default();

    assert_eq!(cursor.next(&series), 0.5);
    assert_eq!(cursor.next(&series), 2.0);
    assert_eq!(cursor.next(&series), 7.5);
    assert_eq!(cursor.next(&series), 7.5);
    assert_eq!(cursor.prev(&series), 2.0);
    assert_eq!(cursor.prev(&series), 0.5);
    assert_eq!(cursor.prev(&series), 0.5);
}

#[test]
fn first_goes_to_origin_and_last_to_final_event() {
    let store = series_store(&[(3.0, 1_i64), (6.0, 2)]);
    let series = store.series_for("m", "p");
    let mut cursor = Cursor::at(4.0);

    assert_eq!(cursor.last(&series), 6.0);
    assert_eq!(cursor.first(&series), 0.0);
    assert_eq!(cursor.next(&series), 3.0);
}

#[test]
fn empty_series_leaves_cursor_alone() {
    let store = series_store::<i64>(&[]);
    let series = store.series_for("m", "p");
    let mut cursor = Cursor::at(4.0);

    assert_eq!(cursor.first(&series), 4.0);
    assert_eq!(cursor.next(&series), 4.0);
    assert_eq!(cursor.prev(&series), 4.0);
    assert_eq!(cursor.last(&series), 4.0);
}
