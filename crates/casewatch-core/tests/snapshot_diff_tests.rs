//! Delta computation over realistic poll sequences.

mod common;

use casewatch_core::diff::{changed_only, compute_deltas, MetricChange};
use casewatch_core::{Metric, Record, Snapshot};
use common::{core_record, full_record, snapshot};

#[test]
fn test_single_case_increase_yields_one_delta() {
    let previous = snapshot(vec![
        core_record("Australia", "2", "1", "1 serious"),
        core_record("Sweden", "5", "2", ""),
    ]);
    let current = snapshot(vec![
        core_record("Australia", "3", "1", "1 serious"),
        core_record("Sweden", "5", "2", ""),
    ]);

    let deltas = changed_only(compute_deltas(&previous, &current));

    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].location, "Australia");
    assert_eq!(deltas[0].change(Metric::Cases), Some(MetricChange::new(2, 3)));
    assert_eq!(deltas[0].change(Metric::Deaths), Some(MetricChange::new(1, 1)));
}

#[test]
fn test_unfiltered_deltas_cover_every_current_location() {
    let previous = snapshot(vec![core_record("Sweden", "5", "2", "")]);
    let current = snapshot(vec![
        core_record("Sweden", "5", "2", ""),
        core_record("Norway", "1", "0", ""),
    ]);

    let deltas = compute_deltas(&previous, &current);

    let locations: Vec<_> = deltas.iter().map(|d| d.location.as_str()).collect();
    assert_eq!(locations, vec!["Sweden", "Norway"]);
    assert!(deltas[0].is_unchanged());
}

#[test]
fn test_new_location_rises_from_zero() {
    let current = snapshot(vec![core_record("Egypt", "1,204", "3", "")]);

    let deltas = compute_deltas(&Snapshot::default(), &current);

    assert_eq!(deltas[0].change(Metric::Cases), Some(MetricChange::new(0, 1204)));
    assert_eq!(deltas[0].change(Metric::Deaths), Some(MetricChange::new(0, 3)));
    assert_eq!(deltas[0].previous_notes, "");
}

#[test]
fn test_vanished_location_produces_nothing() {
    let previous = snapshot(vec![
        core_record("Diamond Princess", "705", "6", ""),
        core_record("Japan", "10", "0", ""),
    ]);
    let current = snapshot(vec![core_record("Japan", "10", "0", "")]);

    let deltas = compute_deltas(&previous, &current);

    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].location, "Japan");
}

#[test]
fn test_unparseable_values_count_as_zero() {
    let previous = snapshot(vec![core_record("Iran", "N/A", "", "")]);
    let current = snapshot(vec![core_record("Iran", "N/A", "", "")]);

    let deltas = compute_deltas(&previous, &current);

    assert_eq!(deltas[0].change(Metric::Cases), Some(MetricChange::new(0, 0)));
    assert!(changed_only(deltas).is_empty());
}

#[test]
fn test_merged_region_repeat_compares_first_and_last() {
    // China and international feeds concatenated; the location repeats
    let previous = snapshot(vec![core_record("Hong Kong", "60", "1", "")]);
    let current = snapshot(vec![
        core_record("Hong Kong", "62", "1", ""),
        core_record("Macau", "10", "0", ""),
        core_record("Hong Kong", "64", "2", ""),
    ]);

    let deltas = compute_deltas(&previous, &current);

    assert_eq!(deltas.len(), 2);
    assert_eq!(deltas[0].location, "Hong Kong");
    assert_eq!(deltas[0].change(Metric::Cases), Some(MetricChange::new(60, 64)));
    assert_eq!(deltas[1].location, "Macau");
}

#[test]
fn test_unchanged_merged_region_repeat_is_flat() {
    let feed = snapshot(vec![
        core_record("Hong Kong", "10", "0", ""),
        core_record("Japan", "5", "0", ""),
        core_record("Hong Kong", "20", "1", ""),
    ]);

    let deltas = compute_deltas(&feed, &feed);

    assert_eq!(deltas[0].location, "Hong Kong");
    assert_eq!(deltas[0].change(Metric::Cases), Some(MetricChange::new(20, 20)));
    assert!(changed_only(deltas).is_empty());
}

#[test]
fn test_merged_region_repeat_moving_in_one_region() {
    let previous = snapshot(vec![
        core_record("Hong Kong", "10", "0", ""),
        core_record("Hong Kong", "20", "1", ""),
    ]);
    let international_moved = snapshot(vec![
        core_record("Hong Kong", "10", "0", ""),
        core_record("Hong Kong", "25", "1", ""),
    ]);
    let china_moved = snapshot(vec![
        core_record("Hong Kong", "12", "0", ""),
        core_record("Hong Kong", "20", "1", ""),
    ]);

    let deltas = changed_only(compute_deltas(&previous, &international_moved));
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].change(Metric::Cases), Some(MetricChange::new(20, 25)));
    assert_eq!(deltas[0].change(Metric::Deaths), Some(MetricChange::new(1, 1)));

    let deltas = changed_only(compute_deltas(&previous, &china_moved));
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].change(Metric::Cases), Some(MetricChange::new(10, 12)));
}

#[test]
fn test_optional_metrics_follow_latest_record_schema() {
    let previous = snapshot(vec![core_record("Italy", "3", "0", "")]);
    let current = snapshot(vec![full_record("Italy", [5, 0, 1, 1, 2])]);

    let delta = &compute_deltas(&previous, &current)[0];

    assert_eq!(delta.metrics.len(), 5);
    assert_eq!(delta.change(Metric::Serious), Some(MetricChange::new(0, 1)));
    assert_eq!(delta.change(Metric::Recovered), Some(MetricChange::new(0, 2)));
}

#[test]
fn test_source_link_comes_from_latest_record() {
    let previous = snapshot(vec![core_record("Spain", "1", "0", "").with_source("https://a")]);
    let current = snapshot(vec![Record::new("Spain")
        .with_metric(Metric::Cases, "2")
        .with_metric(Metric::Deaths, "0")
        .with_source("https://b")]);

    let delta = &compute_deltas(&previous, &current)[0];

    assert_eq!(delta.source.as_deref(), Some("https://b"));
}

#[test]
fn test_diff_is_deterministic() {
    let previous = snapshot(vec![core_record("Singapore", "18", "0", "")]);
    let current = snapshot(vec![
        core_record("Singapore", "24", "0", "4 recovered"),
        core_record("Thailand", "25", "0", ""),
    ]);

    assert_eq!(
        compute_deltas(&previous, &current),
        compute_deltas(&previous, &current)
    );
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn records() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(("[A-E]", "[0-9,]{0,8}", "[0-9]{0,4}"), 0..12).prop_map(|rows| {
            rows.into_iter()
                .map(|(location, cases, deaths)| core_record(&location, &cases, &deaths, ""))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_identical_snapshots_are_flat(rows in records()) {
            let snap = Snapshot::new(rows);
            for delta in compute_deltas(&snap, &snap) {
                prop_assert!(delta.metrics.values().all(|c| c.before == c.after));
            }
        }

        #[test]
        fn prop_new_locations_start_from_zero(rows in records()) {
            let current = Snapshot::new(rows);
            for delta in compute_deltas(&Snapshot::default(), &current) {
                if current.occurrences(&delta.location).count() == 1 {
                    prop_assert!(delta.metrics.values().all(|c| c.before == 0));
                }
            }
        }

        #[test]
        fn prop_one_delta_per_current_location(rows in records()) {
            let current = Snapshot::new(rows);
            let deltas = compute_deltas(&Snapshot::default(), &current);
            prop_assert_eq!(deltas.len(), current.locations().len());
        }
    }
}
