//! Delta computation engine.
//!
//! The core entry point is [`compute_deltas`], which accepts the previous and
//! current snapshots and produces one [`Delta`] per current location.

use crate::diff::model::{Delta, MetricChange};
use crate::model::{Record, Snapshot};
use crate::normalize::normalize_count;
use std::collections::BTreeMap;

/// Build the delta for one location.
///
/// `earliest` is `None` for a location seen for the first time, which makes
/// every `before` 0.
fn delta_for(earliest: Option<&Record>, latest: &Record) -> Delta {
    let metrics: BTreeMap<_, _> = latest
        .metrics
        .iter()
        .map(|(metric, raw)| {
            let after = normalize_count(raw);
            let before = earliest
                .map(|rec| normalize_count(rec.raw(*metric).unwrap_or_default()))
                .unwrap_or(0);
            (*metric, MetricChange::new(before, after))
        })
        .collect();

    Delta {
        location: latest.location.clone(),
        metrics,
        notes: latest.notes.clone(),
        previous_notes: earliest.map(|rec| rec.notes.clone()).unwrap_or_default(),
        source: latest.source.clone(),
    }
}

/// Compute one delta per distinct location of `current`.
///
/// Rows present identically in both snapshots are settled and take no part
/// in the comparison, so an unchanged row repeated across merged region feeds
/// never reads as a move. For each location, in order of first appearance in
/// `current`:
///
/// - When every current row is settled the delta is flat.
/// - Otherwise `after` comes from the **last** unsettled row of `current`, so
///   a corrected row later in the same poll overrides an earlier one.
/// - `before` comes from the first unsettled row of `previous`, else the
///   first row of `previous`. A location absent from `previous` compares its
///   own first and last current rows, and when it occurs only once it is new
///   and every `before` is 0.
///
/// Locations only present in `previous` produce nothing. Unchanged deltas are
/// included; pass the result through [`changed_only`] before rendering.
pub fn compute_deltas(previous: &Snapshot, current: &Snapshot) -> Vec<Delta> {
    let deltas: Vec<Delta> = current
        .locations()
        .into_iter()
        .filter_map(|location| {
            let before_rows: Vec<&Record> = previous.occurrences(location).collect();
            let after_rows: Vec<&Record> = current.occurrences(location).collect();
            let latest = *after_rows.last()?;

            let moved_before: Vec<&Record> = before_rows
                .iter()
                .copied()
                .filter(|rec| !after_rows.contains(rec))
                .collect();
            let moved_after: Vec<&Record> = after_rows
                .iter()
                .copied()
                .filter(|rec| !before_rows.contains(rec))
                .collect();

            let Some(moved_latest) = moved_after.last().copied() else {
                return Some(delta_for(Some(latest), latest));
            };
            let earliest = moved_before
                .first()
                .or(before_rows.first())
                .or(moved_after.first().filter(|_| moved_after.len() > 1))
                .copied();
            Some(delta_for(earliest, moved_latest))
        })
        .collect();

    tracing::debug!(
        previous_records = previous.len(),
        current_records = current.len(),
        delta_count = deltas.len(),
        "computed deltas"
    );
    deltas
}

/// Drop deltas where no metric moved and the notes are unchanged.
pub fn changed_only(deltas: Vec<Delta>) -> Vec<Delta> {
    deltas.into_iter().filter(|d| !d.is_unchanged()).collect()
}
