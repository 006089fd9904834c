use casewatch_core::{Metric, Record, Snapshot};

/// Record carrying cases and deaths, the schema every source provides
#[allow(dead_code)]
pub fn core_record(location: &str, cases: &str, deaths: &str, notes: &str) -> Record {
    Record::new(location)
        .with_metric(Metric::Cases, cases)
        .with_metric(Metric::Deaths, deaths)
        .with_notes(notes)
}

/// Record carrying all five metrics
#[allow(dead_code)]
pub fn full_record(location: &str, counts: [u64; 5]) -> Record {
    Metric::ALL
        .iter()
        .zip(counts)
        .fold(Record::new(location), |rec, (metric, count)| {
            rec.with_metric(*metric, count.to_string())
        })
}

#[allow(dead_code)]
pub fn snapshot(records: Vec<Record>) -> Snapshot {
    Snapshot::new(records)
}

/// Fixed render timestamp so card output is reproducible
#[allow(dead_code)]
pub fn rendered_at() -> chrono::DateTime<chrono::Utc> {
    use chrono::TimeZone;
    chrono::Utc
        .with_ymd_and_hms(2020, 2, 3, 12, 0, 0)
        .single()
        .unwrap()
}
