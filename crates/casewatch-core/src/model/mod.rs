pub mod metric;
pub mod record;
pub mod snapshot;

pub use metric::Metric;
pub use record::Record;
pub use snapshot::Snapshot;
