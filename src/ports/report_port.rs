//! Batch result output port trait.

use std::path::Path;

use crate::domain::batch::BatchRecord;
use crate::domain::error::QuantbtError;

/// Port for writing per-ticker batch statistics.
pub trait ReportPort {
    fn write(&self, records: &[BatchRecord], output_path: &Path) -> Result<(), QuantbtError>;
}
