pub mod concatenator;
pub mod report;

pub use concatenator::{Concatenator, ExportProgress, ExportResult};
pub use report::{ConfigSnapshot, ExportReport, ExportSummary};
