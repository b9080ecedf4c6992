use crate::config::ExportConfig;
use crate::exporter::{ExportProgress, ExportResult};
use crate::scanner::ScanStatistics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub output_path: String,
    pub summary: ExportSummary,
    pub export_time: DateTime<Utc>,
    pub errors: Vec<String>,
    pub config_used: ConfigSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSummary {
    pub total_files_processed: usize,
    pub total_bytes_written: u64,
    pub export_duration: Duration,
    pub files_by_suffix: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub root_dir: String,
    pub output_path: String,
    pub include_suffixes: Vec<String>,
    pub exclude_dir_names: Vec<String>,
}

impl From<&ExportConfig> for ConfigSnapshot {
    fn from(config: &ExportConfig) -> Self {
        Self {
            root_dir: config.root_dir.display().to_string(),
            output_path: config.output_path.display().to_string(),
            include_suffixes: config.include_suffixes.clone(),
            exclude_dir_names: config.exclude_dir_names.clone(),
        }
    }
}

impl ExportReport {
    pub fn from_run(
        result: &ExportResult,
        progress: &ExportProgress,
        statistics: &ScanStatistics,
        config: &ExportConfig,
    ) -> Self {
        Self {
            output_path: result.output_path.display().to_string(),
            summary: ExportSummary {
                total_files_processed: result.processed_count,
                total_bytes_written: progress.bytes_written,
                export_duration: progress.elapsed(),
                files_by_suffix: statistics.files_by_suffix.clone(),
            },
            export_time: Utc::now(),
            errors: progress.errors.clone(),
            config_used: ConfigSnapshot::from(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_config() -> ExportConfig {
        ExportConfig {
            root_dir: PathBuf::from("/src"),
            output_path: PathBuf::from("out.txt"),
            include_suffixes: vec![".py".to_string()],
            exclude_dir_names: vec!["target".to_string()],
        }
    }

    #[test]
    fn test_report_from_run() {
        let config = sample_config();
        let result = ExportResult {
            processed_count: 3,
            output_path: config.output_path.clone(),
        };
        let mut progress = ExportProgress::new(3);
        progress.update_file(10);
        progress.update_file(20);
        progress.update_file(0);
        progress.add_error("Failed to read file: c.py - denied".to_string());

        let mut statistics = ScanStatistics::default();
        statistics.total_files = 3;
        statistics.files_by_suffix.insert(".py".to_string(), 3);

        let report = ExportReport::from_run(&result, &progress, &statistics, &config);

        assert_eq!(report.summary.total_files_processed, 3);
        assert_eq!(report.summary.total_bytes_written, 30);
        assert_eq!(report.summary.files_by_suffix.get(".py"), Some(&3));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.config_used.include_suffixes, vec![".py"]);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let config = sample_config();
        let result = ExportResult {
            processed_count: 0,
            output_path: config.output_path.clone(),
        };
        let progress = ExportProgress::new(0);
        let statistics = ScanStatistics::default();

        let report = ExportReport::from_run(&result, &progress, &statistics, &config);
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("\"total_files_processed\":0"));
        assert!(json.contains("\"output_path\""));
    }
}
