use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::scanner::{FileFilter, SourceFile, SourceScanner};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExportProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_written: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub errors: Vec<String>,
}

impl ExportProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            bytes_written: 0,
            current_file: None,
            start_time: Instant::now(),
            errors: Vec::new(),
        }
    }

    pub fn update_file(&mut self, bytes: u64) {
        self.files_processed += 1;
        self.bytes_written += bytes;
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            100.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Outcome of a completed export run. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub processed_count: usize,
    pub output_path: PathBuf,
}

/// The core export operation: discover matching files under a root, then
/// append one annotated record per file to the output stream.
///
/// Single-threaded and synchronous; callbacks are invoked inline and must be
/// fast. A file that cannot be read is recorded inline with an error marker
/// and still counts as processed. Content that is not valid UTF-8 is decoded
/// lossily and is not an error.
pub struct Concatenator;

impl Concatenator {
    pub fn new() -> Self {
        Self
    }

    pub fn export(
        &self,
        config: &ExportConfig,
        progress_callback: Option<&dyn Fn(&ExportProgress)>,
        log_callback: Option<&dyn Fn(&str)>,
        cancel_check: Option<&dyn Fn() -> bool>,
    ) -> Result<ExportResult> {
        self.validate(config)?;

        // Discovery pass: collect every match up front so the total is known
        // before the first record is written.
        let filter = FileFilter::new(config);
        let scanner = SourceScanner::new(filter);
        let outcome = scanner.scan_directory(&config.root_dir)?;

        for skipped in &outcome.skipped {
            log(log_callback, skipped);
        }

        let mut writer = self.open_output(config)?;
        let mut progress = ExportProgress::new(outcome.files.len());

        for file in &outcome.files {
            if let Some(cancelled) = cancel_check {
                if cancelled() {
                    return Err(ExportError::Cancelled);
                }
            }

            progress.current_file = Some(file.display_path());
            emit(progress_callback, &progress);
            log(log_callback, &format!("Processing: {}", file.display_path()));

            let bytes = self.write_record(&mut writer, file, log_callback, &mut progress)?;
            progress.update_file(bytes);
        }

        writer.flush()?;

        progress.current_file = None;
        emit(progress_callback, &progress);
        log(
            log_callback,
            &format!(
                "Export complete! Processed {} files into {}",
                progress.files_processed,
                config.output_path.display()
            ),
        );

        Ok(ExportResult {
            processed_count: progress.files_processed,
            output_path: config.output_path.clone(),
        })
    }

    /// Run-configuration checks, performed before any file I/O. The output
    /// file is not created or touched when these fail.
    fn validate(&self, config: &ExportConfig) -> Result<()> {
        if !config.root_dir.exists() {
            return Err(ExportError::Validation {
                message: format!("path does not exist: {}", config.root_dir.display()),
            });
        }

        if !config.root_dir.is_dir() {
            return Err(ExportError::Validation {
                message: format!("{} is not a directory", config.root_dir.display()),
            });
        }

        if config.include_suffixes.is_empty() {
            return Err(ExportError::Validation {
                message: "at least one file suffix must be specified".to_string(),
            });
        }

        if config.output_path.as_os_str().is_empty() {
            return Err(ExportError::Validation {
                message: "output path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Open the output for writing before traversal begins, so a bad
    /// destination fails the run without a partially written file.
    fn open_output(&self, config: &ExportConfig) -> Result<BufWriter<fs::File>> {
        if let Some(parent) = config.output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ExportError::OutputOpen {
                    path: config.output_path.clone(),
                    source: e,
                })?;
            }
        }

        let file = fs::File::create(&config.output_path).map_err(|e| ExportError::OutputOpen {
            path: config.output_path.clone(),
            source: e,
        })?;

        Ok(BufWriter::new(file))
    }

    fn write_record(
        &self,
        writer: &mut BufWriter<fs::File>,
        file: &SourceFile,
        log_callback: Option<&dyn Fn(&str)>,
        progress: &mut ExportProgress,
    ) -> Result<u64> {
        let rel = file.display_path();

        match self.read_lossy(file) {
            Ok(content) => {
                write!(writer, "\n=== {} ===\n{}\n", rel, content)?;
                Ok(content.len() as u64)
            }
            Err(e) => {
                let message = format!("Failed to read file: {} - {}", rel, e);
                log(log_callback, &message);
                progress.add_error(message.clone());
                write!(writer, "\n=== {} ===\n[ERROR: {}]\n", rel, message)?;
                Ok(0)
            }
        }
    }

    /// Best-effort text read. Open and read failures propagate; invalid
    /// UTF-8 does not: undecodable bytes are replaced and the content kept.
    fn read_lossy(&self, file: &SourceFile) -> std::io::Result<String> {
        let bytes = fs::read(&file.source_path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for Concatenator {
    fn default() -> Self {
        Self::new()
    }
}

fn emit(callback: Option<&dyn Fn(&ExportProgress)>, progress: &ExportProgress) {
    if let Some(callback) = callback {
        callback(progress);
    }
}

fn log(callback: Option<&dyn Fn(&str)>, message: &str) {
    if let Some(callback) = callback {
        callback(message);
    }
}
