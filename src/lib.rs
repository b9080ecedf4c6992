pub mod cli;
pub mod config;
pub mod error;
pub mod exporter;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExportConfig, FilterConfig, OutputConfig};
pub use error::{ExportError, Result, UserFriendlyError};

// Core functionality re-exports
pub use exporter::{Concatenator, ExportProgress, ExportReport, ExportResult};
pub use scanner::{FileFilter, ScanOutcome, ScanStatistics, SourceFile, SourceScanner};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use std::cell::RefCell;
use std::path::Path;

/// Main library interface for the export workflow: wires the synchronous
/// core to progress rendering, log output, and Ctrl+C cancellation.
pub struct CodeExporter {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl CodeExporter {
    /// Create a new CodeExporter instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    /// Create a new CodeExporter instance for testing (no signal handler conflicts)
    #[cfg(test)]
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);
        let shutdown = GracefulShutdown::new_for_test();

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create CodeExporter instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbose, cli_args.quiet)
    }

    /// Export all matching files under `source_dir` into the configured
    /// output file and return the run's report.
    pub fn export(&self, source_dir: &Path) -> Result<ExportReport> {
        self.shutdown.check_shutdown()?;

        self.output_formatter.start_operation("Starting export");

        let export_config = self.config.export_config(source_dir);

        // Discovery pass: gives the progress bar its total and the report
        // its statistics. The core repeats the walk with the same rules.
        let (outcome, statistics) = self.scan(source_dir)?;
        self.shutdown.check_shutdown()?;

        self.output_formatter
            .info(&format!("Found {} matching files", outcome.files.len()));
        self.output_formatter.debug(&statistics.display_summary());

        let file_progress = self
            .progress_manager
            .create_file_progress(outcome.files.len() as u64);
        let log_output =
            ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));

        let last_progress = RefCell::new(ExportProgress::new(outcome.files.len()));
        let progress_callback = |progress: &ExportProgress| {
            ui::progress::update_export_progress(&file_progress, progress);
            *last_progress.borrow_mut() = progress.clone();
        };

        let log_callback = |message: &str| {
            // Read failures and skipped subtrees surface even without -v.
            if message.starts_with("Failed to read file") || message.starts_with("Skipping") {
                log_output.warning(message);
            } else {
                log_output.info(message);
            }
        };

        let cancel_check = || !self.shutdown.is_running();

        let result = Concatenator::new().export(
            &export_config,
            Some(&progress_callback),
            Some(&log_callback),
            Some(&cancel_check),
        );

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                file_progress.abandon_with_message("Export aborted".to_string());
                return Err(e);
            }
        };

        let final_progress = last_progress.borrow();
        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Exported {} files", result.processed_count),
            final_progress.elapsed(),
        );

        self.output_formatter.print_export_summary(&final_progress);

        Ok(ExportReport::from_run(
            &result,
            &final_progress,
            &statistics,
            &export_config,
        ))
    }

    /// Discovery only: collect the files an export would process. Used by
    /// the export itself and by `--dry-run`.
    pub fn scan(&self, source_dir: &Path) -> Result<(ScanOutcome, ScanStatistics)> {
        let export_config = self.config.export_config(source_dir);
        let scanner = SourceScanner::new(FileFilter::new(&export_config));

        let outcome = scanner.scan_directory(source_dir)?;
        let statistics = scanner.statistics(&outcome.files);

        Ok((outcome, statistics))
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(ExportError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ExportError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
