use clap::Parser;
use codexport::{
    Cli, CodeExporter, ExportError, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::path::Path;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let Some(source_dir) = cli.source_dir.clone() else {
        // clap enforces the argument unless --generate-config was given
        eprintln!("error: missing source directory");
        return 2;
    };

    let exporter = match CodeExporter::from_cli(&cli) {
        Ok(exporter) => exporter,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&exporter, &source_dir);
    }

    match exporter.export(&source_dir) {
        Ok(report) => {
            exporter.output_formatter().print_export_report(&report);

            // Per-file read failures are tolerated; the run still succeeded.
            0
        }
        Err(e) => {
            exporter.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ExportError) -> i32 {
    match error {
        ExportError::Cancelled => 130, // Interrupted (SIGINT)
        ExportError::Validation { .. } => 2,
        ExportError::Config { .. } => 3,
        ExportError::OutputOpen { .. } | ExportError::Io(_) => 4,
        ExportError::Unexpected { .. } => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "codexport.toml".to_string());

    match CodeExporter::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  codexport <source-dir> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(exporter: &CodeExporter, source_dir: &Path) -> i32 {
    let formatter = exporter.output_formatter();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    let config = exporter.config();
    formatter.info("Configuration that would be used:");
    println!(
        "  Include suffixes: {}",
        config.filters.include_suffixes.join(", ")
    );
    println!(
        "  Exclude directories: {}",
        config.filters.exclude_dirs.join(", ")
    );
    println!("  Output file: {}", config.output.output_path.display());

    formatter.print_separator();

    let (outcome, statistics) = match exporter.scan(source_dir) {
        Ok(scan) => scan,
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            return exit_code_for(&e);
        }
    };

    formatter.info("Export plan:");
    println!("  Source directory: {}", source_dir.display());
    println!("  Files that would be exported: {}", outcome.files.len());
    for file in &outcome.files {
        println!("    {}", file.display_path());
    }

    if !outcome.skipped.is_empty() {
        formatter.warning(&format!(
            "{} unreadable entries would be skipped",
            outcome.skipped.len()
        ));
    }

    print!("{}", statistics.display_summary());

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform the actual export");

    0
}

fn print_startup_error(error: &ExportError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli {
            source_dir: None,
            output: None,
            suffixes: None,
            exclude: None,
            config: Some(config_path.clone()),
            output_format: codexport::cli::OutputFormat::Human,
            verbose: 0,
            quiet: false,
            dry_run: false,
            generate_config: true,
        };

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[filters]"));
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_for(&ExportError::Cancelled), 130);
        assert_eq!(
            exit_code_for(&ExportError::Validation {
                message: "bad".to_string()
            }),
            2
        );
        assert_eq!(
            exit_code_for(&ExportError::Config {
                message: "bad".to_string()
            }),
            3
        );
        assert_eq!(
            exit_code_for(&ExportError::OutputOpen {
                path: PathBuf::from("out.txt"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }),
            4
        );
    }
}
