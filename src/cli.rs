use crate::config::{CliOverrides, Config};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codexport")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export source trees into a single annotated text file")]
#[command(
    long_about = "Codexport walks a source directory, filters files by suffix, and \
                       concatenates their contents into one text file with per-file headers."
)]
#[command(before_help = "📦 Codexport - Source Tree Export Tool")]
#[command(after_help = "EXAMPLES:\n  \
    codexport ./my-project\n  \
    codexport ./my-project --output bundle.txt --suffixes .rs,.toml\n  \
    codexport ./service --exclude target,build,.git --verbose\n  \
    codexport ./legacy --config my-config.toml\n\n\
    For more information, visit: https://github.com/user/codexport")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Source directory to export
    #[arg(required_unless_present = "generate_config")]
    pub source_dir: Option<PathBuf>,

    /// Destination file (overwritten if it exists)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File suffixes to include (comma-separated)
    #[arg(
        short,
        long,
        help = "Filename suffixes to include, matched as-is (e.g., .java,.yml,.xml)"
    )]
    pub suffixes: Option<String>,

    /// Directory names to prune during traversal
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be exported without writing)
    #[arg(long, help = "Show what would be exported without actually writing")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> crate::error::Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_suffixes(self.suffixes.clone())
            .with_exclude(self.exclude.clone())
            .with_output_path(self.output.clone())
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
