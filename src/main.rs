// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subresync::app_config::{self, Config, LinePreset, UnmappedPolicy};
use subresync::app_controller::{Controller, FileOutcome};

/// CLI Wrapper for LinePreset to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLinePreset {
    Standard,
    Compact,
    Custom,
}

impl From<CliLinePreset> for LinePreset {
    fn from(cli_preset: CliLinePreset) -> Self {
        match cli_preset {
            CliLinePreset::Standard => LinePreset::Standard,
            CliLinePreset::Compact => LinePreset::Compact,
            CliLinePreset::Custom => LinePreset::Custom,
        }
    }
}

/// CLI Wrapper for UnmappedPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliUnmappedPolicy {
    Fail,
    Skip,
    Placeholder,
}

impl From<CliUnmappedPolicy> for UnmappedPolicy {
    fn from(cli_policy: CliUnmappedPolicy) -> Self {
        match cli_policy {
            CliUnmappedPolicy::Fail => UnmappedPolicy::Fail,
            CliUnmappedPolicy::Skip => UnmappedPolicy::Skip,
            CliUnmappedPolicy::Placeholder => UnmappedPolicy::Placeholder,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Re-wrap a transcript and time it against a reference timeline
    Sync(SyncArgs),

    /// Pull apart adjacent overlapping blocks of a timeline
    ResolveOverlaps(ResolveArgs),

    /// Report ordering, overlap and numbering issues of a timeline
    Check(CheckArgs),

    /// Print timeline statistics and per-block character weights
    Stats {
        /// Timeline file to inspect
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Generate shell completions for subresync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Reference timeline file or directory of timelines
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Plain-text transcript to re-wrap (single file input only)
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// Output file (single file input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Line length preset
    #[arg(short, long, value_enum)]
    preset: Option<CliLinePreset>,

    /// Maximum characters per line (implies the custom preset)
    #[arg(long)]
    max_chars: Option<usize>,

    /// Minimum characters per line (implies the custom preset)
    #[arg(long)]
    min_chars: Option<usize>,

    /// Break lines at whitespace only
    #[arg(long)]
    no_punctuation_split: bool,

    /// Handling of chunks that find no interval
    #[arg(long, value_enum)]
    unmapped: Option<CliUnmappedPolicy>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force: bool,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Timeline file to repair
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Gap in ms left between repaired blocks
    #[arg(short, long)]
    buffer: Option<u64>,

    /// Output file, defaults to rewriting the input
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Timeline file to check
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Renumber blocks and resolve overlaps in place
    #[arg(long)]
    fix: bool,

    /// Gap in ms left between repaired blocks
    #[arg(short, long, requires = "fix")]
    buffer: Option<u64>,
}

/// subresync - re-time re-wrapped or substituted subtitle text
///
/// Maps a new segmentation of a transcript onto the timing of an existing
/// timeline, without looking at audio or video.
#[derive(Parser, Debug)]
#[command(name = "subresync")]
#[command(version)]
#[command(about = "Resynchronize re-segmented subtitle text against a reference timeline")]
#[command(long_about = "subresync re-wraps a transcript into display lines and times every new block against a reference timeline.

EXAMPLES:
    subresync sync talk.json                          # Re-wrap the timeline's own text
    subresync sync talk.json -t talk.ar.txt          # Time a substituted transcript
    subresync sync -p compact -f talks/              # Every timeline in a directory
    subresync resolve-overlaps talk.json -b 10       # Repair overlapping blocks
    subresync check --fix talk.json                  # Check and correct a timeline
    subresync completions bash > subresync.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

TIMELINE FILES:
    JSON documents with an \"entries\" list of {block_number, time_code, text},
    time codes written as 'HH:MM:SS,mmm --> HH:MM:SS,mmm'.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subresync", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = load_or_create_config(&cli.config_path, cli.log_level.clone())?;

    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    match cli.command {
        Commands::Sync(args) => {
            apply_sync_overrides(&mut config, &args);
            run_sync(config, args).await
        }
        Commands::ResolveOverlaps(args) => {
            let controller = Controller::with_config(config)?;
            controller.resolve_file(&args.input_path, args.output, args.buffer)?;
            Ok(())
        }
        Commands::Check(args) => {
            let controller = Controller::with_config(config)?;
            let issues = controller.check_file(&args.input_path, args.fix, args.buffer)?;
            if issues.is_empty() {
                info!("Timeline is correct: {}", args.input_path.display());
                return Ok(());
            }
            for issue in &issues {
                println!("{}", issue);
            }
            error!("{} issue(s) found in {}", issues.len(), args.input_path.display());
            std::process::exit(1);
        }
        Commands::Stats { input_path } => {
            let controller = Controller::with_config(config)?;
            let (stats, weights) = controller.stats_file(&input_path)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            for (i, weight) in weights.iter().enumerate() {
                println!("{:>5}  {:>6.2}%", i + 1, weight);
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_or_create_config(config_path: &str, cli_log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    if let Some(log_level) = cli_log_level {
        config.log_level = log_level.into();
    }

    Ok(config)
}

fn apply_sync_overrides(config: &mut Config, args: &SyncArgs) {
    if let Some(preset) = &args.preset {
        config.sync.preset = preset.clone().into();
    }

    if args.max_chars.is_some() || args.min_chars.is_some() {
        let (max_chars, min_chars) = config.sync.line_limits();
        config.sync = config.sync.clone().with_limits(
            args.max_chars.unwrap_or(max_chars),
            args.min_chars.unwrap_or(min_chars),
        );
    }

    if args.no_punctuation_split {
        config.sync.split_at_punctuation = false;
    }

    if let Some(policy) = &args.unmapped {
        config.sync.unmapped_policy = policy.clone().into();
    }
}

async fn run_sync(config: Config, args: SyncArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;

    if args.input_path.is_file() {
        let outcome = controller
            .run(args.input_path.clone(), args.transcript, args.output, args.force)
            .await?;
        if let FileOutcome::Written(path, report) = outcome {
            info!(
                "{}: {} blocks, {} unmapped, {} placeholder(s)",
                path.display(),
                report.chunks,
                report.unmapped.len(),
                report.placeholders
            );
        }
    } else if args.input_path.is_dir() {
        if args.transcript.is_some() || args.output.is_some() {
            warn!("--transcript and --output are ignored for directory input");
        }
        let summary = controller.run_folder(args.input_path.clone(), args.force).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to synchronize", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}
