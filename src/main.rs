// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use yadtwai::app_config::{self, Config};
use yadtwai::app_controller::Controller;
use yadtwai::language_utils;

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
    /// Translate a text document (default command)
    Translate(TranslateArgs),

    /// List languages the local fallback model supports
    Languages,

    /// Generate shell completions for yadtwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
struct TranslateArgs {
    /// Input text document
    #[arg(value_name = "INPUT")]
    input_path: Option<PathBuf>,

    /// Target language code, repeatable (e.g. -l hi -l es)
    #[arg(short = 'l', long = "language", value_name = "CODE")]
    languages: Vec<String>,

    /// Directory for rendered outputs and the report
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Number of chunks translated concurrently
    #[arg(long)]
    max_concurrent_chunks: Option<usize>,

    /// API key of the remote chat-completion service
    #[arg(long, env = "FEATHERLESS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Remote model identifier
    #[arg(long, env = "FEATHERLESS_MODEL_ID")]
    model: Option<String>,

    /// Local fallback model name
    #[arg(long, env = "HF_NLLB_MODEL")]
    nllb_model: Option<String>,

    /// Local fallback inference server
    #[arg(long, env = "NLLB_ENDPOINT")]
    nllb_endpoint: Option<String>,

    /// Do not load the local fallback model
    #[arg(long)]
    no_local_model: bool,
}

/// YADTwAI - Yet Another Document Translator with AI
///
/// Translates text documents chapter by chapter with a remote model, falling
/// back to a local NLLB model when the remote service fails.
#[derive(Parser, Debug)]
#[command(name = "yadtwai")]
#[command(version)]
#[command(about = "AI document translation with local fallback")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "YADTwAI translates text documents into several languages, chapter by chapter.
Each chapter goes to a remote chat-completion model first and to a local NLLB model when that fails.

EXAMPLES:
    yadtwai book.txt                            # Translate into the configured languages
    yadtwai -l es -l de book.txt                # Translate into Spanish and German
    yadtwai -f -o out/ book.txt                 # Overwrite outputs in out/
    yadtwai --max-concurrent-chunks 4 book.txt  # Translate 4 chapters at a time
    yadtwai languages                           # Show local model languages
    yadtwai completions bash > yadtwai.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. FEATHERLESS_API_KEY, FEATHERLESS_MODEL_ID,
    HF_NLLB_MODEL and NLLB_ENDPOINT override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
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
            let (color, emoji) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logger level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yadtwai", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            list_languages();
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

fn list_languages() {
    println!("Local fallback model languages:");
    for (code, tag) in language_utils::local_model_languages() {
        println!("  {}  {:<12} {}", code, tag, language_utils::display_name(code));
    }
    println!("The remote model accepts any ISO 639-1 code.");
}

/// Load the config file, writing a default one when missing
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        return Config::from_file(config_path);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    config
        .save(config_path)
        .with_context(|| format!("Failed to write default config to file: {}", config_path))?;
    Ok(config)
}

fn apply_cli_overrides(config: &mut Config, options: &TranslateArgs) {
    if !options.languages.is_empty() {
        config.target_languages = options.languages.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.to_string_lossy().to_string();
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }
    if let Some(chunks) = options.max_concurrent_chunks {
        config.translation.common.max_concurrent_chunks = chunks;
    }
    if let Some(api_key) = &options.api_key {
        config.translation.remote.api_key = api_key.clone();
    }
    if let Some(model) = &options.model {
        config.translation.remote.model = model.clone();
    }
    if let Some(model) = &options.nllb_model {
        config.translation.local.model = model.clone();
    }
    if let Some(endpoint) = &options.nllb_endpoint {
        config.translation.local.endpoint = endpoint.clone();
    }
    if options.no_local_model {
        config.translation.local.enabled = false;
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT is required when no subcommand is specified"))?;

    let mut config = load_config(&options.config_path)?;
    config.apply_env_overrides();
    apply_cli_overrides(&mut config, &options);

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    if !config.translation.remote.is_configured() {
        warn!("Remote model not configured, every chapter will use the local model");
    }

    let languages = config.target_languages.clone();
    let output_dir = PathBuf::from(&config.output_dir);

    let controller = Controller::with_config(config).await?;
    let reports = controller
        .run(&input_path, &output_dir, &languages, options.force_overwrite)
        .await?;

    let report_json = serde_json::to_string_pretty(&reports)
        .context("Failed to serialize translation report")?;
    println!("{}", report_json);
    info!("Done");

    Ok(())
}
