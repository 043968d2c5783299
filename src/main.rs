// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use bogclient::app_config::{self, Config, ProviderKind};
use bogclient::app_controller::Controller;
use bogclient::file_utils::{DocumentFormat, FileManager};

/// CLI Wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    #[value(name = "openai")]
    OpenAI,
}

impl From<CliTranslationProvider> for ProviderKind {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => ProviderKind::Google,
            CliTranslationProvider::OpenAI => ProviderKind::OpenAI,
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
    /// Translate the Georgian texts of a statement file into English
    Translate(TranslateArgs),

    /// List the texts of a file that have no translation yet
    Extract(ExtractArgs),

    /// Generate shell completions for bog
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Statement or JSON file to translate
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the translated document (default: <INPUT>.en.json)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Dictionary file (default: <storage>/dictionary.json)
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Do not write newly learned translations to the dictionary
    #[arg(long)]
    no_save: bool,

    /// Document format, detected from the content when omitted
    #[arg(short, long, value_enum)]
    format: Option<DocumentFormat>,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Statement or JSON file to inspect
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Dictionary file (default: <storage>/dictionary.json)
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Document format, detected from the content when omitted
    #[arg(short, long, value_enum)]
    format: Option<DocumentFormat>,
}

/// bog - Bank of Georgia statement tooling
///
/// Localizes statements exported from the bank's API by translating Georgian
/// texts into English, remembering every translation in a local dictionary.
#[derive(Parser, Debug)]
#[command(name = "bog")]
#[command(version)]
#[command(about = "Statement localization tool")]
#[command(long_about = "bog translates the Georgian texts of bank statements into English.

EXAMPLES:
    bog translate statement.json statement.en.json    # Translate using default config
    bog translate -p openai statement.json            # Use the OpenAI provider
    bog translate --no-save statement.json            # Leave the dictionary untouched
    bog extract statement.json                        # List untranslated texts
    bog completions bash > bog.bash                   # Generate bash completions

CONFIGURATION:
    Configuration is read from <storage>/config.json. The storage directory is
    ~/.config/bogclient unless --storage or BOG_STORAGE say otherwise.

SUPPORTED PROVIDERS:
    google    - Google Translate (requires BOG_GOOGLE_APIKEY)
    openai    - OpenAI chat completions (requires BOG_OPENAI_APIKEY)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (default: <storage>/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding configuration and dictionary
    #[arg(short, long, global = true, env = "BOG_STORAGE")]
    storage: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
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

    // @returns: Emoji and ANSI color for log level
    fn get_style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, color) = Self::get_style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "bog", &mut std::io::stdout());
        return Ok(());
    }

    let storage = storage_dir(cli.storage.clone());
    let config = load_config(&cli, &storage)?;

    match cli.command {
        Commands::Translate(args) => run_translate(config, &storage, args).await,
        Commands::Extract(args) => run_extract(config, &storage, args),
        Commands::Completions { .. } => Ok(()),
    }
}

// @returns: Storage directory from flag, environment or home
fn storage_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| dirs::home_dir().map(|home| home.join(".config").join("bogclient")))
        .unwrap_or_else(|| PathBuf::from(".bogclient"))
}

fn load_config(cli: &CommandLineOptions, storage: &std::path::Path) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(|| storage.join("config.json"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config file: {:?}", config_path))?;

    // Update log level in config if specified via command line
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.into());

    Ok(config)
}

fn apply_dictionary(config: &mut Config, storage: &std::path::Path, dictionary: Option<PathBuf>) {
    if let Some(path) = dictionary {
        config.dictionary.file = Some(path);
    } else if config.dictionary.file.is_none() {
        config.dictionary.file = Some(storage.join("dictionary.json"));
    }
}

async fn run_translate(mut config: Config, storage: &std::path::Path, args: TranslateArgs) -> Result<()> {
    if let Some(provider) = args.provider {
        config.translation.provider = provider.into();
    }
    apply_dictionary(&mut config, storage, args.dictionary);

    let output = args
        .output
        .unwrap_or_else(|| FileManager::generate_output_path(&args.input, &config.target_language));

    let mut controller = Controller::with_config(config)?;
    if args.no_save {
        controller = controller.without_dictionary_save();
    }

    let report = controller.translate_file(&args.input, &output, args.format).await?;
    info!("Success: {:?}", output);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_extract(mut config: Config, storage: &std::path::Path, args: ExtractArgs) -> Result<()> {
    apply_dictionary(&mut config, storage, args.dictionary);

    let controller = Controller::with_config(config)?;
    let pending = controller.extract_file(&args.input, args.format)?;

    println!("{}", serde_json::to_string_pretty(&pending)?);
    Ok(())
}
