//! Command-line interface for the `dailylog` binary
//!
//! Uses clap v4 with derive macros for argument parsing.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::banner::{banner, BannerStyle};
use crate::cache::SuppressionCache;
use crate::config::friendly_io_error_message;
use crate::error::DailyLogError;
use crate::logging::{LogArgs, LogLevel, Logger};
use crate::options::{expand_path, OptionArgs, Options};

/// Append timestamped messages to a daily log, echoing repeats to the terminal at most
/// once per suppression window
#[derive(Parser, Debug)]
#[command(name = "dailylog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cache file path (default: ~/.cache/dailylog.json)
    #[arg(long, global = true)]
    pub cache: Option<String>,

    /// Config file path (default: ~/.config/dailylog.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Minimum level to log, name or number (default: WARNING)
    #[arg(long, global = true)]
    pub level: Option<String>,

    /// Increase debug output (-d, -dd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Test mode
    #[arg(long, global = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a message
    Log(LogCommand),

    /// Set the default log file
    SetDefaultLog {
        /// Absolute path of the new default log
        path: String,
    },

    /// Show resolved file locations
    ShowConfig,

    /// Print a banner line
    Banner(BannerCommand),
}

#[derive(Args, Debug)]
pub struct LogCommand {
    /// Dedup key; repeats under the same key are muted on the terminal
    #[arg(short, long)]
    pub key: Option<String>,

    /// Level label (default: ERROR with --key, WARNING without)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Caller name prepended to the message
    #[arg(short, long)]
    pub caller: Option<String>,

    /// Log file (default: the configured default log)
    #[arg(long)]
    pub log_file: Option<String>,

    /// Suppression window in seconds (default: 86400)
    #[arg(short, long)]
    pub suppress: Option<u64>,

    /// Only write to the log file
    #[arg(short, long)]
    pub quiet: bool,

    /// Message text
    #[arg(required = true)]
    pub message: Vec<String>,
}

#[derive(Args, Debug)]
pub struct BannerCommand {
    /// Banner text
    pub text: String,

    /// Total width of the fill (default: 60)
    #[arg(short, long, default_value_t = 60)]
    pub width: usize,

    /// Fill character
    #[arg(long = "char", default_value = "-")]
    pub fill: String,

    /// Append "started"
    #[arg(long, conflicts_with = "exiting")]
    pub started: bool,

    /// Append "exiting"
    #[arg(long)]
    pub exiting: bool,
}

impl Cli {
    /// Constructor arguments for the library types
    pub fn option_args(&self) -> OptionArgs {
        OptionArgs {
            cache: self.cache.clone(),
            config: self.config.clone(),
            debug: self.debug,
            verbose: self.verbose,
            test: self.test,
            level: self.level.clone(),
        }
    }
}

impl BannerCommand {
    pub fn style(&self) -> BannerStyle {
        let action = if self.started {
            Some(true)
        } else if self.exiting {
            Some(false)
        } else {
            None
        };
        BannerStyle {
            width: self.width,
            action,
            ..BannerStyle::default()
        }
        .with_fill_str(&self.fill)
    }
}

/// Run the parsed command
pub fn run(cli: &Cli) -> Result<()> {
    let args = cli.option_args();
    match &cli.command {
        Commands::Log(cmd) => run_log(&args, cmd),
        Commands::SetDefaultLog { path } => {
            let options = Options::new(&args)?;
            let mut cache = SuppressionCache::load(options)?;
            let path = expand_path(path);
            cache
                .set_default_log(&path)
                .with_context(|| format!("Failed to set default log to {}", path.display()))?;
            tracing::info!("Default log set to {}", path.display());
            Ok(())
        }
        Commands::ShowConfig => {
            let options = Options::new(&args)?;
            let cache = SuppressionCache::load(options)?;
            println!("cache:       {}", cache.options().cache_path().display());
            println!("config:      {}", cache.options().config_path().display());
            println!("default_log: {}", cache.default_log().display());
            println!("entries:     {}", cache.entries().len());
            Ok(())
        }
        Commands::Banner(cmd) => {
            println!("{}", banner(&cmd.text, &cmd.style()));
            Ok(())
        }
    }
}

fn run_log(args: &OptionArgs, cmd: &LogCommand) -> Result<()> {
    let mut logger = Logger::new(args).context("Failed to open dailylog state")?;

    let default_label = if cmd.key.is_some() { "ERROR" } else { "WARNING" };
    let level = LogLevel::resolve(cmd.label.as_deref().unwrap_or(default_label));
    let log_file = match &cmd.log_file {
        Some(raw) => expand_path(raw),
        None => logger.cache().default_log(),
    };

    let mut log_args = LogArgs::new().log_file(&log_file).quiet(cmd.quiet);
    if let Some(key) = &cmd.key {
        log_args = log_args.key(key);
    }
    if let Some(caller) = &cmd.caller {
        log_args = log_args.caller(caller);
    }
    if let Some(secs) = cmd.suppress {
        log_args = log_args.suppress_secs(secs);
    }

    logger
        .log_at(level, &cmd.message.join(" "), log_args)
        .with_context(|| format!("Failed to log to {}", log_file.display()))
}

/// Render an error for the terminal, with friendlier wording for disk failures
pub fn error_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<DailyLogError>() {
        Some(DailyLogError::Io(io)) => friendly_io_error_message(io, &e.to_string()),
        _ => format!("{:#}", e),
    }
}
