//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, CommandFactory as _, Parser, Subcommand};
use colored::Colorize as _;

use crate::cli::setup;
use crate::core::config::{Config, DEFAULT_CHECK_TIME, DEFAULT_CONFIG_FILE, DEFAULT_SMTP_PORT};
use crate::core::errors::Result;
use crate::daemon::loop_main::Runner;
use crate::daemon::{Shutdown, signals};
use crate::logger::console::ConsoleSink;
use crate::logger::dual::DualSink;
use crate::logger::{DEFAULT_LOG_FILE, LogSink};
use crate::notify::smtp::Notifier;
use crate::probe::detector::Detector;
use crate::probe::inventory::SystemInventory;

/// tapewatch — checks that the tape library is visible to the host and
/// emails the administrator the result.
#[derive(Parser)]
#[command(name = "tapewatch", version, about)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Path to the append-only diagnostic log.
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Mirror raw technique output on the console.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the configuration file interactively.
    Setup,
    /// Show or create the configuration non-interactively.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send a test email verifying the mail configuration.
    TestEmail,
    /// Run one probe-and-notify cycle and exit.
    Check,
    /// Run the daily check loop in the foreground.
    Daemon,
    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the resolved configuration (password redacted).
    Show,
    /// Write the configuration from flags.
    Init(ConfigInitArgs),
}

/// Flags for `config init`.
#[derive(Args)]
pub struct ConfigInitArgs {
    /// SMTP server address.
    #[arg(long)]
    pub smtp_server: String,
    /// SMTP submission port.
    #[arg(long, default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,
    /// SMTP username.
    #[arg(long)]
    pub smtp_user: String,
    /// SMTP password (prompted when omitted).
    #[arg(long)]
    pub smtp_password: Option<String>,
    /// Sender address (defaults to the SMTP username).
    #[arg(long, default_value = "")]
    pub from_email: String,
    /// Administrator email address.
    #[arg(long)]
    pub to_email: String,
    /// Daily check time, HH:MM.
    #[arg(long, default_value = DEFAULT_CHECK_TIME)]
    pub check_time: String,
}

/// Dispatch CLI commands.
///
/// # Errors
/// Returns an error if the subcommand fails; every failure is also written
/// to the active log sink before it propagates.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Setup => setup::run(&cli.config),
        Command::Config { action } => match action {
            ConfigAction::Show => show_config(cli),
            ConfigAction::Init(args) => init_config(cli, args),
        },
        Command::TestEmail => test_email(cli),
        Command::Check => check(cli),
        Command::Daemon => daemon(cli),
        Command::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(*shell, &mut command, "tapewatch", &mut io::stdout());
            Ok(())
        }
    }
}

fn build_log(cli: &Cli) -> Arc<dyn LogSink> {
    let console = if cli.verbose {
        ConsoleSink::verbose()
    } else {
        ConsoleSink::new()
    };
    Arc::new(DualSink::open(&cli.log_file, console))
}

/// Load the config, reporting a failure to both log and console before it
/// aborts startup.
fn load_config(cli: &Cli, log: &Arc<dyn LogSink>) -> Result<Config> {
    match Config::load(&cli.config) {
        Ok(config) => {
            log.info(&format!(
                "configuration loaded, check time {}, admin {}",
                config.check_time, config.to_email
            ));
            Ok(config)
        }
        Err(err) => {
            log.error(&format!("failed to load configuration: {err}"));
            Err(err)
        }
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    let log = build_log(cli);
    let config = load_config(cli, &log)?;
    println!("{}  {}", "SMTP server:".bold(), config.smtp_endpoint());
    println!("{}    {}", "SMTP user:".bold(), config.smtp_user);
    println!("{}  ********", "Password:".bold());
    println!("{}   {}", "From email:".bold(), config.from_email);
    println!("{}     {}", "To email:".bold(), config.to_email);
    println!("{}   {}", "Check time:".bold(), config.check_time);
    Ok(())
}

fn init_config(cli: &Cli, args: &ConfigInitArgs) -> Result<()> {
    let log = build_log(cli);
    let password = match &args.smtp_password {
        Some(password) => password.clone(),
        None => setup::prompt("SMTP password")?,
    };
    let config = Config {
        smtp_server: args.smtp_server.clone(),
        smtp_port: args.smtp_port,
        smtp_user: args.smtp_user.clone(),
        smtp_password: password,
        from_email: args.from_email.clone(),
        to_email: args.to_email.clone(),
        check_time: args.check_time.clone(),
    }
    .with_defaults();
    if let Err(err) = config.validate() {
        log.error(&err.to_string());
        return Err(err);
    }
    config.save(&cli.config)?;
    log.info(&format!("configuration written to {}", cli.config.display()));
    println!("Configuration created successfully.");
    Ok(())
}

fn test_email(cli: &Cli) -> Result<()> {
    let log = build_log(cli);
    let config = load_config(cli, &log)?;
    log.info("sending test email");
    let notifier = Notifier::smtp(config, Arc::clone(&log));
    let result = notifier.notify_test();
    if result.sent {
        println!("{}", "Test email sent. Check the administrator inbox.".green());
    } else {
        println!("Test email failed. Check the log file for details.");
    }
    Ok(())
}

fn check(cli: &Cli) -> Result<()> {
    let log = build_log(cli);
    let config = load_config(cli, &log)?;
    let (_tx, rx) = crossbeam_channel::bounded::<Shutdown>(1);
    build_runner(config, &log, rx).run_once();
    Ok(())
}

fn daemon(cli: &Cli) -> Result<()> {
    let log = build_log(cli);
    let config = load_config(cli, &log)?;
    let (tx, rx) = crossbeam_channel::bounded::<Shutdown>(1);
    signals::spawn_listener(tx)?;
    build_runner(config, &log, rx).run();
    Ok(())
}

fn build_runner(
    config: Config,
    log: &Arc<dyn LogSink>,
    shutdown: crossbeam_channel::Receiver<Shutdown>,
) -> Runner {
    let detector = Detector::new(Box::new(SystemInventory::new()), Arc::clone(log));
    let notifier = Notifier::smtp(config.clone(), Arc::clone(log));
    Runner::new(config, detector, notifier, Arc::clone(log), shutdown)
}
