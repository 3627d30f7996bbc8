//! Interactive configuration wizard for `tapewatch setup`.
//!
//! Prompts on stdin for the mail-server details, applies the same defaults
//! as the loader, validates, and writes the config file. Purely an operator
//! convenience; the daemon itself never reads stdin.

use std::io::{self, BufRead as _, Write as _};
use std::path::Path;

use colored::Colorize as _;

use crate::core::config::{Config, DEFAULT_CHECK_TIME, DEFAULT_SMTP_PORT};
use crate::core::errors::{Result, WatchError};

/// Run the wizard and write the config to `path`.
pub fn run(path: &Path) -> Result<()> {
    println!("{}", "tapewatch configuration setup".bold());
    println!("Please provide the mail-server details.\n");

    let smtp_server = prompt("SMTP server (e.g. smtp.gmail.com)")?;
    let port_input = prompt(&format!("SMTP port [{DEFAULT_SMTP_PORT}]"))?;
    let smtp_port = if port_input.is_empty() {
        DEFAULT_SMTP_PORT
    } else {
        port_input
            .parse::<u16>()
            .map_err(|err| WatchError::InvalidConfig {
                details: format!("bad SMTP port {port_input:?}: {err}"),
            })?
    };
    let smtp_user = prompt("SMTP username (email)")?;
    let smtp_password = prompt("SMTP password")?;
    let from_email = if smtp_user.is_empty() {
        prompt("From email")?
    } else {
        prompt(&format!("From email [{smtp_user}]"))?
    };
    let to_email = prompt("Administrator email (notifications)")?;
    let check_time = prompt(&format!("Daily check time (HH:MM) [{DEFAULT_CHECK_TIME}]"))?;

    let config = Config {
        smtp_server,
        smtp_port,
        smtp_user,
        smtp_password,
        from_email,
        to_email,
        check_time,
    }
    .with_defaults();
    config.validate()?;
    config.save(path)?;

    println!("\n{}", "Configuration summary".bold());
    println!("SMTP server: {}", config.smtp_endpoint());
    println!("From email:  {}", config.from_email);
    println!("To email:    {}", config.to_email);
    println!("Check time:  {}", config.check_time);
    println!(
        "\nConfiguration saved to {}.\nRun `tapewatch test-email` to verify it, \
         then `tapewatch daemon` to start monitoring.",
        path.display()
    );
    Ok(())
}

/// Print a prompt and read one trimmed line from stdin. EOF reads as empty.
pub(crate) fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush().map_err(|err| WatchError::Runtime {
        details: format!("console write failed: {err}"),
    })?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| WatchError::Runtime {
            details: format!("console read failed: {err}"),
        })?;
    Ok(line.trim().to_string())
}
