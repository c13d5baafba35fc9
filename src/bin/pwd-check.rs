//! Interactive password check.
//!
//! Usage:
//!   pwd-check            # hidden prompt, Ctrl+R shows/hides the input
//!   pwd-check --stdin    # read one line from standard input

use std::io::BufRead;

use clap::Parser;
use inquire::{Password, PasswordDisplayMode};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pwd-check", version, about = "NIST SP 800-63B password strength check with breach lookup")]
struct Cli {
    /// Log lookup details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Read the password from standard input instead of prompting
    #[arg(long)]
    stdin: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose { "pwd_nist_check=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn read_password(from_stdin: bool) -> Result<SecretString, Box<dyn std::error::Error>> {
    let password = if from_stdin {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        line
    } else {
        Password::new("Enter your password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .with_display_toggle_enabled()
            .without_confirmation()
            .with_help_message("Ctrl+R to show/hide")
            .prompt()?
    };
    Ok(SecretString::new(password.into()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let password = read_password(cli.stdin)?;
    tracing::debug!("Checking password");

    println!("{}", pwd_nist_check::analyze(&password));
    Ok(())
}
