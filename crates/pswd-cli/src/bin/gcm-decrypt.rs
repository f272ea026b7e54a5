//! gcm-decrypt: decrypt an `IV || tag || ciphertext` package from stdin
//!
//! Usage:
//!   gcm-decrypt <KEY_HEX> [--strict] < package.bin > plaintext.txt
//!
//! Without `--strict` the exit status is 0 even when decryption fails; the
//! only sign of failure is empty output plus one `error ...` line on stderr.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pswd_core::config::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "gcm-decrypt",
    version,
    about = "Decrypt an AES-256-GCM package (IV || tag || ciphertext) from stdin"
)]
struct Cli {
    /// AES-256 key as hex (64 hex digits)
    key: String,

    /// Exit 1 on authentication failure and 65 on malformed key or input
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Only the failure diagnostic is shown unless RUST_LOG asks for more
    pswd_core::logging::init_logging("error", LogFormat::Bare);

    let code = pswd_cli::stdio::decrypt_stream(
        &cli.key,
        cli.strict,
        io::stdin().lock(),
        io::stdout().lock(),
    )
    .context("reading stdin or writing stdout")?;

    Ok(ExitCode::from(code))
}
