//! pswd: TREZOR Password Manager store browser
//!
//! Commands:
//!   store-name             - print the store file name derived from the master key
//!   list                   - open the store and list entries and tags
//!   show <id>              - decrypt one entry with its entry key
//!   prompt <id>            - print what the device needs to unlock an entry key
//!   decrypt <key>          - decrypt a package from stdin (same as gcm-decrypt)
//!   config show            - display current configuration
//!
//! The device itself is not contacted: the master key and entry keys are
//! supplied as hex, exactly as the device returns them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pswd_core::config::{LogFormat, PswdConfig};
use pswd_core::{PswdError, PswdResult};
use pswd_crypto::Keychain;
use pswd_store::{open_store, EntryDecrypter, FileSource, Store};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "pswd",
    version,
    about = "TREZOR Password Manager store browser",
    long_about = "pswd: open, list and decrypt TREZOR Password Manager stores using keys supplied as hex"
)]
struct Cli {
    /// Path to pswd.toml configuration file
    #[arg(long, short = 'c', env = "PSWD_CONFIG", default_value = "pswd.toml")]
    config: PathBuf,

    /// Master key as returned by the device (128 hex digits)
    #[arg(long, env = "PSWD_MASTER_KEY", hide_env_values = true, global = true)]
    master_key: Option<String>,

    /// Log level (overrides config)
    #[arg(long, env = "PSWD_LOG")]
    log: Option<String>,

    /// Log format: text, json or bare (overrides config)
    #[arg(long, env = "PSWD_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the store file name derived from the master key
    #[command(name = "store-name")]
    StoreName,

    /// List entries and tags in the store
    List {
        /// Store file (overrides config and the derived name)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Decrypt and print one entry, including password and safe note
    Show {
        /// Entry id
        id: String,
        /// Entry key as returned by the device (64 hex digits)
        #[arg(long, env = "PSWD_ENTRY_KEY", hide_env_values = true)]
        entry_key: String,
        /// Store file (overrides config and the derived name)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Print the device prompt and nonce needed to unlock an entry key
    Prompt {
        /// Entry id
        id: String,
        /// Store file (overrides config and the derived name)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Decrypt an IV || tag || ciphertext package from stdin to stdout
    Decrypt {
        /// AES-256 key as hex (64 hex digits)
        key: String,
        /// Exit 1 on authentication failure and 65 on malformed key or input
        #[arg(long)]
        strict: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // The stdin decryptor reads no configuration, matching gcm-decrypt
    let decrypting = matches!(cli.command, Commands::Decrypt { .. });
    let (config, found) = if decrypting {
        (PswdConfig::default(), false)
    } else {
        load_config(&cli.config)
            .await
            .with_context(|| format!("loading config: {}", cli.config.display()))?
    };

    if decrypting {
        pswd_core::logging::init_logging(cli.log.as_deref().unwrap_or("error"), LogFormat::Bare);
    } else {
        let level = cli.log.as_deref().unwrap_or(&config.log.level);
        let format = cli.log_format.unwrap_or(config.log.format);
        pswd_core::logging::init_logging(level, format);
        if !found {
            tracing::warn!(
                "config file not found: {}  (using defaults)",
                cli.config.display()
            );
        }
    }

    let result = match cli.command {
        Commands::StoreName => cmd_store_name(cli.master_key.as_deref()),
        Commands::List { file } => {
            cmd_list(&config, cli.master_key.as_deref(), file).await
        }
        Commands::Show { id, entry_key, file } => {
            cmd_show(&config, cli.master_key.as_deref(), &id, &entry_key, file).await
        }
        Commands::Prompt { id, file } => {
            cmd_prompt(&config, cli.master_key.as_deref(), &id, file).await
        }
        Commands::Decrypt { key, strict } => {
            let code = pswd_cli::stdio::decrypt_stream(
                &key,
                strict,
                std::io::stdin().lock(),
                std::io::stdout().lock(),
            )
            .context("reading stdin or writing stdout")?;
            return Ok(ExitCode::from(code));
        }
        Commands::Config { action: ConfigAction::Show } => {
            cmd_config_show(&config, &cli.config, found)
        }
    };
    result.map(|()| ExitCode::SUCCESS)
}

async fn load_config(path: &Path) -> PswdResult<(PswdConfig, bool)> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok((PswdConfig::from_toml_str(&content)?, true)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok((PswdConfig::default(), false)),
        Err(e) => Err(PswdError::Io(e)),
    }
}

// ── Store helpers ─────────────────────────────────────────────────────────────

fn keychain(master_key: Option<&str>) -> Result<Keychain> {
    use pswd_crypto::keychain::{KEY_PATH, MASTER_KEY_PROMPT, MASTER_KEY_VALUE};

    let master_key = master_key.with_context(|| {
        format!(
            "master key not set\n\
             Pass --master-key or set PSWD_MASTER_KEY to the hex output of the device's\n\
             key-value encryption at {KEY_PATH} with key {MASTER_KEY_PROMPT:?}\n\
             and value {MASTER_KEY_VALUE}"
        )
    })?;
    Keychain::from_master_hex(master_key).context("parsing master key")
}

/// Expand `~` in path to `home`
fn expand_tilde(path: &Path, home: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    match s.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_default())
}

/// Resolve the store source: CLI flag > config path > config dir + derived name
fn store_source(config: &PswdConfig, file_override: Option<PathBuf>) -> FileSource {
    let home = home_dir();
    let path = file_override
        .or_else(|| config.store.path.clone())
        .map(|p| expand_tilde(&p, &home));
    FileSource::new(path, expand_tilde(&config.store.dir, &home))
}

async fn load(
    config: &PswdConfig,
    master_key: Option<&str>,
    file: Option<PathBuf>,
) -> Result<Store> {
    let keychain = keychain(master_key)?;
    let source = store_source(config, file);
    let location = source.resolve(keychain.store_name());
    open_store(&keychain, &source)
        .await
        .with_context(|| format!("opening store {}", location.display()))
}

// ── `pswd store-name` ─────────────────────────────────────────────────────────

fn cmd_store_name(master_key: Option<&str>) -> Result<()> {
    println!("{}", keychain(master_key)?.store_name());
    Ok(())
}

// ── `pswd list` ───────────────────────────────────────────────────────────────

async fn cmd_list(config: &PswdConfig, master_key: Option<&str>, file: Option<PathBuf>) -> Result<()> {
    let store = load(config, master_key, file).await?;

    println!("store: {}", store.name);
    let tags: Vec<&str> = store.tags.iter().map(|t| t.title.as_str()).collect();
    println!("tags:  {}", tags.join(", "));
    println!();

    if store.entries.is_empty() {
        println!("(no entries)");
        return Ok(());
    }

    let id_width = store.entries.iter().map(|e| e.id.len()).max().unwrap_or(2).max(2);
    let title_width = store.entries.iter().map(|e| e.title.len()).max().unwrap_or(5).max(5);
    let user_width = store.entries.iter().map(|e| e.username.len()).max().unwrap_or(8).max(8);

    println!(
        "{:<id_width$}  {:<title_width$}  {:<user_width$}  URL",
        "ID", "TITLE", "USERNAME"
    );
    for entry in &store.entries {
        let tags = if entry.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", entry.tags.join(", "))
        };
        println!(
            "{:<id_width$}  {:<title_width$}  {:<user_width$}  {}{tags}",
            entry.id, entry.title, entry.username, entry.url
        );
    }
    Ok(())
}

// ── `pswd show` ───────────────────────────────────────────────────────────────

async fn cmd_show(
    config: &PswdConfig,
    master_key: Option<&str>,
    id: &str,
    entry_key: &str,
    file: Option<PathBuf>,
) -> Result<()> {
    let store = load(config, master_key, file).await?;
    let entry = store
        .entry(id)
        .ok_or_else(|| pswd_store::StoreError::EntryNotFound(id.to_string()))?;

    let decrypted = EntryDecrypter::from_hex(entry_key)?
        .decrypt(entry)
        .with_context(|| format!("decrypting entry {id} ({})", entry.title))?;

    println!("url:       {}", decrypted.url);
    println!("title:     {}", decrypted.title);
    println!("username:  {}", decrypted.username);
    if !decrypted.tags.is_empty() {
        println!("tags:      {}", decrypted.tags.join(", "));
    }
    println!("password:  {}", decrypted.password);
    println!("safe note: {}", decrypted.safe_note);
    Ok(())
}

// ── `pswd prompt` ─────────────────────────────────────────────────────────────

async fn cmd_prompt(
    config: &PswdConfig,
    master_key: Option<&str>,
    id: &str,
    file: Option<PathBuf>,
) -> Result<()> {
    let store = load(config, master_key, file).await?;
    let entry = store
        .entry(id)
        .ok_or_else(|| pswd_store::StoreError::EntryNotFound(id.to_string()))?;

    println!("path:   {}", pswd_crypto::keychain::KEY_PATH);
    println!("prompt: {}", entry.unlock_prompt());
    println!("nonce:  {}", entry.nonce);
    Ok(())
}

// ── `pswd config show` ────────────────────────────────────────────────────────

fn cmd_config_show(config: &PswdConfig, config_path: &Path, found: bool) -> Result<()> {
    if found {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_uses_home() {
        let home = Path::new("/home/tester");
        assert_eq!(
            expand_tilde(Path::new("~/Dropbox/store.pswd"), home),
            PathBuf::from("/home/tester/Dropbox/store.pswd")
        );
        assert_eq!(expand_tilde(Path::new("/abs"), home), PathBuf::from("/abs"));
        assert_eq!(expand_tilde(Path::new("~other/x"), home), PathBuf::from("~other/x"));
    }

    #[tokio::test]
    async fn load_config_missing_file_gives_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let (config, found) = load_config(&tmp.path().join("absent.toml")).await.unwrap();
        assert!(!found);
        assert_eq!(config.log.level, "info");
    }

    #[tokio::test]
    async fn load_config_unreadable_path_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = load_config(tmp.path()).await.unwrap_err();
        assert!(matches!(err, PswdError::Io(_)));
    }

    #[tokio::test]
    async fn load_config_invalid_toml_is_config_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("pswd.toml");
        std::fs::write(&path, "[log]\nformat = \"xml\"\n").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(matches!(err, PswdError::Config(_)));
    }

    #[test]
    fn store_source_precedence() {
        let mut config = PswdConfig::default();
        config.store.path = Some(PathBuf::from("/from/config.pswd"));
        config.store.dir = PathBuf::from("/store/dir");

        let source = store_source(&config, Some(PathBuf::from("/from/flag.pswd")));
        assert_eq!(source.resolve("x.pswd"), PathBuf::from("/from/flag.pswd"));

        let source = store_source(&config, None);
        assert_eq!(source.resolve("x.pswd"), PathBuf::from("/from/config.pswd"));

        config.store.path = None;
        let source = store_source(&config, None);
        assert_eq!(source.resolve("x.pswd"), PathBuf::from("/store/dir/x.pswd"));
    }

    #[test]
    fn missing_master_key_is_an_error() {
        let err = keychain(None).unwrap_err();
        assert!(err.to_string().contains("master key not set"));
    }

    #[test]
    fn cli_parses_show() {
        let cli = Cli::try_parse_from([
            "pswd",
            "--master-key",
            "00",
            "show",
            "3",
            "--entry-key",
            "ab",
        ])
        .unwrap();
        match cli.command {
            Commands::Show { id, entry_key, file } => {
                assert_eq!(id, "3");
                assert_eq!(entry_key, "ab");
                assert!(file.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
