//! ssk: SSK record inspection and decryption
//!
//! Commands:
//!   inspect <record>                      - verify a stored record and print its fields
//!   decrypt <record> --crypto-key <hex>   - verify, then decrypt the payload
//!   location --pubkey-hash --crypto-key --docname
//!                                         - derive a routing location
//!   config show                           - display current configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use ssk_core::config::SskConfig;
use ssk_crypto::{
    encrypt_docname, location_from_ehdocname, ClientSsk, DecryptedSsk, Key, SskFound,
    CIPHER_AES_PCFB_256_SHA256,
};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ssk",
    version,
    about = "Signed Subspace Key block tool",
    long_about = "ssk: verify, inspect and decrypt persisted SSK records"
)]
struct Cli {
    /// Path to ssk.toml configuration file
    #[arg(long, short = 'c', env = "SSK_CONFIG", default_value = "ssk.toml")]
    config: PathBuf,

    /// Log level (overrides config; RUST_LOG overrides both)
    #[arg(long, env = "SSK_LOG")]
    log_level: Option<String>,

    /// Log format (overrides config)
    #[arg(long, env = "SSK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a stored record and print its fields
    Inspect {
        /// Record file (2216 bytes)
        record: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Skip the location cross-check even if the config enables it
        #[arg(long)]
        no_location_check: bool,
    },

    /// Verify a stored record, then decrypt its payload
    ///
    /// With --pubkey-hash and --docname the record is first matched against
    /// the full client key; otherwise only the crypto key is used.
    Decrypt {
        /// Record file (2216 bytes)
        record: PathBuf,
        /// Subspace crypto key (64 hex chars)
        #[arg(long, env = "SSK_CRYPTO_KEY")]
        crypto_key: Key,
        /// Cipher id from the key
        #[arg(long, default_value_t = CIPHER_AES_PCFB_256_SHA256)]
        cipher: u16,
        /// Expected public key hash (64 hex chars)
        #[arg(long, requires = "docname")]
        pubkey_hash: Option<Key>,
        /// Expected document name
        #[arg(long, requires = "pubkey_hash")]
        docname: Option<String>,
        /// Write plaintext here instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Derive the routing location of a document
    Location {
        /// SHA-256 of the publisher's public key (64 hex chars)
        #[arg(long)]
        pubkey_hash: Key,
        /// Subspace crypto key (64 hex chars)
        #[arg(long, env = "SSK_CRYPTO_KEY")]
        crypto_key: Key,
        /// Document name
        #[arg(long)]
        docname: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
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

#[derive(Clone, Debug, ValueEnum, PartialEq)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SskConfig::load(&cli.config)
        .with_context(|| format!("loading config: {}", cli.config.display()))?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log.level);
    let format = match cli.log_format {
        Some(f) => f,
        None => parse_log_format(&config.log.format)?,
    };
    init_logging(level, &format);

    debug!(config = %cli.config.display(), "ssk starting");

    match cli.command {
        Commands::Inspect {
            record,
            json,
            no_location_check,
        } => cmd_inspect(&config, &record, json, no_location_check),
        Commands::Decrypt {
            record,
            crypto_key,
            cipher,
            pubkey_hash,
            docname,
            out,
        } => cmd_decrypt(
            &record,
            &crypto_key,
            cipher,
            pubkey_hash.zip(docname),
            out.as_deref(),
        ),
        Commands::Location {
            pubkey_hash,
            crypto_key,
            docname,
            json,
        } => cmd_location(&pubkey_hash, &crypto_key, &docname, json),
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &cli.config),
    }
}

fn parse_log_format(s: &str) -> Result<LogFormat> {
    LogFormat::from_str(s, true).map_err(|e| anyhow::anyhow!("invalid log format '{s}': {e}"))
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so plaintext on stdout stays clean
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn read_record(path: &Path) -> Result<SskFound> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading record: {}", path.display()))?;
    SskFound::from_bytes(&bytes).with_context(|| format!("verifying record: {}", path.display()))
}

// ── `ssk inspect` ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct InspectReport {
    location: Key,
    pubkey_hash: Key,
    p_bits: u64,
    q_bits: u64,
    hash_algorithm: u16,
    cipher_algorithm: u16,
    encrypted_docname_hash: Key,
    /// None when the check was skipped
    location_verified: Option<bool>,
}

impl InspectReport {
    fn new(found: &SskFound, location_verified: Option<bool>) -> Self {
        let header = found.header();
        let group = found.pubkey().group();
        Self {
            location: found.location(),
            pubkey_hash: found.pubkey().hash(),
            p_bits: group.p().bits(),
            q_bits: group.q().bits(),
            hash_algorithm: header.hash_algorithm(),
            cipher_algorithm: header.cipher_algorithm(),
            encrypted_docname_hash: header.encrypted_docname_hash(),
            location_verified,
        }
    }

    fn render_text(&self) -> String {
        let verified = match self.location_verified {
            Some(true) => "ok",
            Some(false) => "MISMATCH",
            None => "skipped",
        };
        format!(
            "location:               {}\n\
             location check:         {verified}\n\
             public key hash:        {}\n\
             DSA group:              p={} bits, q={} bits\n\
             hash algorithm:         {}\n\
             cipher algorithm:       {}\n\
             encrypted docname hash: {}\n",
            self.location,
            self.pubkey_hash,
            self.p_bits,
            self.q_bits,
            self.hash_algorithm,
            self.cipher_algorithm,
            self.encrypted_docname_hash,
        )
    }
}

fn cmd_inspect(config: &SskConfig, path: &Path, json: bool, no_location_check: bool) -> Result<()> {
    let found = read_record(path)?;
    info!(location = %found.location(), "signature verified");

    let location_verified = if config.verify.check_location && !no_location_check {
        match found.verify_location() {
            Ok(()) => Some(true),
            Err(e) => {
                warn!(path = %path.display(), "{e}");
                Some(false)
            }
        }
    } else {
        None
    };

    let report = InspectReport::new(&found, location_verified);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
    } else {
        print!("{}", report.render_text());
    }

    if location_verified == Some(false) {
        anyhow::bail!("record location does not match its key material");
    }
    Ok(())
}

// ── `ssk decrypt` ─────────────────────────────────────────────────────────────

fn cmd_decrypt(
    path: &Path,
    crypto_key: &Key,
    cipher: u16,
    client: Option<(Key, String)>,
    out: Option<&Path>,
) -> Result<()> {
    let found = read_record(path)?;

    let block: DecryptedSsk = match client {
        Some((pubkey_hash, docname)) => {
            let key = ClientSsk::new(pubkey_hash, *crypto_key, docname, cipher)
                .context("building client key")?;
            key.decode(&found).context("decrypting record")?
        }
        None => found
            .decrypt_block(crypto_key, cipher)
            .context("decrypting record")?,
    };

    info!(
        location = %found.location(),
        len = block.data.len(),
        is_metadata = block.is_metadata,
        compression_algorithm = block.compression_algorithm,
        "decrypted"
    );

    match out {
        Some(dest) => std::fs::write(dest, &block.data)
            .with_context(|| format!("writing plaintext: {}", dest.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&block.data).context("writing plaintext to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

// ── `ssk location` ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct LocationReport {
    location: Key,
    encrypted_docname_hash: Key,
}

fn cmd_location(pubkey_hash: &Key, crypto_key: &Key, docname: &str, json: bool) -> Result<()> {
    let eh = encrypt_docname(crypto_key, docname);
    let report = LocationReport {
        location: location_from_ehdocname(pubkey_hash, &eh),
        encrypted_docname_hash: eh,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
    } else {
        println!("location:               {}", report.location);
        println!("encrypted docname hash: {}", report.encrypted_docname_hash);
    }
    Ok(())
}

// ── `ssk config show` ─────────────────────────────────────────────────────────

fn cmd_config_show(config: &SskConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    print!("{}", config.to_toml().context("serializing config to TOML")?);
    Ok(())
}
