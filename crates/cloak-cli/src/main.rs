//! Command-line interface for the Cloak AES and RSA engines.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cloak_aes::{BlockCipher, PaddingMode};
use cloak_rsa::{BigUint, KeyGenConfig, RsaCipher};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Key used when `--key-hex` is not given. It is public, so it only suits demos.
const DEFAULT_AES_KEY_HEX: &str = "2b7e151628aed2a6abf709cf4f3ce2b8";

/// Cloak: text encryption with a from-scratch AES-128 and a toy RSA.
#[derive(Parser)]
#[command(name = "cloak", version, author, about = "Cloak text encryption CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Engine used by the `encrypt` command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Per-byte textbook RSA with a fresh key pair.
    #[default]
    Rsa,
    /// AES-128 in ECB mode; prints the ciphertext as space-separated hex bytes.
    Aes,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text with AES-128 and print the ciphertext as hex.
    AesEnc {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX", default_value = DEFAULT_AES_KEY_HEX)]
        key_hex: String,
        #[command(flatten)]
        source: Source,
        /// Write the hex ciphertext to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Decrypt hex ciphertext produced by `aes-enc` or `encrypt --algorithm aes`.
    AesDec {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX", default_value = DEFAULT_AES_KEY_HEX)]
        key_hex: String,
        #[command(flatten)]
        source: Source,
        /// Write the plaintext to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Reject ciphertexts whose padding bytes are inconsistent.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Encrypt text with a fresh RSA key pair, one decimal integer per byte.
    RsaEnc {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        keys: RsaKeyArgs,
        /// Write the ciphertext to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Decrypt decimal RSA ciphertext using the primes it was made with.
    RsaDec {
        /// First prime factor.
        #[arg(long)]
        p: u64,
        /// Second prime factor.
        #[arg(long)]
        q: u64,
        #[command(flatten)]
        source: Source,
        /// Write the plaintext to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Encrypt text with the selected engine.
    Encrypt {
        /// Engine to use.
        #[arg(long, value_enum, default_value_t = Algorithm::Rsa)]
        algorithm: Algorithm,
        /// AES-128 key as 32 hex characters (AES only).
        #[arg(long, value_name = "HEX", default_value = DEFAULT_AES_KEY_HEX)]
        key_hex: String,
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        keys: RsaKeyArgs,
        /// Write the ciphertext to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Round-trip a sample message through both engines.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Where the command reads its input from.
#[derive(clap::Args)]
struct Source {
    /// Input given inline on the command line.
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    text: Option<String>,
    /// Input read from a file.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
}

/// Key generation options for RSA encryption.
#[derive(clap::Args)]
struct RsaKeyArgs {
    /// Optional RNG seed for reproducible key pairs.
    #[arg(long, conflicts_with = "p")]
    seed: Option<u64>,
    /// Use this first prime instead of generating one (requires --q).
    #[arg(long, requires = "q")]
    p: Option<u64>,
    /// Use this second prime instead of generating one (requires --p).
    #[arg(long, requires = "p")]
    q: Option<u64>,
    /// Smallest prime candidate.
    #[arg(long, default_value_t = 100, conflicts_with = "p")]
    min_prime: u64,
    /// Largest prime candidate.
    #[arg(long, default_value_t = 199, conflicts_with = "p")]
    max_prime: u64,
    /// Print the generated primes to stderr so the output can be decrypted.
    #[arg(long, default_value_t = false)]
    reveal_primes: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::AesEnc {
            key_hex,
            source,
            output,
        } => cmd_aes_enc(&key_hex, &source, output.as_deref(), false),
        Commands::AesDec {
            key_hex,
            source,
            output,
            strict,
        } => cmd_aes_dec(&key_hex, &source, output.as_deref(), strict),
        Commands::RsaEnc {
            source,
            keys,
            output,
        } => cmd_rsa_enc(&source, &keys, output.as_deref()),
        Commands::RsaDec {
            p,
            q,
            source,
            output,
        } => cmd_rsa_dec(p, q, &source, output.as_deref()),
        Commands::Encrypt {
            algorithm,
            key_hex,
            source,
            keys,
            output,
        } => cmd_encrypt(algorithm, &key_hex, &source, &keys, output.as_deref()),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("cloak_cli=info,cloak_aes=info,cloak_rsa=info")
        }))
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_aes_enc(
    key_hex: &str,
    source: &Source,
    output: Option<&Path>,
    spaced: bool,
) -> Result<()> {
    let cipher = parse_aes_key(key_hex)?;
    let plaintext = source.read()?;
    let ciphertext = cipher.encrypt_message(&plaintext);
    info!(
        plaintext_bytes = plaintext.len(),
        ciphertext_bytes = ciphertext.len(),
        "aes encrypt"
    );
    emit(output, &format_hex(&ciphertext, spaced))
}

fn cmd_aes_dec(key_hex: &str, source: &Source, output: Option<&Path>, strict: bool) -> Result<()> {
    let padding = if strict {
        PaddingMode::Strict
    } else {
        PaddingMode::Lenient
    };
    let cipher = parse_aes_key(key_hex)?.with_padding(padding);
    let encoded = source.read_text()?;
    let ciphertext = parse_hex(&encoded).context("decode ciphertext hex")?;
    let plaintext = cipher
        .decrypt_message(&ciphertext)
        .context("aes decrypt")?;
    info!(ciphertext_bytes = ciphertext.len(), "aes decrypt");
    emit(output, &String::from_utf8_lossy(&plaintext))
}

fn cmd_rsa_enc(source: &Source, keys: &RsaKeyArgs, output: Option<&Path>) -> Result<()> {
    let rsa = keys.build()?;
    let plaintext = source.read()?;
    let ciphertext = rsa.encrypt_string(&plaintext);
    let public = rsa.public_key();
    info!(n = %public.n, e = %public.e, symbols = ciphertext.len(), "rsa encrypt");
    if keys.reveal_primes {
        let material = rsa.key_material();
        eprintln!("p = {}, q = {}", material.p(), material.q());
    }
    emit(output, &format_symbols(&ciphertext))
}

fn cmd_rsa_dec(p: u64, q: u64, source: &Source, output: Option<&Path>) -> Result<()> {
    let rsa = RsaCipher::from_primes(p, q).context("rebuild key pair")?;
    let symbols = parse_symbols(&source.read_text()?)?;
    let plaintext = rsa.decrypt_string_strict(&symbols).context("rsa decrypt")?;
    info!(symbols = symbols.len(), "rsa decrypt");
    emit(output, &String::from_utf8_lossy(&plaintext))
}

fn cmd_encrypt(
    algorithm: Algorithm,
    key_hex: &str,
    source: &Source,
    keys: &RsaKeyArgs,
    output: Option<&Path>,
) -> Result<()> {
    debug!(?algorithm, "engine selected");
    match algorithm {
        Algorithm::Rsa => cmd_rsa_enc(source, keys, output),
        Algorithm::Aes => cmd_aes_enc(key_hex, source, output, true),
    }
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let message = "Cloak demo: attack at dawn";

    let mut key_bytes = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    let aes = BlockCipher::new(&key_bytes).context("construct AES engine")?;
    let aes_ct = aes.encrypt_message(message.as_bytes());
    let aes_pt = aes.decrypt_message(&aes_ct).context("aes decrypt")?;

    let rsa = RsaCipher::generate(&mut rng, &KeyGenConfig::default())
        .context("generate RSA key pair")?;
    let rsa_ct = rsa.encrypt_str(message);
    let rsa_pt = rsa.decrypt_to_string(&rsa_ct).context("rsa decrypt")?;

    let public = rsa.public_key();
    println!("plaintext: {message}");
    println!("aes key: {}", hex::encode(key_bytes));
    println!("aes ciphertext: {}", hex::encode(&aes_ct));
    println!("rsa public key: n = {}, e = {}", public.n, public.e);
    println!("rsa ciphertext: {}", format_symbols(&rsa_ct));

    if aes_pt != message.as_bytes() {
        bail!("aes demo roundtrip failed");
    }
    if rsa_pt != message {
        bail!("rsa demo roundtrip failed");
    }
    println!("both engines round-tripped");
    Ok(())
}

impl Source {
    fn read(&self) -> Result<Vec<u8>> {
        match (&self.text, &self.input) {
            (Some(text), _) => Ok(text.clone().into_bytes()),
            (None, Some(path)) => {
                fs::read(path).with_context(|| format!("read {}", path.display()))
            }
            (None, None) => bail!("either --text or --input is required"),
        }
    }

    fn read_text(&self) -> Result<String> {
        let bytes = self.read()?;
        String::from_utf8(bytes).context("input is not valid UTF-8")
    }
}

impl RsaKeyArgs {
    fn build(&self) -> Result<RsaCipher> {
        if let (Some(p), Some(q)) = (self.p, self.q) {
            return RsaCipher::from_primes(p, q).context("build key pair from primes");
        }
        let config = KeyGenConfig::default().prime_range(self.min_prime..=self.max_prime);
        let mut rng = seeded_rng(self.seed);
        RsaCipher::generate(&mut rng, &config).context("generate RSA key pair")
    }
}

fn parse_aes_key(hex_str: &str) -> Result<BlockCipher> {
    if hex_str == DEFAULT_AES_KEY_HEX {
        info!("using the built-in demo AES key");
    }
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    BlockCipher::new(&bytes).context("AES-128 key must be 16 bytes (32 hex characters)")
}

/// Hex-encodes `bytes`, optionally as space-separated two-digit groups.
fn format_hex(bytes: &[u8], spaced: bool) -> String {
    if !spaced {
        return hex::encode(bytes);
    }
    bytes
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accepts both packed and whitespace-separated hex.
fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    Ok(hex::decode(compact)?)
}

fn format_symbols(symbols: &[BigUint]) -> String {
    symbols
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_symbols(text: &str) -> Result<Vec<BigUint>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<BigUint>()
                .map_err(|err| anyhow!("invalid ciphertext symbol {token:?}: {err}"))
        })
        .collect()
}

fn emit(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "saved output");
        }
        None => println!("{contents}"),
    }
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
