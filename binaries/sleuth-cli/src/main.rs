//! Cipher-Sleuth CLI
//!
//! Guess Caesar and Vigenère keys from the command line.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sleuth_config::EngineConfig;
use sleuth_core::shift::{caesar_decrypt, vigenere_decrypt};
use sleuth_core::{AnalysisResult, CipherKind, ALPHABET_LEN};
use sleuth_engine::{AnalysisRequest, Sleuth, TextReport};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sleuth")]
#[command(about = "Cipher-Sleuth - statistical key recovery for Caesar and Vigenère ciphers")]
#[command(version)]
struct Cli {
    /// YAML config file (default: ~/.config/cipher-sleuth/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// Ciphertext (read from stdin when omitted)
    text: Option<String>,

    /// Read the ciphertext from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl Input {
    fn read(self) -> Result<String> {
        match (self.text, self.file) {
            (Some(text), _) => Ok(text),
            (None, Some(path)) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display())),
            (None, None) => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the 26 Caesar shifts
    Caesar {
        #[command(flatten)]
        input: Input,

        /// Candidates to show
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate the key length and recover Vigenère keywords
    Vigenere {
        #[command(flatten)]
        input: Input,

        /// Candidates to show
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Longest key length to test
        #[arg(short, long)]
        max_key_length: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Letter frequencies, index of coincidence and key length evidence
    Profile {
        #[command(flatten)]
        input: Input,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decrypt with a known key
    Decrypt {
        /// Cipher: caesar, vigenere
        #[arg(short, long)]
        cipher: CipherKind,

        /// Shift (caesar) or keyword (vigenere)
        #[arg(long)]
        key: String,

        #[command(flatten)]
        input: Input,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Caesar { input, top_k, json } => {
            let sleuth = load_engine(cli.config)?;
            let mut request = AnalysisRequest::caesar(input.read()?);
            request.top_k = top_k;
            cmd_analyze(&sleuth, &request, json)
        }
        Commands::Vigenere {
            input,
            top_k,
            max_key_length,
            json,
        } => {
            let sleuth = load_engine(cli.config)?;
            let mut request = AnalysisRequest::polyalphabetic(input.read()?);
            request.top_k = top_k;
            request.max_key_length = max_key_length;
            cmd_analyze(&sleuth, &request, json)
        }
        Commands::Profile { input, json } => {
            let sleuth = load_engine(cli.config)?;
            cmd_profile(&sleuth, &input.read()?, json)
        }
        Commands::Decrypt { cipher, key, input } => {
            println!("{}", decrypt(cipher, &key, &input.read()?)?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = EnvFilter::from_default_env();
    for target in ["sleuth", "sleuth_engine", "sleuth_config"] {
        filter = filter.add_directive(format!("{}={}", target, level).parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_engine(config: Option<PathBuf>) -> Result<Sleuth> {
    let config = EngineConfig::resolve(config.as_deref()).context("Failed to load config")?;
    Ok(Sleuth::english(config)?)
}

fn cmd_analyze(sleuth: &Sleuth, request: &AnalysisRequest, json: bool) -> Result<()> {
    let result = sleuth.analyze(request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_result(&result));
    }
    Ok(())
}

fn cmd_profile(sleuth: &Sleuth, text: &str, json: bool) -> Result<()> {
    let report = sleuth.report(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_profile(&report));
    }
    Ok(())
}

fn decrypt(cipher: CipherKind, key: &str, text: &str) -> Result<String> {
    Ok(match cipher {
        CipherKind::Caesar => caesar_decrypt(text, parse_shift(key)?),
        CipherKind::Polyalphabetic => vigenere_decrypt(text, key)?,
    })
}

fn parse_shift(key: &str) -> Result<u8> {
    key.trim()
        .parse::<u8>()
        .ok()
        .filter(|&shift| usize::from(shift) < ALPHABET_LEN)
        .with_context(|| format!("Caesar key must be a shift 0-25, got {:?}", key))
}

fn banner(title: &str) -> String {
    format!("\n  {}\n  {}\n\n", title, "=".repeat(title.chars().count()))
}

fn render_result(result: &AnalysisResult) -> String {
    let title = format!("{} KEY SEARCH", result.kind.name().to_uppercase());
    let mut out = banner(&title);

    if result.is_no_signal() {
        out.push_str("  Not enough letters for a confident ranking.\n");
    }
    for (rank, candidate) in result.candidates.iter().enumerate() {
        out.push_str(&format!(
            "  [{}] key {:<12} {:5.1}%  {}\n",
            rank + 1,
            candidate.key.to_string(),
            candidate.confidence_display(),
            candidate.sample
        ));
    }
    out
}

fn render_profile(report: &TextReport) -> String {
    let mut out = banner("CIPHERTEXT PROFILE");
    for line in report.render().lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }

    let top: Vec<String> = report
        .top_letters
        .iter()
        .map(|(letter, count)| format!("{}={}", letter, count))
        .collect();
    if !top.is_empty() {
        out.push_str(&format!("\n  Top letters: {}\n", top.join(" ")));
    }
    match report.looks_polyalphabetic() {
        Some(true) => out.push_str("  Verdict: several alphabets, try `sleuth vigenere`\n"),
        Some(false) => out.push_str("  Verdict: single alphabet, try `sleuth caesar`\n"),
        None => {}
    }
    out
}
