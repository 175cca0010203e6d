//! Configuration handling for the scanner.

use crate::types::{AdfindError, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;

/// Registry mapping file expected under the base path.
const REGISTRY_FILE: &str = "config.json";

/// Admin panel discovery scanner.
#[derive(Parser, Debug, Clone)]
#[command(name = "adfind")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Target URL (example: adfind -u https://example.com -t php)
    #[arg(short = 'u', long = "url")]
    pub target: String,

    /// Admin panel category; "all" runs every registered category
    #[arg(short = 't', long, default_value = "all")]
    pub category: String,

    /// Explicit wordlist file, bypassing the category registry
    #[arg(short, long)]
    pub wordlist: Option<PathBuf>,

    /// Base directory holding config.json and the wordlists it names
    #[arg(short, long, default_value = "/usr/share/adfind/")]
    pub base_path: PathBuf,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value = "1000")]
    pub timeout: u64,

    /// Pause after each hit and ask whether to continue
    #[arg(short, long)]
    pub stop: bool,

    /// Custom header to add to every request ("Key: Value"), repeatable
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Number of concurrent probes within a pass
    #[arg(short, long, default_value = "1")]
    pub concurrency: usize,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the JSON result to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: String::new(),
            category: "all".to_string(),
            wordlist: None,
            base_path: PathBuf::from("/usr/share/adfind/"),
            timeout: 1000,
            stop: false,
            headers: Vec::new(),
            concurrency: 1,
            verbose: 0,
            json: false,
            output: None,
        }
    }
}

impl Config {
    /// Location of the registry mapping file.
    pub fn registry_path(&self) -> PathBuf {
        self.base_path.join(REGISTRY_FILE)
    }

    /// Parse repeated `-H "Key: Value"` flags, curl style.
    pub fn parse_headers(&self) -> Result<HashMap<String, String>> {
        let mut map = HashMap::with_capacity(self.headers.len());
        for raw in &self.headers {
            let (key, value) = raw.split_once(':').ok_or_else(|| {
                AdfindError::ConfigError(format!(
                    "invalid header format {:?}, use \"Key: Value\"",
                    raw
                ))
            })?;

            let key = key.trim();
            let value = value.trim();
            if key.is_empty() {
                return Err(AdfindError::ConfigError(format!(
                    "invalid header format {:?}, use \"Key: Value\"",
                    raw
                )));
            }

            map.insert(key.to_string(), value.to_string());
        }
        Ok(map)
    }

    /// Cross-flag validation the derive layer cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(AdfindError::ConfigError("target URL is required".into()));
        }

        // The interactive prompt needs exactly one probe in flight.
        if self.stop && self.concurrency > 1 {
            return Err(AdfindError::ConfigError(
                "--stop and --concurrency > 1 are mutually exclusive".into(),
            ));
        }

        if self.timeout == 0 {
            return Err(AdfindError::ConfigError("timeout must be positive".into()));
        }

        Ok(())
    }
}
