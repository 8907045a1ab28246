use anyhow::{Context, Result};
use ledger_ingest::CleanOptions;
use ledger_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config file location, e.g. for a per-project config.
pub const CONFIG_ENV: &str = "LEDGER_CLEAN_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSection,
    pub clean: CleanOptions,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Output directory (default: the system temp dir)
    pub dir: Option<PathBuf>,
    pub format: OutputFormat,
    /// Ledger rows printed after cleaning; 0 disables the preview
    pub preview_rows: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: None,
            format: OutputFormat::Xlsx,
            preview_rows: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default tracing filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `$LEDGER_CLEAN_CONFIG`, else `$HOME/.ledger-clean/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    resolve_config_path(env::var_os(CONFIG_ENV), env::var_os("HOME"))
}

fn resolve_config_path(explicit: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(p) = explicit.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let home = home.with_context(|| format!("HOME is not set; point {CONFIG_ENV} at a config file"))?;
    Ok(PathBuf::from(home).join(".ledger-clean").join("config.toml"))
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
