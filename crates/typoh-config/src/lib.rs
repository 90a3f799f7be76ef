//! Configuration management for typoh.
//!
//! Provides the built-in marker tables and parses optional `typoh.toml`
//! files with serde, with auto-discovery of config files in parent
//! directories.
//!
//! ## File format
//!
//! ```toml
//! # Keep the built-in tables (default: true).
//! inherit_defaults = true
//!
//! [[first_pass]]
//! marker = "(c)"
//! replacement = "©"
//!
//! [[second_pass]]
//! marker = "+-"
//! replacement = "±"
//! ```
//!
//! When defaults are inherited, a configured marker that already exists in
//! the built-in table replaces that entry in place; new markers are appended
//! after the built-ins. With `inherit_defaults = false` the configured
//! entries are the whole table.

pub mod defaults;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "typoh.toml";

/// A single marker → replacement entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    /// ASCII shorthand typed by the author.
    pub marker: String,
    /// Text written in its place.
    pub replacement: String,
}

impl Rule {
    /// Create a new rule.
    pub fn new(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            replacement: replacement.into(),
        }
    }
}

/// Which replacement pass a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Applied first to every prose span.
    First,
    /// Applied to the output of the first pass.
    Second,
}

impl Pass {
    fn key(self) -> &'static str {
        match self {
            Self::First => "first_pass",
            Self::Second => "second_pass",
        }
    }

    fn defaults(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::First => defaults::FIRST_PASS,
            Self::Second => defaults::SECOND_PASS,
        }
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Whether configured rules extend the built-in tables.
    pub inherit_defaults: bool,
    /// Configured first-pass rules, as written in the file.
    first_pass: Vec<Rule>,
    /// Configured second-pass rules, as written in the file.
    second_pass: Vec<Rule>,

    /// Resolved first-pass table (set after loading).
    #[serde(skip)]
    pub first_pass_resolved: Vec<Rule>,
    /// Resolved second-pass table (set after loading).
    #[serde(skip)]
    pub second_pass_resolved: Vec<Rule>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inherit_defaults: true,
            first_pass: Vec::new(),
            second_pass: Vec::new(),
            first_pass_resolved: default_rules(Pass::First),
            second_pass_resolved: default_rules(Pass::Second),
            config_path: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `typoh.toml` in the current directory and parents, and
    /// falls back to the built-in tables.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using built-in tables");
                Ok(Self::default())
            }
        }
    }

    /// Resolved rules for a pass, in precedence order.
    #[must_use]
    pub fn rules(&self, pass: Pass) -> &[Rule] {
        match pass {
            Pass::First => &self.first_pass_resolved,
            Pass::Second => &self.second_pass_resolved,
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            first_pass = config.first_pass_resolved.len(),
            second_pass = config.second_pass_resolved.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Parse, validate, and resolve configuration text.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.validate()?;
        config.resolve_tables();
        Ok(config)
    }

    /// Validate configured rules.
    ///
    /// Markers must be non-empty and unique within a pass.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the pass and entry position.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rules(&self.first_pass, Pass::First)?;
        validate_rules(&self.second_pass, Pass::Second)?;
        Ok(())
    }

    /// Combine configured rules with the built-ins.
    fn resolve_tables(&mut self) {
        self.first_pass_resolved =
            resolve_rules(&self.first_pass, Pass::First, self.inherit_defaults);
        self.second_pass_resolved =
            resolve_rules(&self.second_pass, Pass::Second, self.inherit_defaults);
    }
}

fn default_rules(pass: Pass) -> Vec<Rule> {
    pass.defaults()
        .iter()
        .map(|(marker, replacement)| Rule::new(*marker, *replacement))
        .collect()
}

fn validate_rules(rules: &[Rule], pass: Pass) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for (i, rule) in rules.iter().enumerate() {
        let field = format!("{}[{i}].marker", pass.key());
        if rule.marker.is_empty() {
            return Err(ConfigError::Validation(format!("{field} cannot be empty")));
        }
        if !seen.insert(rule.marker.as_str()) {
            return Err(ConfigError::Validation(format!(
                "{field} duplicates an earlier marker {:?}",
                rule.marker
            )));
        }
    }
    Ok(())
}

fn resolve_rules(configured: &[Rule], pass: Pass, inherit_defaults: bool) -> Vec<Rule> {
    if !inherit_defaults {
        return configured.to_vec();
    }

    let mut rules = default_rules(pass);
    for rule in configured {
        match rules.iter_mut().find(|r| r.marker == rule.marker) {
            Some(existing) => existing.replacement.clone_from(&rule.replacement),
            None => rules.push(rule.clone()),
        }
    }
    rules
}
