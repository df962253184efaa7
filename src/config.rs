use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::field::{CONTENT_PADDING, FieldOptions};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {flag}: expected a whole number")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("invalid theme {0:?}: expected auto, light or dark")]
    InvalidTheme(String),
    #[error("max length must be at least 1")]
    ZeroMaxLength,
    #[error("min height must be at least {0} rows")]
    MinHeightTooSmall(u16),
    #[error("min height {min} exceeds max height {max}")]
    InvertedHeights { min: u16, max: u16 },
}

/// Field defaults that can live in a config file or come from the CLI.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub placeholder: Option<String>,
    pub max_length: Option<usize>,
    pub single_line: bool,
    pub read_only: bool,
    pub no_counts: bool,
    pub autofocus: bool,
    pub min_height: Option<u16>,
    pub max_height: Option<u16>,
    pub theme: Option<ThemeMode>,
    pub perf: bool,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; `other` wins for valued flags, booleans accumulate.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            placeholder: other.placeholder.clone().or_else(|| self.placeholder.clone()),
            max_length: other.max_length.or(self.max_length),
            single_line: self.single_line || other.single_line,
            read_only: self.read_only || other.read_only,
            no_counts: self.no_counts || other.no_counts,
            autofocus: self.autofocus || other.autofocus,
            min_height: other.min_height.or(self.min_height),
            max_height: other.max_height.or(self.max_height),
            theme: other.theme.or(self.theme),
            perf: self.perf || other.perf,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    /// Build field options, validating the numeric bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a zero length cap, a min height too small
    /// to show one row, or a min height above the max height.
    pub fn to_field_options(&self, value: Option<&str>) -> Result<FieldOptions, ConfigError> {
        let defaults = FieldOptions::default();
        if self.max_length == Some(0) {
            return Err(ConfigError::ZeroMaxLength);
        }
        let min = self.min_height.unwrap_or(defaults.min_height);
        let max = self.max_height.unwrap_or(defaults.max_height.max(min));
        let smallest = CONTENT_PADDING + 1;
        if min < smallest {
            return Err(ConfigError::MinHeightTooSmall(smallest));
        }
        if min > max {
            return Err(ConfigError::InvertedHeights { min, max });
        }

        let mut options = defaults
            .with_initial_value(value.unwrap_or_default())
            .with_multiline(!self.single_line)
            .with_editable(!self.read_only)
            .with_show_counts(!self.no_counts)
            .with_auto_focus(self.autofocus)
            .with_height_bounds(min, max);
        if let Some(placeholder) = &self.placeholder {
            options = options.with_placeholder(placeholder.clone());
        }
        if let Some(max_length) = self.max_length {
            options = options.with_max_length(Some(max_length));
        }
        Ok(options)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("notefield").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("notefield")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("notefield").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("notefield")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".notefieldrc")
}

/// Read flags from a config file. A missing file yields defaults.
///
/// Each non-comment line holds one flag; a value follows the flag after
/// whitespace or `=` and may itself contain spaces.
///
/// # Errors
///
/// Fails when the file cannot be read or a value does not parse.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| match line.split_once(char::is_whitespace) {
            Some((flag, value)) if !flag.contains('=') => {
                vec![flag.to_string(), value.trim().to_string()]
            }
            _ => vec![line.to_string()],
        })
        .collect::<Vec<_>>();
    parse_flag_tokens(&tokens).with_context(|| format!("Invalid config {}", path.display()))
}

/// Write flags to a config file, creating parent directories.
///
/// Valued flags are written as `--flag=value` so an empty or dash-led value
/// survives a reload.
///
/// # Errors
///
/// Fails when the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# notefield defaults (saved with --save)".to_string()];
    if let Some(placeholder) = &flags.placeholder {
        lines.push(format!("--placeholder={placeholder}"));
    }
    if let Some(max_length) = flags.max_length {
        lines.push(format!("--max-length={max_length}"));
    }
    if flags.single_line {
        lines.push("--single-line".to_string());
    }
    if flags.read_only {
        lines.push("--read-only".to_string());
    }
    if flags.no_counts {
        lines.push("--no-counts".to_string());
    }
    if flags.autofocus {
        lines.push("--autofocus".to_string());
    }
    if let Some(min) = flags.min_height {
        lines.push(format!("--min-height={min}"));
    }
    if let Some(max) = flags.max_height {
        lines.push(format!("--max-height={max}"));
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme={}", theme.as_str()));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log={}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved config file if present.
///
/// # Errors
///
/// Fails when the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw tokens (command line or config file).
///
/// Unknown tokens are skipped. `--value` is recognised only so its argument
/// is not mistaken for a flag; the initial text is never persisted.
///
/// # Errors
///
/// Returns a [`ConfigError`] when a numeric or theme value does not parse.
pub fn parse_flag_tokens(tokens: &[String]) -> Result<ConfigFlags, ConfigError> {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--value"
                | "--placeholder"
                | "--max-length"
                | "--min-height"
                | "--max-height"
                | "--theme"
                | "--debug-log"
        );
        let value = if takes_value {
            match inline {
                Some(v) => Some(v.to_string()),
                None => {
                    i += 1;
                    tokens.get(i).cloned()
                }
            }
        } else {
            None
        };

        match (name, value) {
            ("--single-line", _) => flags.single_line = true,
            ("--read-only", _) => flags.read_only = true,
            ("--no-counts", _) => flags.no_counts = true,
            ("--autofocus", _) => flags.autofocus = true,
            ("--perf", _) => flags.perf = true,
            ("--placeholder", Some(v)) => flags.placeholder = Some(v),
            ("--max-length", Some(v)) => flags.max_length = Some(parse_number(&v, "--max-length")?),
            ("--min-height", Some(v)) => flags.min_height = Some(parse_number(&v, "--min-height")?),
            ("--max-height", Some(v)) => flags.max_height = Some(parse_number(&v, "--max-height")?),
            ("--theme", Some(v)) => flags.theme = Some(parse_theme(&v)?),
            ("--debug-log", Some(v)) => flags.debug_log = Some(PathBuf::from(v)),
            _ => {}
        }
        i += 1;
    }
    Ok(flags)
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &'static str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            flag,
            value: value.to_string(),
        })
}

fn parse_theme(s: &str) -> Result<ThemeMode, ConfigError> {
    match s.trim() {
        "auto" => Ok(ThemeMode::Auto),
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        other => Err(ConfigError::InvalidTheme(other.to_string())),
    }
}
