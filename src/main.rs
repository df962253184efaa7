//! Notefield - a tap-to-edit note field for the terminal.
//!
//! # Usage
//!
//! ```bash
//! notefield
//! notefield --value "Buy milk" --max-length 140
//! notefield --single-line --placeholder "Title"
//! ```
//!
//! The last saved text is printed to stdout on exit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use notefield::app::App;
use notefield::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use notefield::perf;
use notefield::ui::style::{BackgroundMode, set_background_mode};

/// A tap-to-edit note field for the terminal
#[derive(Parser, Debug)]
#[command(name = "notefield", version, about, long_about = None)]
struct Cli {
    /// Initial text of the note
    #[arg(long, value_name = "TEXT")]
    value: Option<String>,

    /// Prompt shown while the note is empty
    #[arg(long, value_name = "TEXT")]
    placeholder: Option<String>,

    /// Maximum number of characters
    #[arg(long, value_name = "N")]
    max_length: Option<usize>,

    /// One line only; Enter saves
    #[arg(long)]
    single_line: bool,

    /// Show the note without allowing edits
    #[arg(long)]
    read_only: bool,

    /// Hide the word and character counter
    #[arg(long)]
    no_counts: bool,

    /// Focus the text box as soon as editing starts
    #[arg(long)]
    autofocus: bool,

    /// Smallest field height in rows (including border)
    #[arg(long, value_name = "ROWS")]
    min_height: Option<u16>,

    /// Largest field height in rows (including border)
    #[arg(long, value_name = "ROWS")]
    max_height: Option<u16>,

    /// Force light or dark colors
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed input/render events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args)?;

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("NOTEFIELD_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_event_log_path(debug_log_path.as_deref()) {
        warn!(
            path = %debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            %err,
            "failed to initialize debug log"
        );
    }

    match effective.theme.unwrap_or(cli.theme) {
        ThemeMode::Auto => set_background_mode(None),
        ThemeMode::Light => set_background_mode(Some(BackgroundMode::Light)),
        ThemeMode::Dark => set_background_mode(Some(BackgroundMode::Dark)),
    }

    let options = effective
        .to_field_options(cli.value.as_deref())
        .context("Invalid field settings")?;
    info!(?options, "starting");

    // Run the application
    let mut app = App::new(options)
        .with_on_commit(|text| {
            perf::log_event("field.commit", format!("chars={}", text.chars().count()));
        })
        .with_on_discard(|| perf::log_event("field.discard", ""))
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    if let Some(text) = app.run().context("Application error")? {
        println!("{text}");
    }
    Ok(())
}
