//! Command-line interface for the mermaid-field utility
//!
//! Previews the payloads a diagram field renders to, resolves modal URLs
//! against a JSON entity store and summarises display settings.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use mermaid_field::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use mermaid_field::prelude::*;
use mermaid_field::select_presentation;

/// mermaid-field - preview Mermaid diagram field output
#[derive(Parser)]
#[command(name = "mermaid-field")]
#[command(about = "Preview Mermaid diagram field payloads and resolve modal links")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the render payloads of a field as JSON
    Select {
        /// JSON file holding the field's items (an array)
        #[arg(long)]
        items: PathBuf,

        /// JSON file holding display settings
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Enable pan/zoom
        #[arg(long)]
        pan_zoom: bool,

        /// Display each diagram behind a link opening a modal
        #[arg(long)]
        modal: bool,

        /// Modal link text, may contain @title
        #[arg(long)]
        link_text: Option<String>,

        /// Type of the entity owning the field
        #[arg(long)]
        entity_type: String,

        /// Id of the entity owning the field
        #[arg(long)]
        entity_id: String,

        /// Field name
        #[arg(long)]
        field: String,
    },

    /// Resolve a modal URL against an entity store
    Modal {
        /// JSON file holding the entity store (an array of entities)
        #[arg(long)]
        store: PathBuf,

        /// Modal URL, relative or absolute
        #[arg(long)]
        url: String,

        /// Print the rendered markup instead of the payload JSON
        #[arg(long)]
        html: bool,
    },

    /// Print the display settings summary
    Summary {
        /// JSON file holding display settings
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

/// Main CLI application
#[derive(Default)]
pub struct MermaidFieldApp;

impl MermaidFieldApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("mermaid-field v{}", env!("CARGO_PKG_VERSION"));
        }

        let mut out = io::stdout().lock();
        match cli.command {
            Commands::Select {
                items,
                settings,
                pan_zoom,
                modal,
                link_text,
                entity_type,
                entity_id,
                field,
            } => {
                let mut settings = self.load_settings(settings.as_deref())?;
                settings.enable_pan_zoom |= pan_zoom;
                settings.display_in_modal |= modal;
                if let Some(text) = link_text {
                    settings.modal_link_text = text;
                }
                settings.validate()?;

                let owner = FieldOwner::new(entity_type, entity_id, field);
                self.select_command(&items, &owner, &settings, cli.verbose, &mut out)
            }
            Commands::Modal { store, url, html } => {
                self.modal_command(&store, &url, html, cli.verbose, &mut out)
            }
            Commands::Summary { settings } => {
                let settings = self.load_settings(settings.as_deref())?;
                self.summary_command(&settings, &mut out)
            }
        }
    }

    /// Settings from a file, or the defaults
    pub fn load_settings(&self, path: Option<&Path>) -> Result<DisplaySettings> {
        match path {
            Some(path) => DisplaySettings::from_path(path)
                .with_context(|| format!("Failed to read settings file '{}'", path.display())),
            None => Ok(DisplaySettings::default()),
        }
    }

    /// Handle the select command
    pub fn select_command(
        &self,
        items_path: &Path,
        owner: &FieldOwner,
        settings: &DisplaySettings,
        verbose: bool,
        out: &mut impl Write,
    ) -> Result<()> {
        let content = fs::read_to_string(items_path).map_err(|e| {
            anyhow!("Failed to read items file '{}': {}", items_path.display(), e)
        })?;
        let items: Vec<DiagramItem> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid items in '{}'", items_path.display()))?;

        if verbose {
            eprintln!("Read {} item(s)", items.len());
        }
        debug!(item_count = items.len(), "Selecting presentation");

        let payloads = select_presentation(FieldItems::new(owner, &items), settings);
        writeln!(out, "{}", serde_json::to_string_pretty(&payloads)?)?;
        Ok(())
    }

    /// Handle the modal command
    pub fn modal_command(
        &self,
        store_path: &Path,
        url: &str,
        html: bool,
        verbose: bool,
        out: &mut impl Write,
    ) -> Result<()> {
        let store = MemoryEntityStore::from_path(store_path)
            .with_context(|| format!("Failed to read entity store '{}'", store_path.display()))?;

        if verbose {
            eprintln!("Loaded {} entit(ies)", store.len());
        }

        let payload = ModalResolver::new(&store).resolve_href(url)?;
        if html {
            writeln!(out, "{}", payload.to_html())?;
        } else {
            writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
        }
        Ok(())
    }

    /// Handle the summary command
    pub fn summary_command(&self, settings: &DisplaySettings, out: &mut impl Write) -> Result<()> {
        for line in settings.summary() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

/// Process exit status for a failed run
///
/// Modal lookups that found nothing exit with 2, every other failure with 1.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<DiagramFieldError>() {
        Some(err) if err.is_not_found() => 2,
        _ => 1,
    }
}
