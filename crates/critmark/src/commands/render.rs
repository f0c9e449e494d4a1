//! `critmark render` command implementation.

use std::path::PathBuf;

use clap::Args;
use critmark_config::{CliSettings, Config};
use critmark_critic::{CriticExtension, CriticMode};
use critmark_pipeline::{Markdown, MarkdownBuilder};

use super::{read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (`-` reads stdin).
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover critmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Critic mode: view, accept or reject (overrides config).
    #[arg(short, long)]
    mode: Option<CriticMode>,

    /// Keep raw critic markup in view mode (overrides config).
    #[arg(long)]
    raw_view: bool,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            mode: self.mode,
            raw_view: self.raw_view.then_some(true),
            gfm: self.no_gfm.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = build_markdown(&config)?;
        let source = read_input(&self.input)?;

        tracing::info!(
            input = %self.input.display(),
            mode = %config.critic.mode,
            gfm = config.markdown.gfm,
            "Rendering document"
        );
        let html = markdown.convert(&source);

        write_output(self.output.as_deref(), &html, &output)
    }
}

/// Build the Markdown converter with the critic extension from `config`.
fn build_markdown(config: &Config) -> Result<Markdown, CliError> {
    Ok(MarkdownBuilder::new()
        .with_gfm(config.markdown.gfm)
        .with_extension(CriticExtension::new(config.critic))
        .build()?)
}
