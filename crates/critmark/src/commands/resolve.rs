//! `critmark resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use critmark_critic::{CriticMode, EditMark, Resolution, resolve};

use super::{read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Markdown file to resolve (`-` reads stdin).
    input: PathBuf,

    /// Which edits to keep: accept or reject.
    #[arg(short, long)]
    mode: CriticMode,

    /// Write Markdown to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the mode is `view` or reading or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let resolution = require_resolution(self.mode)?;

        let source = read_input(&self.input)?;
        tracing::info!(
            input = %self.input.display(),
            mode = %self.mode,
            marks = EditMark::scan(&source).count(),
            "Resolving critic marks"
        );
        let resolved = resolve(&source, resolution);

        write_output(self.output.as_deref(), &resolved, &output)
    }
}

/// Resolution for `mode`; view mode has nothing to resolve to.
fn require_resolution(mode: CriticMode) -> Result<Resolution, CliError> {
    mode.resolution().ok_or_else(|| {
        CliError::Validation(format!(
            "--mode {mode} cannot resolve marks (expected 'accept' or 'reject')"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_require_resolution() {
        assert_eq!(
            require_resolution(CriticMode::Accept).unwrap(),
            Resolution::Accept
        );
        assert_eq!(
            require_resolution(CriticMode::Reject).unwrap(),
            Resolution::Reject
        );
    }

    #[test]
    fn test_view_mode_is_rejected() {
        let err = require_resolution(CriticMode::View).unwrap_err();
        assert!(
            matches!(err, CliError::Validation(_)),
            "Expected CliError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("view"));
    }

    #[test]
    fn test_execute_writes_resolved_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        let target = dir.path().join("doc.accepted.md");
        std::fs::write(&input, "# Title\n\nHello {++world++}{>>why?<<}!\n").unwrap();

        let args = ResolveArgs {
            input,
            mode: CriticMode::Accept,
            output: Some(target.clone()),
            verbose: false,
        };
        args.execute().unwrap();

        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "# Title\n\nHello world!\n"
        );
    }
}
