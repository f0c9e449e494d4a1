//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod resolve;

use std::io::{Read, Write};
use std::path::Path;

pub(crate) use render::RenderArgs;
pub(crate) use resolve::ResolveArgs;

use crate::error::CliError;
use crate::output::Output;

/// Path argument that reads from stdin.
const STDIN: &str = "-";

/// Read the input document from a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == STDIN {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Write the result to a file, or stdout when no path is given.
fn write_output(path: Option<&Path>, content: &str, output: &Output) -> Result<(), CliError> {
    if let Some(path) = path {
        std::fs::write(path, content)?;
        output.success(&format!("Wrote {}", path.display()));
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}
