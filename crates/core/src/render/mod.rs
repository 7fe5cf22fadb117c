//! Report renderers
//!
//! Each [`OutputMode`] maps to one renderer and one file in the output
//! directory. All requested reports are rendered in memory before anything
//! is written.

pub mod html;
pub mod text;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::OutputMode;
use crate::error::{CollationError, Result};
use crate::report::CollationReport;

/// Render a report in the given format
pub fn render(report: &CollationReport, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Text => Ok(text::render(report)),
        OutputMode::Hypertext => Ok(html::render(report)),
        OutputMode::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Write one file per requested mode into `out_dir` and return their paths.
///
/// Duplicate modes are written once.
pub fn write_reports(report: &CollationReport, modes: &[OutputMode], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut rendered: Vec<(OutputMode, String)> = Vec::with_capacity(modes.len());
    for &mode in modes {
        if rendered.iter().any(|(seen, _)| *seen == mode) {
            continue;
        }
        rendered.push((mode, render(report, mode)?));
    }

    fs::create_dir_all(out_dir).map_err(|e| CollationError::io(out_dir, e))?;

    let mut written = Vec::with_capacity(rendered.len());
    for (mode, contents) in rendered {
        let path = out_dir.join(mode.file_name());
        fs::write(&path, contents).map_err(|e| CollationError::io(&path, e))?;
        info!(path = %path.display(), "report written");
        written.push(path);
    }
    Ok(written)
}
