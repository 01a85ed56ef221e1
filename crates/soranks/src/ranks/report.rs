use crate::prelude::*;
use log::trace;
use soranks_core::ranks::RankEntry;
use soranks_core::report::{render_json, render_markdown};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn write_error(path: &Path, reason: impl std::fmt::Display) -> Error {
    Error::Write {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| write_error(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| write_error(path, e))?;
    writer.flush().map_err(|e| write_error(path, e))?;

    trace!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Writes the ranking as a JSON array
pub fn write_json(path: &Path, ranks: &[RankEntry]) -> Result<(), Error> {
    trace!("Writing JSON to: {}", path.display());
    let json = render_json(ranks).map_err(|e| write_error(path, e))?;
    write_file(path, &json)
}

/// Writes the ranking as a Markdown table headed by the location pattern
pub fn write_markdown(path: &Path, ranks: &[RankEntry], pattern: &str) -> Result<(), Error> {
    trace!("Writing MD to: {}", path.display());
    write_file(path, &render_markdown(ranks, pattern))
}
