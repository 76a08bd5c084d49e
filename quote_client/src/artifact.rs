//! The client's local output file.
//!
//! Each run replaces the artifact: any previous file is removed first (a missing
//! file is fine), then a single line `Dólar: <bid>` is written with no trailing
//! newline. The file handle lives inside a `BufWriter` that is flushed explicitly
//! and closed on drop, on success and on every error path.
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use log::{info, warn};
use quote_common::{QuoteError, Result};

/// Label written in front of the bid.
pub const LABEL: &str = "Dólar: ";

/// Default artifact file name.
pub const DEFAULT_ARTIFACT: &str = "cotacao.txt";

/// Formats the artifact line for `bid`.
pub fn render(bid: &str) -> String {
    format!("{}{}", LABEL, bid)
}

/// Replaces the artifact at `path` with the line for `bid`.
///
/// Returns the number of bytes written.
pub fn write_artifact(path: &Path, bid: &str) -> Result<usize> {
    remove_previous(path)?;

    let line = render(bid);
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(line.as_bytes())?;
    writer.flush()?;

    info!("File {} modified successfully. Size: {}", path.display(), line.len());
    Ok(line.len())
}

fn remove_previous(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("No previous artifact at {}", path.display());
            Ok(())
        }
        Err(e) => Err(QuoteError::LocalIo(e)),
    }
}
