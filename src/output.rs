use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{ExtractError, Result};

/// Write one text per line, replacing `path` atomically. Line breaks inside a
/// text are folded into single spaces so each text stays on one line. The file
/// is staged next to the target so the final rename never crosses filesystems.
pub fn write_lines(path: &Path, texts: &[String]) -> Result<()> {
    info!("Writing tweets to {}...", path.display());
    let write_err = |source: std::io::Error| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let staged = NamedTempFile::new_in(dir).map_err(write_err)?;

    let mut writer = BufWriter::new(staged);
    for text in texts {
        let mut pieces = text
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|p| !p.is_empty());
        if let Some(first) = pieces.next() {
            writer.write_all(first.as_bytes()).map_err(write_err)?;
        }
        for piece in pieces {
            writer.write_all(b" ").map_err(write_err)?;
            writer.write_all(piece.as_bytes()).map_err(write_err)?;
        }
        writer.write_all(b"\n").map_err(write_err)?;
    }
    let staged = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    staged.as_file().sync_all().map_err(write_err)?;
    staged.persist(path).map_err(|e| write_err(e.error))?;

    info!("Successfully wrote tweets to output file");
    Ok(())
}
