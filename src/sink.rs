use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `urls` to `path`, one per line, replacing any existing file.
///
/// No atomic rename: if a write fails part way the partial file stays on disk.
pub fn save<P: AsRef<Path>>(urls: &[String], path: P) -> std::io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for url in urls {
        writeln!(writer, "{}", url)?;
    }

    writer.flush()?;
    ::log::debug!("Wrote {} URLs to {}", urls.len(), path.as_ref().display());
    Ok(())
}
