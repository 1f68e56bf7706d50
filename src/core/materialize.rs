use crate::core::platform::OsFamily;
use crate::error::{InstallerError, Result};
use crate::utils::fs;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Streams `source` into a fresh file at `destination` and, unless the target
/// is Windows, marks it executable. Returns the number of bytes written.
///
/// Any existing file at `destination` is replaced, even a read-only one. A
/// failure part-way leaves a partial file behind; the next run replaces it.
pub fn materialize(source: &mut dyn Read, destination: &Path, os: &OsFamily) -> Result<u64> {
    if let Some(parent) = destination.parent() {
        fs::ensure_dir_exists(parent)?;
    }

    // A read-only leftover cannot be truncated, but it can be unlinked.
    match std::fs::remove_file(destination) {
        Ok(()) => tracing::debug!(path = %destination.display(), "removed previous file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(InstallerError::filesystem(destination, e)),
    }

    let mut file =
        File::create(destination).map_err(|e| InstallerError::filesystem(destination, e))?;
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut written = 0u64;

    loop {
        let n = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(InstallerError::Stream { source }),
        };
        file.write_all(&buffer[..n])
            .map_err(|e| InstallerError::filesystem(destination, e))?;
        written += n as u64;
    }

    file.sync_all()
        .map_err(|e| InstallerError::filesystem(destination, e))?;
    drop(file);

    if !os.is_windows() {
        fs::make_executable(destination)?;
        tracing::debug!(path = %destination.display(), mode = format_args!("{:o}", fs::EXECUTABLE_MODE), "marked executable");
    }

    tracing::debug!(path = %destination.display(), bytes = written, "wrote artifact");
    Ok(written)
}
