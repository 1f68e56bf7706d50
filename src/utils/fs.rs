use crate::error::{InstallerError, Result};
use std::path::Path;

/// rwx for the owner, r-x for group and others.
pub const EXECUTABLE_MODE: u32 = 0o755;

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| InstallerError::filesystem(path, e))?;
    }
    Ok(())
}

/// Sets the permission bits to exactly [`EXECUTABLE_MODE`].
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(EXECUTABLE_MODE))
            .map_err(|e| InstallerError::filesystem(path, e))?;
    }

    // On Windows, executable permission is determined by file extension
    #[cfg(windows)]
    {
        let _ = path;
    }

    Ok(())
}
