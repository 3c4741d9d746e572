//! File permission utilities for secure file operations.
//!
//! The config file carries the merchant API key, so it gets the same
//! restrictive permissions a keystore would.

use crate::error::Result;
use std::path::Path;

/// Set secure permissions on a file (0600 - owner read/write only).
#[cfg(unix)]
pub fn set_secure_file_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

/// No-op on non-Unix systems - rely on OS-level file protection.
#[cfg(not(unix))]
pub fn set_secure_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Set secure permissions on a directory (0700 - owner only).
#[cfg(unix)]
pub fn set_secure_dir_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::Permissions::from_mode(0o700);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

/// No-op on non-Unix systems - rely on OS-level file protection.
#[cfg(not(unix))]
pub fn set_secure_dir_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
