//! Application directories under the XDG base directories.
//!
//! Respects `XDG_CONFIG_HOME` and `XDG_DATA_HOME`, falling back to
//! `~/.config` and `~/.local/share`. Every helper returns the `dbstatus`
//! subdirectory, never the bare base directory.

use std::ffi::OsString;
use std::path::PathBuf;

const APP_DIR: &str = "dbstatus";

/// Returns the directory holding `config.toml`.
pub fn config_dir() -> Option<PathBuf> {
    app_dir(std::env::var_os("XDG_CONFIG_HOME"), ".config")
}

/// Returns the default directory holding the instance record.
pub fn data_dir() -> Option<PathBuf> {
    app_dir(std::env::var_os("XDG_DATA_HOME"), ".local/share")
}

/// Resolves the app directory from an XDG override or a path under home.
///
/// Empty or relative overrides are ignored, as the XDG spec requires.
fn app_dir(xdg_override: Option<OsString>, home_fallback: &str) -> Option<PathBuf> {
    xdg_override
        .map(PathBuf::from)
        .filter(|base| base.is_absolute())
        .or_else(|| dirs::home_dir().map(|h| h.join(home_fallback)))
        .map(|base| base.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_override_gets_app_subdirectory() {
        let dir = app_dir(Some(OsString::from("/srv/xdg")), ".config").unwrap();
        assert_eq!(dir, PathBuf::from("/srv/xdg/dbstatus"));
    }

    #[test]
    fn test_relative_or_empty_override_falls_back_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let expected = home.join(".local/share").join("dbstatus");

        assert_eq!(
            app_dir(Some(OsString::from("relative/dir")), ".local/share"),
            Some(expected.clone())
        );
        assert_eq!(app_dir(Some(OsString::new()), ".local/share"), Some(expected.clone()));
        assert_eq!(app_dir(None, ".local/share"), Some(expected));
    }
}
