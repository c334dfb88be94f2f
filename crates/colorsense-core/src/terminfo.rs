//! Terminfo-backed capability library.
//!
//! The default native backend for the curses probe. Loading locates a
//! terminfo database directory; resolving finds the compiled entry for
//! `TERM`; a screen session holds the parsed entry and answers `has_colors`
//! with the same rule curses uses.

use std::path::{Path, PathBuf};

use termini::{NumberCapability, StringCapability, TermInfo};
use tracing::debug;

use crate::env::Environment;
use crate::error::{CursesError, LoadError, Result};
use crate::probe::curses::{CapabilityLibrary, LibraryLoader, ScreenSession};

/// System terminfo locations, searched after the user-controlled ones.
pub const SYSTEM_DIRS: &[&str] = &[
    "/etc/terminfo",
    "/lib/terminfo",
    "/usr/share/terminfo",
    "/usr/lib/terminfo",
    "/usr/share/lib/terminfo",
    "/boot/system/data/terminfo",
];

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Loads terminfo entries from the database directories of an environment.
#[derive(Debug, Clone)]
pub struct TerminfoLoader {
    system_dirs: Vec<PathBuf>,
}

impl Default for TerminfoLoader {
    fn default() -> Self {
        Self::with_system_dirs(SYSTEM_DIRS.iter().map(PathBuf::from).collect())
    }
}

impl TerminfoLoader {
    /// Creates a loader with custom system directories.
    pub fn with_system_dirs(system_dirs: Vec<PathBuf>) -> Self {
        Self { system_dirs }
    }

    /// Lists candidate database directories in search order.
    ///
    /// `$TERMINFO`, then `$HOME/.terminfo`, then each entry of
    /// `$TERMINFO_DIRS` (an empty entry stands for the system directories),
    /// then the system directories.
    pub fn search_dirs(&self, env: &Environment) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        if let Some(dir) = env.get("TERMINFO").filter(|d| !d.is_empty()) {
            dirs.push(PathBuf::from(dir));
        }
        if let Some(home) = env.get("HOME").filter(|h| !h.is_empty()) {
            dirs.push(Path::new(home).join(".terminfo"));
        }
        if let Some(list) = env.get_os("TERMINFO_DIRS") {
            for dir in std::env::split_paths(list) {
                if dir.as_os_str().is_empty() {
                    dirs.extend(self.system_dirs.iter().cloned());
                } else {
                    dirs.push(dir);
                }
            }
        }
        dirs.extend(self.system_dirs.iter().cloned());

        let mut seen = std::collections::HashSet::new();
        dirs.retain(|dir| seen.insert(dir.clone()));
        dirs
    }
}

impl LibraryLoader for TerminfoLoader {
    fn load(
        &self,
        env: &Environment,
    ) -> std::result::Result<Option<Box<dyn CapabilityLibrary>>, LoadError> {
        let searched = self.search_dirs(env);
        let databases: Vec<&PathBuf> = searched.iter().filter(|dir| dir.is_dir()).collect();
        if databases.is_empty() {
            return Err(LoadError::NoDatabase { searched });
        }

        let Some(term) = env.get("TERM").filter(|t| !t.is_empty()) else {
            debug!("TERM is not set; no terminfo entry to resolve");
            return Ok(None);
        };

        match databases.iter().find_map(|dir| entry_path(dir, term)) {
            Some(path) => {
                debug!(term, path = %path.display(), "resolved terminfo entry");
                Ok(Some(Box::new(TerminfoLibrary::new(path))))
            }
            None => Ok(None),
        }
    }
}

/// Finds the compiled entry for `term` in one database directory.
///
/// Entries live under the first character of the name, either as the
/// character itself (`x/xterm`) or its hex code (`78/xterm`). Names that
/// could leave the database directory never resolve.
fn entry_path(dir: &Path, term: &str) -> Option<PathBuf> {
    if term.contains(['/', '\\']) || term == "." || term == ".." {
        return None;
    }
    let first = term.chars().next()?;
    [first.to_string(), format!("{:x}", u32::from(first))]
        .into_iter()
        .map(|bucket| dir.join(bucket).join(term))
        .find(|path| path.is_file())
}

// ---------------------------------------------------------------------------
// Library and session
// ---------------------------------------------------------------------------

/// A resolved terminfo entry on disk.
#[derive(Debug, Clone)]
pub struct TerminfoLibrary {
    path: PathBuf,
}

impl TerminfoLibrary {
    /// Wraps a compiled terminfo entry.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CapabilityLibrary for TerminfoLibrary {
    fn init_screen(&self) -> Result<Box<dyn ScreenSession + '_>> {
        let info = TermInfo::from_path(&self.path).map_err(|err| CursesError::Entry {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;
        Ok(Box::new(TerminfoSession { info: Some(info) }))
    }
}

/// A parsed terminfo entry, released on close.
pub struct TerminfoSession {
    info: Option<TermInfo>,
}

impl ScreenSession for TerminfoSession {
    fn has_colors(&self) -> Result<bool> {
        let info = self.info.as_ref().ok_or(CursesError::Closed)?;
        Ok(entry_has_colors(info))
    }

    fn close(&mut self) {
        self.info = None;
    }
}

/// The curses `has_colors` rule.
///
/// `max_colors` and `max_pairs` must be present, and the terminal must be
/// able to set colors through ANSI or legacy foreground/background
/// sequences or through color pairs.
fn entry_has_colors(info: &TermInfo) -> bool {
    let number = |cap| info.number_cap(cap).is_some_and(|n| n >= 0);
    let string = |cap| info.utf8_string_cap(cap).is_some();

    number(NumberCapability::MaxColors)
        && number(NumberCapability::MaxPairs)
        && ((string(StringCapability::SetAnsiForeground)
            && string(StringCapability::SetAnsiBackground))
            || (string(StringCapability::SetForeground)
                && string(StringCapability::SetBackground))
            || string(StringCapability::SetColorPair))
}
