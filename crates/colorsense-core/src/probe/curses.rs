//! Native terminal-capability probe.
//!
//! Modeled on the curses lifecycle: load a capability library, open a screen
//! session, ask whether the terminal has colors, close the session. The
//! library is a pluggable backend so tests (and alternate hosts) can supply
//! their own; the default reads the system terminfo database.

use colorsense_sys::Platform;
use tracing::{debug, warn};

use crate::env::Environment;
use crate::error::{LoadError, Result};
use crate::support::Support;

/// Warning emitted (when verbose) if the native library cannot be loaded.
pub const NO_NATIVE_SUPPORT: &str = "no native curses support";

/// An open screen session on a capability library.
pub trait ScreenSession {
    /// Reports the terminal's color-capability flag.
    fn has_colors(&self) -> Result<bool>;

    /// Ends the session. Called exactly once, by [`ScreenGuard`].
    fn close(&mut self);
}

/// A loaded capability library, able to start screen sessions.
pub trait CapabilityLibrary {
    /// Initializes a screen session.
    fn init_screen(&self) -> Result<Box<dyn ScreenSession + '_>>;
}

/// Loads the native capability library for an environment.
pub trait LibraryLoader {
    /// Loads the library.
    ///
    /// Returns `Ok(None)` when the library itself is present but the
    /// terminal described by `env` cannot be resolved in it.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when the library is unavailable.
    fn load(&self, env: &Environment) -> std::result::Result<Option<Box<dyn CapabilityLibrary>>, LoadError>;
}

/// Closes its session when dropped, including during unwinding.
pub struct ScreenGuard<'a> {
    session: Box<dyn ScreenSession + 'a>,
}

impl<'a> ScreenGuard<'a> {
    /// Opens a session on `library`.
    pub fn open(library: &'a dyn CapabilityLibrary) -> Result<Self> {
        Ok(Self {
            session: library.init_screen()?,
        })
    }

    /// Queries the session's color-capability flag.
    pub fn has_colors(&self) -> Result<bool> {
        self.session.has_colors()
    }
}

impl Drop for ScreenGuard<'_> {
    fn drop(&mut self) {
        self.session.close();
    }
}

/// Asks a native capability library whether the terminal has colors.
///
/// On Windows this is always `Unknown` and nothing is loaded. When
/// `library` is `None`, `loader` supplies one; a load failure is `Unknown`
/// and, if `verbose`, logs [`NO_NATIVE_SUPPORT`] once. Session failures are
/// `Unknown`; the session is closed on every path once opened.
pub fn from_curses(
    platform: &dyn Platform,
    loader: &dyn LibraryLoader,
    env: &Environment,
    verbose: bool,
    library: Option<&dyn CapabilityLibrary>,
) -> Support {
    if platform.is_windows() {
        return Support::Unknown;
    }

    let loaded;
    let library = match library {
        Some(library) => library,
        None => match loader.load(env) {
            Ok(Some(found)) => {
                loaded = found;
                loaded.as_ref()
            }
            Ok(None) => {
                debug!("terminal not found in capability library");
                return Support::Unknown;
            }
            Err(err) => {
                if verbose {
                    warn!(error = %err, "{}", NO_NATIVE_SUPPORT);
                } else {
                    debug!(error = %err, "{}", NO_NATIVE_SUPPORT);
                }
                return Support::Unknown;
            }
        },
    };

    query_colors(library)
}

fn query_colors(library: &dyn CapabilityLibrary) -> Support {
    let screen = match ScreenGuard::open(library) {
        Ok(screen) => screen,
        Err(err) => {
            debug!(error = %err, "failed to initialize screen session");
            return Support::Unknown;
        }
    };

    match screen.has_colors() {
        Ok(has_colors) => Support::from(has_colors),
        Err(err) => {
            debug!(error = %err, "failed to query color capability");
            Support::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallLog, FakeLibrary, FakeLoader, FakePlatform, capture_logs};
    use pretty_assertions::assert_eq;

    fn unix() -> FakePlatform {
        FakePlatform::new(&CallLog::default(), true, false)
    }

    #[test]
    fn windows_is_unknown_without_loading() {
        let log = CallLog::default();
        let platform = FakePlatform::new(&log, true, true);
        let loader = FakeLoader::with_colors(&log, true);
        let result = from_curses(&platform, &loader, &Environment::default(), true, None);
        assert_eq!(result, Support::Unknown);
        assert!(!log.calls().contains(&"loader.load"));
    }

    #[test]
    fn windows_ignores_injected_library() {
        let log = CallLog::default();
        let platform = FakePlatform::new(&log, true, true);
        let library = FakeLibrary::with_colors(&log, true);
        let loader = FakeLoader::failing(&log);
        let result = from_curses(&platform, &loader, &Environment::default(), false, Some(&library));
        assert_eq!(result, Support::Unknown);
        assert!(!log.calls().contains(&"library.init_screen"));
    }

    #[test]
    fn load_failure_verbose_warns_once() {
        let log = CallLog::default();
        let loader = FakeLoader::failing(&log);
        let (result, logs) =
            capture_logs(|| from_curses(&unix(), &loader, &Environment::default(), true, None));
        assert_eq!(result, Support::Unknown);
        assert_eq!(logs.matches(NO_NATIVE_SUPPORT).count(), 1, "logs: {logs}");
    }

    #[test]
    fn load_failure_quiet_does_not_warn() {
        let log = CallLog::default();
        let loader = FakeLoader::failing(&log);
        let (result, logs) =
            capture_logs(|| from_curses(&unix(), &loader, &Environment::default(), false, None));
        assert_eq!(result, Support::Unknown);
        assert!(!logs.contains(NO_NATIVE_SUPPORT), "logs: {logs}");
    }

    #[test]
    fn unresolved_terminal_is_unknown() {
        let log = CallLog::default();
        let loader = FakeLoader::unresolved(&log);
        let (result, logs) =
            capture_logs(|| from_curses(&unix(), &loader, &Environment::default(), true, None));
        assert_eq!(result, Support::Unknown);
        assert!(!logs.contains(NO_NATIVE_SUPPORT));
    }

    #[test]
    fn loaded_library_reports_colors_and_closes() {
        let log = CallLog::default();
        let loader = FakeLoader::with_colors(&log, true);
        let result = from_curses(&unix(), &loader, &Environment::default(), false, None);
        assert_eq!(result, Support::Yes);
        assert_eq!(
            log.calls(),
            vec![
                "loader.load",
                "library.init_screen",
                "session.has_colors",
                "session.close"
            ]
        );
    }

    #[test]
    fn injected_library_skips_loader() {
        let log = CallLog::default();
        let loader = FakeLoader::failing(&log);
        let library = FakeLibrary::with_colors(&log, false);
        let result = from_curses(&unix(), &loader, &Environment::default(), true, Some(&library));
        assert_eq!(result, Support::No);
        assert_eq!(
            log.calls(),
            vec!["library.init_screen", "session.has_colors", "session.close"]
        );
    }

    #[test]
    fn query_failure_still_closes_session() {
        let log = CallLog::default();
        let library = FakeLibrary::query_fails(&log);
        let loader = FakeLoader::failing(&log);
        let result = from_curses(&unix(), &loader, &Environment::default(), false, Some(&library));
        assert_eq!(result, Support::Unknown);
        assert_eq!(log.count("session.close"), 1);
    }

    #[test]
    fn init_failure_is_unknown_and_nothing_to_close() {
        let log = CallLog::default();
        let library = FakeLibrary::init_fails(&log);
        let loader = FakeLoader::failing(&log);
        let result = from_curses(&unix(), &loader, &Environment::default(), false, Some(&library));
        assert_eq!(result, Support::Unknown);
        assert_eq!(log.count("session.close"), 0);
    }

    #[test]
    fn panicking_query_still_closes_session() {
        let log = CallLog::default();
        let library = FakeLibrary::query_panics(&log);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let screen = ScreenGuard::open(&library).unwrap();
            let _ = screen.has_colors();
        }));
        assert!(outcome.is_err());
        assert_eq!(log.count("session.close"), 1);
    }
}
