//! Recording fakes for the detector's collaborators.
//!
//! Every fake appends to a shared [`CallLog`] so tests can assert which
//! collaborators ran, and in what order.

use std::cell::RefCell;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use colorsense_sys::{CommandError, CommandRunner, Platform};

use crate::env::Environment;
use crate::error::{CursesError, LoadError, Result};
use crate::probe::curses::{CapabilityLibrary, LibraryLoader, ScreenSession};

// ---------------------------------------------------------------------------
// Call log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<&'static str>>>);

impl CallLog {
    pub(crate) fn record(&self, call: &'static str) {
        self.0.borrow_mut().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.0.borrow().clone()
    }

    pub(crate) fn count(&self, call: &str) -> usize {
        self.0.borrow().iter().filter(|c| **c == call).count()
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

pub(crate) struct FakePlatform {
    log: CallLog,
    tty: bool,
    windows: bool,
}

impl FakePlatform {
    pub(crate) fn new(log: &CallLog, tty: bool, windows: bool) -> Self {
        Self {
            log: log.clone(),
            tty,
            windows,
        }
    }
}

impl Platform for FakePlatform {
    fn is_windows(&self) -> bool {
        self.log.record("platform.is_windows");
        self.windows
    }

    fn is_tty(&self) -> bool {
        self.log.record("platform.is_tty");
        self.tty
    }
}

// ---------------------------------------------------------------------------
// Command runner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) enum RunOutcome {
    Output(&'static str),
    NotFound,
    Failed,
}

pub(crate) struct FakeRunner {
    log: CallLog,
    available: bool,
    outcome: RunOutcome,
    search_path: RefCell<Option<String>>,
    envs: RefCell<Vec<(String, String)>>,
}

impl FakeRunner {
    pub(crate) fn new(log: &CallLog, outcome: RunOutcome) -> Self {
        Self {
            log: log.clone(),
            available: true,
            outcome,
            search_path: RefCell::new(None),
            envs: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn missing(log: &CallLog) -> Self {
        Self {
            available: false,
            ..Self::new(log, RunOutcome::NotFound)
        }
    }

    pub(crate) fn last_search_path(&self) -> Option<String> {
        self.search_path.borrow().clone()
    }

    pub(crate) fn last_envs(&self) -> Vec<(String, String)> {
        self.envs.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn locate(&self, program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
        self.log.record("runner.locate");
        *self.search_path.borrow_mut() = search_path.map(|p| p.to_string_lossy().into_owned());
        self.available
            .then(|| PathBuf::from("/usr/bin").join(program))
    }

    fn run(
        &self,
        program: &Path,
        _args: &[&str],
        envs: &[(&str, &str)],
    ) -> colorsense_sys::commands::Result<String> {
        self.log.record("runner.run");
        *self.envs.borrow_mut() = envs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        match self.outcome {
            RunOutcome::Output(out) => Ok(out.to_string()),
            RunOutcome::NotFound => Err(CommandError::NotFound {
                program: program.to_path_buf(),
            }),
            RunOutcome::Failed => Err(CommandError::Failed {
                code: Some(3),
                stderr: "unknown terminal".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Capability library
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum SessionBehavior {
    Colors(bool),
    InitFails,
    QueryFails,
    QueryPanics,
}

pub(crate) struct FakeLibrary {
    log: CallLog,
    behavior: SessionBehavior,
}

impl FakeLibrary {
    pub(crate) fn with_colors(log: &CallLog, has_colors: bool) -> Self {
        Self::with_behavior(log, SessionBehavior::Colors(has_colors))
    }

    pub(crate) fn init_fails(log: &CallLog) -> Self {
        Self::with_behavior(log, SessionBehavior::InitFails)
    }

    pub(crate) fn query_fails(log: &CallLog) -> Self {
        Self::with_behavior(log, SessionBehavior::QueryFails)
    }

    pub(crate) fn query_panics(log: &CallLog) -> Self {
        Self::with_behavior(log, SessionBehavior::QueryPanics)
    }

    fn with_behavior(log: &CallLog, behavior: SessionBehavior) -> Self {
        Self {
            log: log.clone(),
            behavior,
        }
    }
}

impl CapabilityLibrary for FakeLibrary {
    fn init_screen(&self) -> Result<Box<dyn ScreenSession + '_>> {
        self.log.record("library.init_screen");
        if let SessionBehavior::InitFails = self.behavior {
            return Err(CursesError::Backend("cannot open terminal".to_string()));
        }
        Ok(Box::new(FakeSession {
            log: self.log.clone(),
            behavior: self.behavior,
        }))
    }
}

struct FakeSession {
    log: CallLog,
    behavior: SessionBehavior,
}

impl ScreenSession for FakeSession {
    fn has_colors(&self) -> Result<bool> {
        self.log.record("session.has_colors");
        match self.behavior {
            SessionBehavior::Colors(has_colors) => Ok(has_colors),
            SessionBehavior::QueryPanics => panic!("capability query blew up"),
            SessionBehavior::QueryFails | SessionBehavior::InitFails => {
                Err(CursesError::Backend("query failed".to_string()))
            }
        }
    }

    fn close(&mut self) {
        self.log.record("session.close");
    }
}

// ---------------------------------------------------------------------------
// Library loader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum LoadBehavior {
    Fails,
    Unresolved,
    Colors(bool),
}

pub(crate) struct FakeLoader {
    log: CallLog,
    behavior: LoadBehavior,
}

impl FakeLoader {
    pub(crate) fn failing(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            behavior: LoadBehavior::Fails,
        }
    }

    pub(crate) fn unresolved(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            behavior: LoadBehavior::Unresolved,
        }
    }

    pub(crate) fn with_colors(log: &CallLog, has_colors: bool) -> Self {
        Self {
            log: log.clone(),
            behavior: LoadBehavior::Colors(has_colors),
        }
    }
}

impl LibraryLoader for FakeLoader {
    fn load(
        &self,
        _env: &Environment,
    ) -> std::result::Result<Option<Box<dyn CapabilityLibrary>>, LoadError> {
        self.log.record("loader.load");
        match self.behavior {
            LoadBehavior::Fails => Err(LoadError::NoDatabase {
                searched: vec![PathBuf::from("/usr/share/terminfo")],
            }),
            LoadBehavior::Unresolved => Ok(None),
            LoadBehavior::Colors(has_colors) => {
                Ok(Some(Box::new(FakeLibrary::with_colors(&self.log, has_colors))))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber that records WARN-and-above events as text.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().map(|b| b.clone()).unwrap_or_default();
    (result, String::from_utf8_lossy(&bytes).into_owned())
}
