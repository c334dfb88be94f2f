//! Platform detection.
//!
//! Reports the facts about the host that gate color detection: whether the
//! OS is Windows and whether the configured output stream is a terminal.

use colorsense_config::Stream;
use crossterm::tty::IsTty;

/// Host facts consulted by the detector.
pub trait Platform {
    /// Returns `true` when running on Windows.
    fn is_windows(&self) -> bool;

    /// Returns `true` when the output stream is attached to a terminal.
    fn is_tty(&self) -> bool;
}

/// The real host, checking one of the process's standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform {
    stream: Stream,
}

impl HostPlatform {
    /// Creates a platform probe for the given stream.
    pub fn new(stream: Stream) -> Self {
        Self { stream }
    }

    /// The stream this probe checks.
    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl Platform for HostPlatform {
    fn is_windows(&self) -> bool {
        cfg!(windows)
    }

    fn is_tty(&self) -> bool {
        match self.stream {
            Stream::Stdout => std::io::stdout().is_tty(),
            Stream::Stderr => std::io::stderr().is_tty(),
        }
    }
}
