//! Command line definition for the `native-pickers` binary.

use clap::{ArgAction, Parser, ValueEnum};

/// Native picker implementations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Shell `IFileOpenDialog` (Windows).
    Windows,
    /// GTK file chooser (requires the `gtk` feature).
    Gtk,
}

impl Backend {
    /// The picker this build offers by default, if any.
    pub fn platform_default() -> Option<Backend> {
        [Backend::Windows, Backend::Gtk]
            .into_iter()
            .find(|b| b.is_available())
    }

    pub fn is_available(self) -> bool {
        match self {
            Backend::Windows => cfg!(windows),
            Backend::Gtk => cfg!(all(feature = "gtk", unix)),
        }
    }
}

/// Maximum log level selected on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = concat!(
        env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"),
        " - Open the platform's native file picker and print the chosen path.",
    )
)]
pub struct Cli {
    /// Picker to show. Defaults to the one available on this platform.
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,
    /// Increase verbosity (-v=debug, -vv=trace). RUST_LOG still refines filtering.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
    /// Decrease verbosity (-q=warn, -qq=error). Overrides -v.
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        if self.quiet > 1 {
            LogLevel::Error
        } else if self.quiet == 1 {
            LogLevel::Warn
        } else if self.verbose > 1 {
            LogLevel::Trace
        } else if self.verbose == 1 {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }

    pub fn backend(&self) -> Option<Backend> {
        self.backend.or_else(Backend::platform_default)
    }
}
