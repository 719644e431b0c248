//! Diagnostic front end for the native pickers.
//!
//! Opens the selected picker on the main thread and prints the chosen path to stdout.
//! Exit status: 0 when a file was chosen, 1 on cancel or failure, 2 when the requested
//! picker is not part of this build.

mod cli;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use cli::{Backend, Cli};
use logging::configure_logging;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    configure_logging(cli.log_level());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        ?cli,
        "starting native-pickers"
    );

    let Some(backend) = cli.backend().filter(|b| b.is_available()) else {
        error!(requested = ?cli.backend, "no file picker available in this build");
        return Ok(ExitCode::from(2));
    };

    match pick(backend)? {
        Some(path) => {
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::from(1)),
    }
}

/// Run the chosen picker, keeping its distinct failure causes.
fn pick(backend: Backend) -> Result<Option<PathBuf>> {
    info!(?backend, "opening file picker");
    match backend {
        #[cfg(windows)]
        Backend::Windows => {
            let path = native_pickers::shell::pick_file_once(&mut native_pickers::shell::ShellHost)?;
            Ok(path.map(|p| p.to_path_buf()))
        }
        #[cfg(all(feature = "gtk", unix))]
        Backend::Gtk => {
            let path = native_pickers::toolkit::pick_file(&mut native_pickers::toolkit::GtkSession)?;
            Ok(path.map(|p| p.to_path_buf()))
        }
        #[allow(unreachable_patterns)]
        other => anyhow::bail!("{other:?} picker is not compiled into this build"),
    }
}
