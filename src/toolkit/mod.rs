//! GTK "Open File" picker.
//!
//! [`pick_file`] drives a [`ToolkitSession`]; the real session lives in
//! [`gtk_backend`] behind the `gtk` feature. Whatever the user does, once a dialog
//! exists the toolkit's pending events are drained both before and after it is
//! destroyed, so teardown events never spill into the next call.

#[cfg(all(feature = "gtk", unix))]
pub mod gtk_backend;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::error::Result;

#[cfg(all(feature = "gtk", unix))]
pub use gtk_backend::{GlibPath, GtkSession, open_file_dialog};

/// Process-wide "toolkit is up" flag.
///
/// Success is remembered for the life of the process; a failed attempt is not, so a
/// later call can retry (e.g. once a display is reachable). There is no teardown: GTK
/// has no supported way to shut down and re-initialize.
pub struct ProcessInit {
    done: OnceCell<()>,
}

impl ProcessInit {
    pub const fn new() -> Self {
        Self {
            done: OnceCell::new(),
        }
    }

    pub fn ensure<F>(&self, init: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        self.done.get_or_try_init(init).map(|_| ())
    }

    pub fn is_initialized(&self) -> bool {
        self.done.get().is_some()
    }
}

impl Default for ProcessInit {
    fn default() -> Self {
        Self::new()
    }
}

/// Title and button labels of a chooser dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogLabels {
    pub title: &'static str,
    pub cancel_label: &'static str,
    pub accept_label: &'static str,
}

pub const OPEN_FILE: DialogLabels = DialogLabels {
    title: "Open File",
    cancel_label: "_Cancel",
    accept_label: "_Open",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    Accept,
    /// Cancel button, window closed, or any other non-accept response.
    Cancel,
}

/// The toolkit operations the picker needs, in call order.
pub trait ToolkitSession {
    type Dialog;
    type Path;

    fn init(&mut self) -> Result<()>;
    /// Build a modal open-file chooser with exactly a cancel and an accept action.
    fn build_dialog(&mut self, labels: &DialogLabels) -> Self::Dialog;
    /// Blocks until the dialog responds.
    fn run(&mut self, dialog: &Self::Dialog) -> Response;
    fn selected_path(&mut self, dialog: &Self::Dialog) -> Result<Option<Self::Path>>;
    /// Process pending events until none remain.
    fn drain_events(&mut self);
    fn destroy(&mut self, dialog: Self::Dialog);
}

/// Run the open-file flow. `Ok(None)` means the user cancelled.
pub fn pick_file<T: ToolkitSession>(session: &mut T) -> Result<Option<T::Path>> {
    session.init()?;
    debug!("toolkit ready");

    let dialog = session.build_dialog(&OPEN_FILE);
    let selected = match session.run(&dialog) {
        Response::Accept => session.selected_path(&dialog),
        Response::Cancel => {
            info!("open dialog cancelled");
            Ok(None)
        }
    };

    session.drain_events();
    session.destroy(dialog);
    session.drain_events();

    if let Ok(Some(_)) = &selected {
        info!("file selected");
    }
    selected
}
