//! GTK 4 session for the open-file flow.
//!
//! GTK 4 dropped `gtk_dialog_run`, so [`GtkSession::run`] presents the chooser and
//! spins the default main context until the `response` signal fires.

use std::cell::Cell;
use std::ffi::{CStr, CString, OsStr, c_char};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::rc::Rc;

use gtk::prelude::*;
use tracing::error;

use super::{DialogLabels, ProcessInit, Response, ToolkitSession, pick_file};
use crate::error::{PickerError, Result};

static GTK_INIT: ProcessInit = ProcessInit::new();

/// NUL-terminated path allocated with `g_malloc`; freed with `g_free` on drop.
pub struct GlibPath(NonNull<c_char>);

impl GlibPath {
    /// Copy `path` into a glib-owned C string.
    pub fn from_path(path: &Path) -> Result<Self> {
        let c = CString::new(path.as_os_str().as_bytes()).map_err(|_| PickerError::InvalidPath)?;
        let ptr = unsafe { glib::ffi::g_strdup(c.as_ptr()) };
        NonNull::new(ptr).map(GlibPath).ok_or(PickerError::InvalidPath)
    }

    /// Take ownership of a glib-allocated string. Returns `None` for null.
    ///
    /// # Safety
    /// `ptr` must be NUL-terminated, allocated by glib, and not owned by anything else.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(GlibPath)
    }

    pub fn as_c_str(&self) -> &CStr {
        unsafe { CStr::from_ptr(self.0.as_ptr()) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.as_c_str().to_bytes()
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(OsStr::from_bytes(self.as_bytes()))
    }

    /// Hand the allocation to the caller, who must release it with `g_free`.
    pub fn into_raw(self) -> *mut c_char {
        let ptr = self.0.as_ptr();
        std::mem::forget(self);
        ptr
    }
}

impl Drop for GlibPath {
    fn drop(&mut self) {
        unsafe { glib::ffi::g_free(self.0.as_ptr() as glib::ffi::gpointer) };
    }
}

impl std::fmt::Debug for GlibPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GlibPath").field(&self.to_path_buf()).finish()
    }
}

/// [`ToolkitSession`] backed by GTK 4 on the default main context.
#[derive(Default)]
pub struct GtkSession;

impl ToolkitSession for GtkSession {
    type Dialog = gtk::FileChooserDialog;
    type Path = GlibPath;

    fn init(&mut self) -> Result<()> {
        GTK_INIT.ensure(|| gtk::init().map_err(|e| PickerError::ToolkitInit(e.to_string())))
    }

    #[allow(deprecated)]
    fn build_dialog(&mut self, labels: &DialogLabels) -> gtk::FileChooserDialog {
        let dialog = gtk::FileChooserDialog::new(
            Some(labels.title),
            None::<&gtk::Window>,
            gtk::FileChooserAction::Open,
            &[
                (labels.cancel_label, gtk::ResponseType::Cancel),
                (labels.accept_label, gtk::ResponseType::Accept),
            ],
        );
        dialog.set_modal(true);
        dialog
    }

    #[allow(deprecated)]
    fn run(&mut self, dialog: &gtk::FileChooserDialog) -> Response {
        let response = Rc::new(Cell::new(None));
        let handler = dialog.connect_response({
            let response = response.clone();
            move |_, r| response.set(Some(r))
        });
        dialog.present();

        let ctx = glib::MainContext::default();
        while response.get().is_none() {
            ctx.iteration(true);
        }
        dialog.disconnect(handler);

        match response.get() {
            Some(gtk::ResponseType::Accept) => Response::Accept,
            _ => Response::Cancel,
        }
    }

    #[allow(deprecated)]
    fn selected_path(&mut self, dialog: &gtk::FileChooserDialog) -> Result<Option<GlibPath>> {
        dialog
            .file()
            .and_then(|file| file.path())
            .map(|path| GlibPath::from_path(&path))
            .transpose()
    }

    fn drain_events(&mut self) {
        let ctx = glib::MainContext::default();
        while ctx.pending() {
            ctx.iteration(false);
        }
    }

    fn destroy(&mut self, dialog: gtk::FileChooserDialog) {
        dialog.destroy();
    }
}

/// Show a GTK "Open File" dialog and return the chosen path.
///
/// Must be called from the thread that owns GTK. `None` covers both cancellation and
/// failure; failures are logged here.
pub fn open_file_dialog() -> Option<GlibPath> {
    match pick_file(&mut GtkSession) {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "gtk file picker failed");
            None
        }
    }
}
