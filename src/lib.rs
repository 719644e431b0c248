//! Native "Open File" pickers and an immediate-mode GUI menu-bar accessor, exposed to
//! Rust callers and across a C ABI.
//!
//! * [`shell`]: Windows `IFileOpenDialog` picker (COM).
//! * [`toolkit`]: GTK file chooser picker (`gtk` feature).
//! * [`menu_bar`]: main-menu-bar height of a GUI window.
//! * [`ffi`]: `extern "C"` entry points and their matching release functions.
//!
//! Every picker call is synchronous and modal: it owns the calling thread until the
//! user dismisses the dialog. Toolkit init state is process/thread wide (see
//! [`shell::ApartmentState`] and [`toolkit::ProcessInit`]); serializing calls from
//! several threads is up to the host.

pub mod error;
pub mod ffi;
pub mod hresult;
pub mod menu_bar;
pub mod shell;
pub mod toolkit;

pub use error::{PickerError, Result};
pub use hresult::HResult;
pub use menu_bar::{MenuBarMetrics, MenuBarInputs};
