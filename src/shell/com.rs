//! COM side of the shell picker.
//!
//! Apartment state is tracked per thread: `CoInitializeEx` is called at most once per
//! thread by this crate and can be balanced explicitly with [`release_apartment`].
//! Without that call the apartment stays up for the thread's lifetime.

use std::cell::Cell;
use std::ffi::c_void;
use std::path::PathBuf;
use std::ptr::NonNull;

use tracing::{debug, error};
use widestring::U16CStr;
use windows::Win32::Foundation::HWND;
use windows::Win32::System::Com::{
    CLSCTX_ALL, COINIT_APARTMENTTHREADED, COINIT_DISABLE_OLE1DDE, CoCreateInstance,
    CoInitializeEx, CoTaskMemFree, CoUninitialize,
};
use windows::Win32::UI::Shell::{FileOpenDialog, IFileOpenDialog, IShellItem, SIGDN_FILESYSPATH};
use windows::core::PWSTR;

use super::{ApartmentState, ShellDialogHost, pick_file};
use crate::hresult::HResult;

thread_local! {
    // Status of this crate's CoInitializeEx on the current thread, if it succeeded.
    static APARTMENT: Cell<Option<HResult>> = const { Cell::new(None) };
}

/// Initialize COM on the calling thread (apartment-threaded, OLE1 DDE disabled).
///
/// Idempotent per thread: once a usable status has been obtained it is returned again
/// without another `CoInitializeEx`, so the COM init count never grows past one.
pub fn ensure_apartment() -> HResult {
    APARTMENT.with(|cell| {
        if let Some(hr) = cell.get() {
            return hr;
        }
        let hr: HResult =
            unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) }
                .into();
        if ApartmentState::classify(hr).is_usable() {
            cell.set(Some(hr));
        }
        hr
    })
}

/// Undo [`ensure_apartment`] on the calling thread.
///
/// Only calls `CoUninitialize` when this crate's init actually counted (S_OK or
/// S_FALSE); a tolerated `RPC_E_CHANGED_MODE` belongs to whoever initialized first.
pub fn release_apartment() {
    APARTMENT.with(|cell| {
        if let Some(hr) = cell.take()
            && ApartmentState::classify(hr).needs_uninitialize()
        {
            debug!("CoUninitialize");
            unsafe { CoUninitialize() };
        }
    });
}

/// UTF-16 path allocated by the shell with `CoTaskMemAlloc`; freed on drop.
pub struct CoTaskPath(NonNull<u16>);

impl CoTaskPath {
    /// Take ownership of a shell-allocated string. Returns `None` for null.
    ///
    /// # Safety
    /// `ptr` must be NUL-terminated, allocated with `CoTaskMemAlloc`, and not owned
    /// by anything else.
    pub unsafe fn from_raw(ptr: *mut u16) -> Option<Self> {
        NonNull::new(ptr).map(CoTaskPath)
    }

    pub fn as_ucstr(&self) -> &U16CStr {
        unsafe { U16CStr::from_ptr_str(self.0.as_ptr()) }
    }

    /// Code units without the terminator.
    pub fn as_wide(&self) -> &[u16] {
        self.as_ucstr().as_slice()
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.as_ucstr().to_os_string())
    }

    /// Hand the allocation to the caller, who must release it with `CoTaskMemFree`.
    pub fn into_raw(self) -> *mut u16 {
        let ptr = self.0.as_ptr();
        std::mem::forget(self);
        ptr
    }
}

impl Drop for CoTaskPath {
    fn drop(&mut self) {
        unsafe { CoTaskMemFree(Some(self.0.as_ptr() as *const c_void)) };
    }
}

impl std::fmt::Debug for CoTaskPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CoTaskPath").field(&self.to_path_buf()).finish()
    }
}

/// [`ShellDialogHost`] backed by the real shell.
pub struct ShellHost;

impl ShellDialogHost for ShellHost {
    type Dialog = IFileOpenDialog;
    type Item = IShellItem;
    type Path = CoTaskPath;

    fn initialize_apartment(&mut self) -> HResult {
        ensure_apartment()
    }

    fn create_open_dialog(&mut self) -> Result<IFileOpenDialog, HResult> {
        unsafe { CoCreateInstance(&FileOpenDialog, None, CLSCTX_ALL) }.map_err(HResult::from)
    }

    fn show(&mut self, dialog: &IFileOpenDialog) -> Result<(), HResult> {
        unsafe { dialog.Show(HWND::default()) }.map_err(HResult::from)
    }

    fn result_item(&mut self, dialog: &IFileOpenDialog) -> Result<IShellItem, HResult> {
        unsafe { dialog.GetResult() }.map_err(HResult::from)
    }

    fn display_path(&mut self, item: &IShellItem) -> Result<CoTaskPath, HResult> {
        let name: PWSTR = unsafe { item.GetDisplayName(SIGDN_FILESYSPATH) }?;
        unsafe { CoTaskPath::from_raw(name.0) }.ok_or(HResult::E_FAIL)
    }

    fn release_apartment(&mut self) {
        release_apartment()
    }
}

/// Show the system "Open File" dialog and return the chosen path.
///
/// `None` covers both cancellation and failure; failures are logged here.
pub fn open_file_dialog() -> Option<CoTaskPath> {
    match pick_file(&mut ShellHost) {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "windows file picker failed");
            None
        }
    }
}
