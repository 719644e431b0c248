//! C ABI entry points.
//!
//! Each picker returns a caller-owned string or null; null means "cancelled or
//! failed" (the cause is logged, not returned). Strings must be released with the
//! matching `*_free` function. No panic crosses the boundary.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::error;

use crate::menu_bar::{MenuBarInputs, MenuBarMetrics};
#[cfg(feature = "imgui")]
use crate::menu_bar::ImGuiWindowRef;

fn guarded<T>(what: &'static str, fallback: T, f: impl FnOnce() -> T) -> T {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        error!(entry = what, "panic caught at C boundary");
        fallback
    })
}

/// Show the Windows "Open File" dialog.
///
/// Returns a NUL-terminated UTF-16 path, or null on cancel or failure. Release the
/// result with [`windows_file_picker_free`].
#[cfg(windows)]
#[unsafe(no_mangle)]
pub extern "C" fn windows_file_picker() -> *mut u16 {
    guarded("windows_file_picker", std::ptr::null_mut(), || {
        crate::shell::open_file_dialog()
            .map(|p| p.into_raw())
            .unwrap_or(std::ptr::null_mut())
    })
}

/// Release a path returned by [`windows_file_picker`]. Null is ignored.
///
/// # Safety
/// `path` must come from [`windows_file_picker`] and not have been freed already.
#[cfg(windows)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn windows_file_picker_free(path: *mut u16) {
    drop(unsafe { crate::shell::CoTaskPath::from_raw(path) });
}

/// Balance the COM initialization performed by [`windows_file_picker`] on this thread.
#[cfg(windows)]
#[unsafe(no_mangle)]
pub extern "C" fn windows_file_picker_shutdown() {
    guarded("windows_file_picker_shutdown", (), crate::shell::release_apartment)
}

/// Show a GTK "Open File" dialog, initializing GTK on first use.
///
/// Returns a NUL-terminated path in the filesystem encoding, or null on cancel or
/// failure. Release the result with [`gtk_file_picker_free`].
#[cfg(all(feature = "gtk", unix))]
#[unsafe(no_mangle)]
pub extern "C" fn gtk_file_picker() -> *mut std::ffi::c_char {
    guarded("gtk_file_picker", std::ptr::null_mut(), || {
        crate::toolkit::open_file_dialog()
            .map(|p| p.into_raw())
            .unwrap_or(std::ptr::null_mut())
    })
}

/// Release a path returned by [`gtk_file_picker`]. Null is ignored.
///
/// # Safety
/// `path` must come from [`gtk_file_picker`] and not have been freed already.
#[cfg(all(feature = "gtk", unix))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gtk_file_picker_free(path: *mut std::ffi::c_char) {
    drop(unsafe { crate::toolkit::GlibPath::from_raw(path) });
}

/// Main-menu-bar height of an `ImGuiWindow`, or `0.0` when it has none or `window`
/// is null.
///
/// # Safety
/// `window` must be null or a live `ImGuiWindow*` from the current ImGui context.
#[cfg(feature = "imgui")]
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn igExtern_MainMenuBarHeight(
    window: *const dear_imgui_sys::ImGuiWindow,
) -> f32 {
    let window = unsafe { ImGuiWindowRef::from_ptr(window) };
    guarded("igExtern_MainMenuBarHeight", 0.0, || {
        window.map_or(0.0, |w| w.main_menu_bar_height())
    })
}

/// Main-menu-bar height from host-supplied [`MenuBarInputs`], or `0.0` when the
/// inputs carry no menu bar or `inputs` is null.
///
/// # Safety
/// `inputs` must be null or point to a valid [`MenuBarInputs`].
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn igExtern_MenuBarHeightFromInputs(inputs: *const MenuBarInputs) -> f32 {
    let inputs = unsafe { inputs.as_ref() };
    guarded("igExtern_MenuBarHeightFromInputs", 0.0, || {
        inputs.map_or(0.0, MenuBarMetrics::main_menu_bar_height)
    })
}
