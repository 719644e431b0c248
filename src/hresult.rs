//! Platform-neutral COM status codes.
//!
//! The shell picker's control flow only ever compares status values, so it is
//! expressed against this newtype instead of `windows::core::HRESULT`. That keeps
//! the flow (and its tests) buildable on every target.

use std::fmt;

/// Raw COM status value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HResult(pub i32);

impl HResult {
    pub const S_OK: HResult = HResult(0);
    /// COM was already initialized on this thread with the same flags.
    pub const S_FALSE: HResult = HResult(1);
    /// COM was already initialized on this thread with different flags.
    pub const RPC_E_CHANGED_MODE: HResult = HResult(0x8001_0106_u32 as i32);
    pub const E_FAIL: HResult = HResult(0x8000_4005_u32 as i32);
    /// `HRESULT_FROM_WIN32(ERROR_CANCELLED)`, returned by `Show` when the user dismisses the dialog.
    pub const ERROR_CANCELLED: HResult = HResult::from_win32(1223);

    /// Equivalent of the `HRESULT_FROM_WIN32` macro.
    pub const fn from_win32(code: u32) -> Self {
        if code as i32 <= 0 {
            HResult(code as i32)
        } else {
            HResult(((code & 0x0000_FFFF) | (7 << 16) | 0x8000_0000) as i32)
        }
    }

    pub const fn is_success(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0 as u32)
    }
}

#[cfg(windows)]
impl From<windows::core::HRESULT> for HResult {
    fn from(hr: windows::core::HRESULT) -> Self {
        HResult(hr.0)
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for HResult {
    fn from(e: windows::core::Error) -> Self {
        HResult(e.code().0)
    }
}
