//! Failure points of the picker flows.
//!
//! Callers at the C boundary only ever see "path" or "null"; these variants exist so
//! the step that failed can be logged before the error is collapsed.

use crate::hresult::HResult;

#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("CoInitializeEx failed ({0})")]
    ComInit(HResult),
    #[error("CoCreateInstance(FileOpenDialog) failed ({0})")]
    CreateDialog(HResult),
    #[error("IFileOpenDialog::Show failed ({0})")]
    Show(HResult),
    #[error("IFileOpenDialog::GetResult failed ({0})")]
    GetResult(HResult),
    #[error("IShellItem::GetDisplayName(SIGDN_FILESYSPATH) failed ({0})")]
    DisplayName(HResult),
    #[error("toolkit initialization failed: {0}")]
    ToolkitInit(String),
    #[error("selected path contains an interior NUL")]
    InvalidPath,
}

pub type Result<T> = std::result::Result<T, PickerError>;
