//! Windows "Open File" picker built on the shell's `IFileOpenDialog`.
//!
//! The flow is written against [`ShellDialogHost`] so that the COM calls live in one
//! place ([`com`], Windows only) and the decisions made between them can be exercised
//! anywhere:
//! 1. Initialize a single-threaded apartment (`RPC_E_CHANGED_MODE` is tolerated).
//! 2. Create the `FileOpenDialog` coclass.
//! 3. Show it modally; a cancelled dialog is not an error.
//! 4. Fetch the chosen item and its filesystem path.

#[cfg(windows)]
pub mod com;

use tracing::{debug, info, warn};

use crate::error::{PickerError, Result};
use crate::hresult::HResult;

#[cfg(windows)]
pub use com::{CoTaskPath, ShellHost, ensure_apartment, open_file_dialog, release_apartment};

/// How `CoInitializeEx` left the calling thread.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ApartmentState {
    /// This call initialized COM.
    Initialized,
    /// COM was already initialized with the same flags (S_FALSE).
    AlreadyInitialized,
    /// COM was already initialized with a different concurrency model.
    ChangedMode,
    Failed(HResult),
}

impl ApartmentState {
    pub fn classify(hr: HResult) -> Self {
        if hr == HResult::RPC_E_CHANGED_MODE {
            ApartmentState::ChangedMode
        } else if hr == HResult::S_FALSE {
            ApartmentState::AlreadyInitialized
        } else if hr.is_success() {
            ApartmentState::Initialized
        } else {
            ApartmentState::Failed(hr)
        }
    }

    /// Whether COM calls may proceed on this thread.
    pub fn is_usable(self) -> bool {
        !matches!(self, ApartmentState::Failed(_))
    }

    /// Whether this init is balanced by a later `CoUninitialize`.
    pub fn needs_uninitialize(self) -> bool {
        matches!(
            self,
            ApartmentState::Initialized | ApartmentState::AlreadyInitialized
        )
    }
}

/// The COM operations the picker needs, in call order.
pub trait ShellDialogHost {
    type Dialog;
    type Item;
    type Path;

    fn initialize_apartment(&mut self) -> HResult;
    fn create_open_dialog(&mut self) -> std::result::Result<Self::Dialog, HResult>;
    /// Blocks until the user accepts or dismisses the dialog.
    fn show(&mut self, dialog: &Self::Dialog) -> std::result::Result<(), HResult>;
    fn result_item(&mut self, dialog: &Self::Dialog) -> std::result::Result<Self::Item, HResult>;
    fn display_path(&mut self, item: &Self::Item) -> std::result::Result<Self::Path, HResult>;
    /// Balance whatever [`initialize_apartment`](Self::initialize_apartment) took.
    fn release_apartment(&mut self);
}

/// Run the open-file flow. `Ok(None)` means the user cancelled.
pub fn pick_file<H: ShellDialogHost>(host: &mut H) -> Result<Option<H::Path>> {
    let hr = host.initialize_apartment();
    match ApartmentState::classify(hr) {
        ApartmentState::Failed(hr) => return Err(PickerError::ComInit(hr)),
        ApartmentState::ChangedMode => {
            warn!(hr = %hr, "COM already initialized with different flags; continuing")
        }
        state => debug!(?state, "COM apartment ready"),
    }

    let dialog = host
        .create_open_dialog()
        .map_err(PickerError::CreateDialog)?;

    match host.show(&dialog) {
        Ok(()) => {}
        Err(hr) if hr == HResult::ERROR_CANCELLED => {
            info!("open dialog cancelled");
            return Ok(None);
        }
        Err(hr) => return Err(PickerError::Show(hr)),
    }

    let item = host.result_item(&dialog).map_err(PickerError::GetResult)?;
    let path = host.display_path(&item).map_err(PickerError::DisplayName)?;
    info!("file selected");
    Ok(Some(path))
}

/// [`pick_file`] for callers that will not pick again on this thread: the apartment
/// is released whether or not the pick succeeded.
pub fn pick_file_once<H: ShellDialogHost>(host: &mut H) -> Result<Option<H::Path>> {
    let picked = pick_file(host);
    host.release_apartment();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted host; records each call it receives.
    struct ScriptedHost {
        init: HResult,
        create: std::result::Result<(), HResult>,
        show: std::result::Result<(), HResult>,
        item: std::result::Result<(), HResult>,
        path: std::result::Result<Vec<u16>, HResult>,
        calls: Vec<&'static str>,
    }

    impl ScriptedHost {
        fn selecting(path: &str) -> Self {
            Self {
                init: HResult::S_OK,
                create: Ok(()),
                show: Ok(()),
                item: Ok(()),
                path: Ok(path.encode_utf16().collect()),
                calls: Vec::new(),
            }
        }
    }

    impl ShellDialogHost for ScriptedHost {
        type Dialog = ();
        type Item = ();
        type Path = Vec<u16>;

        fn initialize_apartment(&mut self) -> HResult {
            self.calls.push("init");
            self.init
        }
        fn create_open_dialog(&mut self) -> std::result::Result<(), HResult> {
            self.calls.push("create");
            self.create
        }
        fn show(&mut self, _: &()) -> std::result::Result<(), HResult> {
            self.calls.push("show");
            self.show
        }
        fn result_item(&mut self, _: &()) -> std::result::Result<(), HResult> {
            self.calls.push("result");
            self.item
        }
        fn display_path(&mut self, _: &()) -> std::result::Result<Vec<u16>, HResult> {
            self.calls.push("path");
            self.path.clone()
        }
        fn release_apartment(&mut self) {
            self.calls.push("release");
        }
    }

    #[test]
    fn classify_apartment_states() {
        assert_eq!(ApartmentState::classify(HResult::S_OK), ApartmentState::Initialized);
        assert_eq!(
            ApartmentState::classify(HResult::S_FALSE),
            ApartmentState::AlreadyInitialized
        );
        assert_eq!(
            ApartmentState::classify(HResult::RPC_E_CHANGED_MODE),
            ApartmentState::ChangedMode
        );
        assert_eq!(
            ApartmentState::classify(HResult::E_FAIL),
            ApartmentState::Failed(HResult::E_FAIL)
        );
    }

    #[test]
    fn changed_mode_is_usable_but_not_owned() {
        let s = ApartmentState::ChangedMode;
        assert!(s.is_usable());
        assert!(!s.needs_uninitialize());
        assert!(ApartmentState::Initialized.needs_uninitialize());
        assert!(!ApartmentState::Failed(HResult::E_FAIL).is_usable());
    }

    #[test]
    fn selection_returns_exact_utf16() {
        let p = r"C:\Users\zoë\Documents\日本語 ファイル.txt";
        let mut host = ScriptedHost::selecting(p);
        let got = pick_file(&mut host).unwrap().unwrap();
        assert_eq!(got, p.encode_utf16().collect::<Vec<_>>());
        assert_eq!(host.calls, ["init", "create", "show", "result", "path"]);
    }

    #[test]
    fn cancel_returns_none() {
        let mut host = ScriptedHost::selecting("unused");
        host.show = Err(HResult::ERROR_CANCELLED);
        assert!(pick_file(&mut host).unwrap().is_none());
        assert_eq!(host.calls, ["init", "create", "show"]);
    }

    #[test]
    fn changed_mode_still_creates_dialog() {
        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        host.init = HResult::RPC_E_CHANGED_MODE;
        let got = pick_file(&mut host).unwrap();
        assert!(got.is_some());
        assert!(host.calls.contains(&"create"));
    }

    #[test]
    fn init_failure_stops_before_create() {
        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        host.init = HResult::E_FAIL;
        let err = pick_file(&mut host).unwrap_err();
        assert!(matches!(err, PickerError::ComInit(hr) if hr == HResult::E_FAIL));
        assert_eq!(host.calls, ["init"]);
    }

    #[test]
    fn create_failure_is_reported() {
        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        host.create = Err(HResult::E_FAIL);
        assert!(matches!(
            pick_file(&mut host),
            Err(PickerError::CreateDialog(_))
        ));
        assert_eq!(host.calls, ["init", "create"]);
    }

    #[test]
    fn show_failure_other_than_cancel_is_error() {
        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        host.show = Err(HResult::E_FAIL);
        assert!(matches!(pick_file(&mut host), Err(PickerError::Show(_))));
    }

    #[test]
    fn result_and_display_name_failures_are_distinct() {
        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        host.item = Err(HResult::E_FAIL);
        assert!(matches!(pick_file(&mut host), Err(PickerError::GetResult(_))));

        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        host.path = Err(HResult::E_FAIL);
        assert!(matches!(
            pick_file(&mut host),
            Err(PickerError::DisplayName(_))
        ));
    }

    #[test]
    fn pick_once_releases_after_success() {
        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        assert!(pick_file_once(&mut host).unwrap().is_some());
        assert_eq!(host.calls.last(), Some(&"release"));
    }

    #[test]
    fn pick_once_releases_after_failure() {
        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        host.show = Err(HResult::E_FAIL);
        assert!(matches!(pick_file_once(&mut host), Err(PickerError::Show(_))));
        assert_eq!(host.calls, ["init", "create", "show", "release"]);

        let mut host = ScriptedHost::selecting(r"C:\a.txt");
        host.init = HResult::E_FAIL;
        assert!(pick_file_once(&mut host).is_err());
        assert_eq!(host.calls, ["init", "release"]);
    }
}
