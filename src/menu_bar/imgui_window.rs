//! Menu-bar metrics read straight out of Dear ImGui's internal window struct.

use dear_imgui_sys as sys;

use super::{MenuBarMetrics, WINDOW_FLAGS_MENU_BAR};

/// Borrowed `ImGuiWindow` together with the context that owns it.
#[derive(Copy, Clone)]
pub struct ImGuiWindowRef<'a> {
    window: &'a sys::ImGuiWindow,
    ctx: &'a sys::ImGuiContext,
}

impl<'a> ImGuiWindowRef<'a> {
    /// Wrap a raw window handle. Returns `None` for a null window or a window that is
    /// not attached to a context.
    ///
    /// # Safety
    /// `window` must be null or point to a live `ImGuiWindow` whose `Ctx` is null or
    /// live, both for `'a`.
    pub unsafe fn from_ptr(window: *const sys::ImGuiWindow) -> Option<Self> {
        let window = unsafe { window.as_ref() }?;
        let ctx = unsafe { window.Ctx.cast_const().as_ref() }?;
        Some(Self { window, ctx })
    }
}

impl MenuBarMetrics for ImGuiWindowRef<'_> {
    fn has_menu_bar(&self) -> bool {
        (self.window.Flags as u32) & WINDOW_FLAGS_MENU_BAR != 0
    }

    fn menu_bar_offset_y(&self) -> f32 {
        self.window.DC.MenuBarOffset.y
    }

    fn font_size(&self) -> f32 {
        self.ctx.FontSize
    }

    fn frame_padding_y(&self) -> f32 {
        self.ctx.Style.FramePadding.y
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Zero-initialized context and window of the library's own types, the window
    /// pointing back at the context the way the library links them.
    pub(crate) struct TestWindow {
        _ctx: Box<sys::ImGuiContext>,
        pub window: Box<sys::ImGuiWindow>,
    }

    impl TestWindow {
        pub(crate) fn new(flags: u32, font_size: f32, padding_y: f32) -> Self {
            let mut ctx: Box<sys::ImGuiContext> = unsafe { Box::new_zeroed().assume_init() };
            ctx.FontSize = font_size;
            ctx.Style.FramePadding.y = padding_y;
            let mut window: Box<sys::ImGuiWindow> = unsafe { Box::new_zeroed().assume_init() };
            window.ID = 42;
            window.Flags = flags as _;
            window.Ctx = &mut *ctx;
            Self { _ctx: ctx, window }
        }

        pub(crate) fn as_ptr(&self) -> *const sys::ImGuiWindow {
            &*self.window
        }
    }

    #[test]
    fn reads_height_from_window_handle() {
        let w = TestWindow::new(WINDOW_FLAGS_MENU_BAR, 13.0, 3.0);
        let r = unsafe { ImGuiWindowRef::from_ptr(w.as_ptr()) }.unwrap();
        assert_eq!(r.main_menu_bar_height(), 19.0);
        assert_eq!(r.main_menu_bar_height(), 19.0);
    }

    #[test]
    fn offset_comes_from_window_temp_data() {
        let mut w = TestWindow::new(WINDOW_FLAGS_MENU_BAR, 16.0, 4.0);
        w.window.DC.MenuBarOffset.y = 2.0;
        let r = unsafe { ImGuiWindowRef::from_ptr(w.as_ptr()) }.unwrap();
        assert_eq!(r.main_menu_bar_height(), 26.0);
    }

    #[test]
    fn window_without_menu_bar_is_zero() {
        let w = TestWindow::new(0, 13.0, 3.0);
        let r = unsafe { ImGuiWindowRef::from_ptr(w.as_ptr()) }.unwrap();
        assert_eq!(r.main_menu_bar_height(), 0.0);
    }

    #[test]
    fn null_or_detached_window_is_rejected() {
        assert!(unsafe { ImGuiWindowRef::from_ptr(std::ptr::null()) }.is_none());
        let mut w = TestWindow::new(WINDOW_FLAGS_MENU_BAR, 13.0, 3.0);
        w.window.Ctx = std::ptr::null_mut();
        assert!(unsafe { ImGuiWindowRef::from_ptr(w.as_ptr()) }.is_none());
    }
}
