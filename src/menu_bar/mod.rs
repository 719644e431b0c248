//! Main-menu-bar height of an immediate-mode GUI window.
//!
//! The GUI library keeps its window struct private, so a host cannot read the height
//! across the C boundary. [`MenuBarMetrics`] names the handful of fields the height is
//! derived from; it is implemented for the library's own window handle
//! ([`imgui_window::ImGuiWindowRef`], `imgui` feature) and for a plain `#[repr(C)]`
//! carrier ([`MenuBarInputs`]) that hosts without the library's internals can fill.

#[cfg(feature = "imgui")]
pub mod imgui_window;

#[cfg(feature = "imgui")]
pub use imgui_window::ImGuiWindowRef;

/// `ImGuiWindowFlags_MenuBar`.
pub const WINDOW_FLAGS_MENU_BAR: u32 = 1 << 10;

/// Read-only view of the window state the menu-bar height depends on.
pub trait MenuBarMetrics {
    fn has_menu_bar(&self) -> bool;
    fn menu_bar_offset_y(&self) -> f32;
    fn font_size(&self) -> f32;
    fn frame_padding_y(&self) -> f32;

    /// Height of the window's main menu bar in logical units; `0.0` without one.
    fn main_menu_bar_height(&self) -> f32 {
        if !self.has_menu_bar() {
            return 0.0;
        }
        let h = self.menu_bar_offset_y() + self.font_size() + self.frame_padding_y() * 2.0;
        h.max(0.0)
    }
}

/// Menu-bar inputs filled in by the host itself.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MenuBarInputs {
    pub flags: u32,
    pub menu_bar_offset_y: f32,
    pub font_size: f32,
    pub frame_padding_y: f32,
}

impl MenuBarMetrics for MenuBarInputs {
    fn has_menu_bar(&self) -> bool {
        self.flags & WINDOW_FLAGS_MENU_BAR != 0
    }

    fn menu_bar_offset_y(&self) -> f32 {
        self.menu_bar_offset_y
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn frame_padding_y(&self) -> f32 {
        self.frame_padding_y
    }
}
