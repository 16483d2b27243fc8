//! Theme module - OS-aware light and dark mode color schemes

use gpui::{Hsla, WindowAppearance, rgb};

/// Color scheme for the application
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Main window background
    pub bg: Hsla,
    /// Card/container background
    pub bg_card: Hsla,
    /// Card background on hover
    pub bg_card_hover: Hsla,
    /// Primary text color
    pub text: Hsla,
    /// Secondary/muted text color
    pub text_muted: Hsla,
    /// Border color
    pub border: Hsla,
    /// Accent color (for highlights, drop targets, loop toggle)
    pub accent: Hsla,
    /// Success/action button color (green)
    pub success: Hsla,
    /// Success button hover color
    pub success_hover: Hsla,
    /// Danger/remove color (red)
    pub danger: Hsla,
    /// Progress bar fill color
    pub progress_fill: Hsla,
}

impl Theme {
    /// Dark mode color scheme (matches the original Tk app)
    pub fn dark() -> Self {
        Self {
            bg: rgb(0x1e1e1e).into(),
            bg_card: rgb(0x181818).into(),
            bg_card_hover: rgb(0x2a2a2a).into(),
            text: rgb(0xffffff).into(),
            text_muted: rgb(0x9ca3af).into(),
            border: rgb(0x404040).into(),
            accent: rgb(0x8b06c4).into(),
            success: rgb(0x4caf50).into(),
            success_hover: rgb(0x43a047).into(),
            danger: rgb(0xd9534f).into(),
            progress_fill: rgb(0x4caf50).into(),
        }
    }

    /// Light mode color scheme
    pub fn light() -> Self {
        Self {
            bg: rgb(0xf5f5f5).into(),
            bg_card: rgb(0xffffff).into(),
            bg_card_hover: rgb(0xf0f0f0).into(),
            text: rgb(0x1e293b).into(),
            text_muted: rgb(0x64748b).into(),
            border: rgb(0xe2e8f0).into(),
            accent: rgb(0x8b06c4).into(),
            success: rgb(0x4caf50).into(),
            success_hover: rgb(0x43a047).into(),
            danger: rgb(0xd9534f).into(),
            progress_fill: rgb(0x4caf50).into(),
        }
    }

    /// Get the appropriate theme based on window appearance
    pub fn from_appearance(appearance: WindowAppearance) -> Self {
        match appearance {
            WindowAppearance::Dark | WindowAppearance::VibrantDark => Self::dark(),
            WindowAppearance::Light | WindowAppearance::VibrantLight => Self::light(),
        }
    }
}
