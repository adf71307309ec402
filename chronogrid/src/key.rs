//! Keys the picker reacts to and what the adapter should do afterwards.

use std::str::FromStr;

use crate::error::{Error, Result};

/// A key press the picker handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerKey {
    /// Activates the active cell.
    Enter,
    /// Activates the active cell.
    Space,
    /// Previous page.
    PageUp,
    /// Next page.
    PageDown,
    /// First cell of the page.
    Home,
    /// Last cell of the page.
    End,
    /// Previous cell.
    ArrowLeft,
    /// Previous row.
    ArrowUp,
    /// Next cell.
    ArrowRight,
    /// Next row.
    ArrowDown,
}

impl PickerKey {
    /// Maps a DOM `keyCode`.
    pub fn from_key_code(code: u32) -> Option<Self> {
        let key = match code {
            13 => PickerKey::Enter,
            32 => PickerKey::Space,
            33 => PickerKey::PageUp,
            34 => PickerKey::PageDown,
            35 => PickerKey::End,
            36 => PickerKey::Home,
            37 => PickerKey::ArrowLeft,
            38 => PickerKey::ArrowUp,
            39 => PickerKey::ArrowRight,
            40 => PickerKey::ArrowDown,
            _ => return None,
        };
        Some(key)
    }
}

impl FromStr for PickerKey {
    type Err = Error;

    /// Parses DOM `KeyboardEvent.key` names, e.g. `"ArrowLeft"` or `" "`.
    fn from_str(s: &str) -> Result<Self> {
        let key = match s {
            "Enter" => PickerKey::Enter,
            " " | "Space" | "Spacebar" => PickerKey::Space,
            "PageUp" => PickerKey::PageUp,
            "PageDown" => PickerKey::PageDown,
            "Home" => PickerKey::Home,
            "End" => PickerKey::End,
            "ArrowLeft" | "Left" => PickerKey::ArrowLeft,
            "ArrowUp" | "Up" => PickerKey::ArrowUp,
            "ArrowRight" | "Right" => PickerKey::ArrowRight,
            "ArrowDown" | "Down" => PickerKey::ArrowDown,
            _ => return Err(Error::UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}

/// Follow-up work for the adapter after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyResponse {
    /// The picker consumed the key; suppress the default action.
    pub handled: bool,
    /// Move focus to the new active cell once the view is re-rendered.
    pub refocus_active: bool,
}

impl KeyResponse {
    /// The key was not for the picker.
    pub const IGNORED: Self = Self {
        handled: false,
        refocus_active: false,
    };

    pub(crate) const ACTIVATED: Self = Self {
        handled: true,
        refocus_active: false,
    };

    pub(crate) const NAVIGATED: Self = Self {
        handled: true,
        refocus_active: true,
    };
}
