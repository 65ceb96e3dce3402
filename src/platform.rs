//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for app shortcuts (submit, language toggle)
/// - macOS: SUPER (Cmd key), with Ctrl accepted too
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Language toggle shortcut display
/// - macOS: "Cmd+L"
/// - Linux/Windows: "Ctrl+L"
#[cfg(target_os = "macos")]
pub const LANGUAGE_SHORTCUT: &str = "Cmd+L";

#[cfg(not(target_os = "macos"))]
pub const LANGUAGE_SHORTCUT: &str = "Ctrl+L";

/// Whether `modifiers` carry the app shortcut modifier
pub fn has_shortcut_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(SHORTCUT_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}
