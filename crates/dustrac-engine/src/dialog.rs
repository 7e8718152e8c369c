//! Blocking, user-facing message dialogs.
//!
//! Used before a window exists, so these go through the platform's native
//! dialog API rather than the game's own renderer.

/// Shows a modal error dialog and blocks until the user dismisses it.
pub fn show_error(title: &str, message: &str) {
    log::debug!("showing error dialog: {title}");

    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
