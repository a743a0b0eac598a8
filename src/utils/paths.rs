use std::path::Path;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that cannot appear in a file name across the platforms we
/// care about; percent-encoded away when deriving a transcript file name
/// from a contact's display name.
const FILENAME_UNSAFE: &AsciiSet =
    &CONTROLS.add(b'/').add(b'\\').add(b':').add(b'*').add(b'?').add(b'"').add(b'<').add(b'>').add(b'|').add(b'%');

/// Default transcript file name for a contact, e.g. `Alice Smith.txt`.
/// Unsafe characters are percent-encoded so any display name (phone
/// numbers, emails, emoji) yields a valid file name.
pub fn transcript_file_name(contact_name: &str) -> String {
    format!("{}.txt", utf8_percent_encode(contact_name, FILENAME_UNSAFE))
}

/// Replace a home-directory prefix with `~` for display.
pub fn format_path_with_tilde(path: &Path) -> String {
    let path_str = path.to_string_lossy();
    if let Some(home) = dirs::home_dir() {
        let home_str = home.to_string_lossy();
        if let Some(rest) = path_str.strip_prefix(home_str.as_ref()) {
            return format!("~{}", rest);
        }
    }
    path_str.into_owned()
}
