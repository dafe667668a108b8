//! Text helpers for NUL-terminated wire strings.

/// Append a NUL unless the text already ends with one.
pub fn terminate_null(text: &str) -> String {
    if text.ends_with('\0') {
        text.to_string()
    } else {
        let mut s = String::with_capacity(text.len() + 1);
        s.push_str(text);
        s.push('\0');
        s
    }
}

/// UTF-8 bytes of `text` with a trailing NUL.
pub fn nul_terminated_bytes(text: &str) -> Vec<u8> {
    terminate_null(text).into_bytes()
}
