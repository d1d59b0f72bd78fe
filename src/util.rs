//! Emptiness checks and defaulting helpers shared by normalization.

/// Returns `true` if the string is empty once leading and trailing spaces are removed.
///
/// Only the ASCII space character is trimmed; tabs and newlines count as content.
pub fn is_blank(value: &str) -> bool {
    value.trim_matches(' ').is_empty()
}

/// Returns `true` if the integer is not a usable positive value.
pub fn is_unset(value: i32) -> bool {
    value <= 0
}

/// Return `value`, or `default` when `value` is blank.
pub fn str_default(value: &str, default: &str) -> String {
    if is_blank(value) {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Return `value`, or `default` when `value` is unset.
pub fn int_default(value: i32, default: i32) -> i32 {
    if is_unset(value) { default } else { value }
}
