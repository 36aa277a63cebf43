//! Token comparison helpers shared by the store, the codec and the front end.

/// Case-insensitive token equality. Whitespace must match exactly.
pub fn tokens_equal(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    // Non-ASCII text still compares case-insensitively
    let mut left = a.chars().flat_map(char::to_lowercase);
    let mut right = b.chars().flat_map(char::to_lowercase);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => continue,
            _ => return false,
        }
    }
}

/// Case-sensitive suffix test, used for the `.ini` filename check.
pub fn ends_with_suffix(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len() && s.ends_with(suffix)
}
