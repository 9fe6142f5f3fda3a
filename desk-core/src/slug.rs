//! URL-safe identifiers derived from titles.

/// Lowercase `text` and collapse every run of characters outside
/// `[a-z0-9]` into a single `-`, with no leading or trailing `-`.
///
/// Uniqueness is not checked; two titles that differ only in
/// punctuation produce the same slug.
///
/// ```rust
/// use desk_core::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  ---  "), "");
/// ```
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}
