//! Segment-to-identity folding rules.

/// Fold a path segment into a controller name.
///
/// Hyphens are removed, underscores separate words, and every word gets an
/// upper-case first letter before the words are joined:
/// `blog-post` becomes `Blogpost`, `admin_user` becomes `AdminUser`.
pub fn controller_name(segment: &str) -> String {
    segment
        .replace('-', "")
        .split('_')
        .map(capitalize)
        .collect()
}

/// Fold a path segment into an action name (hyphens removed).
pub fn action_name(segment: &str) -> String {
    segment.replace('-', "")
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
