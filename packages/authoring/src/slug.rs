//! URL slug derivation from article titles.

/// Derive a URL slug from a title.
///
/// Lowercases, replaces whitespace runs with single hyphens, strips
/// every character outside `[a-z0-9-]`, collapses hyphen runs, and
/// trims leading/trailing hyphens. Pure and idempotent:
/// `slugify(slugify(t)) == slugify(t)`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in title.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
        // anything else is stripped
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}
