use unicode_normalization::UnicodeNormalization;

/// Used when a title has no ASCII letters or digits at all.
pub const FALLBACK_SLUG: &str = "artigo";

/// URL slug for `title`: lowercase, diacritics stripped, every run of other
/// characters collapsed to a single `-`, no leading or trailing `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().nfd() {
        if ('\u{0300}'..='\u{036f}').contains(&c) {
            continue;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Slug for the retry after a uniqueness conflict.
pub fn with_suffix(slug: &str, millis: i64) -> String {
    format!("{slug}-{millis}")
}
