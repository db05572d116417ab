//! URL slugs derived from job titles.

/// Slug used when a title has no alphanumeric characters at all.
pub const FALLBACK_SLUG: &str = "job";

/// Maximum number of candidates tried before giving up on a unique slug.
pub const MAX_SLUG_ATTEMPTS: usize = 100;

/// Maximum length of the base slug, leaving room for a numeric suffix
/// within the 255-character column.
const MAX_BASE_LENGTH: usize = 240;

/// Lowercase the title and collapse every run of non-alphanumeric characters
/// into a single hyphen, trimming hyphens from both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
        if slug.len() >= MAX_BASE_LENGTH {
            break;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Candidate slugs in the order they should be tried: `base`, `base-2`,
/// `base-3`, ... up to [`MAX_SLUG_ATTEMPTS`] entries.
pub fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    (1..=MAX_SLUG_ATTEMPTS).map(move |n| {
        if n == 1 {
            base.to_string()
        } else {
            format!("{base}-{n}")
        }
    })
}
