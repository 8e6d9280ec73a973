//! Stable project naming.
//!
//! Derives the deterministic slug used for remote project lookup and
//! creation.  Two calls with the same input always produce the same
//! slug, which is what makes remote-resource reuse idempotent.

/// Hard cap on slug length imposed by the build platform.
pub const MAX_PROJECT_SLUG_LENGTH: usize = 50;

/// Slug used when the caller-supplied name contains no usable characters.
pub const FALLBACK_PROJECT_SLUG: &str = "artifact";

/// Sanitize a caller-supplied project name into a stable slug.
///
/// Convention: lowercase, every run of non-alphanumeric characters
/// collapsed to a single `-`, leading/trailing `-` trimmed, capped at
/// [`MAX_PROJECT_SLUG_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use shipwright_core::naming::project_slug;
///
/// assert_eq!(project_slug("My Landing Page"), "my-landing-page");
/// assert_eq!(project_slug("  Hello -- World!  "), "hello-world");
/// ```
pub fn project_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true; // suppress a leading dash

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    slug.truncate(MAX_PROJECT_SLUG_LENGTH);
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        FALLBACK_PROJECT_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(project_slug("My Landing Page"), "my-landing-page");
    }

    #[test]
    fn collapses_non_alphanumeric_runs() {
        assert_eq!(project_slug("a__b!!c"), "a-b-c");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(project_slug("--hello--"), "hello");
        assert_eq!(project_slug("  spaced out  "), "spaced-out");
    }

    #[test]
    fn caps_length_at_fifty() {
        let long = "x".repeat(80);
        assert_eq!(project_slug(&long).len(), MAX_PROJECT_SLUG_LENGTH);
    }

    #[test]
    fn truncation_never_leaves_trailing_dash() {
        // 50th char lands on a separator; it must be trimmed after the cap.
        let name = format!("{} tail", "y".repeat(49));
        let slug = project_slug(&name);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn empty_or_symbol_only_falls_back() {
        assert_eq!(project_slug(""), FALLBACK_PROJECT_SLUG);
        assert_eq!(project_slug("!!!"), FALLBACK_PROJECT_SLUG);
    }

    #[test]
    fn deterministic_for_same_input() {
        assert_eq!(project_slug("Persona Site #4"), project_slug("Persona Site #4"));
    }

    #[test]
    fn unicode_is_treated_as_separator() {
        assert_eq!(project_slug("café menu"), "caf-menu");
    }
}
