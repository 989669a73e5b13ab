//! Slug derivation for display names.
//!
//! A slug is the URL-safe identifier for a category, subcategory, or
//! product. It is always derived from the display name with [`slugify`]
//! and regenerated whenever the name changes, so the name is the single
//! source of truth.

/// Derive a URL-safe slug from a display name.
///
/// Rules:
/// - lowercase ASCII letters and digits pass through
/// - apostrophes are dropped entirely (`Men's` becomes `mens`)
/// - any other run of characters collapses to a single hyphen
/// - leading and trailing hyphens are stripped
///
/// The function is deterministic and idempotent: running a slug through
/// it again returns the same slug.
///
/// ```
/// use bazaar_core::slugify;
///
/// assert_eq!(slugify("Men's Shoes!!"), "mens-shoes");
/// assert_eq!(slugify(&slugify("Men's Shoes!!")), "mens-shoes");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_hyphen = false;
        } else if c == '\'' || c == '\u{2019}' {
            // Apostrophes join the surrounding word instead of splitting it.
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Summer Dresses"), "summer-dresses");
    }

    #[test]
    fn test_apostrophes_dropped() {
        assert_eq!(slugify("Men's Shoes!!"), "mens-shoes");
        assert_eq!(slugify("Women\u{2019}s Bags"), "womens-bags");
    }

    #[test]
    fn test_symbol_runs_collapse() {
        assert_eq!(slugify("Tops & T-Shirts"), "tops-t-shirts");
        assert_eq!(slugify("A   --  B"), "a-b");
    }

    #[test]
    fn test_edge_hyphens_stripped() {
        assert_eq!(slugify("  Sale!  "), "sale");
        assert_eq!(slugify("!!Clearance!!"), "clearance");
    }

    #[test]
    fn test_idempotent() {
        for name in ["Men's Shoes!!", "Tops & T-Shirts", "  Sale!  ", "kids"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(slugify("Size 42 Shoes"), "size-42-shoes");
    }
}
