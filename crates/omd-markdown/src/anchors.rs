use std::collections::HashMap;

/// GitHub-style heading slug: lowercase, spaces become `-`, and everything
/// except alphanumerics, `-` and `_` is dropped.
///
/// `GET /users/{user_id}` becomes `get-usersuser_id`.
pub fn slugify(heading: &str) -> String {
    let mut slug = String::with_capacity(heading.len());
    for c in heading.trim().chars() {
        if c == ' ' {
            slug.push('-');
        } else if c.is_alphanumeric() || c == '-' || c == '_' {
            slug.extend(c.to_lowercase());
        }
    }
    slug
}

/// Tracks the anchors already taken within one markdown file.
///
/// Repeated headings get `-1`, `-2`, ... appended in the order they appear,
/// skipping any suffixed form another heading already produced.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    occurrences: HashMap<String, usize>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return the anchor for the next heading with this text.
    pub fn register(&mut self, heading: &str) -> String {
        let base = slugify(heading);
        let mut anchor = base.clone();
        while self.occurrences.contains_key(&anchor) {
            let Some(count) = self.occurrences.get_mut(&base) else {
                break;
            };
            *count += 1;
            anchor = format!("{base}-{count}");
        }
        self.occurrences.insert(anchor.clone(), 0);
        anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_path_punctuation() {
        assert_eq!(slugify("GET /products"), "get-products");
        assert_eq!(slugify("GET /users/{user_id}"), "get-usersuser_id");
        assert_eq!(slugify("DELETE /a.b/c-d"), "delete-abc-d");
        assert_eq!(slugify("Table of Contents"), "table-of-contents");
    }

    #[test]
    fn paths_that_flatten_to_the_same_slug_stay_distinct() {
        let mut anchors = AnchorRegistry::new();
        assert_eq!(anchors.register("GET /a/{id}"), "get-aid");
        assert_eq!(anchors.register("GET /aid"), "get-aid-1");
        assert_eq!(anchors.register("GET /a/id"), "get-aid-2");
    }

    #[test]
    fn suffix_skips_anchors_taken_by_literal_headings() {
        let mut anchors = AnchorRegistry::new();
        assert_eq!(anchors.register("GET /x"), "get-x");
        assert_eq!(anchors.register("GET /x-1"), "get-x-1");
        assert_eq!(anchors.register("GET /x"), "get-x-2");
    }

    #[test]
    fn registries_are_per_file() {
        let mut first = AnchorRegistry::new();
        let mut second = AnchorRegistry::new();
        assert_eq!(first.register("POST /products"), "post-products");
        assert_eq!(second.register("POST /products"), "post-products");
    }
}
