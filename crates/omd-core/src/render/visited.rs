/// The `$ref` paths entered on the way from the top-level schema down to the
/// current node.
///
/// Each value is an immutable link to its parent, living on the stack of the
/// recursive call that created it. Extending the chain never touches the
/// parent, so sibling branches (properties, composition options) always start
/// from the same ancestor chain and never see each other's references.
#[derive(Debug, Clone, Copy, Default)]
pub struct Visited<'a> {
    link: Option<(&'a str, &'a Visited<'a>)>,
}

impl<'a> Visited<'a> {
    pub const fn new() -> Self {
        Visited { link: None }
    }

    /// A chain that additionally contains `path`, for the branch below it.
    pub fn with<'b>(&'b self, path: &'b str) -> Visited<'b> {
        Visited {
            link: Some((path, self)),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.iter().any(|p| p == path)
    }

    /// Paths from the innermost reference outward.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        let mut cursor = self.link;
        std::iter::from_fn(move || {
            let (path, parent) = cursor?;
            cursor = parent.link;
            Some(path)
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.link.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extending_leaves_parent_untouched() {
        let root = Visited::new();
        let a = root.with("#/a");
        let ab = a.with("#/b");
        let ac = a.with("#/c");

        assert!(root.is_empty());
        assert_eq!(a.len(), 1);
        assert!(ab.contains("#/a") && ab.contains("#/b"));
        assert!(!ac.contains("#/b"));
        assert_eq!(ab.iter().collect::<Vec<_>>(), ["#/b", "#/a"]);
    }
}
