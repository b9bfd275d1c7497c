use std::borrow::Cow;

use indexmap::IndexMap;

use crate::parse::document::OpenApiDocument;
use crate::parse::operation::{HttpMethod, Operation};
use crate::render::{RenderContext, literal, render_endpoint};

/// Tag assigned to operations that declare none.
pub const DEFAULT_TAG: &str = "Uncategorized";

/// One `(path, method, operation)` triple discovered under `paths`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointRecord<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: Operation<'a>,
}

impl<'a> EndpointRecord<'a> {
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        render_endpoint(self.path, self.method, &self.operation, ctx)
    }

    /// The operation summary, falling back to the path.
    pub fn summary_or_path(&self) -> Cow<'a, str> {
        match self.operation.summary() {
            Some(summary) => literal(summary),
            None => Cow::Borrowed(self.path),
        }
    }
}

/// Endpoints keyed by tag, in first-seen tag order. Each list keeps the
/// order in which paths appear in the document.
pub type TagGroups<'a> = IndexMap<String, Vec<EndpointRecord<'a>>>;

/// Group every operation in the document by its declared tags.
///
/// An operation with several tags is listed once under each of them.
pub fn group_by_tag(document: &OpenApiDocument) -> TagGroups<'_> {
    let mut groups: TagGroups<'_> = IndexMap::new();

    for (path, item) in document.paths() {
        for (key, value) in item {
            let Some(method) = HttpMethod::from_key(key) else {
                log::debug!("skipping non-operation key '{key}' under {path}");
                continue;
            };
            let Some(raw) = value.as_object() else {
                log::warn!("skipping {method} {path}: operation is not a mapping");
                continue;
            };

            let record = EndpointRecord {
                path,
                method,
                operation: Operation::new(raw),
            };
            let tags = tags_of(&record.operation);
            if tags.is_empty() {
                log::debug!("{method} {path} declares no tags, leaving it out");
            }
            for tag in tags {
                groups.entry(tag).or_default().push(record);
            }
        }
    }

    groups
}

/// The default tag applies only when `tags` is missing. A present but empty
/// list leaves the operation out of every group.
fn tags_of(operation: &Operation<'_>) -> Vec<String> {
    if !operation.raw().contains_key("tags") {
        return vec![DEFAULT_TAG.to_string()];
    }
    operation
        .tags()
        .map(|tags| tags.iter().map(|t| literal(t).into_owned()).collect())
        .unwrap_or_default()
}

/// Tag names in lexicographic order.
pub fn sorted_tags<'g>(groups: &'g TagGroups<'_>) -> Vec<&'g str> {
    let mut tags: Vec<&str> = groups.keys().map(String::as_str).collect();
    tags.sort_unstable();
    tags
}

/// Total number of entries across all tags, counting multi-tag operations
/// once per tag.
pub fn entry_count(groups: &TagGroups<'_>) -> usize {
    groups.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn duplicate_tags_on_one_operation() {
        let doc = OpenApiDocument::new(json!({
            "paths": {"/x": {"get": {"tags": ["A", "A"]}}}
        }))
        .unwrap();
        let groups = group_by_tag(&doc);
        assert_eq!(groups["A"].len(), 2);
    }

    #[test]
    fn missing_tags_fall_back_to_default() {
        let doc = OpenApiDocument::new(json!({
            "paths": {"/x": {"get": {}, "put": {"summary": "no tags"}}}
        }))
        .unwrap();
        let groups = group_by_tag(&doc);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[DEFAULT_TAG].len(), 2);
    }

    #[test]
    fn empty_tag_list_is_left_out() {
        let doc = OpenApiDocument::new(json!({
            "paths": {"/x": {"post": {"tags": []}, "get": {}}}
        }))
        .unwrap();
        let groups = group_by_tag(&doc);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[DEFAULT_TAG].len(), 1);
        assert_eq!(groups[DEFAULT_TAG][0].method, HttpMethod::Get);

        let only_empty = OpenApiDocument::new(json!({
            "paths": {"/x": {"get": {"tags": []}}}
        }))
        .unwrap();
        assert!(group_by_tag(&only_empty).is_empty());
    }

    #[test]
    fn sorted_tags_are_lexicographic() {
        let doc = OpenApiDocument::new(json!({
            "paths": {"/x": {"get": {"tags": ["b", "B", "a"]}}}
        }))
        .unwrap();
        let groups = group_by_tag(&doc);
        assert_eq!(groups.keys().collect::<Vec<_>>(), ["b", "B", "a"]);
        assert_eq!(sorted_tags(&groups), ["B", "a", "b"]);
        assert_eq!(entry_count(&groups), 3);
    }
}
