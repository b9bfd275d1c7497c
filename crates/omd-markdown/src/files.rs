use std::collections::HashSet;

/// Index written next to the per-tag files.
pub const INDEX_FILE: &str = "index.md";

/// The only file written in the single-file layout.
pub const SINGLE_FILE: &str = "api_documentation.md";

/// File name for a tag: lowercased, with spaces and path separators turned
/// into `_` so the file always lands directly in the output directory.
pub fn tag_file_name(tag: &str) -> String {
    let stem: String = tag
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{stem}.md")
}

/// File names for `tags`, in the same order.
///
/// A tag whose name is already taken (by an earlier tag or by the index)
/// gets a numeric suffix instead of overwriting the other file.
pub fn assign_file_names(tags: &[&str]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::from([INDEX_FILE.to_string()]);
    tags.iter()
        .map(|tag| {
            let name = tag_file_name(tag);
            if taken.insert(name.clone()) {
                return name;
            }
            let stem = name.strip_suffix(".md").unwrap_or(&name);
            let mut n = 2;
            let unique = loop {
                let candidate = format!("{stem}_{n}.md");
                if !taken.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            log::warn!("tag '{tag}' maps to {name}, which is already in use; writing {unique}");
            taken.insert(unique.clone());
            unique
        })
        .collect()
}
