use minijinja::{Environment, context};
use omd_core::config::OutputLayout;
use omd_core::grouping::{TagGroups, sorted_tags};
use omd_core::parse::document::OpenApiDocument;
use omd_core::render::{RenderContext, RenderOptions};
use omd_core::{DocGenerator, GeneratedFile};

use crate::anchors::AnchorRegistry;
use crate::context::{CategoryContext, EntryContext, Overview, SectionContext};
use crate::error::GeneratorError;
use crate::files::{INDEX_FILE, SINGLE_FILE, assign_file_names};

/// Markdown documentation generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownGenerator {
    layout: OutputLayout,
}

impl MarkdownGenerator {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> OutputLayout {
        self.layout
    }
}

impl DocGenerator for MarkdownGenerator {
    type Error = GeneratorError;

    fn generate(
        &self,
        document: &OpenApiDocument,
        groups: &TagGroups<'_>,
        options: &RenderOptions,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let env = environment()?;
        let ctx = RenderContext::new(document, *options);
        let overview = Overview::from_document(document);

        match self.layout {
            OutputLayout::ByTag => emit_by_tag(&env, &overview, groups, &ctx),
            OutputLayout::Single => {
                let content = emit_single(&env, &overview, groups, &ctx)?;
                Ok(vec![GeneratedFile {
                    path: SINGLE_FILE.to_string(),
                    content,
                }])
            }
        }
    }
}

fn environment() -> Result<Environment<'static>, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template("_info.md.j2", include_str!("../templates/_info.md.j2"))?;
    env.add_template(
        "_servers.md.j2",
        include_str!("../templates/_servers.md.j2"),
    )?;
    env.add_template(
        "category.md.j2",
        include_str!("../templates/category.md.j2"),
    )?;
    env.add_template("index.md.j2", include_str!("../templates/index.md.j2"))?;
    env.add_template("single.md.j2", include_str!("../templates/single.md.j2"))?;
    Ok(env)
}

/// One file per tag, in tag order, followed by `index.md`.
fn emit_by_tag(
    env: &Environment<'_>,
    overview: &Overview,
    groups: &TagGroups<'_>,
    ctx: &RenderContext<'_>,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let tags = sorted_tags(groups);
    let file_names = assign_file_names(&tags);
    let category_tmpl = env.get_template("category.md.j2")?;

    let mut files = Vec::with_capacity(tags.len() + 1);
    let mut categories = Vec::with_capacity(tags.len());

    for (tag, file_name) in tags.iter().zip(file_names) {
        let records = &groups[*tag];
        let mut anchors = AnchorRegistry::new();
        anchors.register(&format!("{tag} API Documentation"));
        anchors.register("Table of Contents");
        let entries: Vec<EntryContext> = records
            .iter()
            .map(|record| EntryContext::new(record, &mut anchors, ctx))
            .collect();

        let content = category_tmpl.render(context! {
            tag => tag,
            info => &overview.info,
            servers => &overview.servers,
            entries => entries,
        })?;
        log::debug!("rendered {file_name} ({} endpoints)", records.len());

        categories.push(CategoryContext {
            tag: tag.to_string(),
            file: file_name.clone(),
            count: records.len(),
        });
        files.push(GeneratedFile {
            path: file_name,
            content,
        });
    }

    let index = env.get_template("index.md.j2")?.render(context! {
        info => &overview.info,
        servers => &overview.servers,
        categories => categories,
    })?;
    files.push(GeneratedFile {
        path: INDEX_FILE.to_string(),
        content: index,
    });

    Ok(files)
}

/// Everything in one file: a table of contents grouped by tag, then each
/// tag's endpoints under a top-level heading.
fn emit_single(
    env: &Environment<'_>,
    overview: &Overview,
    groups: &TagGroups<'_>,
    ctx: &RenderContext<'_>,
) -> Result<String, GeneratorError> {
    let tags = sorted_tags(groups);

    // Anchors follow heading order, so register the ones that precede the
    // endpoint headings first.
    let mut anchors = AnchorRegistry::new();
    anchors.register("Complete API Documentation");
    if let Some(heading) = overview.heading() {
        anchors.register(heading);
    }
    anchors.register("Table of Contents");
    for tag in &tags {
        anchors.register(tag);
    }

    let sections: Vec<SectionContext> = tags
        .iter()
        .map(|tag| {
            anchors.register(tag);
            SectionContext {
                tag: tag.to_string(),
                entries: groups[*tag]
                    .iter()
                    .map(|record| EntryContext::new(record, &mut anchors, ctx))
                    .collect(),
            }
        })
        .collect();

    let content = env.get_template("single.md.j2")?.render(context! {
        info => &overview.info,
        servers => &overview.servers,
        sections => sections,
    })?;
    Ok(content)
}
