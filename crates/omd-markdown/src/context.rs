use serde::Serialize;
use serde_json::Value;

use omd_core::grouping::EndpointRecord;
use omd_core::parse::document::OpenApiDocument;
use omd_core::parse::operation::is_truthy;
use omd_core::render::{RenderContext, literal};

use crate::anchors::AnchorRegistry;

/// API-level header shared by every generated file.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub info: Option<InfoContext>,
    pub servers: Vec<ServerContext>,
}

/// Missing keys are left out so templates can apply their own defaults.
#[derive(Debug, Clone, Serialize)]
pub struct InfoContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerContext {
    pub url: String,
    pub description: Option<String>,
}

impl Overview {
    pub fn from_document(document: &OpenApiDocument) -> Self {
        let info = document.info().map(|info| InfoContext {
            title: info.title.map(owned_literal),
            version: info.version.map(owned_literal),
            description: info.description.map(owned_literal),
        });
        let servers = document
            .servers()
            .into_iter()
            .map(|server| ServerContext {
                url: server.url.map_or_else(|| "N/A".to_string(), owned_literal),
                description: server.description.filter(|d| is_truthy(d)).map(owned_literal),
            })
            .collect();
        Self { info, servers }
    }

    /// Text of the `## <title>` heading written by the index and single-file layouts.
    pub fn heading(&self) -> Option<&str> {
        self.info
            .as_ref()
            .map(|info| info.title.as_deref().unwrap_or("API Documentation"))
    }
}

/// One endpoint: its table-of-contents line and its rendered body.
#[derive(Debug, Clone, Serialize)]
pub struct EntryContext {
    pub label: String,
    pub anchor: String,
    pub summary: String,
    pub body: String,
}

impl EntryContext {
    /// Render `record`, registering its heading so the anchor matches the
    /// position the heading takes in the file.
    pub fn new(
        record: &EndpointRecord<'_>,
        anchors: &mut AnchorRegistry,
        ctx: &RenderContext<'_>,
    ) -> Self {
        let label = format!("{} {}", record.method, record.path);
        let anchor = anchors.register(&label);
        Self {
            anchor,
            summary: record.summary_or_path().into_owned(),
            body: record.render(ctx),
            label,
        }
    }
}

/// A tag with its endpoints, as laid out in the single-file document.
#[derive(Debug, Clone, Serialize)]
pub struct SectionContext {
    pub tag: String,
    pub entries: Vec<EntryContext>,
}

/// A line in the index's category list.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryContext {
    pub tag: String,
    pub file: String,
    pub count: usize,
}

fn owned_literal(value: &Value) -> String {
    literal(value).into_owned()
}
