use omd_core::parse;
use omd_core::parse::document::OpenApiDocument;
use omd_core::parse::operation::{HttpMethod, Operation};
use omd_core::render::parameters::render_parameters;
use omd_core::render::request_body::render_request_body;
use omd_core::render::responses::render_responses;
use omd_core::render::{RenderContext, RenderOptions, render_endpoint};
use serde_json::json;

const SHOP: &str = include_str!("fixtures/shop.json");

fn operation<'a>(doc: &'a OpenApiDocument, path: &str, method: &str) -> Operation<'a> {
    let raw = doc.root()["paths"][path][method]
        .as_object()
        .expect("operation should exist");
    Operation::new(raw)
}

#[test]
fn renders_minimal_endpoint_exactly() {
    let doc = OpenApiDocument::new(json!({
        "paths": {
            "/ping": {
                "get": {
                    "summary": "Ping",
                    "operationId": "ping",
                    "tags": ["Health"],
                    "parameters": [],
                    "responses": { "204": { "description": "Healthy" } },
                    "security": [{ "apiKey": [] }]
                }
            }
        }
    }))
    .unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let op = operation(&doc, "/ping", "get");

    let expected = concat!(
        "## `GET /ping`\n\n",
        "**Summary**: Ping\n\n",
        "**Operation ID**: `ping`\n\n",
        "**Tags**: `Health`\n\n",
        "---\n\n",
        "### Parameters\n\n",
        "*No parameters*\n\n",
        "### Responses\n\n",
        "### Response: `204`\n\n",
        "**Description**: Healthy\n\n",
        "---\n\n",
        "### Security\n\n",
        "- **apiKey**: No scopes required\n",
        "\n",
        "\n---\n\n",
    );
    assert_eq!(render_endpoint("/ping", HttpMethod::Get, &op, &ctx), expected);
}

#[test]
fn absent_sections_are_omitted() {
    let doc = OpenApiDocument::new(json!({ "paths": { "/x": { "delete": {} } } })).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let op = operation(&doc, "/x", "delete");

    assert_eq!(
        render_endpoint("/x", HttpMethod::Delete, &op, &ctx),
        "## `DELETE /x`\n\n---\n\n\n---\n\n"
    );
}

#[test]
fn parameters_render_name_location_and_schema() {
    let doc = parse::from_json(SHOP).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let op = operation(&doc, "/products", "get");

    let expected = concat!(
        "- **`limit`** (query) - Optional\n",
        "  - Description: Page size\n",
        "  - Schema:\n",
        "    - **Type**: `integer`\n",
        "    - **Default**: `20`\n",
        "    - **minimum**: `1`\n",
        "    - **maximum**: `100`\n",
        "\n",
        "- **`cursor`** (query) - Optional\n",
        "  - Description: Opaque pagination cursor\n",
        "  - Schema:\n",
        "    - **Type**: `string`\n",
        "\n",
    );
    assert_eq!(render_parameters(op.parameters().unwrap(), &ctx), expected);
}

#[test]
fn parameter_defaults_and_unresolvable_refs() {
    let doc = OpenApiDocument::new(json!({})).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let params = vec![
        json!({ "required": true }),
        json!({ "$ref": "#/components/parameters/Gone" }),
    ];

    let expected = concat!(
        "- **`unknown`** (unknown) - **Required**\n",
        "\n",
        "- **$ref**: `#/components/parameters/Gone`\n",
        "  *(unable to resolve reference)*\n",
        "\n",
    );
    assert_eq!(render_parameters(&params, &ctx), expected);
}

#[test]
fn request_body_lists_content_types() {
    let doc = parse::from_json(SHOP).unwrap();
    let ctx = RenderContext::new(
        &doc,
        RenderOptions {
            inline_refs: false,
            ..RenderOptions::default()
        },
    );
    let op = operation(&doc, "/products", "post");

    let expected = concat!(
        "**Required**: true\n\n",
        "**Description**: The product to create\n\n",
        "**Content Types**:\n\n",
        "- **`application/json`**:\n",
        "  - **$ref**: `#/components/schemas/Product`\n",
        "\n",
    );
    assert_eq!(render_request_body(op.request_body().unwrap(), &ctx), expected);
}

#[test]
fn empty_request_body_and_responses_use_markers() {
    let doc = OpenApiDocument::new(json!({})).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());

    assert_eq!(render_request_body(&json!({}), &ctx), "*No request body*\n\n");
    assert_eq!(render_responses(&json!({}), &ctx), "*No responses defined*\n\n");
}

#[test]
fn responses_keep_document_order() {
    let doc = OpenApiDocument::new(json!({})).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let responses = json!({
        "404": { "description": "missing" },
        "200": { "description": "ok" },
        "default": { "description": "error" },
        "201": { "description": "created" }
    });
    let out = render_responses(&responses, &ctx);

    let positions: Vec<usize> = ["`404`", "`200`", "`default`", "`201`"]
        .iter()
        .map(|code| out.find(code).expect("status code rendered"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{out}");
    assert_eq!(out.matches("---\n\n").count(), 4);
}

#[test]
fn response_refs_are_followed() {
    let doc = parse::from_json(SHOP).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let op = operation(&doc, "/products", "get");
    let out = render_responses(op.responses().unwrap(), &ctx);

    assert!(out.contains("### Response: `default`\n\n**Description**: Unexpected error\n\n"));
    assert!(out.contains("  - **$ref**: `#/components/schemas/Error`\n"));
    assert!(out.contains("- **`message`**:"));
}

#[test]
fn security_lists_scopes() {
    let doc = parse::from_json(SHOP).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let op = operation(&doc, "/products", "post");
    let out = render_endpoint("/products", HttpMethod::Post, &op, &ctx);

    assert!(out.contains(concat!(
        "### Security\n\n",
        "- **bearerAuth**: No scopes required\n",
        "- **oauth**: `products:write`, `products:read`\n",
    )));
}

#[test]
fn deprecated_operations_are_flagged() {
    let doc = parse::from_json(SHOP).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let op = operation(&doc, "/users/{user_id}", "GET");
    let out = render_endpoint("/users/{user_id}", HttpMethod::Get, &op, &ctx);

    assert!(out.starts_with("## `GET /users/{user_id}`\n\n> **Deprecated**\n\n**Summary**: Fetch a user\n\n"));
    assert!(out.contains("- **`user_id`** (path) - **Required**\n"));
    // Self-referencing User is expanded once and then cut.
    assert_eq!(out.matches("circular reference").count(), 1);
}

#[test]
fn endpoint_sections_follow_fixed_order() {
    let doc = parse::from_json(SHOP).unwrap();
    let ctx = RenderContext::new(&doc, RenderOptions::default());
    let op = operation(&doc, "/products", "post");
    let out = render_endpoint("/products", HttpMethod::Post, &op, &ctx);

    let order = [
        "## `POST /products`",
        "**Summary**",
        "**Description**: Adds",
        "**Operation ID**",
        "**Tags**: `Products`, `Admin`",
        "### Request Body",
        "### Responses",
        "### Security",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| out.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!out.contains("### Parameters"));
    assert!(out.ends_with("\n---\n\n"));
}

#[test]
fn inline_toggle_reaches_nested_formatters() {
    let doc = parse::from_json(SHOP).unwrap();
    let op = operation(&doc, "/products", "get");

    let reference_only = RenderContext::new(
        &doc,
        RenderOptions {
            inline_refs: false,
            ..RenderOptions::default()
        },
    );
    let out = render_endpoint("/products", HttpMethod::Get, &op, &reference_only);
    assert!(out.contains("**$ref**: `#/components/schemas/Product`"));
    assert!(!out.contains("Resolved Definition"));

    let inline = RenderContext::new(&doc, RenderOptions::default());
    let out = render_endpoint("/products", HttpMethod::Get, &op, &inline);
    assert!(out.contains("Resolved Definition"));
}

#[test]
fn component_refs_stay_pointers_without_inlining() {
    let doc = parse::from_json(SHOP).unwrap();
    let ctx = RenderContext::new(
        &doc,
        RenderOptions {
            inline_refs: false,
            ..RenderOptions::default()
        },
    );
    let op = operation(&doc, "/products", "get");

    let params = render_parameters(op.parameters().unwrap(), &ctx);
    assert!(params.ends_with("\n- **$ref**: `#/components/parameters/Cursor`\n\n"), "{params}");
    assert!(!params.contains("cursor"));

    let responses = render_responses(op.responses().unwrap(), &ctx);
    assert!(responses.ends_with(concat!(
        "### Response: `default`\n\n",
        "- **$ref**: `#/components/responses/Error`\n",
        "\n",
        "---\n\n",
    )));
    assert!(!responses.contains("Unexpected error"));

    let body = json!({ "$ref": "#/components/requestBodies/Missing" });
    assert_eq!(
        render_request_body(&body, &ctx),
        "- **$ref**: `#/components/requestBodies/Missing`\n\n"
    );
}
