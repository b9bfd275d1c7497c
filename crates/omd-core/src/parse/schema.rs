use std::borrow::Cow;

use serde_json::{Map, Value};

/// Classification of a schema value.
///
/// Real documents mix facets freely, so everything that is neither a bare
/// literal nor a reference is a [`Schema`] with optional facets rather than a
/// strict object/array/primitive sum type.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode<'a> {
    /// A non-mapping value sitting where a schema was expected.
    Literal(&'a Value),
    /// A mapping carrying `$ref`. Sibling keys are ignored.
    Ref(Cow<'a, str>),
    Schema(Schema<'a>),
}

impl<'a> SchemaNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        let Some(map) = value.as_object() else {
            return SchemaNode::Literal(value);
        };
        match map.get("$ref") {
            Some(Value::String(path)) => SchemaNode::Ref(Cow::Borrowed(path)),
            Some(other) => SchemaNode::Ref(Cow::Owned(other.to_string())),
            None => SchemaNode::Schema(Schema::from_map(map)),
        }
    }
}

/// The composition keywords, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    AllOf,
    AnyOf,
    OneOf,
}

impl Composition {
    pub const ALL: [Composition; 3] = [Composition::AllOf, Composition::AnyOf, Composition::OneOf];

    pub fn keyword(self) -> &'static str {
        match self {
            Composition::AllOf => "allOf",
            Composition::AnyOf => "anyOf",
            Composition::OneOf => "oneOf",
        }
    }
}

/// Numeric and length bounds, in rendering order.
pub const BOUND_KEYWORDS: [&str; 6] = [
    "minimum",
    "maximum",
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
];

/// A JSON Schema object viewed through its optional facets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema<'a> {
    pub schema_type: Option<&'a Value>,
    pub description: Option<&'a Value>,
    pub title: Option<&'a Value>,
    pub enum_values: Option<&'a Value>,
    pub default_value: Option<&'a Value>,
    pub format: Option<&'a Value>,

    // Object facets
    pub properties: Option<&'a Map<String, Value>>,
    pub required: Option<&'a Value>,
    pub additional_properties: Option<&'a Value>,

    // Array facets
    pub items: Option<&'a Value>,

    // Composition
    pub all_of: Option<&'a Vec<Value>>,
    pub any_of: Option<&'a Vec<Value>>,
    pub one_of: Option<&'a Vec<Value>>,

    pub example: Option<&'a Value>,
    pub pattern: Option<&'a Value>,

    /// Present bound keywords paired with their values, in [`BOUND_KEYWORDS`] order.
    pub bounds: Vec<(&'static str, &'a Value)>,
}

impl<'a> Schema<'a> {
    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        Schema {
            schema_type: map.get("type"),
            description: map.get("description"),
            title: map.get("title"),
            enum_values: map.get("enum"),
            default_value: map.get("default"),
            format: map.get("format"),
            properties: map.get("properties").and_then(Value::as_object),
            required: map.get("required"),
            // Boolean `additionalProperties` carries no structure worth rendering.
            additional_properties: map.get("additionalProperties").filter(|v| v.is_object()),
            items: map.get("items"),
            all_of: map.get("allOf").and_then(Value::as_array),
            any_of: map.get("anyOf").and_then(Value::as_array),
            one_of: map.get("oneOf").and_then(Value::as_array),
            example: map.get("example"),
            pattern: map.get("pattern"),
            bounds: BOUND_KEYWORDS
                .iter()
                .filter_map(|&key| map.get(key).map(|v| (key, v)))
                .collect(),
        }
    }

    pub fn composition(&self, kind: Composition) -> Option<&'a Vec<Value>> {
        match kind {
            Composition::AllOf => self.all_of,
            Composition::AnyOf => self.any_of,
            Composition::OneOf => self.one_of,
        }
    }

    /// Names listed in this node's own `required` array.
    pub fn required_names(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.required
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required_names().any(|r| r == name)
    }

    /// Whether the declared type is exactly the string `object`.
    pub fn is_object_type(&self) -> bool {
        self.schema_type.and_then(Value::as_str) == Some("object")
    }
}
