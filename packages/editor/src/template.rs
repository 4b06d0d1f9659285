//! Node creation input, as collected by the "create node" dialog

use nodeflow_tree::NodeKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// How the raw text of a new primitive should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    #[default]
    String,
    Number,
    Boolean,
}

/// Shape of the node to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateKind {
    Object,
    Array,
    #[serde(rename_all = "camelCase")]
    Primitive { primitive_type: PrimitiveType, raw: String },
}

/// A new child node: key plus kind and initial value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    /// Ignored when the parent is an array
    pub key: String,
    pub kind: TemplateKind,
}

impl NodeTemplate {
    pub fn object(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: TemplateKind::Object,
        }
    }

    pub fn array(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: TemplateKind::Array,
        }
    }

    pub fn primitive(key: impl Into<String>, primitive_type: PrimitiveType, raw: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: TemplateKind::Primitive {
                primitive_type,
                raw: raw.into(),
            },
        }
    }

    pub fn node_kind(&self) -> NodeKind {
        match self.kind {
            TemplateKind::Object => NodeKind::Object,
            TemplateKind::Array => NodeKind::Array,
            TemplateKind::Primitive { .. } => NodeKind::Primitive,
        }
    }

    /// Initial JSON value for the new node
    ///
    /// Numbers that do not parse (or are not finite) become `0`; booleans
    /// are true only for `"true"` in any letter case.
    pub fn to_value(&self) -> Value {
        match &self.kind {
            TemplateKind::Object => Value::Object(Map::new()),
            TemplateKind::Array => Value::Array(Vec::new()),
            TemplateKind::Primitive { primitive_type, raw } => match primitive_type {
                PrimitiveType::String => Value::String(raw.clone()),
                PrimitiveType::Number => Value::Number(parse_number(raw)),
                PrimitiveType::Boolean => Value::Bool(raw.eq_ignore_ascii_case("true")),
            },
        }
    }
}

fn parse_number(raw: &str) -> Number {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return n.into();
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .unwrap_or_else(|| Number::from(0u8))
}
