//! Wire types shared by the console, the web server and the providers
//!
//! Field names follow the JSON the browser page has always spoken:
//! `serverUrl`/`modelName` in camelCase, `args_schema` in snake_case.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Absent and `null` both decode to the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `GET /server-info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Whether the server could describe itself
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    /// URL of the MCP server the agent talks to
    #[serde(default, deserialize_with = "null_as_default")]
    pub server_url: String,

    /// Human-readable model description
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_name: String,

    /// Tools exposed to the agent; absent and `null` both decode to `None`
    #[serde(default)]
    pub tools: Option<Vec<ToolDescriptor>>,
}

/// A backend-exposed tool, displayed for operator inspection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolDescriptor {
    /// Tool name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tool description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter schema, structured or textual
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args_schema: Option<SchemaValue>,
}

impl ToolDescriptor {
    /// Create a descriptor with a name only
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the parameter schema
    pub fn with_schema(mut self, schema: SchemaValue) -> Self {
        self.args_schema = Some(schema);
        self
    }
}

/// Tool entries arrive either as objects or, from older backends, as bare
/// names. Anything else is shown as an unnamed tool.
#[derive(Deserialize)]
#[serde(untagged)]
enum ToolEntryWire {
    Name(String),
    Full {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        args_schema: Option<SchemaValue>,
    },
    Other(IgnoredAny),
}

impl From<ToolEntryWire> for ToolDescriptor {
    fn from(wire: ToolEntryWire) -> Self {
        match wire {
            ToolEntryWire::Name(name) => ToolDescriptor::named(name),
            ToolEntryWire::Full {
                name,
                description,
                args_schema,
            } => ToolDescriptor {
                name,
                description,
                args_schema,
            },
            ToolEntryWire::Other(_) => ToolDescriptor::default(),
        }
    }
}

impl<'de> Deserialize<'de> for ToolDescriptor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ToolEntryWire::deserialize(deserializer).map(Into::into)
    }
}

/// A tool parameter schema as published by the backend
///
/// Strings may hold strict JSON or a Python dict literal; see
/// [`crate::schema::format_schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaValue {
    /// String form
    Text(String),
    /// Native structured form
    Structured(Value),
}

impl SchemaValue {
    /// Mirrors the falsy values the page treats as "no schema":
    /// `null`, `false`, `0` and the empty string
    pub fn is_empty(&self) -> bool {
        match self {
            SchemaValue::Text(s) => s.is_empty(),
            SchemaValue::Structured(Value::Null) => true,
            SchemaValue::Structured(Value::Bool(b)) => !*b,
            SchemaValue::Structured(Value::Number(n)) => n.as_f64() == Some(0.0),
            SchemaValue::Structured(Value::String(s)) => s.is_empty(),
            SchemaValue::Structured(_) => false,
        }
    }
}

impl From<Value> for SchemaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => SchemaValue::Text(s),
            other => SchemaValue::Structured(other),
        }
    }
}

/// Body of `POST /ask`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    /// Free-text question
    #[serde(default)]
    pub question: String,
}

impl AskRequest {
    /// Create a request
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Response of `POST /ask`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskResult {
    /// Whether the agent produced an answer
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    /// Reasoning trace, when the agent exposed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,

    /// Final answer
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: String,

    /// Failure description on `success == false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskResult {
    /// Successful answer
    pub fn answered(thinking: Option<String>, response: impl Into<String>) -> Self {
        Self {
            success: true,
            thinking,
            response: response.into(),
            error: None,
        }
    }

    /// Logical failure
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            thinking: None,
            response: String::new(),
            error: Some(error.into()),
        }
    }
}
