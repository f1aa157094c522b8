use serde::{Deserialize, Serialize};

/// One parameter a remote model declares on its input schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSchemaInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SchemaInputKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaInputKind {
    String,
    Number,
    Boolean,
    Image,
    Text,
}

impl SchemaInputKind {
    /// Whether this parameter can carry free text.
    pub fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Text)
    }
}

/// Body of the model-schema lookup endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSchemaResponse {
    pub inputs: Vec<ModelSchemaInput>,
}
