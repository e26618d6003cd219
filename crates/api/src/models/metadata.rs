use super::kind::{ProtocolVersion, TextEncoding};
use serde::{Deserialize, Serialize};

/// The indexer that produced a snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    #[serde(default)]
    pub version: ProtocolVersion,
    #[serde(default)]
    pub tool_info: ToolInfo,
    #[serde(default)]
    pub project_root: String,
    #[serde(default)]
    pub text_document_encoding: TextEncoding,
}
