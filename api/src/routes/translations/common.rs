use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct SetTranslationRequest {
    #[serde(default)]
    pub value: Value,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub data: Value,
    /// Replace values that already exist. Off by default, so an import only
    /// fills gaps.
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct MissingParams {
    pub reference: Option<String>,
}
