use super::types::Model;
use anyhow::Context;
use std::path::Path;

/// Load a resolved model document from a YAML or JSON file.
///
/// The document is produced by the schema front end (parsing, semantic
/// validation, attribute registration happen there); this crate only
/// consumes the resolved shape.
pub fn load_model(path: &Path) -> anyhow::Result<Model> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model document {:?}", path))?;
    let model = if path
        .extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
    {
        serde_yaml::with::singleton_map_recursive::deserialize(
            serde_yaml::Deserializer::from_str(&content),
        )
        .with_context(|| format!("failed to parse YAML model {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON model {:?}", path))?
    };
    Ok(model)
}

/// Parse a model from an in-memory YAML string.
pub fn model_from_yaml(content: &str) -> anyhow::Result<Model> {
    serde_yaml::with::singleton_map_recursive::deserialize(serde_yaml::Deserializer::from_str(
        content,
    ))
    .context("failed to parse YAML model")
}
