//! Reusable test content

pub const MODEL_NAME: &str = "org.acme.model";

pub const MODEL_BYTES: &str = "serialized model weights";

pub const DEPENDENCY_BYTES: &str = "shared library bytes";

pub const CONTAINER_JSON: &str = r#"{"name":"org.acme.model","training":{"epochs":3}}"#;

/// Location the filesystem uploader assigns to `org.acme.model` at `version`
pub fn model_location(version: &str) -> String {
    format!("org/acme/model/{version}/model-{version}.tar")
}
