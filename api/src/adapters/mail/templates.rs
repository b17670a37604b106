//! File-backed mail templates

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ports::TemplateStore;
use crate::error::DomainError;

/// Reads templates from a directory, one file per template
pub struct FileTemplateStore {
    dir: PathBuf,
}

impl FileTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn read_template(&self, name: &str) -> Result<String, DomainError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(DomainError::Validation(format!(
                "Invalid template name: {}",
                name
            )));
        }

        let path = self.dir.join(name);
        tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DomainError::NotFound(format!("Template {} not found", path.display()))
            }
            _ => DomainError::Internal(format!("Cannot read template {}: {}", path.display(), e)),
        })
    }
}
