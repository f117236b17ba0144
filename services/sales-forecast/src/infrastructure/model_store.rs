//! 模型文件加载

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use salescast_ports::Forecastable;
use tracing::debug;

use crate::domain::models::ModelArtifact;
use crate::error::LoadError;

/// 模型存储
///
/// 只负责一次性读取并反序列化模型文件，不重试
pub struct ModelStore;

impl ModelStore {
    pub async fn load(path: impl AsRef<Path>) -> Result<Arc<dyn Forecastable>, LoadError> {
        let path = path.as_ref();
        let location = path.display().to_string();

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                path: location.clone(),
            },
            _ => LoadError::Unreadable {
                path: location.clone(),
                reason: e.to_string(),
            },
        })?;

        debug!(path = %location, bytes = bytes.len(), "Model artifact read");

        let artifact = ModelArtifact::from_slice(&bytes).map_err(|e| LoadError::Corrupt {
            path: location.clone(),
            reason: e.to_string(),
        })?;

        artifact
            .into_forecastable()
            .map_err(|e| LoadError::Corrupt {
                path: location,
                reason: e.to_string(),
            })
    }
}
