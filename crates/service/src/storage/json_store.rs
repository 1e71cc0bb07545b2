use std::{path::PathBuf, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed document store.
///
/// Holds one `T` in memory and rewrites the whole file after every mutation.
/// Intended for small datasets where a database is overkill.
pub struct JsonStore<T> {
    inner: RwLock<T>,
    file_path: PathBuf,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Open the store at `path`, creating the file with `T::default()` if missing.
    /// A file that exists but does not parse is an error rather than silently reset.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        }

        let doc: T = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => T::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Db(format!("corrupt store {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = T::default();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(|e| ServiceError::Db(e.to_string()))?)
                    .await
                    .map_err(|e| ServiceError::Db(e.to_string()))?;
                empty
            }
            Err(e) => return Err(ServiceError::Db(e.to_string())),
        };
        debug!(path = %file_path.display(), "json store opened");

        Ok(Arc::new(Self { inner: RwLock::new(doc), file_path }))
    }

    async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::Db(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    /// Run a read-only view under the read lock.
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let doc = self.inner.read().await;
        f(&doc)
    }

    /// Apply a mutation and persist while still holding the write lock.
    /// The document is left untouched when `f` fails; a failed write rolls the change back.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut T) -> Result<R, ServiceError>,
    {
        let mut doc = self.inner.write().await;
        let mut staged = doc.clone();
        let out = f(&mut staged)?;
        self.save(&staged).await?;
        *doc = staged;
        Ok(out)
    }
}
