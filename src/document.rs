//! The on-disk config document: profiles plus the current-profile marker.
//!
//! The file is read fresh on every invocation and written back whole by
//! mutating commands. There is no locking; two concurrent invocations can
//! clobber each other's edits.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

use crate::error::Error;

/// A named provider/token/server record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub provider: String,
    /// Stored in plaintext
    pub token: String,
    pub server: String,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        token: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            token: token.into(),
            server: server.into(),
        }
    }
}

/// Contents of the YAML config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    /// Profiles in insertion order
    pub profiles: Vec<Profile>,

    /// Name of the active profile, empty when unset. Not guaranteed to
    /// reference an existing profile.
    #[serde(rename = "current-profile")]
    pub current_profile: String,
}

impl ConfigDocument {
    /// Read and parse the document at `path`.
    ///
    /// A missing file is an error, not an empty document. A blank file loads
    /// as the empty document.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        if content.trim().is_empty() {
            debug!(path = %path.display(), "config file is blank, using empty document");
            return Ok(Self::default());
        }

        let doc: Self = serde_yaml::from_str(&content).map_err(|e| Error::format(path, e))?;
        debug!(
            path = %path.display(),
            profiles = doc.profiles.len(),
            current = %doc.current_profile,
            "loaded config"
        );
        Ok(doc)
    }

    /// Serialize and write the whole document to `path`.
    ///
    /// Serialization happens before anything touches the disk, and the bytes
    /// land in a sibling temp file that is renamed over the target, so a
    /// failure leaves the previous file intact. A symlinked `path` is written
    /// through to the file it points at, and an existing file keeps its mode.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = serde_yaml::to_string(self).map_err(|e| Error::format(path, e))?;

        let target = match std::fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => return Err(Error::io(path, e)),
        };
        let permissions = std::fs::metadata(&target).ok().map(|m| m.permissions());

        let temp_path = temp_path_for(&target);
        trace!(temp = %temp_path.display(), target = %target.display(), "writing config to temp file");
        if let Err(e) = write_temp(&temp_path, &content, permissions) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::io(&temp_path, e));
        }

        if let Err(e) = std::fs::rename(&temp_path, &target) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::io(path, e));
        }

        debug!(path = %target.display(), profiles = self.profiles.len(), "saved config");
        Ok(())
    }
}

fn write_temp(
    temp_path: &Path,
    content: &str,
    permissions: Option<std::fs::Permissions>,
) -> std::io::Result<()> {
    std::fs::write(temp_path, content)?;
    if let Some(permissions) = permissions {
        std::fs::set_permissions(temp_path, permissions)?;
    }
    Ok(())
}

/// `config.yaml` -> `.config.yaml.tmp` in the same directory
fn temp_path_for(path: &Path) -> std::path::PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config.yaml".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}
