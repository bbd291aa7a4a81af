use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// An audio file produced for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    /// File name inside the audio directory.
    pub generated_name: String,
}

/// Directory holding synthesized replies.
///
/// Every artifact gets a fresh UUID based name, so concurrent turns can write
/// into the same directory without coordination.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    /// Open the store, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create audio directory: {:?}", dir))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn allocate_name() -> String {
        format!("reply_{}.mp3", Uuid::new_v4().simple())
    }

    /// Write `bytes` to a newly named file.
    pub async fn persist(&self, bytes: &[u8]) -> std::io::Result<AudioArtifact> {
        let generated_name = Self::allocate_name();
        let path = self.dir.join(&generated_name);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = ?path, bytes = bytes.len(), "Stored synthesized audio");
        Ok(AudioArtifact {
            path,
            generated_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_mp3_files() {
        let names: HashSet<String> = (0..1000).map(|_| AudioStore::allocate_name()).collect();
        assert_eq!(names.len(), 1000);
        for name in names {
            assert!(name.starts_with("reply_"));
            assert!(name.ends_with(".mp3"));
        }
    }

    #[test]
    fn creates_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("audio");
        let store = AudioStore::new(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[tokio::test]
    async fn concurrent_persists_do_not_collide() {
        let temp = tempfile::tempdir().unwrap();
        let store = AudioStore::new(temp.path()).unwrap();

        let writes = (0..16u8).map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.persist(&[i; 32]).await.unwrap() })
        });
        let artifacts = futures::future::join_all(writes).await;

        let mut names = HashSet::new();
        for artifact in artifacts {
            let artifact = artifact.unwrap();
            assert!(artifact.path.exists());
            assert_eq!(std::fs::read(&artifact.path).unwrap().len(), 32);
            names.insert(artifact.generated_name);
        }
        assert_eq!(names.len(), 16);
    }
}
