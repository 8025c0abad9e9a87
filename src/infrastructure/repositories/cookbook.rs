//! File System Cookbook Store
//!
//! Implements the CookbookStore port by walking cookbook directories.

use std::path::Path;

use ignore::WalkBuilder;
use serde::Deserialize;

use crate::domain::ports::cookbook_store::{
    CookbookFile, CookbookMetadata, CookbookProfile, CookbookStore, CookbookStoreError,
};
use crate::domain::value_objects::{sha256_hex, Chefignore, CookbookIdentifier};

/// Version control directories never part of a cookbook
const VCS_DIRS: &[&str] = &[".git", ".svn", ".hg", ".bzr"];

const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Deserialize)]
struct MetadataJson {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

/// Cookbook store backed by the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCookbookStore;

impl FsCookbookStore {
    pub fn new() -> Self {
        Self
    }

    /// Files of the cookbook at `dir`, sorted by relative path
    fn collect_files(&self, dir: &Path) -> Result<Vec<CookbookFile>, CookbookStoreError> {
        let chefignore = Chefignore::load(dir)?;
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && VCS_DIRS.iter().any(|vcs| entry.file_name() == *vcs))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| CookbookStoreError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let Ok(rel_path) = entry.path().strip_prefix(dir) else {
                continue;
            };
            if chefignore.is_ignored(rel_path, false) {
                tracing::trace!(path = %rel_path.display(), "ignored by chefignore");
                continue;
            }

            let content = std::fs::read(entry.path()).map_err(|source| CookbookStoreError::Read {
                path: entry.path().to_path_buf(),
                source,
            })?;
            files.push(CookbookFile {
                path: to_slash_path(rel_path),
                checksum: sha256_hex(&content),
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn read_metadata(&self, dir: &Path) -> Result<Option<CookbookMetadata>, CookbookStoreError> {
        let path = dir.join(METADATA_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| CookbookStoreError::Read {
            path: path.clone(),
            source,
        })?;
        let metadata: MetadataJson = serde_json::from_str(&content)
            .map_err(|source| CookbookStoreError::Metadata { path, source })?;

        Ok(Some(CookbookMetadata {
            name: metadata.name,
            version: metadata.version,
        }))
    }
}

impl CookbookStore for FsCookbookStore {
    fn exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn profile(&self, dir: &Path) -> Result<CookbookProfile, CookbookStoreError> {
        let files = self.collect_files(dir)?;
        let identifier = CookbookIdentifier::from_file_checksums(
            files.iter().map(|f| (f.path.as_str(), f.checksum.as_str())),
        );
        let metadata = self.read_metadata(dir)?;

        tracing::debug!(
            dir = %dir.display(),
            files = files.len(),
            identifier = %identifier,
            "profiled cookbook"
        );
        Ok(CookbookProfile {
            identifier,
            files,
            metadata,
        })
    }
}

/// Relative path with `/` separators regardless of platform
fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn cookbook(root: &Path) {
        write(root, "metadata.json", r#"{"name": "app", "version": "1.2.0"}"#);
        write(root, "recipes/default.rb", "package 'nginx'\n");
        write(root, "attributes/default.rb", "default['app']['port'] = 80\n");
    }

    #[test]
    fn profile_lists_files_sorted_with_checksums() {
        let dir = tempdir().unwrap();
        cookbook(dir.path());

        let profile = FsCookbookStore::new().profile(dir.path()).unwrap();

        let paths: Vec<&str> = profile.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["attributes/default.rb", "metadata.json", "recipes/default.rb"]
        );
        assert_eq!(
            profile.files[2].checksum,
            sha256_hex(b"package 'nginx'\n")
        );
        assert_eq!(profile.identifier.as_str().len(), 64);
    }

    #[test]
    fn profile_reads_metadata() {
        let dir = tempdir().unwrap();
        cookbook(dir.path());

        let profile = FsCookbookStore::new().profile(dir.path()).unwrap();

        assert_eq!(
            profile.metadata,
            Some(CookbookMetadata {
                name: "app".to_string(),
                version: Some("1.2.0".to_string()),
            })
        );
    }

    #[test]
    fn identifier_changes_with_content() {
        let dir = tempdir().unwrap();
        cookbook(dir.path());
        let store = FsCookbookStore::new();

        let before = store.profile(dir.path()).unwrap().identifier;
        write(dir.path(), "recipes/default.rb", "package 'apache2'\n");
        let after = store.profile(dir.path()).unwrap().identifier;

        assert_ne!(before, after);
    }

    #[test]
    fn identifier_ignores_vcs_and_chefignored_files() {
        let dir = tempdir().unwrap();
        cookbook(dir.path());
        let store = FsCookbookStore::new();
        write(dir.path(), "chefignore", "*.swp\n.kitchen/\n");
        let before = store.profile(dir.path()).unwrap();

        write(dir.path(), ".git/HEAD", "ref: refs/heads/main\n");
        write(dir.path(), "recipes/.default.rb.swp", "swap");
        write(dir.path(), ".kitchen/state.yml", "state");
        let after = store.profile(dir.path()).unwrap();

        assert_eq!(before.identifier, after.identifier);
        assert!(after.files.iter().any(|f| f.path == "chefignore"));
        assert!(!after.files.iter().any(|f| f.path.starts_with(".git/")));
    }

    #[test]
    fn cookbook_without_metadata_has_none() {
        let dir = tempdir().unwrap();
        write(dir.path(), "recipes/default.rb", "log 'hi'\n");

        let profile = FsCookbookStore::new().profile(dir.path()).unwrap();

        assert!(profile.metadata.is_none());
        assert_eq!(profile.files.len(), 1);
    }

    #[test]
    fn invalid_metadata_is_an_error() {
        let dir = tempdir().unwrap();
        write(dir.path(), "metadata.json", "{\"version\": \"1.0.0\"}");

        let err = FsCookbookStore::new().profile(dir.path()).unwrap_err();

        assert!(matches!(err, CookbookStoreError::Metadata { .. }));
    }

    #[test]
    fn exists_only_for_directories() {
        let dir = tempdir().unwrap();
        write(dir.path(), "file.txt", "x");
        let store = FsCookbookStore::new();

        assert!(store.exists(dir.path()));
        assert!(!store.exists(&dir.path().join("file.txt")));
        assert!(!store.exists(&dir.path().join("missing")));
    }
}
