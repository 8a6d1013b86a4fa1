use crate::catalog::{AssetCategory, AssetKind, CatalogEntry, JsonCatalog};
use crate::config::LibraryConfig;
use crate::error::{EditorError, EditorResult};
use crate::scene::{NodeHandle, SceneGraph, SceneTarget};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file found on disk that could be added to the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHit {
    pub name: String,
    pub path: PathBuf,
    pub category: AssetCategory,
}

/// Pending thumbnail capture for an item that was just shown in the preview scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub name: String,
    pub output: PathBuf,
}

pub struct AssetLibrary {
    asset_root: PathBuf,
    thumbnail_dir: PathBuf,
    pending_thumbnails: Vec<ThumbnailRequest>,
}

impl AssetLibrary {
    pub fn new(asset_root: impl Into<PathBuf>, thumbnail_dir: impl Into<PathBuf>) -> Self {
        Self { asset_root: asset_root.into(), thumbnail_dir: thumbnail_dir.into(), pending_thumbnails: Vec::new() }
    }

    pub fn from_config(config: &LibraryConfig) -> Self {
        Self::new(&config.asset_root, &config.thumbnail_dir)
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Walks the asset root for files of `category` (every category when
    /// `None`) whose stem contains `query`, ignoring case.
    pub fn search(&self, query: &str, category: Option<AssetCategory>) -> Vec<AssetHit> {
        if !self.asset_root.is_dir() {
            log::debug!("[library] asset root {} does not exist", self.asset_root.display());
            return Vec::new();
        }
        let needle = query.trim().to_lowercase();
        let categories: Vec<AssetCategory> = match category {
            Some(category) => vec![category],
            // Actors share model extensions; unfiltered searches list those once, as models.
            None => vec![AssetCategory::Model, AssetCategory::Texture],
        };
        let mut hits = Vec::new();
        for entry in WalkDir::new(&self.asset_root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("[library] skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() || entry.path().starts_with(&self.thumbnail_dir) {
                continue;
            }
            let path = entry.path();
            let Some(category) = categories.iter().copied().find(|category| category.matches_path(path)) else {
                continue;
            };
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !needle.is_empty() && !name.to_lowercase().contains(&needle) {
                continue;
            }
            hits.push(AssetHit { name: name.to_string(), path: self.relative_path(path), category });
        }
        hits.sort_by(|a, b| {
            a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.path.cmp(&b.path))
        });
        hits
    }

    /// Fresh file pick: records the file in the catalog under its stem and
    /// shows it in the preview scene.
    pub fn import(
        &mut self,
        catalog: &JsonCatalog,
        scene: &mut dyn SceneGraph,
        path: &Path,
        category: AssetCategory,
        animations: Vec<String>,
    ) -> EditorResult<(CatalogEntry, NodeHandle)> {
        if !category.matches_path(path) {
            return Err(EditorError::Load {
                path: path.to_path_buf(),
                reason: format!("not a {} file", category.label().to_lowercase()),
            });
        }
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| EditorError::Load {
                path: path.to_path_buf(),
                reason: "file has no usable name".to_string(),
            })?
            .to_string();
        let kind = match category {
            AssetCategory::Model => AssetKind::Model,
            AssetCategory::Texture => AssetKind::Texture,
            AssetCategory::Actor => AssetKind::Actor { animations },
        };
        let entry = CatalogEntry::new(name, self.relative_path(path), kind);
        let node = self.load_and_place(scene, &entry)?;
        catalog.insert(&entry)?;
        Ok((entry, node))
    }

    /// Shared by file picks and preview drops: place `entry` in the preview
    /// scene and queue its thumbnail. Textures are their own thumbnail.
    pub fn load_and_place(&mut self, scene: &mut dyn SceneGraph, entry: &CatalogEntry) -> EditorResult<NodeHandle> {
        let node = scene.insert_instance(SceneTarget::Preview, &entry.path, entry.kind.animations())?;
        self.pending_thumbnails.retain(|request| request.name != entry.name);
        if entry.kind != AssetKind::Texture {
            let output = self.thumbnail_path(&entry.name);
            self.pending_thumbnails.push(ThumbnailRequest { name: entry.name.clone(), output });
        }
        log::info!("[library] previewing '{}' ({})", entry.name, entry.kind.category());
        Ok(node)
    }

    /// Trash tray: drops the catalog entry and any captured thumbnail.
    pub fn discard(&mut self, catalog: &JsonCatalog, name: &str) -> EditorResult<bool> {
        let removed = catalog.remove(name)?;
        self.pending_thumbnails.retain(|request| request.name != name);
        let thumbnail = self.thumbnail_path(name);
        if removed && thumbnail.is_file() {
            if let Err(err) = fs::remove_file(&thumbnail) {
                log::warn!("[library] failed to remove thumbnail {}: {err}", thumbnail.display());
            }
        }
        Ok(removed)
    }

    pub fn thumbnail_path(&self, name: &str) -> PathBuf {
        let mut file_name = name.trim().to_string();
        if file_name.is_empty() {
            file_name.push_str("asset");
        }
        let sanitized = file_name
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' { ch } else { '_' })
            .collect::<String>();
        self.thumbnail_dir.join(format!("{sanitized}.png"))
    }

    pub fn pending_thumbnails(&self) -> &[ThumbnailRequest] {
        &self.pending_thumbnails
    }

    pub fn take_thumbnail_requests(&mut self) -> Vec<ThumbnailRequest> {
        std::mem::take(&mut self.pending_thumbnails)
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.asset_root).map(Path::to_path_buf).unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::EditorScene;

    fn library_root(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            fs::write(&path, b"data").expect("write");
        }
        dir
    }

    #[test]
    fn search_filters_by_category_and_query() {
        let dir = library_root(&[
            "models/Lamp.bam",
            "models/desk_lamp.egg",
            "models/chair.bam",
            "textures/lamp_shade.png",
            "notes/lamp.txt",
            "thumbs/lamp.png",
        ]);
        let library = AssetLibrary::new(dir.path(), dir.path().join("thumbs"));

        let models = library.search("lamp", Some(AssetCategory::Model));
        let names: Vec<_> = models.iter().map(|hit| hit.name.as_str()).collect();
        assert_eq!(names, vec!["desk_lamp", "Lamp"]);
        assert_eq!(models[1].path, PathBuf::from("models/Lamp.bam"));

        let everything = library.search("LAMP", None);
        assert_eq!(everything.len(), 3);
        assert!(everything.iter().any(|hit| hit.category == AssetCategory::Texture));
    }

    #[test]
    fn import_registers_and_previews() {
        let dir = library_root(&["actors/robot.bam"]);
        let catalog = JsonCatalog::new(dir.path().join("library.json"));
        let mut scene = EditorScene::new(dir.path());
        let mut library = AssetLibrary::new(dir.path(), dir.path().join("thumbs"));

        let (entry, node) = library
            .import(
                &catalog,
                &mut scene,
                &dir.path().join("actors/robot.bam"),
                AssetCategory::Actor,
                vec!["walk".into(), "idle".into()],
            )
            .expect("import");
        assert_eq!(entry.path, PathBuf::from("actors/robot.bam"));
        assert_eq!(scene.nodes(SceneTarget::Preview), vec![node]);
        assert_eq!(
            scene.instance(node).and_then(|instance| instance.animations.clone()),
            Some(vec!["walk".to_string(), "idle".to_string()])
        );
        assert_eq!(catalog.entries().expect("entries"), vec![entry]);
        assert_eq!(
            library.take_thumbnail_requests(),
            vec![ThumbnailRequest { name: "robot".into(), output: dir.path().join("thumbs/robot.png") }]
        );
    }

    #[test]
    fn import_of_missing_file_leaves_catalog_untouched() {
        let dir = library_root(&[]);
        let catalog = JsonCatalog::new(dir.path().join("library.json"));
        let mut scene = EditorScene::new(dir.path());
        let mut library = AssetLibrary::new(dir.path(), dir.path().join("thumbs"));
        let err = library
            .import(&catalog, &mut scene, Path::new("models/ghost.bam"), AssetCategory::Model, Vec::new())
            .unwrap_err();
        assert!(matches!(err, EditorError::Load { .. }));
        assert!(catalog.entries().expect("entries").is_empty());
        assert!(library.pending_thumbnails().is_empty());
    }

    #[test]
    fn textures_preview_without_thumbnail_request() {
        let dir = library_root(&["textures/brick.png", "models/chair.bam"]);
        let mut scene = EditorScene::new(dir.path());
        let mut library = AssetLibrary::new(dir.path(), dir.path().join("thumbs"));

        let brick = CatalogEntry::new("Brick", "textures/brick.png", AssetKind::Texture);
        let node = library.load_and_place(&mut scene, &brick).expect("place texture");
        assert_eq!(scene.nodes(SceneTarget::Preview), vec![node]);
        assert!(library.pending_thumbnails().is_empty());

        let chair = CatalogEntry::new("Chair", "models/chair.bam", AssetKind::Model);
        library.load_and_place(&mut scene, &chair).expect("place model");
        assert_eq!(library.pending_thumbnails().len(), 1);
        assert_eq!(library.pending_thumbnails()[0].name, "Chair");
    }

    #[test]
    fn discard_removes_entry_and_thumbnail() {
        let dir = library_root(&["thumbs/Lamp.png"]);
        let catalog = JsonCatalog::new(dir.path().join("library.json"));
        catalog.insert(&CatalogEntry::new("Lamp", "models/lamp.bam", AssetKind::Model)).expect("insert");
        let mut library = AssetLibrary::new(dir.path(), dir.path().join("thumbs"));

        assert!(library.discard(&catalog, "Lamp").expect("discard"));
        assert!(!dir.path().join("thumbs/Lamp.png").exists());
        assert!(!library.discard(&catalog, "Lamp").expect("second discard"));
    }

    #[test]
    fn thumbnail_names_are_sanitized() {
        let library = AssetLibrary::new("assets", "thumbs");
        assert_eq!(library.thumbnail_path("Old Lamp #2"), PathBuf::from("thumbs/Old_Lamp__2.png"));
        assert_eq!(library.thumbnail_path("  "), PathBuf::from("thumbs/asset.png"));
    }
}
