use crate::error::{EditorError, EditorResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const MODEL_EXTENSIONS: &[&str] = &["bam", "egg", "gltf", "glb", "obj", "fbx"];
const TEXTURE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tga", "bmp", "dds"];

/// What a catalog item is, decided once when its catalog value is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    Model,
    Texture,
    Actor { animations: Vec<String> },
}

impl AssetKind {
    pub fn category(&self) -> AssetCategory {
        match self {
            AssetKind::Model => AssetCategory::Model,
            AssetKind::Texture => AssetCategory::Texture,
            AssetKind::Actor { .. } => AssetCategory::Actor,
        }
    }

    pub fn animations(&self) -> Option<&[String]> {
        match self {
            AssetKind::Actor { animations } => Some(animations.as_slice()),
            _ => None,
        }
    }
}

/// Library tab an asset is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetCategory {
    Model,
    Texture,
    Actor,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 3] = [AssetCategory::Model, AssetCategory::Texture, AssetCategory::Actor];

    pub fn label(self) -> &'static str {
        match self {
            AssetCategory::Model => "Model",
            AssetCategory::Texture => "Texture",
            AssetCategory::Actor => "Actor",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            AssetCategory::Model | AssetCategory::Actor => MODEL_EXTENSIONS,
            AssetCategory::Texture => TEXTURE_EXTENSIONS,
        }
    }

    pub fn matches_path(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions().iter().any(|known| known.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "model" | "models" => Ok(AssetCategory::Model),
            "texture" | "textures" => Ok(AssetCategory::Texture),
            "actor" | "actors" => Ok(AssetCategory::Actor),
            other => Err(format!("unknown asset kind '{other}' (expected model, texture or actor)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: AssetKind,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, kind: AssetKind) -> Self {
        Self { name: name.into(), path: path.into(), kind }
    }

    fn from_value(name: &str, value: CatalogValue) -> Self {
        match value {
            CatalogValue::Actor(path, animations) => {
                CatalogEntry::new(name, path, AssetKind::Actor { animations })
            }
            CatalogValue::Path(path) => {
                let path = PathBuf::from(path);
                let kind = if AssetCategory::Texture.matches_path(&path) {
                    AssetKind::Texture
                } else {
                    AssetKind::Model
                };
                CatalogEntry { name: name.to_string(), path, kind }
            }
        }
    }

    fn to_value(&self) -> CatalogValue {
        let path = self.path.to_string_lossy().into_owned();
        match &self.kind {
            AssetKind::Actor { animations } => CatalogValue::Actor(path, animations.clone()),
            _ => CatalogValue::Path(path),
        }
    }
}

/// On-disk shape of a single catalog value: a bare path, or `[path, [animations]]` for actors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum CatalogValue {
    Path(String),
    Actor(String, Vec<String>),
}

pub trait CatalogStore {
    fn lookup(&self, name: &str) -> EditorResult<CatalogEntry>;
}

/// JSON-backed asset catalog.
///
/// Every operation goes back to the file; nothing is cached between calls, so
/// edits made by other tools are always picked up.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> EditorResult<Vec<CatalogEntry>> {
        Ok(self.read_map()?.into_iter().map(|(name, value)| CatalogEntry::from_value(&name, value)).collect())
    }

    pub fn contains(&self, name: &str) -> EditorResult<bool> {
        Ok(self.read_map()?.contains_key(name))
    }

    /// Adds or replaces an entry. Returns `true` when an existing entry was overwritten.
    pub fn insert(&self, entry: &CatalogEntry) -> EditorResult<bool> {
        let mut map = self.read_map()?;
        let replaced = map.insert(entry.name.clone(), entry.to_value()).is_some();
        self.write_map(&map)?;
        log::info!(
            "[catalog] {} '{}' -> {}",
            if replaced { "updated" } else { "added" },
            entry.name,
            entry.path.display()
        );
        Ok(replaced)
    }

    pub fn remove(&self, name: &str) -> EditorResult<bool> {
        let mut map = self.read_map()?;
        if map.remove(name).is_none() {
            return Ok(false);
        }
        self.write_map(&map)?;
        log::info!("[catalog] removed '{name}'");
        Ok(true)
    }

    fn read_map(&self) -> EditorResult<BTreeMap<String, CatalogValue>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(EditorError::CatalogIo { path: self.path.clone(), source }),
        };
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes)
            .map_err(|source| EditorError::CatalogParse { path: self.path.clone(), source })
    }

    fn write_map(&self, map: &BTreeMap<String, CatalogValue>) -> EditorResult<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| EditorError::CatalogIo { path: parent.to_path_buf(), source })?;
        }
        let json = serde_json::to_vec_pretty(map)
            .map_err(|source| EditorError::CatalogParse { path: self.path.clone(), source })?;
        fs::write(&self.path, json).map_err(|source| EditorError::CatalogIo { path: self.path.clone(), source })
    }
}

impl CatalogStore for JsonCatalog {
    fn lookup(&self, name: &str) -> EditorResult<CatalogEntry> {
        let mut map = self.read_map()?;
        let value = map.remove(name).ok_or_else(|| EditorError::not_found(name))?;
        Ok(CatalogEntry::from_value(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(contents: &str) -> (tempfile::TempDir, JsonCatalog) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("catalog.json");
        fs::write(&path, contents).expect("write catalog");
        (dir, JsonCatalog::new(path))
    }

    #[test]
    fn plain_path_resolves_to_model_or_texture() {
        let (_dir, catalog) =
            catalog_with(r#"{"Lamp": "models/lamp.bam", "Brick": "textures/brick.PNG"}"#);
        let lamp = catalog.lookup("Lamp").expect("lamp");
        assert_eq!(lamp.path, PathBuf::from("models/lamp.bam"));
        assert_eq!(lamp.kind, AssetKind::Model);
        assert_eq!(catalog.lookup("Brick").expect("brick").kind, AssetKind::Texture);
    }

    #[test]
    fn array_value_resolves_to_actor() {
        let (_dir, catalog) = catalog_with(r#"{"Robot": ["models/robot.bam", ["walk", "idle"]]}"#);
        let robot = catalog.lookup("Robot").expect("robot");
        assert_eq!(robot.path, PathBuf::from("models/robot.bam"));
        assert_eq!(robot.kind.animations(), Some(&["walk".to_string(), "idle".to_string()][..]));
    }

    #[test]
    fn missing_name_is_not_found() {
        let (_dir, catalog) = catalog_with(r#"{"Lamp": "models/lamp.bam"}"#);
        assert!(matches!(catalog.lookup("Chair"), Err(EditorError::NotFound { name }) if name == "Chair"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let (_dir, catalog) = catalog_with(r#"{"Lamp": 42}"#);
        assert!(matches!(catalog.lookup("Lamp"), Err(EditorError::CatalogParse { .. })));
    }

    #[test]
    fn lookup_sees_external_edits() {
        let (_dir, catalog) = catalog_with(r#"{"Lamp": "models/lamp.bam"}"#);
        assert!(catalog.lookup("Lamp").is_ok());
        fs::write(catalog.path(), r#"{"Chair": "models/chair.bam"}"#).expect("rewrite");
        assert!(catalog.lookup("Lamp").is_err());
        assert!(catalog.lookup("Chair").is_ok());
    }

    #[test]
    fn insert_and_remove_persist() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = JsonCatalog::new(dir.path().join("nested").join("catalog.json"));
        assert!(catalog.entries().expect("empty").is_empty());

        let robot = CatalogEntry::new(
            "Robot",
            "models/robot.bam",
            AssetKind::Actor { animations: vec!["walk".into()] },
        );
        assert!(!catalog.insert(&robot).expect("insert"));
        assert!(catalog.insert(&robot).expect("overwrite"));

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(catalog.path()).expect("read")).expect("json");
        assert_eq!(raw["Robot"], serde_json::json!(["models/robot.bam", ["walk"]]));

        assert!(catalog.remove("Robot").expect("remove"));
        assert!(!catalog.remove("Robot").expect("remove again"));
        assert!(catalog.entries().expect("entries").is_empty());
    }

    #[test]
    fn category_parses_from_cli_spelling() {
        assert_eq!("Actors".parse::<AssetCategory>().unwrap(), AssetCategory::Actor);
        assert!("sound".parse::<AssetCategory>().is_err());
    }
}
