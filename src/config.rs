use anyhow::{Context, Result};
use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "LibraryConfig::default_asset_root")]
    pub asset_root: PathBuf,
    #[serde(default = "LibraryConfig::default_catalog_path")]
    pub catalog_path: PathBuf,
    #[serde(default = "LibraryConfig::default_thumbnail_dir")]
    pub thumbnail_dir: PathBuf,
}

/// Axis-aligned rectangle in overlay space (x scaled by aspect, y in `[-1, 1]`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RegionRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl RegionRect {
    pub const fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min[0] && point.x <= self.max[0] && point.y >= self.min[1] && point.y <= self.max[1]
    }

    pub fn top(&self) -> f32 {
        self.max[1]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_library_panel")]
    pub library_panel: RegionRect,
    #[serde(default = "LayoutConfig::default_preview_region")]
    pub preview_region: RegionRect,
    #[serde(default = "LayoutConfig::default_slot_height")]
    pub slot_height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhostConfig {
    #[serde(default = "GhostConfig::default_alpha")]
    pub alpha: f32,
    #[serde(default = "GhostConfig::default_scale")]
    pub scale: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeMoverConfig {
    #[serde(default = "NodeMoverConfig::default_precision")]
    pub precision: usize,
    #[serde(default = "NodeMoverConfig::default_origin")]
    pub origin: [f32; 2],
    #[serde(default = "NodeMoverConfig::default_row_spacing")]
    pub row_spacing: f32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EditorConfig {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub ghost: GhostConfig,
    #[serde(default)]
    pub node_mover: NodeMoverConfig,
}

#[derive(Debug, Clone, Default)]
pub struct EditorConfigOverrides {
    pub asset_root: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

impl LibraryConfig {
    fn default_asset_root() -> PathBuf {
        PathBuf::from("assets")
    }

    fn default_catalog_path() -> PathBuf {
        PathBuf::from("assets/library.json")
    }

    fn default_thumbnail_dir() -> PathBuf {
        PathBuf::from("assets/thumbnails")
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            asset_root: Self::default_asset_root(),
            catalog_path: Self::default_catalog_path(),
            thumbnail_dir: Self::default_thumbnail_dir(),
        }
    }
}

impl LayoutConfig {
    const fn default_library_panel() -> RegionRect {
        RegionRect::new([-1.78, -1.0], [-1.1, 1.0])
    }

    const fn default_preview_region() -> RegionRect {
        RegionRect::new([-1.1, 0.1], [-0.2, 1.0])
    }

    const fn default_slot_height() -> f32 {
        0.12
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            library_panel: Self::default_library_panel(),
            preview_region: Self::default_preview_region(),
            slot_height: Self::default_slot_height(),
        }
    }
}

impl GhostConfig {
    const fn default_alpha() -> f32 {
        0.6
    }

    const fn default_scale() -> f32 {
        0.08
    }
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self { alpha: Self::default_alpha(), scale: Self::default_scale() }
    }
}

impl NodeMoverConfig {
    const fn default_precision() -> usize {
        3
    }

    const fn default_origin() -> [f32; 2] {
        [1.2, 0.8]
    }

    const fn default_row_spacing() -> f32 {
        0.09
    }
}

impl Default for NodeMoverConfig {
    fn default() -> Self {
        Self {
            precision: Self::default_precision(),
            origin: Self::default_origin(),
            row_spacing: Self::default_row_spacing(),
        }
    }
}

impl EditorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("[config] {err:#}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: &EditorConfigOverrides) {
        if let Some(root) = &overrides.asset_root {
            self.library.asset_root = root.clone();
        }
        if let Some(catalog) = &overrides.catalog_path {
            self.library.catalog_path = catalog.clone();
        }
    }
}

impl EditorConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.asset_root.is_none() && self.catalog_path.is_none()
    }

    pub fn applied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.asset_root.is_some() {
            fields.push("asset_root");
        }
        if self.catalog_path.is_some() {
            fields.push("catalog_path");
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp config");
        write!(file, r#"{{"library":{{"asset_root":"/srv/assets"}},"ghost":{{"alpha":0.25}}}}"#)
            .expect("write config");
        let cfg = EditorConfig::load(file.path()).expect("load");
        assert_eq!(cfg.library.asset_root, PathBuf::from("/srv/assets"));
        assert_eq!(cfg.library.catalog_path, PathBuf::from("assets/library.json"));
        assert_eq!(cfg.ghost.alpha, 0.25);
        assert_eq!(cfg.ghost.scale, 0.08);
        assert_eq!(cfg.node_mover.precision, 3);
    }

    #[test]
    fn missing_file_falls_back() {
        let cfg = EditorConfig::load_or_default("/definitely/not/here.json");
        assert_eq!(cfg.layout.slot_height, 0.12);
    }

    #[test]
    fn overrides_replace_library_paths() {
        let mut cfg = EditorConfig::default();
        let overrides =
            EditorConfigOverrides { asset_root: None, catalog_path: Some(PathBuf::from("other.json")) };
        cfg.apply_overrides(&overrides);
        assert_eq!(cfg.library.catalog_path, PathBuf::from("other.json"));
        assert_eq!(cfg.library.asset_root, PathBuf::from("assets"));
        assert_eq!(overrides.applied_fields(), vec!["catalog_path"]);
        assert!(!overrides.is_empty());
    }

    #[test]
    fn region_contains_edges() {
        let rect = RegionRect::new([-1.0, -1.0], [0.0, 1.0]);
        assert!(rect.contains(Vec2::new(0.0, 1.0)));
        assert!(!rect.contains(Vec2::new(0.01, 0.0)));
    }
}
