use crate::error::{EditorError, EditorResult};
use bevy_ecs::prelude::{Component, Entity, World};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::path::{Path, PathBuf};

/// Which scene an instance is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneTarget {
    /// Isolated scene used to preview and thumbnail a single asset.
    Preview,
    /// The scene being edited.
    Live,
}

impl SceneTarget {
    pub fn label(self) -> &'static str {
        match self {
            SceneTarget::Preview => "preview",
            SceneTarget::Live => "live",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(Entity);

impl NodeHandle {
    pub fn entity(self) -> Entity {
        self.0
    }
}

impl From<Entity> for NodeHandle {
    fn from(entity: Entity) -> Self {
        Self(entity)
    }
}

/// Scene insertion as seen by the library and the drag controller.
pub trait SceneGraph {
    fn insert_instance(
        &mut self,
        target: SceneTarget,
        asset_path: &Path,
        animations: Option<&[String]>,
    ) -> EditorResult<NodeHandle>;
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneMember(pub SceneTarget);

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AssetInstance {
    pub path: PathBuf,
    pub animations: Option<Vec<String>>,
}

/// Position, heading/pitch/roll in degrees, and per-axis scale.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub hpr: Vec3,
    pub scale: Vec3,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, hpr: Vec3::ZERO, scale: Vec3::ONE }
    }
}

impl NodeTransform {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::ZXY,
            self.hpr.x.to_radians(),
            self.hpr.y.to_radians(),
            self.hpr.z.to_radians(),
        )
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.translation)
    }
}

/// Preview and live scenes backed by a single ECS world.
pub struct EditorScene {
    world: World,
    asset_root: PathBuf,
}

impl EditorScene {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self { world: World::new(), asset_root: asset_root.into() }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn resolve_asset(&self, asset_path: &Path) -> EditorResult<PathBuf> {
        let resolved =
            if asset_path.is_absolute() { asset_path.to_path_buf() } else { self.asset_root.join(asset_path) };
        if resolved.is_file() {
            Ok(resolved)
        } else {
            Err(EditorError::Load {
                path: asset_path.to_path_buf(),
                reason: format!("no file at {}", resolved.display()),
            })
        }
    }

    pub fn nodes(&self, target: SceneTarget) -> Vec<NodeHandle> {
        let mut nodes: Vec<Entity> = self
            .world
            .iter_entities()
            .filter(|entity| entity.get::<SceneMember>().map(|member| member.0 == target).unwrap_or(false))
            .map(|entity| entity.id())
            .collect();
        nodes.sort_by_key(|entity| entity.index());
        nodes.into_iter().map(NodeHandle).collect()
    }

    pub fn contains(&self, node: NodeHandle) -> bool {
        self.world.get_entity(node.0).is_ok()
    }

    pub fn target_of(&self, node: NodeHandle) -> Option<SceneTarget> {
        self.world.get::<SceneMember>(node.0).map(|member| member.0)
    }

    pub fn instance(&self, node: NodeHandle) -> Option<&AssetInstance> {
        self.world.get::<AssetInstance>(node.0)
    }

    pub fn transform(&self, node: NodeHandle) -> Option<NodeTransform> {
        self.world.get::<NodeTransform>(node.0).copied()
    }

    pub fn set_transform(&mut self, node: NodeHandle, transform: NodeTransform) -> EditorResult<()> {
        let mut current = self.world.get_mut::<NodeTransform>(node.0).ok_or_else(|| {
            EditorError::invalid_state(format!("node {:?} is not in the scene", node.0))
        })?;
        *current = transform;
        Ok(())
    }

    pub fn remove(&mut self, node: NodeHandle) -> bool {
        self.world.despawn(node.0)
    }

    pub fn clear(&mut self, target: SceneTarget) -> usize {
        let nodes = self.nodes(target);
        nodes.iter().filter(|node| self.world.despawn(node.0)).count()
    }
}

impl SceneGraph for EditorScene {
    fn insert_instance(
        &mut self,
        target: SceneTarget,
        asset_path: &Path,
        animations: Option<&[String]>,
    ) -> EditorResult<NodeHandle> {
        self.resolve_asset(asset_path)?;
        if target == SceneTarget::Preview {
            self.clear(SceneTarget::Preview);
        }
        let entity = self
            .world
            .spawn((
                SceneMember(target),
                AssetInstance { path: asset_path.to_path_buf(), animations: animations.map(<[String]>::to_vec) },
                NodeTransform::default(),
            ))
            .id();
        log::debug!("[scene] {} <- {} ({:?})", target.label(), asset_path.display(), entity);
        Ok(NodeHandle(entity))
    }
}
