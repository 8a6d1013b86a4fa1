use crate::catalog::CatalogStore;
use crate::config::GhostConfig;
use crate::error::EditorResult;
use crate::input::{to_overlay, PointerSource};
use crate::library::AssetLibrary;
use crate::scene::{NodeHandle, SceneGraph, SceneTarget};
use glam::Vec2;

/// Region of the editor window under the pointer when a drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropRegion {
    #[default]
    None,
    PreviewScene,
    LiveScene,
}

/// Where the pointer was when the drop happened, as reported by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetContext {
    pub pointer_region: DropRegion,
    /// The preview panel is open on top of the live scene.
    pub preview_obscures_live: bool,
}

impl TargetContext {
    pub fn over(pointer_region: DropRegion) -> Self {
        Self { pointer_region, preview_obscures_live: false }
    }
}

/// Collaborators a drop may touch.
pub struct EditorContext<'a> {
    pub catalog: &'a dyn CatalogStore,
    pub scene: &'a mut dyn SceneGraph,
    pub library: &'a mut AssetLibrary,
}

/// Semi-transparent copy of the library button that follows the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostVisual {
    pub item: String,
    pub position: Vec2,
    pub alpha: f32,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    source_item: String,
    ghost: GhostVisual,
    last_pointer: Vec2,
    cancelled: bool,
}

impl DragSession {
    pub fn source_item(&self) -> &str {
        &self.source_item
    }

    pub fn ghost(&self) -> &GhostVisual {
        &self.ghost
    }

    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Stray release with no drag in progress.
    NoSession,
    Discarded,
    PreviewCommitted(NodeHandle),
    LiveCommitted(NodeHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRoute {
    Discard,
    Live,
    Preview,
}

/// Picks exactly one destination for a drop.
pub fn route_drop(trash_mode_active: bool, target: TargetContext) -> DropRoute {
    if trash_mode_active {
        return DropRoute::Discard;
    }
    match target.pointer_region {
        DropRegion::LiveScene if !target.preview_obscures_live => DropRoute::Live,
        DropRegion::PreviewScene => DropRoute::Preview,
        _ => DropRoute::Discard,
    }
}

/// Turns a pointer drag on a library item into a scene insertion.
///
/// Idle until [`drag_start`](Self::drag_start); while dragging, the host
/// calls [`tick`](Self::tick) every frame and [`drop`](Self::drop) on release.
/// The ghost lives exactly as long as the session.
pub struct DragDropController {
    session: Option<DragSession>,
    trash_mode_active: bool,
    ghost_alpha: f32,
    ghost_scale: f32,
}

impl DragDropController {
    pub fn new(ghost: &GhostConfig) -> Self {
        Self { session: None, trash_mode_active: false, ghost_alpha: ghost.alpha, ghost_scale: ghost.scale }
    }

    pub fn set_trash_mode(&mut self, active: bool) {
        self.trash_mode_active = active;
    }

    pub fn trash_mode_active(&self) -> bool {
        self.trash_mode_active
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn ghost(&self) -> Option<&GhostVisual> {
        self.session.as_ref().map(|session| &session.ghost)
    }

    /// Starts dragging `item` from `start_pointer` (device coordinates).
    /// Returns `false` when dragging is disabled or a drag is already running.
    pub fn drag_start(&mut self, item: &str, start_pointer: Vec2, aspect_ratio: f32) -> bool {
        if self.trash_mode_active {
            log::debug!("[drag] ignoring drag of '{item}' while the trash tray is open");
            return false;
        }
        if let Some(session) = &self.session {
            log::debug!("[drag] '{}' is already being dragged", session.source_item);
            return false;
        }
        let ghost = GhostVisual {
            item: item.to_string(),
            position: to_overlay(start_pointer, aspect_ratio),
            alpha: self.ghost_alpha,
            scale: self.ghost_scale,
        };
        self.session =
            Some(DragSession { source_item: item.to_string(), ghost, last_pointer: start_pointer, cancelled: false });
        log::debug!("[drag] started '{item}'");
        true
    }

    /// Marks the running drag as cancelled; the next tick tears it down.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.cancelled = true;
        }
    }

    /// Per-frame update: follow the pointer, or end the drag when the pointer
    /// was lost or the drag was cancelled.
    pub fn tick(&mut self, pointer: &dyn PointerSource) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Done;
        };
        if session.cancelled || !pointer.has_active_pointer() {
            let reason = if session.cancelled { "cancelled" } else { "pointer lost" };
            log::debug!("[drag] '{}' ended: {reason}", session.source_item);
            self.session = None;
            return TickOutcome::Done;
        }
        let ndc = pointer.pointer_position();
        session.last_pointer = ndc;
        session.ghost.position = to_overlay(ndc, pointer.aspect_ratio());
        TickOutcome::Continue
    }

    /// Ends the drag and commits it according to trash mode and `target`.
    ///
    /// The ghost is gone and the controller is idle before any lookup runs,
    /// so a failed commit never leaves a drag behind or a partial insertion.
    pub fn drop(&mut self, ctx: &mut EditorContext<'_>, target: TargetContext) -> EditorResult<DropOutcome> {
        let Some(DragSession { source_item, .. }) = self.session.take() else {
            return Ok(DropOutcome::NoSession);
        };
        match route_drop(self.trash_mode_active, target) {
            DropRoute::Discard => {
                log::debug!("[drag] discarded '{source_item}' ({:?})", target.pointer_region);
                Ok(DropOutcome::Discarded)
            }
            DropRoute::Live => {
                let entry = ctx.catalog.lookup(&source_item)?;
                let node = ctx.scene.insert_instance(SceneTarget::Live, &entry.path, entry.kind.animations())?;
                log::info!("[drag] placed '{source_item}' in the live scene");
                Ok(DropOutcome::LiveCommitted(node))
            }
            DropRoute::Preview => {
                let entry = ctx.catalog.lookup(&source_item)?;
                let node = ctx.library.load_and_place(&mut *ctx.scene, &entry)?;
                Ok(DropOutcome::PreviewCommitted(node))
            }
        }
    }
}
