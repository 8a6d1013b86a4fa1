use crate::catalog::{AssetCategory, JsonCatalog};
use crate::config::EditorConfig;
use crate::drag_drop::{DragDropController, DropOutcome, DropRegion, EditorContext, TargetContext};
use crate::error::EditorResult;
use crate::input::{Input, InputEvent, PointerSource};
use crate::library::{AssetLibrary, ThumbnailRequest};
use crate::node_mover::NodeMover;
use crate::scene::{EditorScene, NodeHandle, SceneTarget};
use glam::Vec2;
use std::path::Path;
use winit::dpi::PhysicalSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub message: String,
}

/// Editor session: owns the concrete collaborators and feeds window input to
/// the node mover and the drag controller once per frame.
pub struct EditorShell {
    config: EditorConfig,
    input: Input,
    catalog: JsonCatalog,
    library: AssetLibrary,
    scene: EditorScene,
    node_mover: NodeMover,
    drag: DragDropController,
    library_items: Vec<String>,
    preview_open: bool,
    preview_focused: bool,
    status: Option<StatusMessage>,
    last_drop: Option<DropOutcome>,
}

impl EditorShell {
    pub fn new(config: EditorConfig, window_size: PhysicalSize<u32>) -> Self {
        let catalog = JsonCatalog::new(&config.library.catalog_path);
        let library = AssetLibrary::from_config(&config.library);
        let scene = EditorScene::new(&config.library.asset_root);
        let node_mover = NodeMover::new(&config.node_mover);
        let drag = DragDropController::new(&config.ghost);
        let mut shell = Self {
            config,
            input: Input::new(window_size),
            catalog,
            library,
            scene,
            node_mover,
            drag,
            library_items: Vec::new(),
            preview_open: false,
            preview_focused: false,
            status: None,
            last_drop: None,
        };
        if let Err(err) = shell.refresh_library() {
            shell.set_status(StatusKind::Warning, format!("Library catalog unavailable: {err}"));
        }
        shell
    }

    pub fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            StatusKind::Error => log::error!("[editor] {message}"),
            StatusKind::Warning => log::warn!("[editor] {message}"),
            StatusKind::Info | StatusKind::Success => log::info!("[editor] {message}"),
        }
        self.status = Some(StatusMessage { kind, message });
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &JsonCatalog {
        &self.catalog
    }

    pub fn scene(&self) -> &EditorScene {
        &self.scene
    }

    pub fn node_mover(&self) -> &NodeMover {
        &self.node_mover
    }

    pub fn node_mover_mut(&mut self) -> &mut NodeMover {
        &mut self.node_mover
    }

    pub fn drag(&self) -> &DragDropController {
        &self.drag
    }

    pub fn library_items(&self) -> &[String] {
        &self.library_items
    }

    pub fn last_drop(&self) -> Option<DropOutcome> {
        self.last_drop
    }

    pub fn refresh_library(&mut self) -> EditorResult<()> {
        self.library_items = self.catalog.entries()?.into_iter().map(|entry| entry.name).collect();
        Ok(())
    }

    /// Reloads the library rows, then reports `message`; a failed reload
    /// downgrades the report to a warning since the rows are now stale.
    fn refresh_with_status(&mut self, kind: StatusKind, message: String) {
        match self.refresh_library() {
            Ok(()) => self.set_status(kind, message),
            Err(err) => self.set_status(StatusKind::Warning, format!("{message} Library refresh failed: {err}")),
        }
    }

    pub fn set_trash_mode(&mut self, active: bool) {
        self.drag.set_trash_mode(active);
    }

    pub fn set_preview_open(&mut self, open: bool) {
        self.preview_open = open;
        if !open {
            self.preview_focused = false;
        }
    }

    /// The preview panel holds focus and sits on top of the live scene.
    pub fn set_preview_focused(&mut self, focused: bool) {
        self.preview_focused = focused && self.preview_open;
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Processes the input gathered since the previous frame.
    pub fn frame(&mut self) {
        for direction in self.input.take_tab_presses() {
            if let Err(err) = self.node_mover.tab(direction) {
                self.set_status(StatusKind::Error, format!("Tab navigation failed: {err}"));
            }
        }
        if self.input.take_escape() {
            self.drag.cancel();
        }
        self.drag.tick(self.input.pointer());
        if self.input.take_left_click() {
            let overlay = self.input.pointer().overlay_position();
            if let Some(item) = overlay.and_then(|pos| self.slot_at(pos)).cloned() {
                if self.drag.trash_mode_active() {
                    self.discard_item(&item);
                } else {
                    self.begin_drag(&item);
                }
            }
        }
        if self.input.take_left_release() && self.drag.is_dragging() {
            let target = self.target_at(self.input.pointer().overlay_position());
            self.finish_drag(target);
        }
        self.input.clear_frame();
    }

    /// Starts dragging a library item from the current pointer position.
    pub fn begin_drag(&mut self, item: &str) -> bool {
        let pointer = self.input.pointer();
        let (position, aspect) = (pointer.pointer_position(), pointer.aspect_ratio());
        self.drag.drag_start(item, position, aspect)
    }

    pub fn finish_drag(&mut self, target: TargetContext) -> Option<DropOutcome> {
        let mut ctx = EditorContext { catalog: &self.catalog, scene: &mut self.scene, library: &mut self.library };
        match self.drag.drop(&mut ctx, target) {
            Ok(outcome) => {
                match outcome {
                    DropOutcome::LiveCommitted(node) => {
                        if let Err(err) = self.node_mover.bind(&self.scene, node) {
                            self.set_status(StatusKind::Warning, format!("Placed node is not editable: {err}"));
                        } else {
                            self.set_status(StatusKind::Success, "Placed item in the scene.");
                        }
                    }
                    DropOutcome::PreviewCommitted(_) => {
                        self.preview_open = true;
                        self.set_status(StatusKind::Info, "Previewing item.");
                    }
                    DropOutcome::Discarded | DropOutcome::NoSession => {}
                }
                self.last_drop = Some(outcome);
                Some(outcome)
            }
            Err(err) => {
                self.last_drop = None;
                self.set_status(StatusKind::Error, format!("Drop failed: {err}"));
                None
            }
        }
    }

    /// Library row under `pos`, if any.
    pub fn slot_at(&self, pos: Vec2) -> Option<&String> {
        let panel = &self.config.layout.library_panel;
        if !panel.contains(pos) || self.config.layout.slot_height <= 0.0 {
            return None;
        }
        let row = ((panel.top() - pos.y) / self.config.layout.slot_height).floor() as usize;
        self.library_items.get(row)
    }

    /// Drop target under `pos`. The live scene only counts as covered where
    /// the focused preview window actually sits over the pointer.
    pub fn target_at(&self, pos: Option<Vec2>) -> TargetContext {
        let preview_obscures_live = self.preview_focused
            && self.preview_open
            && pos.map(|pos| self.config.layout.preview_region.contains(pos)).unwrap_or(false);
        TargetContext { pointer_region: self.region_at(pos), preview_obscures_live }
    }

    pub fn region_at(&self, pos: Option<Vec2>) -> DropRegion {
        let Some(pos) = pos else {
            return DropRegion::None;
        };
        if self.preview_open && self.config.layout.preview_region.contains(pos) {
            DropRegion::PreviewScene
        } else if self.config.layout.library_panel.contains(pos) {
            DropRegion::None
        } else {
            DropRegion::LiveScene
        }
    }

    pub fn import_file(&mut self, path: &Path, category: AssetCategory, animations: Vec<String>) -> Option<NodeHandle> {
        match self.library.import(&self.catalog, &mut self.scene, path, category, animations) {
            Ok((entry, node)) => {
                self.preview_open = true;
                self.refresh_with_status(StatusKind::Success, format!("Added '{}' to the library.", entry.name));
                Some(node)
            }
            Err(err) => {
                self.set_status(StatusKind::Error, format!("Import failed: {err}"));
                None
            }
        }
    }

    pub fn discard_item(&mut self, name: &str) -> bool {
        match self.library.discard(&self.catalog, name) {
            Ok(true) => {
                self.refresh_with_status(StatusKind::Info, format!("Removed '{name}' from the library."));
                true
            }
            Ok(false) => {
                self.set_status(StatusKind::Warning, format!("'{name}' is not in the library."));
                false
            }
            Err(err) => {
                self.set_status(StatusKind::Error, format!("Removing '{name}' failed: {err}"));
                false
            }
        }
    }

    pub fn select_node(&mut self, node: NodeHandle) -> EditorResult<()> {
        self.node_mover.bind(&self.scene, node)
    }

    pub fn commit_node_mover(&mut self) -> bool {
        match self.node_mover.commit(&mut self.scene) {
            Ok(_) => true,
            Err(err) => {
                self.set_status(StatusKind::Error, format!("Transform not applied: {err}"));
                false
            }
        }
    }

    pub fn close_preview(&mut self) {
        self.set_preview_open(false);
        self.scene.clear(SceneTarget::Preview);
    }

    pub fn take_thumbnail_requests(&mut self) -> Vec<ThumbnailRequest> {
        self.library.take_thumbnail_requests()
    }
}
