pub mod catalog;
pub mod cli;
pub mod config;
pub mod drag_drop;
pub mod error;
pub mod focus;
pub mod input;
pub mod library;
pub mod node_mover;
#[cfg(feature = "editor")]
pub mod panel;
pub mod scene;
pub mod shell;
pub mod widgets;

pub use catalog::{AssetCategory, AssetKind, CatalogEntry, CatalogStore, JsonCatalog};
pub use config::{EditorConfig, EditorConfigOverrides};
pub use drag_drop::{DragDropController, DropOutcome, DropRegion, EditorContext, TargetContext, TickOutcome};
pub use error::{EditorError, EditorResult};
pub use focus::{FocusDirection, FocusNavigator};
pub use library::AssetLibrary;
pub use node_mover::NodeMover;
pub use scene::{EditorScene, NodeHandle, SceneGraph, SceneTarget};
pub use shell::EditorShell;
