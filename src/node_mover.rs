use crate::config::NodeMoverConfig;
use crate::error::{EditorError, EditorResult};
use crate::focus::{FocusDirection, FocusNavigator};
use crate::scene::{EditorScene, NodeHandle, NodeTransform};
use crate::widgets::{FieldHandle, FieldSet, WidgetLayer};
use glam::{Vec2, Vec3};

/// Tab order of the transform entries.
pub const FIELD_LABELS: [&str; 9] = ["X", "Y", "Z", "H", "P", "R", "SX", "SY", "SZ"];

/// Transform panel for the selected scene node: nine numeric entries
/// (position, heading/pitch/roll, scale) with Tab navigation between them.
pub struct NodeMover {
    widgets: FieldSet,
    navigator: FocusNavigator,
    bound: Option<NodeHandle>,
    precision: usize,
}

impl NodeMover {
    pub fn new(config: &NodeMoverConfig) -> Self {
        let mut widgets = FieldSet::new();
        let origin = Vec2::from(config.origin);
        let handles = FIELD_LABELS
            .iter()
            .enumerate()
            .map(|(row, label)| {
                let position = origin - Vec2::new(0.0, config.row_spacing * row as f32);
                widgets.create_field(*label, position, "")
            })
            .collect();
        let mut mover =
            Self { widgets, navigator: FocusNavigator::new(handles), bound: None, precision: config.precision };
        mover.show(&NodeTransform::default());
        mover
    }

    pub fn widgets(&self) -> &FieldSet {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut FieldSet {
        &mut self.widgets
    }

    pub fn navigator(&self) -> &FocusNavigator {
        &self.navigator
    }

    pub fn handle(&self, label: &str) -> Option<FieldHandle> {
        FIELD_LABELS.iter().position(|known| *known == label).map(|idx| self.navigator.fields()[idx])
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.handle(label).and_then(|handle| self.widgets.value(handle))
    }

    pub fn set_value(&mut self, label: &str, text: impl Into<String>) -> bool {
        match self.handle(label) {
            Some(handle) => {
                self.widgets.set_value(handle, text);
                true
            }
            None => false,
        }
    }

    pub fn focused_label(&self) -> Option<&'static str> {
        self.navigator.focused_index(&self.widgets).map(|idx| FIELD_LABELS[idx])
    }

    /// Keyboard navigation; returns the label that received focus.
    pub fn tab(&mut self, direction: FocusDirection) -> EditorResult<Option<&'static str>> {
        Ok(self.navigator.advance(&mut self.widgets, direction)?.map(|idx| FIELD_LABELS[idx]))
    }

    pub fn bound(&self) -> Option<NodeHandle> {
        self.bound
    }

    pub fn bind(&mut self, scene: &EditorScene, node: NodeHandle) -> EditorResult<()> {
        let transform = scene
            .transform(node)
            .ok_or_else(|| EditorError::invalid_state(format!("node {:?} has no transform", node.entity())))?;
        self.bound = Some(node);
        self.show(&transform);
        Ok(())
    }

    /// Drops the selection and puts the identity transform back in the entries.
    pub fn unbind(&mut self) {
        self.bound = None;
        self.show(&NodeTransform::default());
        self.widgets.clear_focus();
    }

    /// Re-reads the bound node, e.g. after it was moved elsewhere.
    pub fn refresh(&mut self, scene: &EditorScene) -> EditorResult<()> {
        match self.bound {
            Some(node) => self.bind(scene, node),
            None => Ok(()),
        }
    }

    /// Parses every entry and applies the result to the bound node. On a bad
    /// entry nothing is applied. Focus is released afterwards; the next Tab
    /// continues from the field that was last navigated to.
    pub fn commit(&mut self, scene: &mut EditorScene) -> EditorResult<NodeTransform> {
        let node = self.bound.ok_or_else(|| EditorError::invalid_state("no node bound to the node mover"))?;
        let mut values = [0.0f32; 9];
        for (idx, value) in values.iter_mut().enumerate() {
            let text = self.widgets.value(self.navigator.fields()[idx]).unwrap_or_default();
            *value = text
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .ok_or_else(|| EditorError::InvalidValue { label: FIELD_LABELS[idx], value: text.to_string() })?;
        }
        let transform = NodeTransform {
            translation: Vec3::new(values[0], values[1], values[2]),
            hpr: Vec3::new(values[3], values[4], values[5]),
            scale: Vec3::new(values[6], values[7], values[8]),
        };
        scene.set_transform(node, transform)?;
        self.show(&transform);
        self.widgets.clear_focus();
        log::debug!("[node_mover] applied {transform:?} to {:?}", node.entity());
        Ok(transform)
    }

    fn show(&mut self, transform: &NodeTransform) {
        let components = [transform.translation, transform.hpr, transform.scale];
        let values = components.iter().flat_map(|v| v.to_array());
        for (handle, value) in self.navigator.fields().to_vec().into_iter().zip(values) {
            self.widgets.set_value(handle, format!("{value:.prec$}", prec = self.precision));
        }
    }
}
