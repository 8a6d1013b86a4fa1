use crate::focus::FocusDirection;
use crate::node_mover::{NodeMover, FIELD_LABELS};
use crate::shell::{EditorShell, StatusKind};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeMoverPanelResponse {
    pub commit_requested: bool,
    pub focused: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryPanelAction {
    StartDrag(String),
    Discard(String),
}

fn field_id(label: &str) -> egui::Id {
    egui::Id::new(("node_mover_field", label))
}

/// Draws the transform entries. While one of them holds egui focus, Tab /
/// Shift+Tab are taken from egui and routed through the node mover's
/// navigator; Enter in a field commits.
pub fn show_node_mover(ui: &mut egui::Ui, mover: &mut NodeMover) -> NodeMoverPanelResponse {
    let mut response = NodeMoverPanelResponse::default();
    let owns_tab = FIELD_LABELS.iter().any(|label| ui.memory(|memory| memory.has_focus(field_id(label))));
    let direction = if owns_tab {
        ui.input_mut(|input| {
            if input.consume_key(egui::Modifiers::SHIFT, egui::Key::Tab) {
                Some(FocusDirection::Backward)
            } else if input.consume_key(egui::Modifiers::NONE, egui::Key::Tab) {
                Some(FocusDirection::Forward)
            } else {
                None
            }
        })
    } else {
        None
    };
    let requested = direction.and_then(|direction| mover.tab(direction).ok().flatten());

    egui::Grid::new("node_mover_grid").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        for label in FIELD_LABELS {
            let Some(handle) = mover.handle(label) else {
                continue;
            };
            ui.label(label);
            let Some(value) = mover.widgets_mut().value_mut(handle) else {
                continue;
            };
            // lock_focus keeps egui's own Tab traversal out of the way.
            let edit =
                ui.add(egui::TextEdit::singleline(value).id(field_id(label)).lock_focus(true).desired_width(72.0));
            let focused = mover.widgets().focused() == Some(handle);
            if requested == Some(label) {
                edit.request_focus();
            } else if requested.is_none() {
                if edit.has_focus() && !focused {
                    mover.widgets_mut().click(handle);
                } else if !edit.has_focus() && focused {
                    mover.widgets_mut().clear_focus();
                }
            }
            if edit.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter)) {
                response.commit_requested = true;
            }
            ui.end_row();
        }
    });
    response.focused = mover.focused_label();
    response
}

/// Draws library rows. Rows start a drag; with the trash tray open a click
/// discards the row instead.
pub fn show_library(ui: &mut egui::Ui, items: &[String], trash_mode: bool) -> Option<LibraryPanelAction> {
    let mut action = None;
    egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
        if items.is_empty() {
            ui.small("Library is empty. Import a model, texture or actor to get started.");
        }
        for item in items {
            let row = ui.add(egui::Button::new(item.as_str()).sense(egui::Sense::click_and_drag()));
            if trash_mode {
                if row.clicked() {
                    action = Some(LibraryPanelAction::Discard(item.clone()));
                }
            } else if row.drag_started() {
                action = Some(LibraryPanelAction::StartDrag(item.clone()));
            }
        }
    });
    action
}

pub fn show_editor_panels(ctx: &egui::Context, shell: &mut EditorShell) {
    egui::SidePanel::left("library_panel").resizable(false).show(ctx, |ui| {
        ui.heading("Library");
        let mut trash_mode = shell.drag().trash_mode_active();
        if ui.checkbox(&mut trash_mode, "Trash mode").changed() {
            shell.set_trash_mode(trash_mode);
        }
        let items = shell.library_items().to_vec();
        match show_library(ui, &items, trash_mode) {
            Some(LibraryPanelAction::StartDrag(item)) => {
                shell.begin_drag(&item);
            }
            Some(LibraryPanelAction::Discard(item)) => {
                shell.discard_item(&item);
            }
            None => {}
        }
        if let Some(status) = shell.status() {
            let color = match status.kind {
                StatusKind::Info => egui::Color32::from_rgb(170, 190, 220),
                StatusKind::Success => egui::Color32::from_rgb(120, 200, 120),
                StatusKind::Warning => egui::Color32::from_rgb(230, 180, 80),
                StatusKind::Error => egui::Color32::from_rgb(220, 90, 90),
            };
            ui.colored_label(color, status.message.as_str());
        }
    });
    egui::SidePanel::right("node_mover_panel").resizable(false).show(ctx, |ui| {
        ui.heading("Node Mover");
        if shell.node_mover().bound().is_none() {
            ui.small("Drop an item into the scene to edit its transform.");
        }
        let response = show_node_mover(ui, shell.node_mover_mut());
        if response.commit_requested {
            shell.commit_node_mover();
        }
    });
}
