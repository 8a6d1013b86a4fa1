use glam::Vec3;
use kestrel_library::config::NodeMoverConfig;
use kestrel_library::node_mover::FIELD_LABELS;
use kestrel_library::{EditorError, EditorScene, FocusDirection, NodeHandle, NodeMover, SceneGraph, SceneTarget};
use std::fs;
use std::path::Path;

fn scene_with_node() -> (tempfile::TempDir, EditorScene, NodeHandle) {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::create_dir_all(dir.path().join("models")).expect("models dir");
    fs::write(dir.path().join("models/lamp.bam"), b"lamp").expect("write asset");
    let mut scene = EditorScene::new(dir.path());
    let node = scene.insert_instance(SceneTarget::Live, Path::new("models/lamp.bam"), None).expect("insert lamp");
    (dir, scene, node)
}

fn focus(mover: &mut NodeMover, label: &str) {
    let handle = mover.handle(label).expect("known field");
    mover.widgets_mut().click(handle);
}

#[test]
fn tab_cycles_through_all_nine_fields() {
    let mut mover = NodeMover::new(&NodeMoverConfig::default());
    focus(&mut mover, "X");
    let mut visited = vec![mover.focused_label().expect("X focused")];
    for _ in 0..FIELD_LABELS.len() {
        visited.push(mover.tab(FocusDirection::Forward).expect("tab").expect("focus moved"));
    }
    assert_eq!(visited, vec!["X", "Y", "Z", "H", "P", "R", "SX", "SY", "SZ", "X"]);
    assert_eq!(mover.widgets().iter().filter(|(_, field)| field.has_focus()).count(), 1);
}

#[test]
fn shift_tab_from_first_field_wraps_to_last() {
    let mut mover = NodeMover::new(&NodeMoverConfig::default());
    focus(&mut mover, "X");
    assert_eq!(mover.tab(FocusDirection::Backward).expect("shift-tab"), Some("SZ"));
    assert_eq!(mover.tab(FocusDirection::Forward).expect("tab"), Some("X"));
}

#[test]
fn tab_without_any_focus_is_ignored() {
    let mut mover = NodeMover::new(&NodeMoverConfig::default());
    assert_eq!(mover.tab(FocusDirection::Forward).expect("tab"), None);
    assert_eq!(mover.focused_label(), None);
}

#[test]
fn bind_shows_the_node_transform() {
    let (_dir, scene, node) = scene_with_node();
    let mut mover = NodeMover::new(&NodeMoverConfig::default());
    mover.bind(&scene, node).expect("bind");
    assert_eq!(mover.bound(), Some(node));
    assert_eq!(mover.value("X"), Some("0.000"));
    assert_eq!(mover.value("SZ"), Some("1.000"));
}

#[test]
fn commit_applies_entries_and_resumes_tab_order() {
    let (_dir, mut scene, node) = scene_with_node();
    let mut mover = NodeMover::new(&NodeMoverConfig::default());
    mover.bind(&scene, node).expect("bind");

    focus(&mut mover, "X");
    assert_eq!(mover.tab(FocusDirection::Forward).expect("tab"), Some("Y"));
    assert!(mover.set_value("X", "1.5"));
    assert!(mover.set_value("Y", " -2 "));
    assert!(mover.set_value("H", "90"));
    assert!(mover.set_value("SX", "2"));

    let applied = mover.commit(&mut scene).expect("commit");
    assert_eq!(applied.translation, Vec3::new(1.5, -2.0, 0.0));
    assert_eq!(applied.hpr, Vec3::new(90.0, 0.0, 0.0));
    assert_eq!(applied.scale, Vec3::new(2.0, 1.0, 1.0));
    assert_eq!(scene.transform(node), Some(applied));
    assert_eq!(mover.value("Y"), Some("-2.000"));
    assert_eq!(mover.focused_label(), None);

    // Focus was cleared by the commit; Tab continues after the last navigated field.
    assert_eq!(mover.tab(FocusDirection::Forward).expect("tab"), Some("Z"));
}

#[test]
fn invalid_entry_leaves_the_node_untouched() {
    let (_dir, mut scene, node) = scene_with_node();
    let mut mover = NodeMover::new(&NodeMoverConfig::default());
    mover.bind(&scene, node).expect("bind");
    mover.set_value("X", "4");
    mover.set_value("P", "tilted");

    let err = mover.commit(&mut scene).unwrap_err();
    match err {
        EditorError::InvalidValue { label, value } => {
            assert_eq!(label, "P");
            assert_eq!(value, "tilted");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(scene.transform(node).expect("transform").translation, Vec3::ZERO);
}

#[test]
fn commit_without_a_bound_node_fails() {
    let (_dir, mut scene, _node) = scene_with_node();
    let mut mover = NodeMover::new(&NodeMoverConfig::default());
    assert!(matches!(mover.commit(&mut scene), Err(EditorError::InvalidState(_))));
}

#[test]
fn refresh_picks_up_external_moves() {
    let (_dir, mut scene, node) = scene_with_node();
    let mut mover = NodeMover::new(&NodeMoverConfig { precision: 1, ..NodeMoverConfig::default() });
    mover.bind(&scene, node).expect("bind");
    let mut transform = scene.transform(node).expect("transform");
    transform.translation.z = 3.3;
    scene.set_transform(node, transform).expect("move");
    mover.refresh(&scene).expect("refresh");
    assert_eq!(mover.value("Z"), Some("3.3"));

    mover.unbind();
    assert_eq!(mover.bound(), None);
    assert_eq!(mover.value("Z"), Some("0.0"));
    assert_eq!(mover.value("SY"), Some("1.0"));
}

#[test]
fn fresh_mover_shows_identity_transform() {
    let mover = NodeMover::new(&NodeMoverConfig::default());
    for label in ["X", "Y", "Z", "H", "P", "R"] {
        assert_eq!(mover.value(label), Some("0.000"), "{label}");
    }
    for label in ["SX", "SY", "SZ"] {
        assert_eq!(mover.value(label), Some("1.000"), "{label}");
    }
}
