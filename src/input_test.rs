#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

// =============================================================
// Tool / ShapeTool
// =============================================================

#[test]
fn tool_default_is_draw() {
    assert_eq!(Tool::default(), Tool::Draw);
}

#[test]
fn tool_all_variants_distinct() {
    let variants = [Tool::Select, Tool::Draw, Tool::Shapes, Tool::Text, Tool::Image, Tool::Eraser];
    for (i, a) in variants.iter().enumerate() {
        for (j, b) in variants.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn tool_serde_lowercase() {
    let tool: Tool = serde_json::from_str("\"eraser\"").unwrap();
    assert_eq!(tool, Tool::Eraser);
}

#[test]
fn shape_tool_accepts_square_alias() {
    let shape: ShapeTool = serde_json::from_str("\"square\"").unwrap();
    assert_eq!(shape, ShapeTool::Rect);
}

// =============================================================
// Modifiers / Key
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

#[test]
fn modifiers_clone_and_copy() {
    let a = Modifiers { ctrl: true, ..Default::default() };
    let b = a;
    let c = a.clone();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn key_delete_names() {
    assert!(Key("Delete".into()).is_delete());
    assert!(Key("Del".into()).is_delete());
    assert!(!Key("Backspace".into()).is_delete());
}

#[test]
fn key_additive_modifier_is_control() {
    assert!(Key("Control".into()).is_additive_modifier());
    assert!(!Key("Shift".into()).is_additive_modifier());
}

// =============================================================
// Style
// =============================================================

#[test]
fn style_default_matches_config_defaults() {
    let style = Style::default();
    assert_eq!(style.color, "#222");
    assert_eq!(style.thickness, 5.0);
    assert_eq!(style.font_size, 16.0);
    assert_eq!(style.shape, ShapeTool::Rect);
}

#[test]
fn clamp_thickness_bounds() {
    assert_eq!(clamp_thickness(0.0), 1.0);
    assert_eq!(clamp_thickness(30.0), 24.0);
    assert_eq!(clamp_thickness(7.0), 7.0);
    assert_eq!(clamp_thickness(f64::NAN), 1.0);
}

// =============================================================
// UiState / InputState
// =============================================================

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Draw);
    assert!(ui.selection.is_empty());
    assert!(!ui.additive);
}

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

// =============================================================
// InputEvent serde
// =============================================================

#[test]
fn pointer_down_defaults_button_and_modifiers() {
    let ev: InputEvent = serde_json::from_str(r#"{ "type": "pointer_down", "point": { "x": 1, "y": 2 } }"#).unwrap();
    assert_eq!(
        ev,
        InputEvent::PointerDown { point: Point::new(1.0, 2.0), button: Button::Primary, modifiers: Modifiers::default() }
    );
}

#[test]
fn pointer_move_defaults_to_held() {
    let ev: InputEvent = serde_json::from_str(r#"{ "type": "pointer_move", "point": { "x": 0, "y": 0 } }"#).unwrap();
    assert!(matches!(ev, InputEvent::PointerMove { primary_held: true, .. }));
}

#[test]
fn key_event_parses_key_name() {
    let ev: InputEvent = serde_json::from_str(r#"{ "type": "key_down", "key": "Delete" }"#).unwrap();
    assert_eq!(ev, InputEvent::KeyDown { key: Key("Delete".into()) });
}

#[test]
fn text_submitted_parses() {
    let ev: InputEvent = serde_json::from_str(r#"{ "type": "text_submitted", "text": "Hello" }"#).unwrap();
    assert_eq!(ev, InputEvent::TextSubmitted { text: "Hello".into() });
}

// =============================================================
// ShapeTool::build
// =============================================================

#[test]
fn build_rect_keeps_signed_size() {
    let shape = ShapeTool::Rect.build(Point::new(100.0, 100.0), Point::new(60.0, 130.0), "#222", 5.0);
    assert_eq!(
        shape,
        Shape::Rect { x: 100.0, y: 100.0, width: -40.0, height: 30.0, color: "#222".into(), thickness: 5.0 }
    );
}

#[test]
fn build_circle_radius_is_drag_length() {
    let shape = ShapeTool::Circle.build(Point::new(0.0, 0.0), Point::new(30.0, 40.0), "#222", 1.0);
    assert!(matches!(shape, Shape::Circle { radius, .. } if radius == 50.0));
}

#[test]
fn build_triangle_size_is_larger_extent() {
    let shape = ShapeTool::Triangle.build(Point::new(10.0, 10.0), Point::new(-5.0, 30.0), "#222", 1.0);
    assert!(matches!(shape, Shape::Triangle { x, y, size, .. } if x == 10.0 && y == 10.0 && size == 20.0));
}

#[test]
fn build_line_spans_anchor_to_current() {
    let shape = ShapeTool::Line.build(Point::new(1.0, 2.0), Point::new(3.0, 4.0), "#1976d2", 2.0);
    assert_eq!(
        shape,
        Shape::Line { x1: 1.0, y1: 2.0, x2: 3.0, y2: 4.0, color: "#1976d2".into(), thickness: 2.0 }
    );
}
