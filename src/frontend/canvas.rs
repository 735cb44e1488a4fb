//! Diagram canvas: draws the scene and handles drag-to-move.
//!
//! Scene coordinates map 1:1 onto the canvas with the origin at the
//! canvas' top-left corner.

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Ui, Vec2};

use crate::scene::{Node, SceneGraph};
use crate::types::{Pos, SignalColor};

const CONNECTION_POINT_RADIUS: f32 = 3.0;
const SIGNAL_BOX_WIDTH: f64 = 30.0;
const NODE_FILL: Color32 = Color32::from_rgb(173, 216, 230);
const SIGNAL_OFF: Color32 = Color32::GRAY;

/// What happened on the canvas this frame
#[derive(Debug, Default)]
pub struct CanvasResult {
    pub drag_started: Option<String>,
    pub drag_finished: Option<String>,
}

/// Rectangles of the red/blue/yellow indicators, stacked at the node's
/// right edge in scene coordinates: `(color, x, y, width, height)`
pub fn signal_boxes(node: &Node) -> [(SignalColor, f64, f64, f64, f64); 3] {
    let box_height = ((node.height - 20.0) / 3.0).max(0.0);
    let box_x = node.x + node.width - SIGNAL_BOX_WIDTH - 5.0;
    let box_y = node.y + 10.0;
    [SignalColor::Red, SignalColor::Blue, SignalColor::Yellow]
        .map(|c| {
            let row = c as usize as f64;
            (c, box_x, box_y + row * box_height, SIGNAL_BOX_WIDTH, box_height)
        })
}

fn signal_fill(color: SignalColor, on: bool) -> Color32 {
    if !on {
        return SIGNAL_OFF;
    }
    match color {
        SignalColor::Red => Color32::RED,
        SignalColor::Blue => Color32::BLUE,
        SignalColor::Yellow => Color32::YELLOW,
    }
}

fn to_screen(origin: Pos2, pos: Pos) -> Pos2 {
    origin + Vec2::new(pos.x as f32, pos.y as f32)
}

fn to_scene(origin: Pos2, screen: Pos2) -> (f64, f64) {
    let offset = screen - origin;
    (offset.x as f64, offset.y as f64)
}

/// Draw the scene and, when `editable`, let the user drag shapes around
pub fn render_canvas(
    ui: &mut Ui,
    scene: &mut SceneGraph,
    size: Vec2,
    editable: bool,
) -> CanvasResult {
    let mut result = CanvasResult::default();
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let canvas_rect = response.rect;
    let origin = canvas_rect.min;

    painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);

    if editable {
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pointer) = response.interact_pointer_pos() {
                let (x, y) = to_scene(origin, pointer);
                if let Some(hit) = scene.entity_at(x, y) {
                    match scene.begin_drag(&hit, x, y) {
                        Ok(()) => result.drag_started = Some(hit.name),
                        Err(e) => tracing::warn!("Cannot drag '{}': {}", hit.name, e),
                    }
                }
            }
        }

        if scene.is_dragging() && response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pointer) = response.interact_pointer_pos() {
                let (x, y) = to_scene(origin, pointer);
                scene.drag_to(x, y);
            }
        }

        if response.drag_stopped() {
            result.drag_finished = scene.end_drag();
        }
    } else if scene.is_dragging() {
        result.drag_finished = scene.end_drag();
    }

    let painter = painter.with_clip_rect(canvas_rect);

    for node in scene.nodes() {
        let min = to_screen(origin, Pos::new(node.x, node.y));
        let rect = Rect::from_min_size(min, Vec2::new(node.width as f32, node.height as f32));
        let dragged = scene.dragged().is_some_and(|d| d.name == node.name);

        painter.rect_filled(rect, 0.0, NODE_FILL);
        painter.rect_stroke(
            rect,
            0.0,
            Stroke::new(if dragged { 2.0 } else { 1.0 }, Color32::BLACK),
            egui::StrokeKind::Outside,
        );
        painter.text(
            min + Vec2::new(5.0, 5.0),
            Align2::LEFT_TOP,
            &node.name,
            FontId::proportional(12.0),
            Color32::BLACK,
        );
        if let Some(pin) = node.pin {
            painter.text(
                min + Vec2::new(5.0, 20.0),
                Align2::LEFT_TOP,
                format!("gpio: {}", pin),
                FontId::proportional(10.0),
                Color32::BLACK,
            );
        }

        for (color, x, y, w, h) in signal_boxes(node) {
            let screen = Rect::from_min_size(
                to_screen(origin, Pos::new(x, y)),
                Vec2::new(w as f32, h as f32),
            );
            painter.rect_filled(screen, 0.0, signal_fill(color, node.signal(color)));
        }

        painter.circle_filled(to_screen(origin, node.p1()), CONNECTION_POINT_RADIUS, Color32::BLUE);
        painter.circle_filled(to_screen(origin, node.p2()), CONNECTION_POINT_RADIUS, Color32::RED);
    }

    for connector in scene.connectors() {
        painter.line_segment(
            [
                to_screen(origin, connector.origin()),
                to_screen(origin, connector.terminus()),
            ],
            Stroke::new(2.0, Color32::RED),
        );
    }

    for point in scene.points().filter(|p| p.visible) {
        let center = to_screen(origin, point.pos());
        painter.circle_filled(center, CONNECTION_POINT_RADIUS, Color32::BLACK);
        painter.text(
            center - Vec2::new(0.0, 15.0),
            Align2::CENTER_CENTER,
            &point.name,
            FontId::proportional(10.0),
            Color32::BLACK,
        );
    }

    if editable && !scene.is_dragging() {
        if let Some(hover) = response.hover_pos() {
            let (x, y) = to_scene(origin, hover);
            if let Some(hit) = scene.entity_at(x, y) {
                response.on_hover_text(format!("{} '{}'", hit.kind, hit.name));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_boxes_stack_at_right_edge() {
        let node = Node::new("r1", 100.0, 50.0, 100.0, 80.0);
        let boxes = signal_boxes(&node);
        assert_eq!(boxes[0], (SignalColor::Red, 165.0, 60.0, 30.0, 20.0));
        assert_eq!(boxes[1].2, 80.0);
        assert_eq!(boxes[2], (SignalColor::Yellow, 165.0, 100.0, 30.0, 20.0));
    }

    #[test]
    fn test_signal_boxes_on_short_node() {
        let node = Node::new("tiny", 0.0, 0.0, 40.0, 10.0);
        assert!(signal_boxes(&node).iter().all(|b| b.4 == 0.0));
    }

    #[test]
    fn test_screen_mapping() {
        let origin = Pos2::new(10.0, 20.0);
        let screen = to_screen(origin, Pos::new(5.0, 5.0));
        assert_eq!(screen, Pos2::new(15.0, 25.0));
        assert_eq!(to_scene(origin, screen), (5.0, 5.0));
    }
}
