use drawkit::command::OperationStack;
use drawkit::context::ToolOperationContext;
use drawkit::drawing::Drawing;
use drawkit::overlay::OverlayRegion;
use drawkit::settings::{ToolSettings, UserSettings};
use drawkit::shape::{Shape, factory};
use drawkit::tools::{
    DragHandler, EraserTool, MoveHandler, ResizeRotateHandler, SelectionTool, StampTool, TextTool,
    Tool, TwoPointKind, TwoPointTool,
};
use drawkit::transform::ShapeTransform;
use egui::{Pos2, Vec2};
use std::f32::consts::FRAC_PI_2;

// Everything a tool call needs, owned in one place so tests can borrow a
// fresh context per call.
struct Session {
    drawing: Drawing,
    stack: OperationStack,
    tool_settings: ToolSettings,
    user_settings: UserSettings,
}

impl Session {
    fn new() -> Self {
        Self {
            drawing: Drawing::new(),
            stack: OperationStack::new(),
            tool_settings: ToolSettings::default(),
            user_settings: UserSettings::default(),
        }
    }

    fn ctx(&mut self) -> ToolOperationContext<'_> {
        ToolOperationContext {
            drawing: &mut self.drawing,
            operation_stack: &mut self.stack,
            tool_settings: &mut self.tool_settings,
            user_settings: &self.user_settings,
        }
    }
}

fn approx(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-4, "{a} != {b}");
}

// A 20x20 rect whose local origin sits at the shape's translation point.
fn add_test_rect(session: &mut Session, translation: Vec2) -> uuid::Uuid {
    let mut shape = factory::rect(Pos2::new(0.0, 0.0), Pos2::new(20.0, 20.0));
    shape.set_transform(ShapeTransform::IDENTITY.translated(translation));
    let id = shape.id();
    session.drawing.add(shape);
    id
}

#[test]
fn test_move_gesture_offsets_translation_by_drag_delta() {
    let mut session = Session::new();
    let id = add_test_rect(&mut session, Vec2::new(10.0, 10.0));
    let original = session.drawing.get(id).unwrap().transform();

    let mut handler = DragHandler::Move(MoveHandler::new(id, Pos2::new(0.0, 0.0), original));
    handler.drag_continue(&mut session.ctx(), Pos2::new(5.0, 5.0), Vec2::ZERO);

    let transform = session.drawing.get(id).unwrap().transform();
    assert_eq!(transform.translation, Vec2::new(15.0, 15.0));
    // Live update only; nothing committed yet.
    assert_eq!(session.stack.undo_depth(), 0);

    handler.drag_end(&mut session.ctx(), Pos2::new(5.0, 5.0));
    assert_eq!(session.stack.undo_depth(), 1);

    session.stack.undo(&mut session.drawing).unwrap();
    let transform = session.drawing.get(id).unwrap().transform();
    assert_eq!(transform.translation, Vec2::new(10.0, 10.0));
}

#[test]
fn test_move_gesture_cancel_restores_original_transform() {
    let mut session = Session::new();
    let id = add_test_rect(&mut session, Vec2::new(10.0, 10.0));
    let original = session.drawing.get(id).unwrap().transform();

    let mut handler = DragHandler::Move(MoveHandler::new(id, Pos2::new(0.0, 0.0), original));
    handler.drag_continue(&mut session.ctx(), Pos2::new(30.0, 40.0), Vec2::ZERO);
    handler.drag_cancel(&mut session.ctx());

    let transform = session.drawing.get(id).unwrap().transform();
    assert_eq!(transform.translation, Vec2::new(10.0, 10.0));
    assert_eq!(session.stack.undo_depth(), 0);
}

#[test]
fn test_resize_rotate_quarter_turn_keeps_scale() {
    let mut session = Session::new();
    // Shape centered at the origin so handle geometry is easy to reason about.
    let id = add_test_rect(&mut session, Vec2::ZERO);
    let original = session.drawing.get(id).unwrap().transform();

    // Handle grabbed at (10, 0), dragged to (0, 10): same distance from the
    // translation point, a quarter turn counter-clockwise in screen space.
    let mut handler =
        DragHandler::ResizeRotate(ResizeRotateHandler::new(id, Pos2::new(10.0, 0.0), original));
    handler.drag_continue(&mut session.ctx(), Pos2::new(0.0, 10.0), Vec2::ZERO);

    let transform = session.drawing.get(id).unwrap().transform();
    approx(transform.rotation, FRAC_PI_2);
    approx(transform.scale, 1.0);

    handler.drag_end(&mut session.ctx(), Pos2::new(0.0, 10.0));
    assert_eq!(session.stack.undo_depth(), 1);
}

#[test]
fn test_resize_rotate_doubles_scale_with_distance() {
    let mut session = Session::new();
    let id = add_test_rect(&mut session, Vec2::ZERO);
    let original = session.drawing.get(id).unwrap().transform();

    let mut handler =
        DragHandler::ResizeRotate(ResizeRotateHandler::new(id, Pos2::new(10.0, 0.0), original));
    handler.drag_continue(&mut session.ctx(), Pos2::new(20.0, 0.0), Vec2::ZERO);

    let transform = session.drawing.get(id).unwrap().transform();
    approx(transform.scale, 2.0);
    approx(transform.rotation, 0.0);
}

#[test]
fn test_resize_rotate_from_translation_point_is_noop() {
    let mut session = Session::new();
    let id = add_test_rect(&mut session, Vec2::ZERO);
    let original = session.drawing.get(id).unwrap().transform();

    // Grab point coincides with the translation point: the reference vector
    // has no direction, so the whole gesture must leave no trace.
    let mut handler =
        DragHandler::ResizeRotate(ResizeRotateHandler::new(id, Pos2::new(0.0, 0.0), original));
    handler.drag_continue(&mut session.ctx(), Pos2::new(30.0, 30.0), Vec2::ZERO);
    handler.drag_end(&mut session.ctx(), Pos2::new(30.0, 30.0));

    assert_eq!(session.drawing.get(id).unwrap().transform(), original);
    assert_eq!(session.stack.undo_depth(), 0);
}

#[test]
fn test_selection_tool_tap_selects_topmost_hit() {
    let mut session = Session::new();
    add_test_rect(&mut session, Vec2::ZERO);
    let top = add_test_rect(&mut session, Vec2::new(5.0, 5.0));
    let mut tool = SelectionTool::new();

    // (15, 15) is inside both; the later-added shape wins.
    tool.handle_tap(&mut session.ctx(), Pos2::new(15.0, 15.0));
    assert_eq!(session.tool_settings.selected_shape, Some(top));
    assert!(session.tool_settings.overlay.is_some());

    // A tap on empty canvas deselects.
    tool.handle_tap(&mut session.ctx(), Pos2::new(200.0, 200.0));
    assert_eq!(session.tool_settings.selected_shape, None);
}

#[test]
fn test_selection_tool_delete_handle_removes_shape_undoably() {
    let mut session = Session::new();
    let id = add_test_rect(&mut session, Vec2::new(50.0, 50.0));
    let mut tool = SelectionTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(60.0, 60.0));
    let delete_anchor = session.tool_settings.overlay.as_ref().unwrap().delete_anchor();
    tool.handle_tap(&mut session.ctx(), delete_anchor);

    assert!(session.drawing.is_empty());
    assert_eq!(session.tool_settings.selected_shape, None);

    session.stack.undo(&mut session.drawing).unwrap();
    assert!(session.drawing.get(id).is_some());
}

#[test]
fn test_selection_tool_drag_moves_selected_shape() {
    let mut session = Session::new();
    let id = add_test_rect(&mut session, Vec2::ZERO);
    let mut tool = SelectionTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(10.0, 10.0));
    tool.handle_drag_start(&mut session.ctx(), Pos2::new(10.0, 10.0));
    tool.handle_drag_continue(&mut session.ctx(), Pos2::new(13.0, 14.0), Vec2::ZERO);
    tool.handle_drag_end(&mut session.ctx(), Pos2::new(13.0, 14.0));

    let transform = session.drawing.get(id).unwrap().transform();
    assert_eq!(transform.translation, Vec2::new(3.0, 4.0));
    assert_eq!(session.stack.undo_depth(), 1);
}

#[test]
fn test_selection_tool_resize_handle_starts_resize_gesture() {
    let mut session = Session::new();
    let id = add_test_rect(&mut session, Vec2::ZERO);
    let mut tool = SelectionTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(10.0, 10.0));
    let overlay = session.tool_settings.overlay.clone().unwrap();
    let anchor = overlay.resize_anchor();
    assert_eq!(overlay.region_at(anchor), Some(OverlayRegion::ResizeAndRotate));

    // Drag the corner handle twice as far from the origin.
    tool.handle_drag_start(&mut session.ctx(), anchor);
    let farther = Pos2::new(anchor.x * 2.0, anchor.y * 2.0);
    tool.handle_drag_continue(&mut session.ctx(), farther, Vec2::ZERO);
    tool.handle_drag_end(&mut session.ctx(), farther);

    let transform = session.drawing.get(id).unwrap().transform();
    approx(transform.scale, 2.0);
    // The overlay tracked the shape's new extent.
    let refreshed = session.tool_settings.overlay.as_ref().unwrap();
    approx(refreshed.resize_anchor().x, farther.x);
    approx(refreshed.resize_anchor().y, farther.y);
}

#[test]
fn test_two_point_tool_creation_is_single_undo_entry() {
    let mut session = Session::new();
    let mut tool = TwoPointTool::new(TwoPointKind::Rect);

    tool.handle_drag_start(&mut session.ctx(), Pos2::new(10.0, 10.0));
    tool.handle_drag_continue(&mut session.ctx(), Pos2::new(20.0, 15.0), Vec2::ZERO);
    tool.handle_drag_continue(&mut session.ctx(), Pos2::new(25.0, 20.0), Vec2::ZERO);
    tool.handle_drag_end(&mut session.ctx(), Pos2::new(30.0, 30.0));

    assert_eq!(session.drawing.shapes().len(), 1);
    assert_eq!(session.stack.undo_depth(), 1);
    match &session.drawing.shapes()[0] {
        Shape::Rect(rect) => {
            assert_eq!(rect.a, Pos2::new(10.0, 10.0));
            assert_eq!(rect.b, Pos2::new(30.0, 30.0));
        }
        other => panic!("expected rect, got {other:?}"),
    }

    session.stack.undo(&mut session.drawing).unwrap();
    assert!(session.drawing.is_empty());
}

#[test]
fn test_two_point_tool_cancel_removes_shape_without_redo() {
    let mut session = Session::new();
    let mut tool = TwoPointTool::new(TwoPointKind::Ellipse);

    tool.handle_drag_start(&mut session.ctx(), Pos2::new(10.0, 10.0));
    tool.handle_drag_continue(&mut session.ctx(), Pos2::new(40.0, 40.0), Vec2::ZERO);
    tool.handle_drag_cancel(&mut session.ctx(), Pos2::new(40.0, 40.0));

    assert!(session.drawing.is_empty());
    assert!(!session.stack.can_undo());
    assert!(!session.stack.can_redo());
}

#[test]
fn test_two_point_tool_creates_with_current_settings() {
    let mut session = Session::new();
    session.user_settings.stroke_color = egui::Color32::RED;
    session.user_settings.stroke_width = 7.0;
    let mut tool = TwoPointTool::new(TwoPointKind::Line);

    tool.handle_drag_start(&mut session.ctx(), Pos2::new(0.0, 0.0));
    tool.handle_drag_end(&mut session.ctx(), Pos2::new(10.0, 0.0));

    match &session.drawing.shapes()[0] {
        Shape::Line(line) => {
            assert_eq!(line.stroke_color, egui::Color32::RED);
            assert_eq!(line.stroke_width, 7.0);
        }
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn test_freehand_stroke_is_single_undo_entry() {
    let mut session = Session::new();
    let mut tool = drawkit::tools::FreehandTool::new();

    tool.handle_drag_start(&mut session.ctx(), Pos2::new(0.0, 0.0));
    tool.handle_drag_continue(&mut session.ctx(), Pos2::new(1.0, 1.0), Vec2::ZERO);
    tool.handle_drag_continue(&mut session.ctx(), Pos2::new(2.0, 3.0), Vec2::ZERO);
    tool.handle_drag_end(&mut session.ctx(), Pos2::new(3.0, 5.0));

    assert_eq!(session.stack.undo_depth(), 1);
    match &session.drawing.shapes()[0] {
        Shape::Freehand(stroke) => assert_eq!(stroke.points.len(), 4),
        other => panic!("expected freehand stroke, got {other:?}"),
    }

    session.stack.undo(&mut session.drawing).unwrap();
    assert!(session.drawing.is_empty());
}

#[test]
fn test_freehand_cancel_unwinds_stroke() {
    let mut session = Session::new();
    let mut tool = drawkit::tools::FreehandTool::new();

    tool.handle_drag_start(&mut session.ctx(), Pos2::new(0.0, 0.0));
    tool.handle_drag_continue(&mut session.ctx(), Pos2::new(5.0, 5.0), Vec2::ZERO);
    tool.handle_drag_cancel(&mut session.ctx(), Pos2::new(5.0, 5.0));

    assert!(session.drawing.is_empty());
    assert!(!session.stack.can_undo());
    assert!(!session.stack.can_redo());
}

#[test]
fn test_eraser_removes_each_shape_as_its_own_entry() {
    let mut session = Session::new();
    add_test_rect(&mut session, Vec2::ZERO);
    add_test_rect(&mut session, Vec2::new(100.0, 100.0));
    let mut tool = EraserTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(10.0, 10.0));
    tool.handle_tap(&mut session.ctx(), Pos2::new(110.0, 110.0));
    assert!(session.drawing.is_empty());
    assert_eq!(session.stack.undo_depth(), 2);

    session.stack.undo(&mut session.drawing).unwrap();
    assert_eq!(session.drawing.shapes().len(), 1);
}

#[test]
fn test_eraser_on_empty_canvas_does_nothing() {
    let mut session = Session::new();
    let mut tool = EraserTool::new();
    tool.handle_tap(&mut session.ctx(), Pos2::new(10.0, 10.0));
    assert_eq!(session.stack.undo_depth(), 0);
}

#[test]
fn test_text_tool_tap_creates_editing_shape() {
    let mut session = Session::new();
    let mut tool = TextTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(40.0, 50.0));

    let id = session.tool_settings.selected_shape.unwrap();
    let shape = session.drawing.get(id).unwrap();
    assert!(shape.is_being_edited());
    assert_eq!(shape.transform().translation, Vec2::new(40.0, 50.0));
    assert_eq!(session.stack.undo_depth(), 1);
}

#[test]
fn test_text_tool_typing_then_deactivate_is_single_undo_entry() {
    let mut session = Session::new();
    let mut tool = TextTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(40.0, 50.0));
    let id = session.tool_settings.selected_shape.unwrap();
    tool.update_text(&mut session.ctx(), "he");
    tool.update_text(&mut session.ctx(), "hello");
    tool.deactivate(&mut session.ctx());

    // Creation plus the whole typing session coalesce to one entry.
    assert_eq!(session.stack.undo_depth(), 1);
    assert!(!session.drawing.get(id).unwrap().is_being_edited());

    session.stack.undo(&mut session.drawing).unwrap();
    assert!(session.drawing.is_empty());
}

#[test]
fn test_text_tool_second_editing_session_is_separate_entry() {
    let mut session = Session::new();
    let mut tool = TextTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(40.0, 50.0));
    let id = session.tool_settings.selected_shape.unwrap();
    tool.update_text(&mut session.ctx(), "hello");
    tool.deactivate(&mut session.ctx());

    // Re-enter editing on the existing shape and change the text again.
    tool.activate(&mut session.ctx(), Some(id));
    tool.update_text(&mut session.ctx(), "hello world");
    tool.deactivate(&mut session.ctx());

    assert_eq!(session.stack.undo_depth(), 2);
    session.stack.undo(&mut session.drawing).unwrap();
    match session.drawing.get(id) {
        Some(Shape::Text(text)) => assert_eq!(text.text, "hello"),
        other => panic!("expected text shape, got {other:?}"),
    }
}

#[test]
fn test_text_drag_continue_over_handle_starts_gesture_retroactively() {
    let mut session = Session::new();
    let mut tool = TextTool::new();
    tool.handle_tap(&mut session.ctx(), Pos2::new(40.0, 50.0));
    let id = session.tool_settings.selected_shape.unwrap();

    // Gesture delivery missed the start event; the first continue arrives
    // already over the resize handle and must begin the drag itself.
    let anchor = session.tool_settings.overlay.as_ref().unwrap().resize_anchor();
    tool.handle_drag_continue(&mut session.ctx(), anchor, Vec2::ZERO);

    let translation = session.drawing.get(id).unwrap().transform().translation;
    let farther = translation.to_pos2() + (anchor - translation.to_pos2()) * 2.0;
    tool.handle_drag_continue(&mut session.ctx(), farther, Vec2::ZERO);
    tool.handle_drag_end(&mut session.ctx(), farther);

    let transform = session.drawing.get(id).unwrap().transform();
    approx(transform.scale, 2.0);
    // The add plus the committed transform change.
    assert_eq!(session.stack.undo_depth(), 2);
}

#[test]
fn test_stamp_drag_continue_over_change_image_handle_starts_gesture() {
    let mut session = Session::new();
    session.user_settings.stamp_image_name = "duck".to_owned();
    let mut tool = StampTool::new();
    tool.handle_tap(&mut session.ctx(), Pos2::new(80.0, 80.0));
    let id = session.tool_settings.selected_shape.unwrap();

    session.user_settings.stamp_image_name = "frog".to_owned();
    let anchor = session
        .tool_settings
        .overlay
        .as_ref()
        .unwrap()
        .change_image_anchor()
        .unwrap();
    // No drag-start was delivered; the continue over the handle stands in
    // for it.
    tool.handle_drag_continue(&mut session.ctx(), anchor, Vec2::ZERO);
    tool.handle_drag_end(&mut session.ctx(), anchor);

    match session.drawing.get(id) {
        Some(Shape::Stamp(stamp)) => assert_eq!(stamp.image_name, "frog"),
        other => panic!("expected stamp shape, got {other:?}"),
    }
    assert_eq!(session.stack.undo_depth(), 2);
}

#[test]
fn test_text_tool_delete_handle_removes_shape() {
    let mut session = Session::new();
    let mut tool = TextTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(40.0, 50.0));
    tool.update_text(&mut session.ctx(), "doomed");
    let delete_anchor = session.tool_settings.overlay.as_ref().unwrap().delete_anchor();
    tool.handle_tap(&mut session.ctx(), delete_anchor);

    assert!(session.drawing.is_empty());
    assert_eq!(session.tool_settings.selected_shape, None);
}

#[test]
fn test_stamp_tool_tap_places_stamp_with_current_image() {
    let mut session = Session::new();
    session.user_settings.stamp_image_name = "duck".to_owned();
    let mut tool = StampTool::new();

    tool.handle_tap(&mut session.ctx(), Pos2::new(80.0, 80.0));

    let id = session.tool_settings.selected_shape.unwrap();
    match session.drawing.get(id) {
        Some(Shape::Stamp(stamp)) => assert_eq!(stamp.image_name, "duck"),
        other => panic!("expected stamp shape, got {other:?}"),
    }
    // Stamps grow a third handle for swapping the image.
    let overlay = session.tool_settings.overlay.as_ref().unwrap();
    assert!(overlay.change_image_anchor().is_some());
}

#[test]
fn test_stamp_change_image_drag_commits_undoable_swap() {
    let mut session = Session::new();
    session.user_settings.stamp_image_name = "duck".to_owned();
    let mut tool = StampTool::new();
    tool.handle_tap(&mut session.ctx(), Pos2::new(80.0, 80.0));
    let id = session.tool_settings.selected_shape.unwrap();

    // The user picked a new image, then dragged from the change-image handle.
    session.user_settings.stamp_image_name = "frog".to_owned();
    let anchor = session
        .tool_settings
        .overlay
        .as_ref()
        .unwrap()
        .change_image_anchor()
        .unwrap();
    tool.handle_drag_start(&mut session.ctx(), anchor);
    tool.handle_drag_end(&mut session.ctx(), anchor);

    match session.drawing.get(id) {
        Some(Shape::Stamp(stamp)) => assert_eq!(stamp.image_name, "frog"),
        other => panic!("expected stamp shape, got {other:?}"),
    }

    // Leaving editing must not commit the already-committed swap again.
    tool.deactivate(&mut session.ctx());
    assert_eq!(session.stack.undo_depth(), 2);

    session.stack.undo(&mut session.drawing).unwrap();
    match session.drawing.get(id) {
        Some(Shape::Stamp(stamp)) => assert_eq!(stamp.image_name, "duck"),
        other => panic!("expected stamp shape, got {other:?}"),
    }
}

#[test]
fn test_drag_events_without_active_gesture_are_tolerated() {
    let mut session = Session::new();
    let mut tool = SelectionTool::new();

    // Out-of-order gesture delivery must not panic or mutate anything.
    tool.handle_drag_continue(&mut session.ctx(), Pos2::new(5.0, 5.0), Vec2::ZERO);
    tool.handle_drag_end(&mut session.ctx(), Pos2::new(5.0, 5.0));
    tool.handle_drag_cancel(&mut session.ctx(), Pos2::new(5.0, 5.0));
    assert_eq!(session.stack.undo_depth(), 0);
}
