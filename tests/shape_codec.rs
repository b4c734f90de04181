use drawkit::error::EngineError;
use drawkit::persistence::{
    color_from_hex, color_to_hex, decode_shape, decode_shapes, decode_shapes_lenient, decode_stamp,
    decode_text, encode_shape, encode_shapes,
};
use drawkit::shape::{NgonShape, Shape, StampShape, TextShape, factory};
use drawkit::transform::ShapeTransform;
use egui::{Color32, Pos2, Vec2};
use serde_json::json;

fn round_trip(shape: &Shape) -> Shape {
    let value = encode_shape(shape).unwrap();
    decode_shape(&value).unwrap()
}

#[test]
fn test_line_round_trips() {
    let mut shape = factory::arrow(Pos2::new(1.0, 2.0), Pos2::new(30.0, 40.0));
    shape.set_transform(
        ShapeTransform::IDENTITY
            .translated(Vec2::new(5.0, -5.0))
            .scaled(2.0),
    );
    assert_eq!(round_trip(&shape), shape);
}

#[test]
fn test_star_round_trips() {
    let shape = Shape::Ngon(NgonShape::new(
        Pos2::new(0.0, 0.0),
        Pos2::new(50.0, 50.0),
        5,
        true,
    ));
    assert_eq!(round_trip(&shape), shape);
}

#[test]
fn test_text_round_trips() {
    let mut text = TextShape::new();
    text.text = "hello".to_owned();
    text.explicit_width = Some(120.0);
    text.transform = ShapeTransform::IDENTITY.translated(Vec2::new(40.0, 50.0));
    let shape = Shape::Text(text);
    assert_eq!(round_trip(&shape), shape);
}

#[test]
fn test_stamp_round_trips() {
    let mut stamp = StampShape::new();
    stamp.image_name = "duck".to_owned();
    let shape = Shape::Stamp(stamp);
    assert_eq!(round_trip(&shape), shape);
}

#[test]
fn test_records_use_camel_case_fields() {
    let shape = factory::rect(Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
    let value = encode_shape(&shape).unwrap();
    assert_eq!(value["type"], "Rect");
    assert!(value.get("strokeColor").is_some());
    assert!(value.get("strokeWidth").is_some());
    assert!(value.get("boundingRect").is_some());
    // Optional fill is omitted entirely when unset.
    assert!(value.get("fillColor").is_none());
}

#[test]
fn test_typed_decoder_rejects_other_variant() {
    let text = encode_shape(&Shape::Text(TextShape::new())).unwrap();
    match decode_stamp(&text) {
        Err(EngineError::WrongShapeType { expected, found }) => {
            assert_eq!(expected, "Stamp");
            assert_eq!(found, "Text");
        }
        other => panic!("expected wrong-shape-type error, got {other:?}"),
    }
    // The right decoder still accepts the same record.
    assert!(decode_text(&text).is_ok());
}

#[test]
fn test_unknown_discriminator_is_unsupported() {
    let record = json!({ "type": "Scribble", "id": "x" });
    match decode_shape(&record) {
        Err(EngineError::UnsupportedShapeType(name)) => assert_eq!(name, "Scribble"),
        other => panic!("expected unsupported-shape-type error, got {other:?}"),
    }
}

#[test]
fn test_selection_shapes_do_not_persist() {
    let rect = factory::rect(Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
    let selection = Shape::Selection(drawkit::shape::SelectionShape::around(
        rect.bounding_rect(),
        rect.transform(),
    ));
    assert!(matches!(
        encode_shape(&selection),
        Err(EngineError::UnsupportedShapeType(_))
    ));

    // The batch encoder silently skips it rather than failing the save.
    let encoded = encode_shapes(&[rect.clone(), selection]).unwrap();
    assert_eq!(encoded.as_array().unwrap().len(), 1);
}

#[test]
fn test_color_hex_round_trips() {
    for color in [
        Color32::BLACK,
        Color32::from_rgb(0x12, 0x34, 0x56),
        Color32::from_rgba_unmultiplied(0xff, 0x00, 0xff, 0x40),
    ] {
        let hex = color_to_hex(color);
        assert_eq!(color_from_hex(&hex).unwrap(), color);
    }
    assert_eq!(color_to_hex(Color32::from_rgb(255, 0, 0)), "#ff0000");
}

#[test]
fn test_bad_color_string_is_invalid_record() {
    for bad in ["", "#12", "#nothex", "#ff00ff0", "red"] {
        assert!(matches!(
            color_from_hex(bad),
            Err(EngineError::InvalidRecord(_))
        ));
    }
}

#[test]
fn test_malformed_id_is_invalid_record() {
    let mut value = encode_shape(&factory::rect(Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0))).unwrap();
    value["id"] = json!("not-a-uuid");
    assert!(matches!(
        decode_shape(&value),
        Err(EngineError::InvalidRecord(_))
    ));
}

#[test]
fn test_batch_decode_fails_fast_on_bad_record() {
    let good = encode_shape(&factory::rect(Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0))).unwrap();
    let list = json!([good, { "type": "Scribble" }]);
    assert!(decode_shapes(&list).is_err());
}

#[test]
fn test_lenient_decode_skips_bad_records() {
    let a = encode_shape(&factory::rect(Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0))).unwrap();
    let b = encode_shape(&factory::line(Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0))).unwrap();
    let list = json!([a, { "type": "Scribble" }, b]);
    let shapes = decode_shapes_lenient(&list);
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0].shape_type(), "Rect");
    assert_eq!(shapes[1].shape_type(), "Line");
}

#[test]
fn test_batch_round_trips_drawing_contents() {
    let shapes = vec![
        factory::line(Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0)),
        factory::ellipse(Pos2::new(20.0, 20.0), Pos2::new(40.0, 50.0)),
        factory::freehand(Pos2::new(5.0, 5.0)),
    ];
    let encoded = encode_shapes(&shapes).unwrap();
    let decoded = decode_shapes(&encoded).unwrap();
    assert_eq!(decoded, shapes);
}
