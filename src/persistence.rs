//! Field-level codec for persisted shape records.
//!
//! The format is JSON-shaped but format-agnostic at this layer: shapes map
//! to flat records with a `type` discriminator, camelCase field names, and
//! colors as hex strings. Decoding a record against the wrong variant fails
//! with [`EngineError::WrongShapeType`]; unknown discriminators fail with
//! [`EngineError::UnsupportedShapeType`] instead of aborting.

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::shape::{
    EllipseShape, FreehandShape, LineShape, NgonShape, RectShape, Shape, StampShape, TextShape,
};
use crate::transform::ShapeTransform;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
}

impl From<Pos2> for PointRecord {
    fn from(p: Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Pos2 {
    fn from(p: PointRecord) -> Self {
        Pos2::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RectRecord {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Rect> for RectRecord {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.min.x,
            y: rect.min.y,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl From<RectRecord> for Rect {
    fn from(rect: RectRecord) -> Self {
        Rect::from_min_size(
            Pos2::new(rect.x, rect.y),
            egui::vec2(rect.width, rect.height),
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransformRecord {
    pub translation: PointRecord,
    pub scale: f32,
    pub rotation: f32,
}

impl From<ShapeTransform> for TransformRecord {
    fn from(t: ShapeTransform) -> Self {
        Self {
            translation: PointRecord {
                x: t.translation.x,
                y: t.translation.y,
            },
            scale: t.scale,
            rotation: t.rotation,
        }
    }
}

impl From<TransformRecord> for ShapeTransform {
    fn from(t: TransformRecord) -> Self {
        Self {
            translation: Vec2::new(t.translation.x, t.translation.y),
            scale: t.scale,
            rotation: t.rotation,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineShapeRecord {
    #[serde(rename = "type")]
    shape_type: String,
    id: String,
    transform: TransformRecord,
    bounding_rect: RectRecord,
    a: PointRecord,
    b: PointRecord,
    arrow: bool,
    stroke_color: String,
    stroke_width: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilledShapeRecord {
    #[serde(rename = "type")]
    shape_type: String,
    id: String,
    transform: TransformRecord,
    bounding_rect: RectRecord,
    a: PointRecord,
    b: PointRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_color: Option<String>,
    stroke_color: String,
    stroke_width: f32,
    // Ngon only.
    #[serde(skip_serializing_if = "Option::is_none")]
    sides: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    star: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FreehandShapeRecord {
    #[serde(rename = "type")]
    shape_type: String,
    id: String,
    transform: TransformRecord,
    bounding_rect: RectRecord,
    points: Vec<PointRecord>,
    stroke_color: String,
    stroke_width: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextShapeRecord {
    #[serde(rename = "type")]
    shape_type: String,
    id: String,
    transform: TransformRecord,
    bounding_rect: RectRecord,
    text: String,
    font_name: String,
    font_size: f32,
    fill_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    explicit_width: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StampShapeRecord {
    #[serde(rename = "type")]
    shape_type: String,
    id: String,
    transform: TransformRecord,
    bounding_rect: RectRecord,
    image_name: String,
}

/// Serializes a color the way the records store it: `#rrggbb`, or
/// `#rrggbbaa` when the alpha channel carries information.
pub fn color_to_hex(color: Color32) -> String {
    // Color32 stores premultiplied alpha; records carry the unmultiplied
    // components so they mean the same thing to any reader.
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

pub fn color_from_hex(hex: &str) -> EngineResult<Color32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let parse = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| EngineError::InvalidRecord(format!("bad color {hex:?}")))
    };
    match digits.len() {
        6 => Ok(Color32::from_rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?)),
        8 => Ok(Color32::from_rgba_unmultiplied(
            parse(0..2)?,
            parse(2..4)?,
            parse(4..6)?,
            parse(6..8)?,
        )),
        _ => Err(EngineError::InvalidRecord(format!("bad color {hex:?}"))),
    }
}

fn parse_id(id: &str) -> EngineResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| EngineError::InvalidRecord(format!("bad shape id {id:?}")))
}

/// Checks the record's discriminator before any field decoding, so a
/// mismatch surfaces as `WrongShapeType` rather than a missing-field error.
fn check_type(value: &Value, expected: &'static str) -> EngineResult<()> {
    let found = value.get("type").and_then(Value::as_str).unwrap_or_default();
    if found == expected {
        Ok(())
    } else {
        Err(EngineError::WrongShapeType {
            expected,
            found: found.to_owned(),
        })
    }
}

pub fn encode_shape(shape: &Shape) -> EngineResult<Value> {
    let value = match shape {
        Shape::Line(s) => serde_json::to_value(LineShapeRecord {
            shape_type: "Line".to_owned(),
            id: s.id.to_string(),
            transform: s.transform.into(),
            bounding_rect: s.bounding_rect().into(),
            a: s.a.into(),
            b: s.b.into(),
            arrow: s.arrow,
            stroke_color: color_to_hex(s.stroke_color),
            stroke_width: s.stroke_width,
        })?,
        Shape::Rect(s) => serde_json::to_value(FilledShapeRecord {
            shape_type: "Rect".to_owned(),
            id: s.id.to_string(),
            transform: s.transform.into(),
            bounding_rect: s.bounding_rect().into(),
            a: s.a.into(),
            b: s.b.into(),
            fill_color: s.fill_color.map(color_to_hex),
            stroke_color: color_to_hex(s.stroke_color),
            stroke_width: s.stroke_width,
            sides: None,
            star: None,
        })?,
        Shape::Ellipse(s) => serde_json::to_value(FilledShapeRecord {
            shape_type: "Ellipse".to_owned(),
            id: s.id.to_string(),
            transform: s.transform.into(),
            bounding_rect: s.bounding_rect().into(),
            a: s.a.into(),
            b: s.b.into(),
            fill_color: s.fill_color.map(color_to_hex),
            stroke_color: color_to_hex(s.stroke_color),
            stroke_width: s.stroke_width,
            sides: None,
            star: None,
        })?,
        Shape::Ngon(s) => serde_json::to_value(FilledShapeRecord {
            shape_type: "Ngon".to_owned(),
            id: s.id.to_string(),
            transform: s.transform.into(),
            bounding_rect: s.bounding_rect().into(),
            a: s.a.into(),
            b: s.b.into(),
            fill_color: s.fill_color.map(color_to_hex),
            stroke_color: color_to_hex(s.stroke_color),
            stroke_width: s.stroke_width,
            sides: Some(s.sides),
            star: Some(s.star),
        })?,
        Shape::Freehand(s) => serde_json::to_value(FreehandShapeRecord {
            shape_type: "Freehand".to_owned(),
            id: s.id.to_string(),
            transform: s.transform.into(),
            bounding_rect: s.bounding_rect().into(),
            points: s.points.iter().copied().map(Into::into).collect(),
            stroke_color: color_to_hex(s.stroke_color),
            stroke_width: s.stroke_width,
        })?,
        Shape::Text(s) => serde_json::to_value(TextShapeRecord {
            shape_type: "Text".to_owned(),
            id: s.id.to_string(),
            transform: s.transform.into(),
            bounding_rect: s.bounding_rect.into(),
            text: s.text.clone(),
            font_name: s.font_name.clone(),
            font_size: s.font_size,
            fill_color: color_to_hex(s.fill_color),
            explicit_width: s.explicit_width,
        })?,
        Shape::Stamp(s) => serde_json::to_value(StampShapeRecord {
            shape_type: "Stamp".to_owned(),
            id: s.id.to_string(),
            transform: s.transform.into(),
            bounding_rect: s.bounding_rect.into(),
            image_name: s.image_name.clone(),
        })?,
        Shape::Selection(_) => {
            return Err(EngineError::UnsupportedShapeType("Selection".to_owned()));
        }
    };
    Ok(value)
}

pub fn decode_line(value: &Value) -> EngineResult<LineShape> {
    check_type(value, "Line")?;
    let record: LineShapeRecord = serde_json::from_value(value.clone())?;
    Ok(LineShape {
        id: parse_id(&record.id)?,
        transform: record.transform.into(),
        a: record.a.into(),
        b: record.b.into(),
        arrow: record.arrow,
        stroke_color: color_from_hex(&record.stroke_color)?,
        stroke_width: record.stroke_width,
    })
}

fn decode_filled(value: &Value, expected: &'static str) -> EngineResult<FilledShapeRecord> {
    check_type(value, expected)?;
    Ok(serde_json::from_value(value.clone())?)
}

pub fn decode_rect(value: &Value) -> EngineResult<RectShape> {
    let record = decode_filled(value, "Rect")?;
    Ok(RectShape {
        id: parse_id(&record.id)?,
        transform: record.transform.into(),
        a: record.a.into(),
        b: record.b.into(),
        fill_color: record.fill_color.as_deref().map(color_from_hex).transpose()?,
        stroke_color: color_from_hex(&record.stroke_color)?,
        stroke_width: record.stroke_width,
    })
}

pub fn decode_ellipse(value: &Value) -> EngineResult<EllipseShape> {
    let record = decode_filled(value, "Ellipse")?;
    Ok(EllipseShape {
        id: parse_id(&record.id)?,
        transform: record.transform.into(),
        a: record.a.into(),
        b: record.b.into(),
        fill_color: record.fill_color.as_deref().map(color_from_hex).transpose()?,
        stroke_color: color_from_hex(&record.stroke_color)?,
        stroke_width: record.stroke_width,
    })
}

pub fn decode_ngon(value: &Value) -> EngineResult<NgonShape> {
    let record = decode_filled(value, "Ngon")?;
    Ok(NgonShape {
        id: parse_id(&record.id)?,
        transform: record.transform.into(),
        a: record.a.into(),
        b: record.b.into(),
        sides: record.sides.unwrap_or(3).max(3),
        star: record.star.unwrap_or(false),
        fill_color: record.fill_color.as_deref().map(color_from_hex).transpose()?,
        stroke_color: color_from_hex(&record.stroke_color)?,
        stroke_width: record.stroke_width,
    })
}

pub fn decode_freehand(value: &Value) -> EngineResult<FreehandShape> {
    check_type(value, "Freehand")?;
    let record: FreehandShapeRecord = serde_json::from_value(value.clone())?;
    Ok(FreehandShape {
        id: parse_id(&record.id)?,
        transform: record.transform.into(),
        points: record.points.into_iter().map(Into::into).collect(),
        stroke_color: color_from_hex(&record.stroke_color)?,
        stroke_width: record.stroke_width,
    })
}

pub fn decode_text(value: &Value) -> EngineResult<TextShape> {
    check_type(value, "Text")?;
    let record: TextShapeRecord = serde_json::from_value(value.clone())?;
    Ok(TextShape {
        id: parse_id(&record.id)?,
        transform: record.transform.into(),
        text: record.text,
        font_name: record.font_name,
        font_size: record.font_size,
        fill_color: color_from_hex(&record.fill_color)?,
        explicit_width: record.explicit_width,
        bounding_rect: record.bounding_rect.into(),
        is_being_edited: false,
    })
}

pub fn decode_stamp(value: &Value) -> EngineResult<StampShape> {
    check_type(value, "Stamp")?;
    let record: StampShapeRecord = serde_json::from_value(value.clone())?;
    Ok(StampShape {
        id: parse_id(&record.id)?,
        transform: record.transform.into(),
        image_name: record.image_name,
        bounding_rect: record.bounding_rect.into(),
        is_being_edited: false,
    })
}

/// Decodes a single record by its `type` discriminator.
pub fn decode_shape(value: &Value) -> EngineResult<Shape> {
    let shape_type = value.get("type").and_then(Value::as_str).unwrap_or_default();
    match shape_type {
        "Line" => Ok(Shape::Line(decode_line(value)?)),
        "Rect" => Ok(Shape::Rect(decode_rect(value)?)),
        "Ellipse" => Ok(Shape::Ellipse(decode_ellipse(value)?)),
        "Ngon" => Ok(Shape::Ngon(decode_ngon(value)?)),
        "Freehand" => Ok(Shape::Freehand(decode_freehand(value)?)),
        "Text" => Ok(Shape::Text(decode_text(value)?)),
        "Stamp" => Ok(Shape::Stamp(decode_stamp(value)?)),
        other => Err(EngineError::UnsupportedShapeType(other.to_owned())),
    }
}

/// Encodes a shape list to a JSON array, skipping shapes that do not
/// persist (the selection indicator).
pub fn encode_shapes(shapes: &[Shape]) -> EngineResult<Value> {
    let mut records = Vec::with_capacity(shapes.len());
    for shape in shapes {
        if matches!(shape, Shape::Selection(_)) {
            continue;
        }
        records.push(encode_shape(shape)?);
    }
    Ok(Value::Array(records))
}

/// Decodes a record list, failing on the first bad record. Shapes decoded
/// before the failure are untouched by it; callers that prefer skipping can
/// use [`decode_shapes_lenient`].
pub fn decode_shapes(value: &Value) -> EngineResult<Vec<Shape>> {
    let records = value
        .as_array()
        .ok_or_else(|| EngineError::InvalidRecord("expected an array of shapes".to_owned()))?;
    records.iter().map(decode_shape).collect()
}

/// Decodes a record list, logging and skipping records that fail.
pub fn decode_shapes_lenient(value: &Value) -> Vec<Shape> {
    let Some(records) = value.as_array() else {
        log::warn!("expected an array of shape records");
        return Vec::new();
    };
    records
        .iter()
        .filter_map(|record| match decode_shape(record) {
            Ok(shape) => Some(shape),
            Err(err) => {
                log::warn!("skipping undecodable shape record: {err}");
                None
            }
        })
        .collect()
}
