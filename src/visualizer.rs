// Face/occupant/object HUD on top of a live frame.
// Per frame the caller hands over the frame with `update_image` (which also
// stamps the watermark), draws each subject, then shows the result.
// For a face, two row stacks frame its bounding box:
//   right of the box -> expressions, then head angles, growing rightwards
//   left of the box  -> emotions, mood, identity, age and age category,
//                       right-justified so they grow away from the box
// Both stacks start at the box top and move down one row per entry.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use image::RgbaImage;

use crate::catalog::{Catalog, MetricPolicy, Rendered, sentinel_label};
use crate::color::VALENCE_RAMP;
use crate::compositor::Compositor;
use crate::config::HudConfig;
use crate::display::DisplaySink;
use crate::draw::{draw_circle, draw_polygon, draw_rect};
use crate::error::Error;
use crate::hud::{Row, RowContent};
use crate::layout::LayoutCursor;
use crate::metrics::{Emotion, Face, Measurement, Object, ObjectType, Occupant, Scene};
use crate::types::{BoundingBox, Color, FrameBuffer, Point};

const BOX_THICKNESS: u32 = 3;
const POLYGON_THICKNESS: u32 = 2;
const POINT_RADIUS: u32 = 2;
/// Box, region and label color for cabin occupants.
pub const OCCUPANT_COLOR: Color = Color::rgb(0, 191, 255);

/// Holds the frame being annotated plus everything needed to annotate it.
pub struct Visualizer {
    img: FrameBuffer,
    compositor: Compositor,
    catalog: Catalog,
    policy: MetricPolicy,
    spacing: i32,
}

impl Visualizer {
    /// Renderer with the layout and colors from `config` and an optional
    /// watermark. Draws on an empty frame until `update_image` is called.
    pub fn new(config: &HudConfig, logo: Option<RgbaImage>) -> Self {
        Self {
            img: FrameBuffer::filled(0, 0, Color::BLACK),
            compositor: Compositor::new(logo, config.logo_inset, config.logo_max_width_fraction),
            catalog: Catalog::default(),
            policy: MetricPolicy::new(
                config.red_classifiers.iter().cloned(),
                config.green_classifiers.iter().cloned(),
                config.gauge_color,
            ),
            spacing: config.row_spacing,
        }
    }

    /// The watermark stamper, for inspecting its sizing.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Take `frame` as the image to draw on and stamp the watermark into it.
    pub fn update_image(&mut self, frame: FrameBuffer) {
        self.img = frame;
        self.compositor.stamp(&mut self.img);
    }

    /// The frame with everything drawn so far.
    pub fn image_data(&self) -> &FrameBuffer {
        &self.img
    }

    /// Present the frame, then yield for `interval`.
    pub fn show_image(&self, sink: &mut dyn DisplaySink, interval: Duration) -> Result<(), Error> {
        sink.present(&self.img)?;
        sink.wait(interval);
        Ok(())
    }

    /// Small white circle on each landmark.
    pub fn draw_points(&mut self, points: &[Point]) {
        for &p in points {
            draw_circle(&mut self.img, p, POINT_RADIUS, Color::WHITE);
        }
    }

    /// Box colored by valence: red at -100, green at +100.
    pub fn draw_bounding_box(&mut self, bbox: &BoundingBox, valence: f32) {
        self.draw_bounding_box_color(bbox, VALENCE_RAMP.color(valence));
    }

    /// Box in an explicit color.
    pub fn draw_bounding_box_color(&mut self, bbox: &BoundingBox, color: Color) {
        draw_rect(&mut self.img, bbox.top_left, bbox.bottom_right, color, BOX_THICKNESS);
    }

    /// Closed outline through `points`.
    pub fn draw_polygon(&mut self, points: &[Point], color: Color) {
        draw_polygon(&mut self.img, points, color, POLYGON_THICKNESS);
    }

    /// Pitch/yaw/roll as one-decimal numbers, continuing `cursor`.
    pub fn draw_head_orientation(
        &mut self,
        angles: &HashMap<Measurement, f32>,
        x: i32,
        cursor: &mut LayoutCursor,
        align_right: bool,
        color: Color,
    ) -> Result<(), Error> {
        let mut rows = Vec::new();
        let result = self.plan_head_orientation(&mut rows, angles, x, cursor, align_right, color);
        self.paint(&rows);
        result
    }

    /// Draw both metric stacks beside `face.bounding_box`.
    ///
    /// Stops at the first catalog category missing from the face's scores
    /// and returns [`Error::MissingMeasurement`]; rows before it stay drawn.
    pub fn draw_face_metrics(&mut self, face: &Face, draw_face_id: bool) -> Result<(), Error> {
        tracing::trace!(id = face.id, bbox = ?face.bounding_box, "drawing face metrics");
        let mut rows = Vec::new();
        let result = self.plan_face(&mut rows, face, draw_face_id);
        self.paint(&rows);
        result
    }

    /// Occupant box, its matched cabin region and an id/region stack to the
    /// right of the box.
    pub fn draw_occupant_metrics(&mut self, occupant: &Occupant) {
        tracing::trace!(id = occupant.id, bbox = ?occupant.bounding_box, "drawing occupant metrics");
        self.draw_bounding_box_color(&occupant.bounding_box, OCCUPANT_COLOR);
        self.draw_polygon(&occupant.region.vertices, OCCUPANT_COLOR);
        let rows = self.plan_occupant(occupant);
        self.paint(&rows);
    }

    /// Object box and region in a per-type color, plus id/type/confidence.
    pub fn draw_object_metrics(&mut self, object: &Object) -> Result<(), Error> {
        tracing::trace!(id = object.id, bbox = ?object.bounding_box, "drawing object metrics");
        let color = object_color(object.kind);
        self.draw_bounding_box_color(&object.bounding_box, color);
        if let Some(region) = &object.region {
            self.draw_polygon(&region.vertices, color);
        }
        let rows = self.plan_object(object)?;
        self.paint(&rows);
        Ok(())
    }

    /// Everything in `scene`: landmarks, valence box and metrics for each
    /// face, then occupants, then objects.
    ///
    /// A subject with incomplete metrics stops only its own drawing; the
    /// rest of the scene is still drawn and the first error is returned.
    pub fn draw_scene(&mut self, scene: &Scene, draw_face_id: bool, draw_points: bool) -> Result<(), Error> {
        let mut first_err = None;
        for face in &scene.faces {
            if let Err(e) = self.draw_face(face, draw_face_id, draw_points) {
                tracing::debug!(id = face.id, error = %e, "face skipped");
                first_err.get_or_insert(e);
            }
        }
        for occupant in &scene.occupants {
            self.draw_occupant_metrics(occupant);
        }
        for object in &scene.objects {
            if let Err(e) = self.draw_object_metrics(object) {
                tracing::debug!(id = object.id, error = %e, "object skipped");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn draw_face(&mut self, face: &Face, draw_face_id: bool, draw_points: bool) -> Result<(), Error> {
        if draw_points {
            self.draw_points(&face.points);
        }
        let valence = lookup(&face.emotions, &Emotion::Valence, "valence")?;
        self.draw_bounding_box(&face.bounding_box, valence);
        self.draw_face_metrics(face, draw_face_id)
    }

    /// Rows for one face, in drawing order. On error `rows` holds everything
    /// planned before the missing category.
    pub fn plan_face(&self, rows: &mut Vec<Row>, face: &Face, draw_face_id: bool) -> Result<(), Error> {
        let bbox = face.bounding_box;
        let top = bbox.top_left.y;

        // Right side: left-justified against the box's right edge.
        let right_x = bbox.bottom_right.x;
        let mut right = LayoutCursor::new(top, self.spacing);
        for &(expression, name) in &self.catalog.expressions {
            let value = lookup(&face.expressions, &expression, name)?;
            rows.push(self.classifier_row(name, value, Point::new(right_x, right.advance()), false));
        }
        self.plan_head_orientation(rows, &face.measurements, right_x, &mut right, false, Color::WHITE)?;

        // Left side: right-justified against the box's left edge.
        let left_x = bbox.top_left.x;
        let mut left = LayoutCursor::new(top, self.spacing);
        if draw_face_id {
            rows.push(text_row("ID", face.id.to_string(), Point::new(left_x, left.advance()), true));
        }
        for &(emotion, name) in &self.catalog.emotions {
            let value = lookup(&face.emotions, &emotion, name)?;
            rows.push(self.classifier_row(name, value, Point::new(left_x, left.advance()), true));
        }

        let mood = label(&self.catalog.moods, &face.mood, "mood")?;
        rows.push(text_row("mood", mood.to_string(), Point::new(left_x, left.advance()), true));

        rows.push(text_row(
            "identity",
            sentinel_label(face.identity.id),
            Point::new(left_x, left.advance()),
            true,
        ));
        rows.push(self.classifier_row(
            "identity_confidence",
            face.identity.confidence,
            Point::new(left_x, left.advance()),
            true,
        ));

        rows.push(text_row("age", sentinel_label(face.age.years), Point::new(left_x, left.advance()), true));
        rows.push(self.classifier_row(
            "age_confidence",
            face.age.confidence,
            Point::new(left_x, left.advance()),
            true,
        ));

        let category = label(&self.catalog.age_categories, &face.age_category, "age_category")?;
        rows.push(text_row(
            "age_category",
            category.to_string(),
            Point::new(left_x, left.advance()),
            true,
        ));
        Ok(())
    }

    /// Rows for one occupant: id, region id and region confidence.
    pub fn plan_occupant(&self, occupant: &Occupant) -> Vec<Row> {
        let x = occupant.bounding_box.bottom_right.x;
        let mut cursor = LayoutCursor::new(occupant.bounding_box.top_left.y, self.spacing);
        vec![
            text_row("occupant_id", occupant.id.to_string(), Point::new(x, cursor.advance()), false),
            text_row("region_id", sentinel_label(occupant.region.id), Point::new(x, cursor.advance()), false),
            self.classifier_row(
                "region_confidence",
                occupant.region_confidence,
                Point::new(x, cursor.advance()),
                false,
            ),
        ]
    }

    /// Rows for one object: id, type label and confidence.
    pub fn plan_object(&self, object: &Object) -> Result<Vec<Row>, Error> {
        let x = object.bounding_box.bottom_right.x;
        let mut cursor = LayoutCursor::new(object.bounding_box.top_left.y, self.spacing);
        let kind = label(&self.catalog.object_types, &object.kind, "type")?;
        Ok(vec![
            text_row("object_id", object.id.to_string(), Point::new(x, cursor.advance()), false),
            text_row("type", kind.to_string(), Point::new(x, cursor.advance()), false),
            self.classifier_row("confidence", object.confidence, Point::new(x, cursor.advance()), false),
        ])
    }

    fn plan_head_orientation(
        &self,
        rows: &mut Vec<Row>,
        angles: &HashMap<Measurement, f32>,
        x: i32,
        cursor: &mut LayoutCursor,
        align_right: bool,
        color: Color,
    ) -> Result<(), Error> {
        for &(measurement, name) in &self.catalog.head_angles {
            let value = lookup(angles, &measurement, name)?;
            rows.push(Row {
                anchor: Point::new(x, cursor.advance()),
                align_right,
                content: RowContent::Text {
                    name,
                    value: format!("{value:3.1}"),
                    color,
                },
            });
        }
        Ok(())
    }

    /// Gauge or number for a classifier score, per the metric policy.
    fn classifier_row(&self, name: &'static str, value: f32, anchor: Point, align_right: bool) -> Row {
        let content = match self.policy.resolve(name, value) {
            Rendered::Text(value) => RowContent::Text {
                name,
                value,
                color: Color::WHITE,
            },
            Rendered::Gauge { magnitude, color } => RowContent::Gauge { name, magnitude, color },
        };
        Row {
            anchor,
            align_right,
            content,
        }
    }

    fn paint(&mut self, rows: &[Row]) {
        for row in rows {
            row.paint(&mut self.img);
        }
    }
}

fn text_row(name: &'static str, value: String, anchor: Point, align_right: bool) -> Row {
    Row {
        anchor,
        align_right,
        content: RowContent::Text {
            name,
            value,
            color: Color::WHITE,
        },
    }
}

fn lookup<K: Eq + Hash>(scores: &HashMap<K, f32>, key: &K, category: &'static str) -> Result<f32, Error> {
    scores
        .get(key)
        .copied()
        .ok_or(Error::MissingMeasurement { category })
}

fn label<K: Eq + Hash>(
    labels: &HashMap<K, &'static str>,
    key: &K,
    category: &'static str,
) -> Result<&'static str, Error> {
    labels
        .get(key)
        .copied()
        .ok_or(Error::MissingMeasurement { category })
}

fn object_color(kind: ObjectType) -> Color {
    match kind {
        ObjectType::Phone => Color::rgb(255, 0, 255),
        ObjectType::ChildSeat => Color::rgb(255, 255, 0),
        ObjectType::Unknown => Color::WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Headless;
    use crate::hud::{BLOCK_HEIGHT, BLOCK_WIDTH, lit_blocks};
    use crate::metrics::{AgeCategory, AgeMetric, CabinRegion, IdentityMetric, Mood};
    use image::Rgba;

    fn face() -> Face {
        let catalog = Catalog::default();
        Face {
            id: 7,
            bounding_box: BoundingBox::new(Point::new(400, 100), Point::new(600, 400)),
            points: vec![Point::new(450, 200), Point::new(550, 200)],
            expressions: catalog.expressions.iter().map(|&(e, _)| (e, 0.0)).collect(),
            emotions: catalog.emotions.iter().map(|&(e, _)| (e, 0.0)).collect(),
            measurements: catalog.head_angles.iter().map(|&(m, _)| (m, 0.0)).collect(),
            identity: IdentityMetric { id: -1, confidence: 0.8 },
            age: AgeMetric { years: 31, confidence: 0.5 },
            age_category: AgeCategory::Adult,
            mood: Mood::Positive,
            dominant_emotion: Default::default(),
        }
    }

    fn visualizer() -> Visualizer {
        let mut vis = Visualizer::new(&HudConfig::default(), None);
        vis.update_image(FrameBuffer::filled(1280, 720, Color::BLACK));
        vis
    }

    fn planned(vis: &Visualizer, face: &Face) -> Vec<Row> {
        let mut rows = Vec::new();
        vis.plan_face(&mut rows, face, false).unwrap();
        rows
    }

    fn find<'a>(rows: &'a [Row], wanted: &str) -> &'a Row {
        rows.iter()
            .find(|r| match &r.content {
                RowContent::Text { name, .. } | RowContent::Gauge { name, .. } => *name == wanted,
            })
            .unwrap_or_else(|| panic!("no row named {wanted}"))
    }

    #[test]
    fn test_stack_order_and_spacing() {
        let vis = visualizer();
        let f = face();
        let rows = planned(&vis, &f);

        let right: Vec<_> = rows.iter().filter(|r| !r.align_right).collect();
        let left: Vec<_> = rows.iter().filter(|r| r.align_right).collect();
        assert_eq!(right.len(), 14 + 3);
        assert_eq!(left.len(), 8 + 6);

        for (i, row) in right.iter().enumerate() {
            assert_eq!(row.anchor, Point::new(600, 100 + 20 * (i as i32 + 1)));
        }
        for (i, row) in left.iter().enumerate() {
            assert_eq!(row.anchor, Point::new(400, 100 + 20 * (i as i32 + 1)));
        }
        assert_eq!(find(&rows, "smile").anchor.y, 120);
        assert_eq!(find(&rows, "roll").anchor.y, 100 + 20 * 17);
        assert_eq!(find(&rows, "joy").anchor.y, 120);
        assert_eq!(find(&rows, "age_category").anchor.y, 100 + 20 * 14);
    }

    #[test]
    fn test_unknown_identity_scenario() {
        let vis = visualizer();
        let mut f = face();
        f.bounding_box = BoundingBox::new(Point::new(100, 100), Point::new(300, 400));
        let rows = planned(&vis, &f);
        assert_eq!(
            find(&rows, "identity").content,
            RowContent::Text { name: "identity", value: "UNKNOWN".into(), color: Color::WHITE }
        );
        let RowContent::Gauge { magnitude, .. } = find(&rows, "identity_confidence").content else {
            panic!("identity confidence must be a gauge");
        };
        assert_eq!(magnitude, 80.0);
        assert_eq!(lit_blocks(magnitude), 8);
        assert!(rows.iter().all(|r| match &r.content {
            RowContent::Text { value, .. } => value != "-1",
            _ => true,
        }));
    }

    #[test]
    fn test_known_age_is_numeric() {
        let vis = visualizer();
        let rows = planned(&vis, &face());
        assert_eq!(
            find(&rows, "age").content,
            RowContent::Text { name: "age", value: "31".into(), color: Color::WHITE }
        );
        assert_eq!(
            find(&rows, "mood").content,
            RowContent::Text { name: "mood", value: "POSITIVE".into(), color: Color::WHITE }
        );
        assert_eq!(
            find(&rows, "age_category").content,
            RowContent::Text { name: "age_category", value: "ADULT".into(), color: Color::WHITE }
        );
    }

    #[test]
    fn test_blink_lights_every_block() {
        let mut vis = visualizer();
        let mut f = face();
        f.expressions.insert(crate::metrics::Expression::Blink, 1.0);
        let rows = planned(&vis, &f);
        let blink = find(&rows, "blink").clone();
        assert_eq!(
            blink.content,
            RowContent::Gauge { name: "blink", magnitude: 100.0, color: Color::WHITE }
        );

        vis.draw_face_metrics(&f, false).unwrap();
        let img = vis.image_data();
        for k in 0..10 {
            let x = (blink.anchor.x + k * 10 + BLOCK_WIDTH / 2) as usize;
            let y = (blink.anchor.y - BLOCK_HEIGHT / 2) as usize;
            assert_eq!(img.get(x, y), Color::rgb(204, 204, 204), "block {k}");
        }
    }

    #[test]
    fn test_valence_scenario() {
        let mut vis = visualizer();
        let mut f = face();
        f.emotions.insert(Emotion::Valence, -50.0);
        let rows = planned(&vis, &f);
        assert_eq!(
            find(&rows, "valence").content,
            RowContent::Gauge { name: "valence", magnitude: 50.0, color: VALENCE_RAMP.color(-50.0) }
        );

        vis.draw_bounding_box(&f.bounding_box, -50.0);
        assert_eq!(vis.image_data().get(400, 250), Color::rgb(191, 63, 0));
    }

    #[test]
    fn test_blink_rate_is_text() {
        let vis = visualizer();
        let mut f = face();
        f.expressions.insert(crate::metrics::Expression::BlinkRate, 12.0);
        let rows = planned(&vis, &f);
        assert_eq!(
            find(&rows, "blinkRate").content,
            RowContent::Text { name: "blinkRate", value: "12.0".into(), color: Color::WHITE }
        );
        assert_eq!(
            find(&rows, "pitch").content,
            RowContent::Text { name: "pitch", value: "0.0".into(), color: Color::WHITE }
        );
    }

    #[test]
    fn test_face_id_row_shifts_left_stack() {
        let vis = visualizer();
        let mut rows = Vec::new();
        vis.plan_face(&mut rows, &face(), true).unwrap();
        assert_eq!(
            find(&rows, "ID").content,
            RowContent::Text { name: "ID", value: "7".into(), color: Color::WHITE }
        );
        assert_eq!(find(&rows, "ID").anchor.y, 120);
        assert_eq!(find(&rows, "joy").anchor.y, 140);
    }

    #[test]
    fn test_missing_measurement_fails_fast() {
        let mut vis = visualizer();
        let mut f = face();
        f.expressions.remove(&crate::metrics::Expression::MouthOpen);
        let err = vis.draw_face_metrics(&f, false).unwrap_err();
        assert!(matches!(err, Error::MissingMeasurement { category: "mouthOpen" }));

        let mut rows = Vec::new();
        assert!(vis.plan_face(&mut rows, &f, false).is_err());
        // smile..upperLipRaise were planned before the gap
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_missing_head_angle() {
        let mut vis = visualizer();
        let mut f = face();
        f.measurements.remove(&Measurement::Yaw);
        let mut cursor = LayoutCursor::new(0, 20);
        let err = vis
            .draw_head_orientation(&f.measurements, 10, &mut cursor, false, Color::WHITE)
            .unwrap_err();
        assert!(matches!(err, Error::MissingMeasurement { category: "yaw" }));
        // only pitch got a row
        assert_eq!(cursor.y(), 20);
    }

    #[test]
    fn test_subject_near_frame_edge() {
        let mut vis = visualizer();
        let mut f = face();
        f.bounding_box = BoundingBox::new(Point::new(-50, 650), Point::new(1300, 900));
        f.points = vec![Point::new(-10, -10), Point::new(5000, 5000)];
        vis.draw_points(&f.points);
        vis.draw_bounding_box(&f.bounding_box, 0.0);
        vis.draw_face_metrics(&f, true).unwrap();
    }

    #[test]
    fn test_occupant_rows() {
        let vis = visualizer();
        let occupant = Occupant {
            id: 2,
            bounding_box: BoundingBox::new(Point::new(10, 10), Point::new(110, 210)),
            region: CabinRegion { id: -1, vertices: vec![] },
            region_confidence: 0.5,
        };
        let rows = vis.plan_occupant(&occupant);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1].content,
            RowContent::Text { name: "region_id", value: "UNKNOWN".into(), color: Color::WHITE }
        );
        assert_eq!(
            rows[2].content,
            RowContent::Gauge { name: "region_confidence", magnitude: 50.0, color: Color::WHITE }
        );
        assert!(rows.iter().all(|r| r.anchor.x == 110 && !r.align_right));
    }

    #[test]
    fn test_draw_occupant_outlines_box_and_region() {
        let mut vis = visualizer();
        let occupant = Occupant {
            id: 2,
            bounding_box: BoundingBox::new(Point::new(10, 10), Point::new(110, 210)),
            region: CabinRegion {
                id: 4,
                vertices: vec![Point::new(300, 300), Point::new(400, 300), Point::new(400, 400)],
            },
            region_confidence: 0.5,
        };
        vis.draw_occupant_metrics(&occupant);
        assert_eq!(vis.image_data().get(10, 100), OCCUPANT_COLOR);
        assert!((298..=302).any(|y| vis.image_data().get(350, y) == OCCUPANT_COLOR));
    }

    #[test]
    fn test_object_rows() {
        let mut vis = visualizer();
        let object = Object {
            id: 9,
            bounding_box: BoundingBox::new(Point::new(700, 300), Point::new(760, 340)),
            kind: ObjectType::Phone,
            confidence: 0.9,
            region: None,
        };
        let rows = vis.plan_object(&object).unwrap();
        assert_eq!(
            rows[1].content,
            RowContent::Text { name: "type", value: "PHONE".into(), color: Color::WHITE }
        );
        let RowContent::Gauge { magnitude, .. } = rows[2].content else {
            panic!("confidence must be a gauge");
        };
        assert_eq!(lit_blocks(magnitude), 9);

        vis.draw_object_metrics(&object).unwrap();
        assert_eq!(vis.image_data().get(730, 300), Color::rgb(255, 0, 255));
    }

    #[test]
    fn test_incomplete_face_leaves_rest_of_scene_drawn() {
        let mut vis = visualizer();
        let mut broken = face();
        broken.expressions.remove(&crate::metrics::Expression::Smile);
        let object = Object {
            id: 9,
            bounding_box: BoundingBox::new(Point::new(700, 300), Point::new(760, 340)),
            kind: ObjectType::Phone,
            confidence: 0.9,
            region: None,
        };
        let mut second = face();
        second.bounding_box = BoundingBox::new(Point::new(400, 450), Point::new(600, 700));
        let scene = Scene {
            faces: vec![broken, second],
            objects: vec![object],
            ..Default::default()
        };

        let err = vis.draw_scene(&scene, false, false).unwrap_err();
        assert!(matches!(err, Error::MissingMeasurement { category: "smile" }));
        assert_eq!(vis.image_data().get(730, 300), Color::rgb(255, 0, 255));
        // the second face still got its valence box
        assert_eq!(vis.image_data().get(500, 450), VALENCE_RAMP.color(0.0));
    }

    #[test]
    fn test_huge_bounding_box_clips_silently() {
        let mut vis = Visualizer::new(&HudConfig::default(), None);
        vis.update_image(FrameBuffer::filled(64, 64, Color::BLACK));
        let mut f = face();
        f.bounding_box = BoundingBox::new(Point::new(i32::MIN + 5, 0), Point::new(i32::MAX - 5, 10));
        f.points = vec![Point::new(i32::MIN, i32::MAX)];
        vis.draw_face_metrics(&f, true).unwrap();
        vis.draw_points(&f.points);
        vis.draw_bounding_box(&f.bounding_box, 0.0);
        vis.draw_polygon(&[Point::new(i32::MIN, 5), Point::new(i32::MAX, 5)], Color::WHITE);

        f.bounding_box = BoundingBox::new(Point::new(0, i32::MAX - 5), Point::new(10, i32::MAX));
        vis.draw_face_metrics(&f, true).unwrap();
        // the box's top edge crosses the whole frame
        assert_eq!(vis.image_data().get(32, 0), VALENCE_RAMP.color(0.0));
    }

    #[test]
    fn test_watermark_resized_once_across_frames() {
        let logo = RgbaImage::from_pixel(400, 200, Rgba([255, 255, 255, 255]));
        let mut vis = Visualizer::new(&HudConfig::default(), Some(logo));
        for _ in 0..3 {
            vis.update_image(FrameBuffer::filled(1280, 720, Color::BLACK));
            assert_eq!(vis.compositor().logo().unwrap().dimensions(), (320, 160));
        }
        // logo occupies x 950..1270, y 10..170
        assert_eq!(vis.image_data().get(1000, 100), Color::WHITE);
        assert_eq!(vis.image_data().get(900, 100), Color::BLACK);
    }

    #[test]
    fn test_show_image_presents_composed_frame() {
        let mut vis = visualizer();
        vis.draw_scene(
            &Scene {
                faces: vec![face()],
                ..Default::default()
            },
            false,
            true,
        )
        .unwrap();
        let mut sink = Headless::default();
        vis.show_image(&mut sink, Duration::from_millis(5)).unwrap();
        assert_eq!(sink.presented, 1);
        assert_eq!(sink.last.as_ref(), Some(vis.image_data()));
        assert_ne!(vis.image_data(), &FrameBuffer::filled(1280, 720, Color::BLACK));
    }
}
