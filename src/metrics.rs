// Per-frame subject data handed to the visualizer by the inference side:
// faces with their expression/emotion/head-pose scores, cabin occupants and
// detected objects. Nothing here outlives the frame it was produced for.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::types::{BoundingBox, Point};

/// Reserved id/years value meaning "not available".
pub const SENTINEL: i32 = -1;

/// Facial action scored 0..100 (blink is 0/1, blink rate per minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expression {
    Smile,
    BrowRaise,
    BrowFurrow,
    NoseWrinkle,
    UpperLipRaise,
    MouthOpen,
    EyeClosure,
    CheekRaise,
    Yawn,
    Blink,
    BlinkRate,
    EyeWiden,
    InnerBrowRaise,
    LipCornerDepressor,
}

/// Emotion score, 0..100 except valence (-100..100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Emotion {
    Joy,
    Anger,
    Surprise,
    Valence,
    Fear,
    Sadness,
    Disgust,
    Neutral,
    Contempt,
}

/// Head-pose angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Measurement {
    Pitch,
    Yaw,
    Roll,
}

/// Strongest emotion of the face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DominantEmotion {
    #[default]
    Unknown,
    Neutral,
    Joy,
    Anger,
    Surprise,
    Sadness,
    Disgust,
    Fear,
}

/// Overall mood class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    #[default]
    Unknown,
    Neutral,
    Negative,
    Positive,
}

/// Coarse age class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeCategory {
    #[default]
    Unknown,
    Baby,
    Child,
    Teen,
    Adult,
}

/// Kind of detected cabin object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectType {
    #[default]
    Unknown,
    Phone,
    ChildSeat,
}

/// Who the face is, if it was registered. `id == SENTINEL` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IdentityMetric {
    pub id: i32,
    /// 0..1
    pub confidence: f32,
}

/// Estimated age. `years == SENTINEL` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AgeMetric {
    pub years: i32,
    /// 0..1
    pub confidence: f32,
}

/// One tracked face and all its scores for this frame.
#[derive(Debug, Clone, Deserialize)]
pub struct Face {
    /// Tracking id, stable across frames while the face stays in view.
    pub id: i32,
    pub bounding_box: BoundingBox,
    /// Facial landmarks.
    #[serde(default)]
    pub points: Vec<Point>,
    pub expressions: HashMap<Expression, f32>,
    pub emotions: HashMap<Emotion, f32>,
    pub measurements: HashMap<Measurement, f32>,
    pub identity: IdentityMetric,
    pub age: AgeMetric,
    pub age_category: AgeCategory,
    pub mood: Mood,
    #[serde(default)]
    pub dominant_emotion: DominantEmotion,
}

/// Seat area of the cabin a subject was matched to. `id == SENTINEL` when
/// the subject is not in any known region.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CabinRegion {
    pub id: i32,
    #[serde(default)]
    pub vertices: Vec<Point>,
}

/// A person in the cabin, matched to a seat region.
#[derive(Debug, Clone, Deserialize)]
pub struct Occupant {
    pub id: i32,
    pub bounding_box: BoundingBox,
    pub region: CabinRegion,
    /// 0..1
    pub region_confidence: f32,
}

/// A detected object, optionally matched to a region.
#[derive(Debug, Clone, Deserialize)]
pub struct Object {
    pub id: i32,
    pub bounding_box: BoundingBox,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    /// 0..1
    pub confidence: f32,
    #[serde(default)]
    pub region: Option<CabinRegion>,
}

/// Everything detected in one frame.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub faces: Vec<Face>,
    pub occupants: Vec<Occupant>,
    pub objects: Vec<Object>,
}

impl Scene {
    /// Parse a scene from JSON text.
    pub fn from_json(src: &str) -> Result<Self, Error> {
        serde_json::from_str(src).map_err(|e| Error::Metrics(e.to_string()))
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let src = std::fs::read_to_string(path)?;
        Self::from_json(&src).map_err(|e| Error::Metrics(format!("{}: {e}", path.display())))
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.occupants.is_empty() && self.objects.is_empty()
    }
}
