// Which measurements are drawn, in which order, under which label, and how.
//
// The ordered lists are the on-screen stacking order and must stay `Vec`s.
// The per-category render policy lives in one lookup table so the special
// cases (rate shown as a number, 0/1 flag shown as a percentage, signed
// valence colored by sign but sized by magnitude) can be read in one place.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::color::{VALENCE_RAMP, WHITE_YELLOW_RAMP};
use crate::metrics::{AgeCategory, DominantEmotion, Emotion, Expression, Measurement, Mood, ObjectType, SENTINEL};
use crate::types::Color;

/// Fixed labels and orderings for everything the HUD can show.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub expressions: Vec<(Expression, &'static str)>,
    pub emotions: Vec<(Emotion, &'static str)>,
    pub head_angles: Vec<(Measurement, &'static str)>,
    /// Not drawn by the default face layout.
    pub dominant_emotions: HashMap<DominantEmotion, &'static str>,
    pub moods: HashMap<Mood, &'static str>,
    pub age_categories: HashMap<AgeCategory, &'static str>,
    pub object_types: HashMap<ObjectType, &'static str>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            expressions: vec![
                (Expression::Smile, "smile"),
                (Expression::BrowRaise, "browRaise"),
                (Expression::BrowFurrow, "browFurrow"),
                (Expression::NoseWrinkle, "noseWrinkle"),
                (Expression::UpperLipRaise, "upperLipRaise"),
                (Expression::MouthOpen, "mouthOpen"),
                (Expression::EyeClosure, "eyeClosure"),
                (Expression::CheekRaise, "cheekRaise"),
                (Expression::Yawn, "yawn"),
                (Expression::Blink, "blink"),
                (Expression::BlinkRate, "blinkRate"),
                (Expression::EyeWiden, "eyeWiden"),
                (Expression::InnerBrowRaise, "innerBrowRaise"),
                (Expression::LipCornerDepressor, "lipCornerDepressor"),
            ],
            // contempt is scored but not displayed
            emotions: vec![
                (Emotion::Joy, "joy"),
                (Emotion::Anger, "anger"),
                (Emotion::Surprise, "surprise"),
                (Emotion::Valence, "valence"),
                (Emotion::Fear, "fear"),
                (Emotion::Sadness, "sadness"),
                (Emotion::Disgust, "disgust"),
                (Emotion::Neutral, "neutral"),
            ],
            head_angles: vec![
                (Measurement::Pitch, "pitch"),
                (Measurement::Yaw, "yaw"),
                (Measurement::Roll, "roll"),
            ],
            dominant_emotions: HashMap::from([
                (DominantEmotion::Unknown, "unknown"),
                (DominantEmotion::Neutral, "neutral"),
                (DominantEmotion::Joy, "joy"),
                (DominantEmotion::Anger, "anger"),
                (DominantEmotion::Surprise, "surprise"),
                (DominantEmotion::Sadness, "sadness"),
                (DominantEmotion::Disgust, "disgust"),
                (DominantEmotion::Fear, "fear"),
            ]),
            moods: HashMap::from([
                (Mood::Unknown, "UNKNOWN"),
                (Mood::Neutral, "NEUTRAL"),
                (Mood::Negative, "NEGATIVE"),
                (Mood::Positive, "POSITIVE"),
            ]),
            age_categories: HashMap::from([
                (AgeCategory::Unknown, "UNKNOWN"),
                (AgeCategory::Baby, "BABY"),
                (AgeCategory::Child, "CHILD"),
                (AgeCategory::Teen, "TEEN"),
                (AgeCategory::Adult, "ADULT"),
            ]),
            object_types: HashMap::from([
                (ObjectType::Unknown, "UNKNOWN"),
                (ObjectType::Phone, "PHONE"),
                (ObjectType::ChildSeat, "CHILD_SEAT"),
            ]),
        }
    }
}

/// `"UNKNOWN"` for the sentinel, the number otherwise.
pub fn sentinel_label(value: i32) -> String {
    if value == SENTINEL {
        "UNKNOWN".to_string()
    } else {
        value.to_string()
    }
}

/// Color for plain gauges that have no category-specific color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeColor {
    /// Always white.
    #[default]
    Neutral,
    /// White at 0 % fading to yellow at 100 %.
    Ramp,
}

/// How a single named measurement is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderStrategy {
    /// One-decimal number instead of a gauge.
    Number,
    /// Gauge of `value * scale` percent.
    Gauge { scale: f32 },
    /// Signed -100..100 value: gauge of `|value|`, colored by the signed value.
    SignedGauge,
}

/// What the metric renderer should actually draw for one measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    Gauge { magnitude: f32, color: Color },
}

/// Category name -> strategy table plus the static color classes.
#[derive(Debug, Clone)]
pub struct MetricPolicy {
    strategies: HashMap<&'static str, RenderStrategy>,
    red: HashSet<String>,
    green: HashSet<String>,
    gauge_color: GaugeColor,
}

impl Default for MetricPolicy {
    fn default() -> Self {
        Self::new(["anger".to_string()], ["joy".to_string()], GaugeColor::Neutral)
    }
}

impl MetricPolicy {
    /// Policy with the given red/green gauge sets. `gauge_color` applies to
    /// every other plain gauge.
    pub fn new(
        red: impl IntoIterator<Item = String>,
        green: impl IntoIterator<Item = String>,
        gauge_color: GaugeColor,
    ) -> Self {
        let strategies = HashMap::from([
            ("blinkRate", RenderStrategy::Number),
            // 0/1 flag, shown as 0 % / 100 %
            ("blink", RenderStrategy::Gauge { scale: 100.0 }),
            ("valence", RenderStrategy::SignedGauge),
            // confidences arrive as 0..1
            ("identity_confidence", RenderStrategy::Gauge { scale: 100.0 }),
            ("age_confidence", RenderStrategy::Gauge { scale: 100.0 }),
            ("region_confidence", RenderStrategy::Gauge { scale: 100.0 }),
            ("confidence", RenderStrategy::Gauge { scale: 100.0 }),
        ]);
        Self {
            strategies,
            red: red.into_iter().collect(),
            green: green.into_iter().collect(),
            gauge_color,
        }
    }

    /// How `name` is drawn; unlisted names are plain 0..100 gauges.
    pub fn strategy(&self, name: &str) -> RenderStrategy {
        self.strategies
            .get(name)
            .copied()
            .unwrap_or(RenderStrategy::Gauge { scale: 1.0 })
    }

    /// Apply the strategy and color rules for `name` to a raw score.
    pub fn resolve(&self, name: &str, value: f32) -> Rendered {
        match self.strategy(name) {
            RenderStrategy::Number => Rendered::Text(format!("{value:3.1}")),
            RenderStrategy::SignedGauge => Rendered::Gauge {
                magnitude: value.abs(),
                color: VALENCE_RAMP.color(value),
            },
            RenderStrategy::Gauge { scale } => {
                let magnitude = value * scale;
                Rendered::Gauge {
                    magnitude,
                    color: self.gauge_color_for(name, magnitude),
                }
            }
        }
    }

    fn gauge_color_for(&self, name: &str, magnitude: f32) -> Color {
        if self.red.contains(name) {
            Color::RED
        } else if self.green.contains(name) {
            Color::GREEN
        } else {
            match self.gauge_color {
                GaugeColor::Neutral => Color::WHITE,
                GaugeColor::Ramp => WHITE_YELLOW_RAMP.color(magnitude),
            }
        }
    }
}
