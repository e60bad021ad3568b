//! # Score Normalizer
//! Maps raw classifier output onto one canonical
//! `{negative, neutral, positive, polarity}` record per text.
//!
//! Models emit labels in more than one naming convention; both recognized
//! schemes resolve to the same canonical classes, with semantic names
//! taking precedence over positional codes.

use serde::{Deserialize, Serialize};

/// One labeled probability as emitted by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Raw per-text classifier output: either the full class distribution, or
/// only the winning class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrediction {
    Distribution(Vec<LabelScore>),
    Top(LabelScore),
}

/// Canonical sentiment class, in positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Negative = 0,
    Neutral = 1,
    Positive = 2,
}

/// Recognized label naming schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelScheme {
    /// "negative" / "neutral" / "positive"
    Semantic,
    /// "LABEL_0" / "LABEL_1" / "LABEL_2"
    Positional,
}

fn parse_label(label: &str) -> Option<(Class, LabelScheme)> {
    match label.to_ascii_lowercase().as_str() {
        "negative" => Some((Class::Negative, LabelScheme::Semantic)),
        "neutral" => Some((Class::Neutral, LabelScheme::Semantic)),
        "positive" => Some((Class::Positive, LabelScheme::Semantic)),
        "label_0" => Some((Class::Negative, LabelScheme::Positional)),
        "label_1" => Some((Class::Neutral, LabelScheme::Positional)),
        "label_2" => Some((Class::Positive, LabelScheme::Positional)),
        _ => None,
    }
}

/// Canonical per-text score. `polarity == positive - negative`; the neutral
/// mass is deliberately left out of polarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub polarity: f64,
}

impl ScoreRecord {
    fn from_classes(negative: f64, neutral: f64, positive: f64) -> Self {
        Self {
            negative,
            neutral,
            positive,
            polarity: positive - negative,
        }
    }
}

/// Normalize one raw prediction.
pub fn normalize(raw: &RawPrediction) -> ScoreRecord {
    match raw {
        RawPrediction::Distribution(pairs) => {
            // Per class: semantic label wins over positional; missing
            // classes default to 0.0. First occurrence wins within a scheme.
            let mut semantic = [None::<f64>; 3];
            let mut positional = [None::<f64>; 3];
            for p in pairs {
                if let Some((class, scheme)) = parse_label(&p.label) {
                    let slot = match scheme {
                        LabelScheme::Semantic => &mut semantic,
                        LabelScheme::Positional => &mut positional,
                    };
                    slot[class as usize].get_or_insert(p.score);
                }
            }
            let pick =
                |c: Class| semantic[c as usize].or(positional[c as usize]).unwrap_or(0.0);
            ScoreRecord::from_classes(
                pick(Class::Negative),
                pick(Class::Neutral),
                pick(Class::Positive),
            )
        }
        RawPrediction::Top(top) => {
            // Hard classification: the named class takes the whole mass;
            // an unrecognized label degrades to neutral.
            let class = parse_label(&top.label)
                .map(|(c, _)| c)
                .unwrap_or(Class::Neutral);
            let one_hot = |c: Class| if c == class { 1.0 } else { 0.0 };
            ScoreRecord::from_classes(
                one_hot(Class::Negative),
                one_hot(Class::Neutral),
                one_hot(Class::Positive),
            )
        }
    }
}

/// Normalize a batch, preserving input order. Empty in, empty out.
pub fn normalize_batch(raw: &[RawPrediction]) -> Vec<ScoreRecord> {
    raw.iter().map(normalize).collect()
}
