use std::collections::HashMap;
use std::path::Path;

use crate::error::EmotionArcError;
use crate::pipeline::traits::{EmotionScorer, IntensityMeasure};
use crate::types::EmotionScoreSet;

/// Emotionality as `1 - score(label)`. A score set without the label counts
/// as 0.0 for it, i.e. fully emotional.
pub struct NeutralComplement {
    label: String,
}

impl NeutralComplement {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for NeutralComplement {
    fn default() -> Self {
        Self::new("neutral")
    }
}

impl IntensityMeasure for NeutralComplement {
    fn intensity(&self, scores: &EmotionScoreSet) -> f64 {
        1.0 - scores.get(&self.label).unwrap_or(0.0)
    }
}

/// Serves scores computed ahead of time by an external classifier, keyed by
/// cue text.
pub struct PrecomputedScorer {
    scores: HashMap<String, EmotionScoreSet>,
    fallback: Option<EmotionScoreSet>,
}

impl PrecomputedScorer {
    pub fn new(scores: HashMap<String, EmotionScoreSet>) -> Self {
        Self {
            scores,
            fallback: None,
        }
    }

    /// Loads a JSON object mapping text to a list of `{"label", "score"}`.
    pub fn from_json_file(path: &Path) -> Result<Self, EmotionArcError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| EmotionArcError::io("read score file", e))?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self, EmotionArcError> {
        let raw: HashMap<String, EmotionScoreSet> =
            serde_json::from_str(data).map_err(|e| EmotionArcError::json("parse score file", e))?;
        let scores = raw
            .into_iter()
            .map(|(text, set)| (normalize_key(&text), set))
            .collect::<HashMap<_, _>>();
        let scorer = Self::new(scores);
        if scorer.is_empty() {
            tracing::warn!("scorer: score file has no entries");
        } else {
            tracing::info!(entries = scorer.len(), "scorer: loaded precomputed scores");
        }
        Ok(scorer)
    }

    /// Score set returned for texts that have no precomputed entry.
    pub fn with_fallback(mut self, fallback: EmotionScoreSet) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

fn normalize_key(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl EmotionScorer for PrecomputedScorer {
    fn score(&self, text: &str) -> Result<EmotionScoreSet, EmotionArcError> {
        if let Some(set) = self.scores.get(&normalize_key(text)) {
            return Ok(set.clone());
        }
        match &self.fallback {
            Some(fallback) => {
                tracing::debug!(text, "scorer: no precomputed entry, using fallback");
                Ok(fallback.clone())
            }
            None => Err(EmotionArcError::scorer(
                self.name(),
                format!("no precomputed scores for text '{text}'"),
            )),
        }
    }

    fn name(&self) -> String {
        "precomputed".to_string()
    }
}
