use crate::error::EmotionArcError;
use crate::types::EmotionScoreSet;

/// Text classifier boundary: maps a cue's text to label scores in `[0, 1]`.
///
/// Implementations may omit labels for a given text. `score_batch` must return
/// one score set per input text, in input order.
pub trait EmotionScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<EmotionScoreSet, EmotionArcError>;

    fn score_batch(&self, texts: &[&str]) -> Result<Vec<EmotionScoreSet>, EmotionArcError> {
        texts.iter().map(|text| self.score(text)).collect()
    }

    fn name(&self) -> String;
}

/// Reduces a cue's score set to the scalar used in binned mode.
pub trait IntensityMeasure: Send + Sync {
    fn intensity(&self, scores: &EmotionScoreSet) -> f64;
}
