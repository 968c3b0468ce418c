use serde::{Deserialize, Serialize};

/// Raw subtitle text and the name it is reported under.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleDocument {
    pub name: String,
    pub content: String,
}

/// A single subtitle entry. Times are seconds from the start of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    /// Document-local index as written in the source; not renumbered.
    pub index: i64,
    pub start: f64,
    pub end: f64,
    /// Cue text with line breaks collapsed to single spaces.
    pub text: String,
}

impl Cue {
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

/// Label/score pairs produced by a scorer for one text, in scorer order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionScoreSet {
    pub scores: Vec<EmotionScore>,
}

impl EmotionScoreSet {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            scores: pairs
                .into_iter()
                .map(|(label, score)| EmotionScore {
                    label: label.to_string(),
                    score,
                })
                .collect(),
        }
    }

    /// Score of the first entry with `label`, or `None` when the scorer omitted it.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.score)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.scores.iter().map(|entry| entry.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCue {
    pub cue: Cue,
    pub scores: EmotionScoreSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressionPoint {
    /// Cue midpoint as percent of document duration.
    pub progression: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionSeries {
    pub label: String,
    pub points: Vec<ProgressionPoint>,
}

/// Fixed-resolution emotionality vector for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedDocument {
    pub values: Vec<f64>,
    /// Cues assigned per bin; zero marks a bin holding the empty-bin value.
    pub counts: Vec<usize>,
    pub duration: f64,
}

impl BinnedDocument {
    pub fn is_populated(&self, bin: usize) -> bool {
        self.counts.get(bin).is_some_and(|&count| count > 0)
    }
}

/// Everything computed for one document by the analysis runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub name: String,
    pub cue_count: usize,
    pub duration: f64,
    pub series: Vec<EmotionSeries>,
    pub binned: BinnedDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentFailure {
    pub name: String,
    pub error: String,
}

/// Raw and smoothed cross-document mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateCurve {
    pub mean: Vec<f64>,
    pub smoothed: Vec<f64>,
    /// Bin positions smoothed with the same window as `smoothed`.
    pub positions: Vec<f64>,
}
