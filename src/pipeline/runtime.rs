use std::path::Path;

use rayon::prelude::*;

use crate::aggregation::{bin_intensities, build_series, AggregateMatrix};
use crate::config::AnalysisConfig;
use crate::error::EmotionArcError;
use crate::pipeline::traits::{EmotionScorer, IntensityMeasure};
use crate::subtitle::{document_duration, extract_cues, read_document};
use crate::types::{Cue, DocumentAnalysis, DocumentFailure, ScoredCue, SubtitleDocument};

pub struct EmotionArc {
    config: AnalysisConfig,
    scorer: Box<dyn EmotionScorer>,
    intensity_measure: Box<dyn IntensityMeasure>,
}

pub(crate) struct EmotionArcParts {
    pub config: AnalysisConfig,
    pub scorer: Box<dyn EmotionScorer>,
    pub intensity_measure: Box<dyn IntensityMeasure>,
}

/// Result of a multi-document run. Documents that failed are reported in
/// `failures`; they do not abort the rest of the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAnalysis {
    pub documents: Vec<DocumentAnalysis>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchAnalysis {
    /// Stacks the binned rows of every successful document, in batch order.
    pub fn matrix(&self, num_bins: usize) -> Result<AggregateMatrix, EmotionArcError> {
        let mut matrix = AggregateMatrix::new(num_bins);
        for doc in &self.documents {
            matrix.push_row(doc.name.clone(), doc.binned.values.clone())?;
        }
        Ok(matrix)
    }
}

impl EmotionArc {
    pub(crate) fn from_parts(parts: EmotionArcParts) -> Self {
        Self {
            config: parts.config,
            scorer: parts.scorer,
            intensity_measure: parts.intensity_measure,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn scorer_name(&self) -> String {
        self.scorer.name()
    }

    /// Scores cues in batches of `scorer_batch_size`, pairing each score set
    /// with its cue by position.
    pub fn score_cues(&self, cues: Vec<Cue>) -> Result<Vec<ScoredCue>, EmotionArcError> {
        let mut scored = Vec::with_capacity(cues.len());
        for chunk in cues.chunks(self.config.scorer_batch_size) {
            let texts: Vec<&str> = chunk.iter().map(|cue| cue.text.as_str()).collect();
            let score_sets = self.scorer.score_batch(&texts)?;
            if score_sets.len() != chunk.len() {
                return Err(EmotionArcError::scorer(
                    self.scorer.name(),
                    format!(
                        "returned {} score sets for {} texts",
                        score_sets.len(),
                        chunk.len()
                    ),
                ));
            }
            scored.extend(
                chunk
                    .iter()
                    .cloned()
                    .zip(score_sets)
                    .map(|(cue, scores)| ScoredCue { cue, scores }),
            );
        }
        Ok(scored)
    }

    pub fn analyze_text(
        &self,
        name: &str,
        content: &str,
    ) -> Result<DocumentAnalysis, EmotionArcError> {
        let cues = extract_cues(content)?;
        // Fail before paying for classification when the duration is undefined.
        let duration = document_duration(name, &cues)?;
        let cue_count = cues.len();
        let scored = self.score_cues(cues)?;

        let series = build_series(&scored, duration, &self.config.reference_label);
        let samples: Vec<(f64, f64)> = scored
            .iter()
            .map(|entry| {
                (
                    entry.cue.midpoint(),
                    self.intensity_measure.intensity(&entry.scores),
                )
            })
            .collect();
        let binned = bin_intensities(
            &samples,
            duration,
            self.config.num_bins,
            self.config.empty_bin_value,
        )?;

        tracing::info!(
            document = name,
            cue_count,
            duration_s = format!("{duration:.3}"),
            label_count = series.len(),
            "analysis: document complete"
        );
        Ok(DocumentAnalysis {
            name: name.to_string(),
            cue_count,
            duration,
            series,
            binned,
        })
    }

    /// Reads a subtitle file and analyzes it under its file name.
    pub fn analyze_path(&self, path: &Path) -> Result<DocumentAnalysis, EmotionArcError> {
        let content = read_document(path)?;
        self.analyze_text(&document_name(path), &content)
    }

    pub fn analyze_batch(&self, documents: &[SubtitleDocument]) -> BatchAnalysis {
        self.analyze_batch_with(documents, |_, _| {})
    }

    /// Analyzes documents in parallel. `on_done` is called once per document
    /// with its name and whether it succeeded; results keep input order.
    pub fn analyze_batch_with<F>(
        &self,
        documents: &[SubtitleDocument],
        on_done: F,
    ) -> BatchAnalysis
    where
        F: Fn(&str, bool) + Sync,
    {
        let results: Vec<Result<DocumentAnalysis, EmotionArcError>> = documents
            .par_iter()
            .map(|doc| {
                let result = self.analyze_text(&doc.name, &doc.content);
                on_done(&doc.name, result.is_ok());
                result
            })
            .collect();

        let mut batch = BatchAnalysis {
            documents: Vec::with_capacity(documents.len()),
            failures: Vec::new(),
        };
        for (doc, result) in documents.iter().zip(results) {
            match result {
                Ok(analysis) => batch.documents.push(analysis),
                Err(err) => {
                    tracing::warn!(
                        document = doc.name.as_str(),
                        error = %err,
                        "analysis: document failed"
                    );
                    batch.failures.push(DocumentFailure {
                        name: doc.name.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        batch
    }
}

/// Name a subtitle file is reported under: its file name, or the whole path
/// when it has none.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::pipeline::builder::EmotionArcBuilder;
    use crate::types::EmotionScoreSet;

    /// Scores every text as half neutral and records the size of each batch.
    struct RecordingBatchScorer {
        batch_sizes: Arc<Mutex<Vec<usize>>>,
    }

    impl EmotionScorer for RecordingBatchScorer {
        fn score(&self, _text: &str) -> Result<EmotionScoreSet, EmotionArcError> {
            Err(EmotionArcError::scorer(self.name(), "single-text path not used"))
        }

        fn score_batch(&self, texts: &[&str]) -> Result<Vec<EmotionScoreSet>, EmotionArcError> {
            self.batch_sizes.lock().unwrap().push(texts.len());
            Ok(texts
                .iter()
                .map(|_| EmotionScoreSet::from_pairs([("neutral", 0.5)]))
                .collect())
        }

        fn name(&self) -> String {
            "recording".to_string()
        }
    }

    /// Drops the last score set of any batch containing "truncate".
    struct TruncatingScorer;

    impl EmotionScorer for TruncatingScorer {
        fn score(&self, _text: &str) -> Result<EmotionScoreSet, EmotionArcError> {
            Ok(EmotionScoreSet::from_pairs([("neutral", 1.0)]))
        }

        fn score_batch(&self, texts: &[&str]) -> Result<Vec<EmotionScoreSet>, EmotionArcError> {
            let mut sets = texts
                .iter()
                .map(|text| self.score(text))
                .collect::<Result<Vec<_>, _>>()?;
            if texts.iter().any(|text| text.contains("truncate")) {
                sets.pop();
            }
            Ok(sets)
        }

        fn name(&self) -> String {
            "truncating".to_string()
        }
    }

    const THREE_CUES: &str = "1
00:00:00,000 --> 00:00:02,000
one

2
00:00:02,000 --> 00:00:04,000
two

3
00:00:04,000 --> 00:00:06,000
three
";

    fn small_batch_config() -> AnalysisConfig {
        AnalysisConfig {
            num_bins: 3,
            scorer_batch_size: 2,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn score_cues_calls_batch_scorer_in_configured_chunks() {
        let batch_sizes = Arc::new(Mutex::new(Vec::new()));
        let arc = EmotionArcBuilder::new(small_batch_config())
            .with_scorer(Box::new(RecordingBatchScorer {
                batch_sizes: Arc::clone(&batch_sizes),
            }))
            .build()
            .unwrap();

        let analysis = arc.analyze_text("three.srt", THREE_CUES).unwrap();
        assert_eq!(*batch_sizes.lock().unwrap(), vec![2, 1]);
        assert_eq!(analysis.cue_count, 3);
        assert_eq!(analysis.binned.counts, vec![1, 1, 1]);
        assert!(analysis
            .binned
            .values
            .iter()
            .all(|v| (v - 0.5).abs() < 1e-12));
    }

    #[test]
    fn short_batch_result_is_a_scorer_error() {
        let arc = EmotionArcBuilder::new(small_batch_config())
            .with_scorer(Box::new(TruncatingScorer))
            .build()
            .unwrap();
        let cues = extract_cues(
            "1\n00:00:00,000 --> 00:00:02,000\nplease truncate\n\n2\n00:00:02,000 --> 00:00:04,000\nok\n",
        )
        .unwrap();

        let err = arc.score_cues(cues).unwrap_err();
        match err {
            EmotionArcError::Scorer { scorer, message } => {
                assert_eq!(scorer, "truncating");
                assert_eq!(message, "returned 1 score sets for 2 texts");
            }
            other => panic!("expected scorer error, got {other:?}"),
        }
    }

    #[test]
    fn short_batch_result_fails_only_that_document() {
        let arc = EmotionArcBuilder::new(small_batch_config())
            .with_scorer(Box::new(TruncatingScorer))
            .build()
            .unwrap();
        let documents = vec![
            SubtitleDocument {
                name: "fine.srt".to_string(),
                content: THREE_CUES.to_string(),
            },
            SubtitleDocument {
                name: "short.srt".to_string(),
                content: "1\n00:00:00,000 --> 00:00:02,000\ntruncate me\n".to_string(),
            },
        ];

        let batch = arc.analyze_batch(&documents);
        assert_eq!(batch.documents.len(), 1);
        assert_eq!(batch.documents[0].name, "fine.srt");
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].name, "short.srt");
        assert!(batch.failures[0]
            .error
            .contains("returned 0 score sets for 1 texts"));
    }

    #[test]
    fn document_name_is_the_file_name() {
        assert_eq!(document_name(Path::new("subs/season1/ep01.srt")), "ep01.srt");
        assert_eq!(document_name(Path::new("ep02.srt")), "ep02.srt");
    }
}
