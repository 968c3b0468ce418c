use crate::config::AnalysisConfig;
use crate::error::EmotionArcError;
use crate::pipeline::defaults::NeutralComplement;
use crate::pipeline::runtime::{EmotionArc, EmotionArcParts};
use crate::pipeline::traits::{EmotionScorer, IntensityMeasure};

pub struct EmotionArcBuilder {
    config: AnalysisConfig,
    scorer: Option<Box<dyn EmotionScorer>>,
    intensity_measure: Option<Box<dyn IntensityMeasure>>,
}

impl EmotionArcBuilder {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            scorer: None,
            intensity_measure: None,
        }
    }

    pub fn with_scorer(mut self, scorer: Box<dyn EmotionScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn with_intensity_measure(mut self, intensity_measure: Box<dyn IntensityMeasure>) -> Self {
        self.intensity_measure = Some(intensity_measure);
        self
    }

    pub fn build(self) -> Result<EmotionArc, EmotionArcError> {
        self.config.validate()?;
        let scorer = self
            .scorer
            .ok_or_else(|| EmotionArcError::invalid_input("an emotion scorer is required"))?;
        tracing::info!(
            scorer = scorer.name().as_str(),
            num_bins = self.config.num_bins,
            empty_bin_value = self.config.empty_bin_value,
            "pipeline: built emotion arc"
        );

        let intensity_measure = self.intensity_measure.unwrap_or_else(|| {
            Box::new(NeutralComplement::new(self.config.reference_label.clone()))
        });
        Ok(EmotionArc::from_parts(EmotionArcParts {
            config: self.config,
            scorer,
            intensity_measure,
        }))
    }
}
