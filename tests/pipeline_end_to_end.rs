use std::collections::HashMap;

use emotion_arc_rs::{
    build_heatmap_report, build_trajectory_report, AnalysisConfig, EmotionArcBuilder,
    EmotionScoreSet, PrecomputedScorer, SubtitleDocument,
};

const QUARTERS: &str = "1
00:00:01,000 --> 00:00:03,000
We won!

2
00:00:04,000 --> 00:00:08,000
Please pass the salt.
";

const SINGLE: &str = "5
00:00:00,000 --> 00:01:00,000
I am so scared of the dark.
";

fn scorer() -> PrecomputedScorer {
    let mut scores = HashMap::new();
    scores.insert(
        "We won!".to_string(),
        EmotionScoreSet::from_pairs([("joy", 0.75), ("neutral", 0.25)]),
    );
    scores.insert(
        "Please pass the salt.".to_string(),
        EmotionScoreSet::from_pairs([("neutral", 1.0)]),
    );
    scores.insert(
        "I am so scared of the dark.".to_string(),
        EmotionScoreSet::from_pairs([("fear", 0.5), ("sadness", 0.25), ("neutral", 0.25)]),
    );
    PrecomputedScorer::new(scores)
}

#[test]
fn two_cues_at_quarter_points_fill_bins_one_and_three() {
    let config = AnalysisConfig {
        num_bins: 4,
        aggregate_window: 2,
        ..AnalysisConfig::default()
    };
    let arc = EmotionArcBuilder::new(config)
        .with_scorer(Box::new(scorer()))
        .build()
        .unwrap();

    let analysis = arc.analyze_text("quarters.srt", QUARTERS).unwrap();
    assert_eq!(analysis.binned.values, vec![0.2, 0.75, 0.2, 0.0]);
    assert_eq!(analysis.binned.counts, vec![0, 1, 0, 1]);

    let neutral = &analysis.series[0];
    assert_eq!(neutral.label, "neutral");
    let progressions: Vec<f64> = neutral.points.iter().map(|p| p.progression).collect();
    assert_eq!(progressions, vec![25.0, 75.0]);
    let joy = analysis.series.iter().find(|s| s.label == "joy").unwrap();
    assert_eq!(joy.points.len(), 1);
}

#[test]
fn heatmap_over_documents_of_different_length() {
    let config = AnalysisConfig {
        num_bins: 4,
        aggregate_window: 2,
        ..AnalysisConfig::default()
    };
    let arc = EmotionArcBuilder::new(config)
        .with_scorer(Box::new(scorer()))
        .build()
        .unwrap();
    let documents = vec![
        SubtitleDocument {
            name: "quarters.srt".to_string(),
            content: QUARTERS.to_string(),
        },
        SubtitleDocument {
            name: "single.srt".to_string(),
            content: SINGLE.to_string(),
        },
        SubtitleDocument {
            name: "broken.srt".to_string(),
            content: "1\n00:00:00,000 --> 00:00:02,000\nUnscored line\n".to_string(),
        },
    ];

    let batch = arc.analyze_batch(&documents);
    assert_eq!(batch.documents.len(), 2);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].name, "broken.srt");

    let report =
        build_heatmap_report(&batch, arc.config(), &arc.scorer_name(), "now".to_string()).unwrap();
    // single.srt: one cue with midpoint at 50% lands in bin 2.
    assert_eq!(report.documents[1].values, vec![0.2, 0.2, 0.75, 0.2]);
    let aggregate = report.aggregate.as_ref().unwrap();
    assert_eq!(aggregate.mean.len(), 4);
    assert_eq!(aggregate.mean, vec![0.2, 0.475, 0.475, 0.1]);
    assert_eq!(aggregate.smoothed.len(), 3);
    assert_eq!(aggregate.positions, vec![0.5, 1.5, 2.5]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["meta"]["failure_count"], 1);
    assert_eq!(json["documents"][0]["counts"][1], 1);
}

#[test]
fn trajectory_report_orders_neutral_first() {
    let config = AnalysisConfig {
        series_window: 1,
        ..AnalysisConfig::default()
    };
    let arc = EmotionArcBuilder::new(config)
        .with_scorer(Box::new(scorer()))
        .build()
        .unwrap();
    let analysis = arc.analyze_text("single.srt", SINGLE).unwrap();
    let report = build_trajectory_report(&analysis, arc.config(), "precomputed", "now".into());
    let labels: Vec<&str> = report.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["neutral", "fear", "sadness"]);
    assert_eq!(report.series[1].smoothed, report.series[1].raw);
    assert_eq!(report.binned.values.len(), AnalysisConfig::DEFAULT_NUM_BINS);
}
