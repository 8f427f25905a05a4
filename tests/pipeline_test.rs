//! End-to-end properties of the analysis pipeline

use pyreview::classifier::{QualityClassifier, TRAINING_SAMPLES};
use pyreview::models::{FeatureVector, MetricsRecord, PredictionOutcome, QualityLabel, Rating};
use pyreview::scoring::feature_only_score;
use pyreview::Analyzer;

const SAMPLES: &[&str] = &[
    "",
    "x = 1\n",
    "def add(a: int, b: int) -> int:\n    \"\"\"Sum two ints.\"\"\"\n    return a + b\n",
    "a=1;b=2;c=3;d=4;e=5;f=6",
    "import os\n\nif __name__ == '__main__':\n    print([p for p in os.listdir('.')])\n",
    "class Stack:\n    def push(self, item):\n        self.items.append(item)\n\n    def pop(self):\n        return self.items.pop()\n",
    "def broken(:\n    pass\n",
    "eval(user_input)\n",
];

fn function_with_body(lines: usize) -> String {
    let mut source = String::from("def worker():\n");
    for i in 0..lines {
        source.push_str(&format!("    v{i} = {}\n", i % 10));
    }
    source
}

#[test]
fn test_scores_are_bounded_and_rated_consistently() {
    let analyzer = Analyzer::bootstrap().unwrap();
    for code in SAMPLES {
        let report = analyzer.analyze(code);
        let score = report.ml_prediction.quality_score();
        assert!((0.0..=100.0).contains(&score), "{code:?} scored {score}");
        assert_eq!(report.overall_score, score);
        if let PredictionOutcome::Scored(record) = &report.ml_prediction {
            assert_eq!(record.rating, Rating::from_score(score));
            assert_eq!(record.prediction, QualityLabel::from_score(score));
            assert!((0.0..=100.0).contains(&record.confidence));
        }
    }
}

#[test]
fn test_no_definitions_penalty_is_ten_feature_points() {
    let without = FeatureVector::default();
    let with = FeatureVector {
        num_functions: 1,
        ..FeatureVector::default()
    };
    for p in [0.0, 0.3, 1.0] {
        let delta = feature_only_score(&with, p) - feature_only_score(&without, p);
        assert!((delta - 6.0).abs() < 1e-9);
    }
}

#[test]
fn test_syntax_error_yields_single_fix_suggestion() {
    let analyzer = Analyzer::bootstrap().unwrap();
    let report = analyzer.analyze("for x in range(3)\n    print(x)\n");
    match &report.metrics {
        MetricsRecord::Failed {
            error,
            lines_of_code,
            ..
        } => {
            assert_eq!(error, "Syntax error in code");
            assert_eq!(*lines_of_code, 0);
        }
        MetricsRecord::Analyzed(_) => panic!("expected a syntax error"),
    }
    assert_eq!(report.suggestions.len(), 1);
    assert!(report.suggestions[0].starts_with("Fix syntax errors: "));

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["metrics"].get("code_smells").is_none());
}

#[test]
fn test_long_function_boundary() {
    let analyzer = Analyzer::bootstrap().unwrap();

    let flagged = analyzer.analyze(&function_with_body(51));
    let smells = &flagged.metrics.metrics().unwrap().code_smells;
    assert_eq!(smells, &vec!["Long function 'worker' (51 lines)".to_string()]);

    let fine = analyzer.analyze(&function_with_body(50));
    assert!(fine.metrics.metrics().unwrap().code_smells.is_empty());
}

#[test]
fn test_maintainability_suggestions_are_exclusive() {
    let analyzer = Analyzer::bootstrap().unwrap();
    let buckets = [
        "🔴 Low maintainability",
        "⚠️ Moderate maintainability",
        "✅ Good maintainability!",
    ];
    for code in SAMPLES {
        let report = analyzer.analyze(code);
        if report.metrics.is_error() {
            continue;
        }
        let hits = report
            .suggestions
            .iter()
            .filter(|s| buckets.iter().any(|b| s.starts_with(b)))
            .count();
        assert_eq!(hits, 1, "{code:?}: {:?}", report.suggestions);
    }
}

#[test]
fn test_analysis_is_deterministic() {
    let first = Analyzer::bootstrap().unwrap();
    let second = Analyzer::bootstrap().unwrap();
    for code in SAMPLES {
        let a = first.analyze(code);
        assert_eq!(a, first.analyze(code));
        assert_eq!(a, second.analyze(code));
    }
}

#[test]
fn test_training_samples_classify_as_labelled() {
    let classifier = QualityClassifier::bootstrap().unwrap();
    let agreeing = TRAINING_SAMPLES
        .iter()
        .filter(|sample| classifier.predict(sample.code).unwrap().label() == sample.label)
        .count();
    assert_eq!(
        agreeing,
        TRAINING_SAMPLES.len(),
        "only {agreeing} of {} training samples agree",
        TRAINING_SAMPLES.len()
    );
}

#[test]
fn test_report_json_shape() {
    let analyzer = Analyzer::bootstrap().unwrap();
    let report = analyzer.analyze("def greet(name: str) -> str:\n    return 'hi ' + name\n");
    let json = serde_json::to_value(&report).unwrap();

    assert!(json.get("filename").is_none());
    for key in [
        "lines_of_code",
        "logical_lines",
        "source_lines",
        "comments",
        "blank_lines",
        "comment_ratio",
        "avg_complexity",
        "max_complexity",
        "maintainability_index",
        "halstead_volume",
        "halstead_difficulty",
        "num_functions",
        "num_classes",
        "code_smells",
    ] {
        assert!(json["metrics"].get(key).is_some(), "missing metrics.{key}");
    }
    for key in ["quality_score", "prediction", "confidence", "features", "rating"] {
        assert!(json["ml_prediction"].get(key).is_some(), "missing ml_prediction.{key}");
    }
    assert_eq!(json["ml_prediction"]["features"]["proper_naming"], true);
    assert!(json["suggestions"].is_array());
}
