//! Classification adapter behaviour: label remapping, failure boundary,
//! lazy initialization

mod common;

use common::{
    raw_sentiment, CountingLoader, EmptyClassifier, FailingClassifier, PanickingClassifier,
    ScriptedClassifier,
};
use futures::future::join_all;
use sentiscope_classifiers::{ClassificationAdapter, LabelMap};
use sentiscope_core::{Error, LabelScore};
use std::sync::Arc;
use std::time::Duration;

fn sentiment_adapter(classifier: Arc<ScriptedClassifier>) -> ClassificationAdapter {
    ClassificationAdapter::with_classifier("sentiment", classifier, LabelMap::sentiment())
}

#[tokio::test]
async fn test_raw_labels_are_remapped_and_top_label_selected() {
    let mock = Arc::new(ScriptedClassifier::new("roberta").with_default(raw_sentiment(0.1, 0.2, 0.7)));
    let adapter = sentiment_adapter(mock.clone());

    let result = adapter.classify("What a lovely day").await.unwrap();

    assert_eq!(result.label, "positive");
    assert_eq!(result.score, 0.7);
    let labels: Vec<_> = result.all_scores.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["negative", "neutral", "positive"]);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_top_label_is_argmax_of_all_scores() {
    let cases = [
        raw_sentiment(0.6, 0.3, 0.1),
        raw_sentiment(0.2, 0.5, 0.3),
        raw_sentiment(0.05, 0.05, 0.9),
    ];

    for scores in cases {
        let mock = Arc::new(ScriptedClassifier::new("roberta").with_default(scores));
        let result = sentiment_adapter(mock).classify("text").await.unwrap();

        let max = result
            .all_scores
            .iter()
            .map(|s| s.score)
            .fold(f32::MIN, f32::max);
        assert_eq!(result.score, max);
        assert!((0.0..=1.0).contains(&result.score));
        assert!(result
            .all_scores
            .iter()
            .any(|s| s.label == result.label && s.score == result.score));
    }
}

#[tokio::test]
async fn test_ties_resolve_to_first_label() {
    let mock = Arc::new(ScriptedClassifier::new("roberta").with_default(raw_sentiment(0.4, 0.2, 0.4)));
    let result = sentiment_adapter(mock).classify("text").await.unwrap();
    assert_eq!(result.label, "negative");
}

#[tokio::test]
async fn test_identity_map_lowercases_unknown_labels() {
    let mock = Arc::new(ScriptedClassifier::new("emotion").with_default(vec![
        LabelScore::new("Joy", 0.8),
        LabelScore::new("Anger", 0.2),
    ]));
    let adapter = ClassificationAdapter::with_classifier("emotion", mock, LabelMap::identity());

    let result = adapter.classify("yay").await.unwrap();
    assert_eq!(result.label, "joy");
}

#[tokio::test]
async fn test_model_error_is_reported_without_details() {
    let adapter = ClassificationAdapter::with_classifier(
        "sentiment",
        Arc::new(FailingClassifier::new("broken")),
        LabelMap::sentiment(),
    );

    let err = adapter.classify("anything").await.unwrap_err();
    assert!(matches!(err, Error::Classifier(_)));
    assert_eq!(err.to_string(), "Analysis failed: sentiment model error");
    assert!(!err.to_string().contains("tensor"));
}

#[tokio::test]
async fn test_panic_is_contained() {
    let adapter = ClassificationAdapter::with_classifier(
        "emotion",
        Arc::new(PanickingClassifier),
        LabelMap::identity(),
    );

    let err = adapter.classify("anything").await.unwrap_err();
    assert_eq!(err.to_string(), "Analysis failed: emotion model error");

    // Still usable after the panic
    let err = adapter.classify("again").await.unwrap_err();
    assert!(matches!(err, Error::Classifier(_)));
}

#[tokio::test]
async fn test_empty_output_is_a_classifier_error() {
    let adapter = ClassificationAdapter::with_classifier(
        "sentiment",
        Arc::new(EmptyClassifier),
        LabelMap::sentiment(),
    );

    let err = adapter.classify("anything").await.unwrap_err();
    assert_eq!(err.to_string(), "Analysis failed: sentiment empty model output");
}

#[tokio::test]
async fn test_classifier_is_loaded_lazily_and_once() {
    let mock = Arc::new(ScriptedClassifier::new("roberta"));
    let loader = Arc::new(CountingLoader::new(mock.clone()).with_delay(Duration::from_millis(20)));
    let adapter = ClassificationAdapter::new("sentiment", loader.clone(), LabelMap::sentiment());

    assert!(!adapter.is_initialized());
    assert_eq!(loader.load_count(), 0);

    let calls = (0..8).map(|i| {
        let adapter = &adapter;
        async move { adapter.classify(&format!("text {i}")).await }
    });
    let results = join_all(calls).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert!(adapter.is_initialized());
    assert_eq!(loader.load_count(), 1);
    assert_eq!(mock.call_count(), 8);
}

#[tokio::test]
async fn test_failed_initialization_is_retried() {
    let mock = Arc::new(ScriptedClassifier::new("roberta"));
    let loader = Arc::new(CountingLoader::new(mock.clone()).failing_first(1));
    let adapter = ClassificationAdapter::new("sentiment", loader.clone(), LabelMap::sentiment());

    let err = adapter.classify("first").await.unwrap_err();
    assert_eq!(err.to_string(), "Analysis failed: sentiment model unavailable");
    assert!(!adapter.is_initialized());

    let result = adapter.classify("second").await.unwrap();
    assert_eq!(result.label, "neutral");
    assert_eq!(loader.load_count(), 2);
    assert_eq!(mock.seen(), vec!["second"]);
}

#[tokio::test]
async fn test_model_id_comes_from_loader() {
    let loader = Arc::new(CountingLoader::new(Arc::new(ScriptedClassifier::new("roberta"))));
    let adapter = ClassificationAdapter::new("sentiment", loader, LabelMap::sentiment());
    assert_eq!(adapter.name(), "sentiment");
    assert_eq!(adapter.model_id(), "counting-loader");
}
