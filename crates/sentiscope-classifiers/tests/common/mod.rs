//! Mock classifiers and loaders for testing
//!
//! Scripted implementations of the Classifier and ClassifierLoader traits
//! for exercising adapters, aspect composition and error boundaries.

#![allow(dead_code)]

use async_trait::async_trait;
use sentiscope_classifiers::{Classifier, ClassifierLoader};
use sentiscope_core::{Error, LabelScore, Result};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scores in sentiment-model order (negative, neutral, positive)
pub fn raw_sentiment(negative: f32, neutral: f32, positive: f32) -> Vec<LabelScore> {
    vec![
        LabelScore::new("LABEL_0", negative),
        LabelScore::new("LABEL_1", neutral),
        LabelScore::new("LABEL_2", positive),
    ]
}

enum Reply {
    Scores(Vec<LabelScore>),
    Fail,
}

/// A classifier that answers from substring rules, then a default
pub struct ScriptedClassifier {
    name: String,
    rules: Vec<(String, Reply)>,
    default: Vec<LabelScore>,
    call_count: AtomicU32,
    seen: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: Vec::new(),
            default: raw_sentiment(0.1, 0.8, 0.1),
            call_count: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Scores returned when no rule matches
    pub fn with_default(mut self, scores: Vec<LabelScore>) -> Self {
        self.default = scores;
        self
    }

    /// Return `scores` for text containing `needle`; first matching rule wins
    pub fn when(mut self, needle: &str, scores: Vec<LabelScore>) -> Self {
        self.rules.push((needle.to_string(), Reply::Scores(scores)));
        self
    }

    /// Fail for text containing `needle`
    pub fn fail_when(mut self, needle: &str) -> Self {
        self.rules.push((needle.to_string(), Reply::Fail));
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Texts received, in call order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.seen.lock().unwrap().push(text.to_string());

        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| text.contains(needle.as_str()))
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Scores(scores)) => Ok(scores.clone()),
            Some(Reply::Fail) => Err(Error::classifier("CUDA out of memory at layer 7")),
            None => Ok(self.default.clone()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A classifier that always fails - for testing error paths
pub struct FailingClassifier {
    name: String,
}

impl FailingClassifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<LabelScore>> {
        Err(Error::classifier("tensor shape mismatch: [1, 3] vs [1, 7]"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A classifier that panics mid-inference
pub struct PanickingClassifier;

#[async_trait]
impl Classifier for PanickingClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<LabelScore>> {
        panic!("index out of bounds in attention mask");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

/// A classifier that returns no scores at all
pub struct EmptyClassifier;

#[async_trait]
impl Classifier for EmptyClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<LabelScore>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "empty"
    }
}

/// A loader that counts load attempts and can fail the first few
pub struct CountingLoader {
    classifier: Arc<dyn Classifier>,
    failures_left: AtomicU32,
    load_delay: Option<Duration>,
    load_count: AtomicU32,
}

impl CountingLoader {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            failures_left: AtomicU32::new(0),
            load_delay: None,
            load_count: AtomicU32::new(0),
        }
    }

    /// Fail the first `n` load attempts
    pub fn failing_first(self, n: u32) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    /// Sleep inside each load attempt
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    pub fn load_count(&self) -> u32 {
        self.load_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassifierLoader for CountingLoader {
    async fn load(&self) -> Result<Arc<dyn Classifier>> {
        self.load_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(Error::classifier("model.safetensors: connection reset"));
        }

        Ok(Arc::clone(&self.classifier))
    }

    fn model_id(&self) -> &str {
        "counting-loader"
    }
}
