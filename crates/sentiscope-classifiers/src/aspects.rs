//! Keyword-vocabulary aspect extraction

/// Aspect reported when the text mentions none of the vocabulary keywords
pub const OVERALL_ASPECT: &str = "overall";

const DEFAULT_ASPECTS: [&str; 21] = [
    "food",
    "service",
    "staff",
    "price",
    "quality",
    "location",
    "product",
    "delivery",
    "packaging",
    "support",
    "experience",
    "design",
    "performance",
    "battery",
    "camera",
    "screen",
    "sound",
    "value",
    "customer service",
    "ambiance",
    "menu",
];

/// Ordered, closed list of aspect keywords.
///
/// Matching is plain substring search on lower-cased text, so "foodie"
/// mentions "food" and "customer service" also mentions "service".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectVocabulary {
    keywords: Vec<String>,
}

impl AspectVocabulary {
    /// Vocabulary from a custom keyword list; keywords are lower-cased,
    /// blanks and duplicates are dropped, order is kept
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !unique.contains(&keyword) {
                unique.push(keyword);
            }
        }
        Self { keywords: unique }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Aspects mentioned in `text`, in vocabulary order.
    ///
    /// Never empty: falls back to [`OVERALL_ASPECT`].
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let found: Vec<String> = self
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(keyword.as_str()))
            .cloned()
            .collect();

        if found.is_empty() {
            vec![OVERALL_ASPECT.to_string()]
        } else {
            found
        }
    }
}

impl Default for AspectVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_ASPECTS)
    }
}
