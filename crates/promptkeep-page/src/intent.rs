/// Label fragments that mark a button as "send this input".
pub const DEFAULT_SEND_INTENT: &[&str] = &[
    "send",
    "submit",
    "enter",
    "reply",
    "chat",
    "generate",
    "ask",
    "send message",
];

/// Case-insensitive substring vocabulary for recognising send buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendIntentVocabulary {
    terms: Vec<String>,
}

impl SendIntentVocabulary {
    /// Terms are lower-cased; blank terms are dropped so they cannot match
    /// every label.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn matches(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.terms.iter().any(|t| label.contains(t.as_str()))
    }
}

impl Default for SendIntentVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SEND_INTENT)
    }
}
