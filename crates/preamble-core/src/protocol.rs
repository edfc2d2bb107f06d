// Message and value types shared between the app task and the TUI.
//
// The TUI sends `UserCommand`s to the app task; the app task answers with
// `UiUpdate`s. Everything that crosses the channel is an owned value.

use chrono::{DateTime, Local};

use crate::preamble::PreambleTerm;

/// Model label recorded when no generation succeeded.
pub const NO_MODEL: &str = "None";

/// Characters of a generated preamble kept in its history entry.
pub const SNIPPET_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Lookup inputs
// ---------------------------------------------------------------------------

/// Language of a term explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageMode {
    #[default]
    English,
    /// English explanation followed by a Hindi one.
    Hindi,
}

impl LanguageMode {
    pub fn from_hindi_flag(explain_in_hindi: bool) -> Self {
        if explain_in_hindi {
            LanguageMode::Hindi
        } else {
            LanguageMode::English
        }
    }

    pub fn is_hindi(self) -> bool {
        self == LanguageMode::Hindi
    }

    /// Short label used in history entries.
    pub fn label(self) -> &'static str {
        match self {
            LanguageMode::English => "English",
            LanguageMode::Hindi => "Hindi",
        }
    }

    /// Label used on the explanation card.
    pub fn mode_label(self) -> &'static str {
        match self {
            LanguageMode::English => "English",
            LanguageMode::Hindi => "Hindi + English",
        }
    }
}

/// How detailed a term explanation should be: 1 (very short) to 3 (detailed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExplanationDepth(u8);

impl ExplanationDepth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    /// Clamp `value` into the supported range.
    pub fn new(value: u8) -> Self {
        ExplanationDepth(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn increase(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn decrease(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for ExplanationDepth {
    fn default() -> Self {
        ExplanationDepth(2)
    }
}

impl std::fmt::Display for ExplanationDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Lookup outputs
// ---------------------------------------------------------------------------

/// Text handed to the presentation layer, with the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub text: String,
    pub model_used: String,
}

impl Explanation {
    pub fn new(text: impl Into<String>, model_used: impl Into<String>) -> Self {
        Explanation {
            text: text.into(),
            model_used: model_used.into(),
        }
    }

    /// A fixed message shown in place of generated text.
    pub fn fallback(text: impl Into<String>) -> Self {
        Explanation::new(text, NO_MODEL)
    }

    pub fn is_fallback(&self) -> bool {
        self.model_used == NO_MODEL
    }
}

/// A finished term lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermExplanation {
    pub term: PreambleTerm,
    pub language: LanguageMode,
    pub depth: ExplanationDepth,
    pub explanation: Explanation,
}

/// A generated country preamble and, once the second step has run, its
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryPreamble {
    pub country: String,
    pub preamble_text: String,
    pub source: String,
    pub fetch_message: String,
    pub compare: bool,
    pub analysis: Option<Explanation>,
}

impl CountryPreamble {
    pub fn comparison_label(&self) -> &'static str {
        if self.compare {
            "with India Comparison"
        } else {
            "Analysis Only"
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// What a history entry records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Term {
        term: String,
        category: String,
        language: LanguageMode,
    },
    Country {
        country: String,
        compare: bool,
        preamble_snippet: String,
    },
}

/// A completed lookup. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub lookup: Lookup,
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    pub fn term(
        term: impl Into<String>,
        category: impl Into<String>,
        language: LanguageMode,
        timestamp: DateTime<Local>,
    ) -> Self {
        HistoryEntry {
            lookup: Lookup::Term {
                term: term.into(),
                category: category.into(),
                language,
            },
            timestamp,
        }
    }

    pub fn country(
        country: impl Into<String>,
        compare: bool,
        preamble_text: &str,
        timestamp: DateTime<Local>,
    ) -> Self {
        HistoryEntry {
            lookup: Lookup::Country {
                country: country.into(),
                compare,
                preamble_snippet: snippet(preamble_text),
            },
            timestamp,
        }
    }

    /// Headline for the history panel, e.g. "🇮🇳 Liberty".
    pub fn title(&self) -> String {
        match &self.lookup {
            Lookup::Term { term, .. } => format!("🇮🇳 {term}"),
            Lookup::Country { country, .. } => format!("🌍 {country}"),
        }
    }

    /// Second line for the history panel.
    pub fn detail(&self) -> String {
        match &self.lookup {
            Lookup::Term {
                category, language, ..
            } => format!("Category: {} ({})", category, language.label()),
            Lookup::Country { compare, .. } => {
                let mode = if *compare { "w/ Compare" } else { "Summary" };
                format!("Global Preamble ({mode})")
            }
        }
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// First `SNIPPET_CHARS` characters followed by "...".
pub fn snippet(text: &str) -> String {
    let mut out: String = text.chars().take(SNIPPET_CHARS).collect();
    out.push_str("...");
    out
}

// ---------------------------------------------------------------------------
// Channel messages
// ---------------------------------------------------------------------------

/// Commands from the TUI to the app task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    ExplainTerm {
        term: PreambleTerm,
        explain_in_hindi: bool,
        depth: ExplanationDepth,
    },
    ExploreCountry {
        country: String,
        compare: bool,
    },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A one-line message shown under the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Updates from the app task to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A generation call is in flight; the text describes it.
    Working(String),
    /// A term was selected; any country result is gone.
    TermSelected(PreambleTerm),
    TermExplained(Box<TermExplanation>),
    /// A country lookup started; the selected term and its explanation are gone.
    CountryLookupStarted,
    CountryPreambleReady(Box<CountryPreamble>),
    CountryAnalysisReady(Box<Explanation>),
    /// The most recent history entries, newest first.
    History(Vec<HistoryEntry>),
    Notice(Notice),
    Idle,
}

/// Status of the panel waiting on generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmStatus {
    #[default]
    Idle,
    Pending,
    Complete,
    Error,
}

/// Which explorer occupies the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabId {
    #[default]
    India,
    World,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 11, 26, 12, 0, 5).unwrap()
    }

    #[test]
    fn depth_is_clamped() {
        assert_eq!(ExplanationDepth::new(0).get(), 1);
        assert_eq!(ExplanationDepth::new(2).get(), 2);
        assert_eq!(ExplanationDepth::new(9).get(), 3);
        assert_eq!(ExplanationDepth::default().get(), 2);
    }

    #[test]
    fn depth_steps_stay_in_range() {
        let max = ExplanationDepth::new(3);
        assert_eq!(max.increase(), max);
        let min = ExplanationDepth::new(1);
        assert_eq!(min.decrease(), min);
        assert_eq!(min.increase().get(), 2);
    }

    #[test]
    fn language_labels() {
        assert_eq!(LanguageMode::from_hindi_flag(true), LanguageMode::Hindi);
        assert_eq!(LanguageMode::Hindi.label(), "Hindi");
        assert_eq!(LanguageMode::Hindi.mode_label(), "Hindi + English");
        assert_eq!(LanguageMode::English.mode_label(), "English");
    }

    #[test]
    fn fallback_explanation_has_no_model() {
        let e = Explanation::fallback("failed");
        assert!(e.is_fallback());
        assert_eq!(e.model_used, "None");
        assert!(!Explanation::new("ok", "Gemini (Key 1)").is_fallback());
    }

    #[test]
    fn term_entry_title_and_detail() {
        let entry = HistoryEntry::term("Liberty", "Core Value", LanguageMode::Hindi, noon());
        assert_eq!(entry.title(), "🇮🇳 Liberty");
        assert_eq!(entry.detail(), "Category: Core Value (Hindi)");
        assert_eq!(entry.time_label(), "12:00:05");
    }

    #[test]
    fn country_entry_title_and_detail() {
        let compared = HistoryEntry::country("Germany", true, "We, the people", noon());
        assert_eq!(compared.title(), "🌍 Germany");
        assert_eq!(compared.detail(), "Global Preamble (w/ Compare)");

        let summary = HistoryEntry::country("Japan", false, "We, the Japanese people", noon());
        assert_eq!(summary.detail(), "Global Preamble (Summary)");
    }

    #[test]
    fn snippet_keeps_first_hundred_chars() {
        let long = "x".repeat(250);
        let s = snippet(&long);
        assert_eq!(s.len(), 103);
        assert!(s.ends_with("..."));

        assert_eq!(snippet("short"), "short...");
    }

    #[test]
    fn snippet_counts_chars_not_bytes() {
        let devanagari = "भारत".repeat(40);
        let s = snippet(&devanagari);
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 3);
    }
}
