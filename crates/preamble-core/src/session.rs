// Session-scoped state: lookup history, the selected term, and the fetched
// country payload.
//
// Owned by the app task. Reset rules: selecting a term drops any country
// payload; starting a country lookup drops the selected term and whatever
// the previous country lookup produced.

use std::collections::VecDeque;

use crate::preamble::PreambleTerm;
use crate::protocol::{CountryPreamble, Explanation, HistoryEntry, TermExplanation};

/// Number of history entries surfaced for display by default.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Every lookup of the session, newest first. Nothing is ever evicted; the
/// display limit only applies to `recent`.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an entry so it becomes position 0.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    /// The `limit` most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SessionState {
    history: History,
    selected_term: Option<PreambleTerm>,
    term_explanation: Option<TermExplanation>,
    country: Option<CountryPreamble>,
    display_limit: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_LIMIT)
    }
}

impl SessionState {
    pub fn new(display_limit: usize) -> Self {
        SessionState {
            history: History::new(),
            selected_term: None,
            term_explanation: None,
            country: None,
            display_limit: display_limit.max(1),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected_term(&self) -> Option<PreambleTerm> {
        self.selected_term
    }

    pub fn term_explanation(&self) -> Option<&TermExplanation> {
        self.term_explanation.as_ref()
    }

    pub fn country(&self) -> Option<&CountryPreamble> {
        self.country.as_ref()
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// The entries the history panel shows, newest first.
    pub fn recent_history(&self) -> Vec<HistoryEntry> {
        self.history.recent(self.display_limit).cloned().collect()
    }

    /// Switch to the term explorer. Any country payload is dropped, as is
    /// the explanation of a previously selected term.
    pub fn select_term(&mut self, term: PreambleTerm) {
        self.selected_term = Some(term);
        self.term_explanation = None;
        self.country = None;
    }

    /// Store the explanation for the currently selected term.
    ///
    /// Ignored when the explanation is for a term that is no longer selected.
    pub fn set_term_explanation(&mut self, explanation: TermExplanation) -> bool {
        if self.selected_term != Some(explanation.term) {
            return false;
        }
        self.term_explanation = Some(explanation);
        true
    }

    /// Switch to the country explorer, clearing the term selection and the
    /// previous country payload.
    pub fn begin_country_lookup(&mut self) {
        self.selected_term = None;
        self.term_explanation = None;
        self.country = None;
    }

    /// Store a freshly generated preamble. Its analysis starts out empty.
    pub fn set_country_preamble(&mut self, mut payload: CountryPreamble) {
        payload.analysis = None;
        self.country = Some(payload);
    }

    /// True while a fetched preamble still waits for its analysis.
    pub fn needs_analysis(&self) -> bool {
        self.country.as_ref().is_some_and(|c| c.analysis.is_none())
    }

    /// Attach the analysis to the fetched preamble. Only the first analysis
    /// per fetched preamble is kept; returns whether it was stored.
    pub fn set_country_analysis(&mut self, analysis: Explanation) -> bool {
        match self.country.as_mut() {
            Some(payload) if payload.analysis.is_none() => {
                payload.analysis = Some(analysis);
                true
            }
            _ => false,
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.history.record(entry);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preamble::{find_term, TermCategory};
    use crate::protocol::{ExplanationDepth, LanguageMode, Lookup};
    use chrono::Local;

    fn liberty() -> PreambleTerm {
        find_term("Liberty").unwrap()
    }

    fn germany(compare: bool) -> CountryPreamble {
        CountryPreamble {
            country: "Germany".into(),
            preamble_text: "Conscious of their responsibility before God and man...".into(),
            source: "Gemini (Key 1)".into(),
            fetch_message: "ok".into(),
            compare,
            analysis: None,
        }
    }

    fn term_entry(label: &str) -> HistoryEntry {
        HistoryEntry::term(label, "Core Value", LanguageMode::English, Local::now())
    }

    #[test]
    fn new_session_is_empty() {
        let s = SessionState::default();
        assert!(s.history().is_empty());
        assert!(s.selected_term().is_none());
        assert!(s.term_explanation().is_none());
        assert!(s.country().is_none());
        assert_eq!(s.display_limit(), DEFAULT_DISPLAY_LIMIT);
    }

    #[test]
    fn history_is_newest_first() {
        let mut h = History::new();
        h.record(term_entry("Justice"));
        h.record(term_entry("Liberty"));
        h.record(term_entry("Equality"));

        let titles: Vec<String> = h.iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["🇮🇳 Equality", "🇮🇳 Liberty", "🇮🇳 Justice"]);
    }

    #[test]
    fn recent_is_capped_but_everything_is_kept() {
        let mut s = SessionState::default();
        for i in 0..15 {
            s.record(term_entry(&format!("Term {i}")));
        }

        assert_eq!(s.history().len(), 15);
        let recent = s.recent_history();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].title(), "🇮🇳 Term 14");
        assert_eq!(recent[9].title(), "🇮🇳 Term 5");
    }

    #[test]
    fn zero_display_limit_is_raised_to_one() {
        let s = SessionState::new(0);
        assert_eq!(s.display_limit(), 1);
    }

    #[test]
    fn selecting_a_term_clears_country_payload() {
        let mut s = SessionState::default();
        s.begin_country_lookup();
        s.set_country_preamble(germany(true));
        assert!(s.country().is_some());

        s.select_term(liberty());
        assert_eq!(s.selected_term(), Some(liberty()));
        assert!(s.country().is_none());
    }

    #[test]
    fn country_lookup_clears_term_selection() {
        let mut s = SessionState::default();
        s.select_term(liberty());
        s.set_term_explanation(TermExplanation {
            term: liberty(),
            language: LanguageMode::English,
            depth: ExplanationDepth::default(),
            explanation: Explanation::new("Freedom of thought", "Gemini (Key 1)"),
        });
        assert!(s.term_explanation().is_some());

        s.begin_country_lookup();
        assert!(s.selected_term().is_none());
        assert!(s.term_explanation().is_none());
    }

    #[test]
    fn stale_term_explanation_is_ignored() {
        let mut s = SessionState::default();
        s.select_term(liberty());
        let justice = PreambleTerm::new("Justice", TermCategory::CoreValue);
        let stored = s.set_term_explanation(TermExplanation {
            term: justice,
            language: LanguageMode::English,
            depth: ExplanationDepth::default(),
            explanation: Explanation::new("text", "Gemini (Key 1)"),
        });
        assert!(!stored);
        assert!(s.term_explanation().is_none());
    }

    #[test]
    fn analysis_runs_at_most_once_per_preamble() {
        let mut s = SessionState::default();
        assert!(!s.needs_analysis());

        s.set_country_preamble(germany(true));
        assert!(s.needs_analysis());

        assert!(s.set_country_analysis(Explanation::new("first", "Gemini (Key 1)")));
        assert!(!s.needs_analysis());
        assert!(!s.set_country_analysis(Explanation::new("second", "Gemini (Key 2)")));
        assert_eq!(s.country().unwrap().analysis.as_ref().unwrap().text, "first");
    }

    #[test]
    fn analysis_without_preamble_is_dropped() {
        let mut s = SessionState::default();
        assert!(!s.set_country_analysis(Explanation::new("orphan", "Gemini (Key 1)")));
    }

    #[test]
    fn stored_preamble_starts_without_analysis() {
        let mut s = SessionState::default();
        let mut payload = germany(false);
        payload.analysis = Some(Explanation::new("stale", "Gemini (Key 1)"));
        s.set_country_preamble(payload);
        assert!(s.needs_analysis());
    }

    #[test]
    fn term_then_country_history_order() {
        let mut s = SessionState::default();
        s.select_term(liberty());
        s.record(HistoryEntry::term(
            "Liberty",
            "Core Value",
            LanguageMode::English,
            Local::now(),
        ));
        s.begin_country_lookup();
        s.record(HistoryEntry::country("Germany", true, "text", Local::now()));

        let recent = s.recent_history();
        assert!(matches!(&recent[0].lookup, Lookup::Country { country, .. } if country == "Germany"));
        assert!(matches!(&recent[1].lookup, Lookup::Term { term, .. } if term == "Liberty"));
    }
}
