// The three lookups behind the two user flows.
//
// Each lookup builds its prompt, makes exactly one dispatch, and folds a
// dispatch failure into something the UI can show. None of them touch
// session state; the app loop decides what to keep.

use tracing::{info, warn};

use preamble_core::preamble::PreambleTerm;
use preamble_core::protocol::{Explanation, ExplanationDepth, LanguageMode};
use preamble_llm::dispatcher::{DispatchError, Dispatcher, Generation};
use preamble_llm::prompt;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const TERM_FALLBACK: &str = "⚠️ LLM generation failed. Check API keys and network connection.";
pub const ANALYSIS_FALLBACK: &str = "⚠️ LLM analysis failed. Check API keys and network connection.";
pub const FETCH_OK_MESSAGE: &str = "✅ Preamble generated successfully by AI.";
pub const FETCH_FAILED_MESSAGE: &str = "❌ AI generation failed. Check API keys and logs.";
pub const EMPTY_COUNTRY_MESSAGE: &str = "Please enter a country name.";

/// One-line description of a dispatch failure for the notice bar.
pub fn failure_notice(provider: &str, err: &DispatchError) -> String {
    match err {
        DispatchError::NoUsableCredentials => {
            format!("All {provider} API keys are missing or set to placeholders.")
        }
        DispatchError::AllCredentialsFailed { .. } => {
            format!("All provided {provider} API keys failed to generate content.")
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A lookup result that is always displayable, plus the dispatch failure
/// that forced a fallback, if one did.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub failure: Option<DispatchError>,
}

/// A generated country preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPreamble {
    pub text: String,
    pub source: String,
    pub message: String,
}

/// Why a preamble could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
    pub error: DispatchError,
}

fn explanation_or(
    result: Result<Generation, DispatchError>,
    fallback: &str,
) -> Outcome<Explanation> {
    match result {
        Ok(generation) => Outcome {
            value: Explanation::new(generation.text, generation.source),
            failure: None,
        },
        Err(err) => Outcome {
            value: Explanation::fallback(fallback),
            failure: Some(err),
        },
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Explain one preamble term.
pub async fn explain_term(
    dispatcher: &Dispatcher,
    term: PreambleTerm,
    language: LanguageMode,
    depth: ExplanationDepth,
) -> Outcome<Explanation> {
    let prompt =
        prompt::build_term_prompt(term.label, term.category.label(), depth, language.is_hindi());
    info!(term = term.label, language = language.label(), %depth, "explaining term");

    let outcome = explanation_or(dispatcher.dispatch(&prompt).await, TERM_FALLBACK);
    if let Some(err) = &outcome.failure {
        warn!(term = term.label, "term explanation fell back: {}", err);
    }
    outcome
}

/// Step one of the country flow: have the model write the preamble.
pub async fn fetch_country_preamble(
    dispatcher: &Dispatcher,
    country: &str,
) -> Result<FetchedPreamble, FetchFailure> {
    let prompt = prompt::build_country_preamble_prompt(country);
    info!(country, "generating country preamble");

    match dispatcher.dispatch(&prompt).await {
        Ok(generation) => Ok(FetchedPreamble {
            text: generation.text,
            source: generation.source,
            message: FETCH_OK_MESSAGE.to_string(),
        }),
        Err(error) => {
            warn!(country, "preamble generation failed: {}", error);
            Err(FetchFailure {
                message: FETCH_FAILED_MESSAGE.to_string(),
                error,
            })
        }
    }
}

/// Step two of the country flow: analyze a generated preamble.
pub async fn explain_country_preamble(
    dispatcher: &Dispatcher,
    country: &str,
    preamble_text: &str,
    include_comparison: bool,
) -> Outcome<Explanation> {
    let prompt = prompt::build_country_analysis_prompt(country, preamble_text, include_comparison);
    info!(country, include_comparison, "analyzing country preamble");

    let outcome = explanation_or(dispatcher.dispatch(&prompt).await, ANALYSIS_FALLBACK);
    if let Some(err) = &outcome.failure {
        warn!(country, "preamble analysis fell back: {}", err);
    }
    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use preamble_core::preamble::find_term;
    use preamble_llm::client::{GenerationBackend, GenerationError};
    use preamble_llm::credentials::{Credential, CredentialPool};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Answers calls from a script, in order. An exhausted script fails.
    struct ScriptedBackend {
        script: Mutex<VecDeque<Option<&'static str>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(script: &[Option<&'static str>]) -> Arc<Self> {
            Arc::new(ScriptedBackend {
                script: Mutex::new(script.iter().copied().collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        fn provider_name(&self) -> &str {
            "Gemini"
        }

        async fn generate(&self, _: &Credential, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.script.lock().unwrap().pop_front().flatten() {
                Some(text) => Ok(text.to_string()),
                None => Err(GenerationError::InvalidResponse("scripted failure".into())),
            }
        }
    }

    fn dispatcher(keys: &[&str], backend: &Arc<ScriptedBackend>) -> Dispatcher {
        Dispatcher::new(CredentialPool::new(keys.iter().copied()), backend.clone())
    }

    #[tokio::test]
    async fn explain_term_success() {
        let backend = ScriptedBackend::new(&[Some("Liberty means freedom.")]);
        let d = dispatcher(&["k1"], &backend);
        let liberty = find_term("Liberty").unwrap();

        let outcome = explain_term(&d, liberty, LanguageMode::Hindi, ExplanationDepth::new(3)).await;
        assert_eq!(outcome.failure, None);
        assert_eq!(outcome.value.text, "Liberty means freedom.");
        assert_eq!(outcome.value.model_used, "Gemini (Key 1)");

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0],
            prompt::build_term_prompt("Liberty", "Core Value", ExplanationDepth::new(3), true)
        );
    }

    #[tokio::test]
    async fn explain_term_without_keys_falls_back() {
        let backend = ScriptedBackend::new(&[Some("unused")]);
        let d = dispatcher(&["YOUR_GEMINI_API_KEY_1"], &backend);
        let justice = find_term("Justice").unwrap();

        let outcome =
            explain_term(&d, justice, LanguageMode::English, ExplanationDepth::default()).await;
        assert_eq!(outcome.value.text, TERM_FALLBACK);
        assert!(outcome.value.is_fallback());
        assert_eq!(outcome.failure, Some(DispatchError::NoUsableCredentials));
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test]
    async fn fetch_country_preamble_success() {
        let backend = ScriptedBackend::new(&[None, Some("We, the people of Germany...")]);
        let d = dispatcher(&["k1", "k2"], &backend);

        let fetched = fetch_country_preamble(&d, "Germany").await.unwrap();
        assert_eq!(fetched.text, "We, the people of Germany...");
        assert_eq!(fetched.source, "Gemini (Key 2)");
        assert_eq!(fetched.message, FETCH_OK_MESSAGE);
    }

    #[tokio::test]
    async fn fetch_country_preamble_failure() {
        let backend = ScriptedBackend::new(&[None, Some("  ")]);
        let d = dispatcher(&["k1", "k2"], &backend);

        let failure = fetch_country_preamble(&d, "Germany").await.unwrap_err();
        assert_eq!(failure.message, FETCH_FAILED_MESSAGE);
        assert_eq!(failure.error, DispatchError::AllCredentialsFailed { attempts: 2 });
    }

    #[tokio::test]
    async fn country_analysis_falls_back_on_exhaustion() {
        let backend = ScriptedBackend::new(&[]);
        let d = dispatcher(&["k1"], &backend);

        let outcome = explain_country_preamble(&d, "Japan", "We, the Japanese people", false).await;
        assert_eq!(outcome.value, Explanation::fallback(ANALYSIS_FALLBACK));
        assert_eq!(
            outcome.failure,
            Some(DispatchError::AllCredentialsFailed { attempts: 1 })
        );
        assert!(!backend.prompts()[0].contains("Comparison to the Indian Preamble"));
    }

    #[test]
    fn failure_notices() {
        assert_eq!(
            failure_notice("Gemini", &DispatchError::NoUsableCredentials),
            "All Gemini API keys are missing or set to placeholders."
        );
        assert_eq!(
            failure_notice("Gemini", &DispatchError::AllCredentialsFailed { attempts: 5 }),
            "All provided Gemini API keys failed to generate content."
        );
    }
}
