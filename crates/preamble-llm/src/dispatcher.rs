// Credential-rotating generation dispatcher.
//
// `dispatch` walks the usable credentials in pool order and returns the
// first non-blank text. Per-credential failures are logged and absorbed;
// only "nothing usable" and "everything failed" reach the caller. Every call
// starts again from the first credential and nothing is remembered between
// calls.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use preamble_core::config::Config;

use crate::client::{GeminiClient, GenerationBackend, GenerationError};
use crate::credentials::CredentialPool;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Successful generation: non-blank text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    /// e.g. "Gemini (Key 3)", numbered by position in the configured list.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The pool is empty or holds only blanks/placeholders. No call was made.
    #[error("no usable API credentials configured")]
    NoUsableCredentials,

    /// Every usable credential was tried once and none produced text.
    #[error("all {attempts} usable API credentials failed")]
    AllCredentialsFailed { attempts: usize },
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct Dispatcher {
    pool: CredentialPool,
    backend: Arc<dyn GenerationBackend>,
}

impl Dispatcher {
    pub fn new(pool: CredentialPool, backend: Arc<dyn GenerationBackend>) -> Self {
        Dispatcher { pool, backend }
    }

    /// Build a dispatcher backed by the Gemini client described in `config`.
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        let client = GeminiClient::from_config(&config.llm)?;
        Ok(Self::new(CredentialPool::from_config(config), Arc::new(client)))
    }

    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    pub fn provider_name(&self) -> &str {
        self.backend.provider_name()
    }

    /// Try each usable credential in order until one returns non-blank text.
    pub async fn dispatch(&self, prompt: &str) -> Result<Generation, DispatchError> {
        if !self.pool.has_usable() {
            warn!("dispatch skipped: no usable credentials in pool of {}", self.pool.len());
            return Err(DispatchError::NoUsableCredentials);
        }

        let provider = self.backend.provider_name();
        let mut attempts = 0usize;

        for (index, credential) in self.pool.usable() {
            attempts += 1;
            let key_number = index + 1;
            debug!(key = key_number, prompt_chars = prompt.len(), "dispatch attempt");

            match self.backend.generate(credential, prompt).await {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        warn!(key = key_number, "{provider} returned empty text, trying next key");
                        continue;
                    }
                    info!(key = key_number, attempts, "{provider} generation succeeded");
                    return Ok(Generation {
                        text: text.to_string(),
                        source: source_label(provider, index),
                    });
                }
                Err(err) => {
                    warn!(key = key_number, error = %err, "{provider} call failed, trying next key");
                }
            }
        }

        warn!(attempts, "all usable {provider} keys failed");
        Err(DispatchError::AllCredentialsFailed { attempts })
    }
}

/// "<provider> (Key <n>)" with `n` counted from 1.
pub fn source_label(provider: &str, index: usize) -> String {
    format!("{provider} (Key {})", index + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credential;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// What the fake backend does for a given token.
    #[derive(Clone)]
    enum Reply {
        Text(&'static str),
        Fail,
    }

    /// Records every token it is called with; tokens without a scripted
    /// reply fail.
    struct FakeBackend {
        replies: HashMap<&'static str, Reply>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn new(replies: &[(&'static str, Reply)]) -> Arc<Self> {
            Arc::new(FakeBackend {
                replies: replies.iter().cloned().collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationBackend for FakeBackend {
        fn provider_name(&self) -> &str {
            "Gemini"
        }

        async fn generate(
            &self,
            credential: &Credential,
            _prompt: &str,
        ) -> Result<String, GenerationError> {
            let token = credential.expose().to_string();
            self.calls.lock().unwrap().push(token.clone());
            match self.replies.get(token.as_str()) {
                Some(Reply::Text(t)) => Ok(t.to_string()),
                _ => Err(GenerationError::InvalidResponse(format!("scripted failure for {token}"))),
            }
        }
    }

    fn dispatcher(tokens: &[&str], backend: &Arc<FakeBackend>) -> Dispatcher {
        Dispatcher::new(CredentialPool::new(tokens.iter().copied()), backend.clone())
    }

    #[tokio::test]
    async fn empty_pool_makes_no_calls() {
        let backend = FakeBackend::new(&[]);
        let d = dispatcher(&[], &backend);

        assert_eq!(d.dispatch("prompt").await, Err(DispatchError::NoUsableCredentials));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn placeholder_only_pool_makes_no_calls() {
        let backend = FakeBackend::new(&[("YOUR_GEMINI_API_KEY_1", Reply::Text("nope"))]);
        let d = dispatcher(&["YOUR_GEMINI_API_KEY_1", "", "  "], &backend);

        assert_eq!(d.dispatch("prompt").await, Err(DispatchError::NoUsableCredentials));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn single_usable_credential_is_attributed_by_position() {
        let backend = FakeBackend::new(&[("only", Reply::Text("Hello"))]);
        let d = dispatcher(&["", "YOUR_GEMINI_API_KEY_2", "only"], &backend);

        let g = d.dispatch("prompt").await.unwrap();
        assert_eq!(g.text, "Hello");
        assert_eq!(g.source, "Gemini (Key 3)");
        assert_eq!(backend.calls(), vec!["only"]);
    }

    #[tokio::test]
    async fn skips_failing_and_unusable_keys() {
        let backend = FakeBackend::new(&[("bad", Reply::Fail), ("good1", Reply::Text("Hello"))]);
        let d = dispatcher(&["bad", "", "good1"], &backend);

        let g = d.dispatch("prompt").await.unwrap();
        assert_eq!(g.text, "Hello");
        assert_eq!(g.source, "Gemini (Key 3)");
        assert_eq!(backend.calls(), vec!["bad", "good1"]);
    }

    #[tokio::test]
    async fn blank_text_counts_as_failure() {
        let backend = FakeBackend::new(&[
            ("k1", Reply::Fail),
            ("k2", Reply::Text("   \n")),
            ("k3", Reply::Text("  answer \n")),
            ("k4", Reply::Text("never reached")),
        ]);
        let d = dispatcher(&["k1", "k2", "k3", "k4"], &backend);

        let g = d.dispatch("prompt").await.unwrap();
        assert_eq!(g.text, "answer");
        assert_eq!(g.source, "Gemini (Key 3)");
        // K = 2 failures, then success: exactly K + 1 calls.
        assert_eq!(backend.calls(), vec!["k1", "k2", "k3"]);
    }

    #[tokio::test]
    async fn all_failing_tries_each_usable_key_once() {
        let backend = FakeBackend::new(&[("k2", Reply::Text(""))]);
        let d = dispatcher(&["k1", "YOUR_GEMINI_API_KEY_2", "k2", "k3"], &backend);

        assert_eq!(
            d.dispatch("prompt").await,
            Err(DispatchError::AllCredentialsFailed { attempts: 3 })
        );
        assert_eq!(backend.calls(), vec!["k1", "k2", "k3"]);
    }

    #[tokio::test]
    async fn each_dispatch_restarts_from_first_key() {
        let backend = FakeBackend::new(&[("bad", Reply::Fail), ("good", Reply::Text("ok"))]);
        let d = dispatcher(&["bad", "good"], &backend);

        d.dispatch("one").await.unwrap();
        d.dispatch("two").await.unwrap();
        assert_eq!(backend.calls(), vec!["bad", "good", "bad", "good"]);
    }

    #[test]
    fn source_label_counts_from_one() {
        assert_eq!(source_label("Gemini", 0), "Gemini (Key 1)");
        assert_eq!(source_label("Gemini", 4), "Gemini (Key 5)");
    }

    #[test]
    fn dispatch_error_messages() {
        assert_eq!(
            DispatchError::NoUsableCredentials.to_string(),
            "no usable API credentials configured"
        );
        assert_eq!(
            DispatchError::AllCredentialsFailed { attempts: 2 }.to_string(),
            "all 2 usable API credentials failed"
        );
    }
}
