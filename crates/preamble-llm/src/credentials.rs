// Ordered pool of API credentials.
//
// The pool is built once from configuration and never mutated. Entries that
// are blank or still hold a template placeholder stay in the pool (so key
// numbering matches the configured list) but are skipped by `usable()`.

use preamble_core::config::Config;

/// Template values look like `YOUR_GEMINI_API_KEY_1` or `AIza...`.
const PLACEHOLDER_PREFIX: &str = "your_";
const PLACEHOLDER_SUFFIX: &str = "...";

/// An opaque API token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    /// The raw token, for building the request. Never log this.
    pub fn expose(&self) -> &str {
        self.0.trim()
    }

    /// True when the token is non-empty and not a placeholder.
    pub fn is_usable(&self) -> bool {
        let token = self.0.trim();
        !token.is_empty() && !is_placeholder(token)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_usable() {
            f.write_str("Credential(<redacted>)")
        } else {
            f.write_str("Credential(<unusable>)")
        }
    }
}

fn is_placeholder(token: &str) -> bool {
    token
        .get(..PLACEHOLDER_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(PLACEHOLDER_PREFIX))
        || token.ends_with(PLACEHOLDER_SUFFIX)
}

#[derive(Debug, Clone, Default)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CredentialPool {
            credentials: tokens.into_iter().map(Credential::new).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.credentials.gemini_api_keys.iter().cloned())
    }

    /// Usable credentials in pool order, paired with their position in the
    /// full pool (unusable entries still count).
    pub fn usable(&self) -> impl Iterator<Item = (usize, &Credential)> {
        self.credentials
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_usable())
    }

    pub fn usable_count(&self) -> usize {
        self.usable().count()
    }

    pub fn has_usable(&self) -> bool {
        self.usable().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
