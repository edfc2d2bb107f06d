// Generation layer: credential pool, Gemini HTTP client, the credential
// rotating dispatcher, and prompt templates.

pub mod client;
pub mod credentials;
pub mod dispatcher;
pub mod prompt;
