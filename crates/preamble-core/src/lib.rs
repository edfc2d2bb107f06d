// Library root: configuration, static preamble data, shared message types,
// and the session-scoped state owned by the app task.

pub mod config;
pub mod preamble;
pub mod protocol;
pub mod session;
