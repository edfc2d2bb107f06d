// Application layer: the lookup flows and the app task that runs them.

pub mod app;
pub mod lookup;
