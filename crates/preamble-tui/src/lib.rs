// Library root for the terminal front end, so integration tests can drive
// the view state and widgets directly.

pub mod tui;
