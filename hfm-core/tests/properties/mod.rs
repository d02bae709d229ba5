//! Property-based test modules

mod composition_tests;
mod diagnostics_tests;
mod highlighting_tests;
mod outline_tests;
mod playground_commands_tests;
