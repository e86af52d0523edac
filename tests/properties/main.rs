//! Property test suite entry point.

mod determinism_tests;
mod template_tests;
