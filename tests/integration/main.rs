//! Integration test entry point

mod probe_tests;
