//! Integration tests for fleetguard
//!
//! These tests exercise the public API end to end without mocking.

pub mod decision_scenarios;
pub mod grant_concurrency_tests;
