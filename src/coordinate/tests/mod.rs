//! Tests for the coordinate module

mod srs_tests;
mod registry_tests;
