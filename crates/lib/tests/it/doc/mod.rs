//! Document integration tests
//!
//! Organized by component: coercion during parse, the mutable and persistent forms,
//! reference fields, typed accessors, and property-based laws over both forms.

mod access_tests;
mod frozen_tests;
mod parse_tests;
mod property_tests;
