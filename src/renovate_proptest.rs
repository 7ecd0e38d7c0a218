//! Property-based tests for the renovate rule list.
//!
//! Whatever the user configures, the built-in rules come first and the
//! user rules follow in the order they were written.
