//! Tests for the refresh coordinator

#[cfg(test)]
mod coordinator_tests;
