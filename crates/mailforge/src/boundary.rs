//! MIME boundary sources.
//!
//! A [`MessageBuilder`](crate::MessageBuilder) asks its source for a fresh
//! boundary when it is created and on every reset.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use md5::{Digest, Md5};

/// Supplies unique MIME multipart boundaries.
pub trait BoundarySource: fmt::Debug {
    /// Returns a boundary that has not been handed out before.
    fn next_boundary(&self) -> String;
}

/// Boundary source hashing the current time together with random bits.
///
/// Produces 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBoundary;

impl BoundarySource for RandomBoundary {
    fn next_boundary(&self) -> String {
        let now = Utc::now();
        let seed = format!(
            "{}{:x}{:05x}{:016x}",
            now.timestamp(),
            now.timestamp(),
            now.timestamp_subsec_micros(),
            rand::random::<u64>()
        );
        format!("{:x}", Md5::digest(seed.as_bytes()))
    }
}

/// Deterministic boundary source.
///
/// Generates sequential boundaries in the format "b0000", "b0001", etc.
#[derive(Debug)]
pub struct SequentialBoundary {
    counter: AtomicU32,
    prefix: String,
}

impl SequentialBoundary {
    /// Creates a new source with the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            counter: AtomicU32::new(0),
            prefix: prefix.into(),
        }
    }

    /// Returns the number of boundaries handed out so far.
    #[must_use]
    pub fn current(&self) -> u32 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Default for SequentialBoundary {
    fn default() -> Self {
        Self::new("b")
    }
}

impl BoundarySource for SequentialBoundary {
    fn next_boundary(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{:04}", self.prefix, n)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential() {
        let source = SequentialBoundary::default();
        assert_eq!(source.next_boundary(), "b0000");
        assert_eq!(source.next_boundary(), "b0001");
        assert_eq!(source.current(), 2);
    }

    #[test]
    fn test_custom_prefix() {
        let source = SequentialBoundary::new("part-");
        assert_eq!(source.next_boundary(), "part-0000");
    }

    #[test]
    fn test_random_format() {
        let boundary = RandomBoundary.next_boundary();
        assert_eq!(boundary.len(), 32);
        assert!(boundary.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_random_uniqueness() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(RandomBoundary.next_boundary()), "duplicate boundary");
        }
    }
}
