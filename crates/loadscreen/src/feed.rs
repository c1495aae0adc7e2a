//! Text rotations: ordered cycles and shuffled tickers.

use engine_core::{shuffle, RandomSource};

/// Ordered pool stepped by a wrapping cursor.
#[derive(Debug, Clone)]
pub struct Rotation {
    pool: &'static [&'static str],
    cursor: usize,
}

impl Rotation {
    pub fn new(pool: &'static [&'static str]) -> Self {
        Self { pool, cursor: 0 }
    }

    pub fn current(&self) -> Option<&'static str> {
        self.pool.get(self.cursor).copied()
    }

    /// Step forward (wrapping) and return the new current line.
    pub fn advance(&mut self) -> Option<&'static str> {
        if self.pool.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.pool.len();
        self.current()
    }

    /// Line of `other` paired with this rotation's cursor.
    pub fn paired(&self, other: &'static [&'static str]) -> Option<&'static str> {
        if other.is_empty() {
            None
        } else {
            Some(other[self.cursor % other.len()])
        }
    }
}

/// One ticker step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedItem {
    pub line: &'static str,
    pub caption: &'static str,
}

/// A ticker over a pool shuffled once at start. Wrapping replays the same
/// permutation.
#[derive(Debug, Clone)]
pub struct Feed {
    order: Vec<&'static str>,
    captions: &'static [&'static str],
    cursor: usize,
}

impl Feed {
    pub fn start(
        pool: &'static [&'static str],
        captions: &'static [&'static str],
        rng: &mut dyn RandomSource,
    ) -> Self {
        let mut order = pool.to_vec();
        shuffle(&mut order, rng);
        Self {
            order,
            captions,
            cursor: 0,
        }
    }

    pub fn order(&self) -> &[&'static str] {
        &self.order
    }

    /// Index of the line the next tick shows.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Next line in shuffled order with an independently drawn caption.
    pub fn next(&mut self, rng: &mut dyn RandomSource) -> Option<FeedItem> {
        let line = *self.order.get(self.cursor)?;
        let caption = if self.captions.is_empty() {
            ""
        } else {
            self.captions[rng.below(self.captions.len() as u32) as usize]
        };
        self.cursor = (self.cursor + 1) % self.order.len();
        Some(FeedItem { line, caption })
    }
}
