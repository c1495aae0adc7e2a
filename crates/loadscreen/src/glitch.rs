//! Transient glyph-noise over a line of text.

use engine_core::RandomSource;
use std::time::Duration;

pub const GLITCH_GLYPHS: &[char] = &['█', '▓', '▒', '░', '#', '@', '%', '&', '*'];

/// Lines shorter than this are never glitched.
const MIN_LEN: usize = 6;
const MIN_SPAN: usize = 2;
const MAX_SPAN: usize = 7;
const BASE_DURATION_MS: u64 = 90;
const JITTER_MS: u32 = 140;

/// A corrupted rendition of a line and how long to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glitch {
    pub text: String,
    pub duration: Duration,
}

/// `true` with probability `1 / one_in`.
pub fn roll(rng: &mut dyn RandomSource, one_in: u32) -> bool {
    rng.below(one_in) == 0
}

/// Replace a short run of characters with noise glyphs.
pub fn glitch_text(original: &str, rng: &mut dyn RandomSource) -> Option<Glitch> {
    let mut chars: Vec<char> = original.chars().collect();
    let len = chars.len();
    if len < MIN_LEN {
        return None;
    }

    let start = rng.below(len as u32) as usize;
    let span = (rng.below(8) as usize).clamp(MIN_SPAN, MAX_SPAN);
    let end = (start + span).min(len);
    for c in &mut chars[start..end] {
        *c = GLITCH_GLYPHS[rng.below(GLITCH_GLYPHS.len() as u32) as usize];
    }

    let duration = Duration::from_millis(BASE_DURATION_MS + rng.below(JITTER_MS) as u64);
    Some(Glitch {
        text: chars.into_iter().collect(),
        duration,
    })
}
