//! Stack suffix fingerprinting.
//!
//! Every snapshot with `n` frames yields `n` suffixes: the innermost frame
//! alone, the innermost two frames, and so on out to the full stack. Each
//! suffix is rendered to text and hashed, so two unrelated stacks that end
//! in the same frames share fingerprints for those shared tails.
//!
//! Example: stack `main;run;parse` yields
//! `parse`, `run\nparse`, `main\nrun\nparse` (in that order).

use crate::utils::config::FRAME_SEPARATOR;
use sha2::{Digest, Sha256};
use std::fmt;

/// 128-bit content hash of a rendered stack suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Hash rendered suffix text
    ///
    /// **Public** - pure function of the text, never of stack identity
    pub fn of(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A fingerprint paired with the suffix text it was computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSuffix {
    pub fingerprint: Fingerprint,
    pub text: String,
}

impl StackSuffix {
    pub fn new(text: String) -> Self {
        Self {
            fingerprint: Fingerprint::of(&text),
            text,
        }
    }
}

/// Render frames (outermost first) to suffix text
///
/// **Public** - the one place frames become text
pub fn render_frames(frames: &[String]) -> String {
    frames.join(FRAME_SEPARATOR)
}

/// Fingerprint every suffix of a stack
///
/// **Public** - main entry point for fingerprinting
///
/// # Arguments
/// * `stack` - Frames, outermost first
///
/// # Returns
/// Exactly `stack.len()` suffixes, innermost (one frame) first.
/// An empty stack yields nothing.
pub fn stack_suffixes(stack: &[String]) -> Vec<StackSuffix> {
    let n = stack.len();
    (1..=n)
        .map(|k| StackSuffix::new(render_frames(&stack[n - k..])))
        .collect()
}
