//! Brick contract: verifiable assertions, render budget, and markup output.
//!
//! Every widget is also a brick. Assertions describe what must hold before
//! a widget paints; `to_html`/`to_css` give a deterministic markup rendition
//! of the same widget for hosts that style elements with class hooks.

use std::time::Duration;
use thiserror::Error;

/// Brick assertion that must be verified at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum BrickAssertion {
    /// Text content must be visible (not hidden, not zero-opacity)
    TextVisible,

    /// WCAG 2.1 contrast ratio requirement (4.5:1 for normal text)
    ContrastRatio(f32),

    /// Maximum render latency in milliseconds (paint plus markup)
    MaxLatencyMs(u32),
}

/// Performance budget for a brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickBudget {
    /// Maximum time for measure phase
    pub measure_ms: u32,
    /// Maximum time for layout phase
    pub layout_ms: u32,
    /// Maximum time for paint phase
    pub paint_ms: u32,
    /// Total budget (may be less than sum of phases)
    pub total_ms: u32,
}

impl BrickBudget {
    /// Create a budget with equal distribution across phases
    #[must_use]
    pub const fn uniform(total_ms: u32) -> Self {
        let phase_ms = total_ms / 3;
        Self {
            measure_ms: phase_ms,
            layout_ms: phase_ms,
            paint_ms: phase_ms,
            total_ms,
        }
    }

    /// Convert to Duration
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_millis(self.total_ms as u64)
    }
}

impl Default for BrickBudget {
    fn default() -> Self {
        // 60fps frame
        Self::uniform(16)
    }
}

/// Result of verifying brick assertions
#[derive(Debug, Clone)]
pub struct BrickVerification {
    /// All assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// All assertions that failed with reasons
    pub failed: Vec<(BrickAssertion, String)>,
    /// Time taken to verify
    pub verification_time: Duration,
}

impl BrickVerification {
    /// Check if all assertions passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Core Brick trait.
///
/// `Widget` requires `Brick`, so every widget carries assertions, a budget,
/// and a markup rendition.
pub trait Brick: Send + Sync {
    /// Get the brick's unique type name
    fn brick_name(&self) -> &'static str;

    /// Get all assertions for this brick
    fn assertions(&self) -> &[BrickAssertion];

    /// Get the performance budget
    fn budget(&self) -> BrickBudget;

    /// Verify all assertions against current state
    fn verify(&self) -> BrickVerification;

    /// Generate HTML for this brick.
    ///
    /// Must be deterministic (same state -> same output).
    fn to_html(&self) -> String;

    /// Generate CSS for this brick, scoped to its own class hooks.
    fn to_css(&self) -> String;
}

/// Errors raised when a brick refuses to render.
#[derive(Debug, Clone, Error)]
pub enum BrickError {
    /// Assertion failed during verification
    #[error("brick '{brick}' failed {assertion:?}: {reason}")]
    AssertionFailed {
        /// Name of the failing brick
        brick: &'static str,
        /// The assertion that failed
        assertion: BrickAssertion,
        /// Reason for failure
        reason: String,
    },
}

/// Result type for brick operations
pub type BrickResult<T> = Result<T, BrickError>;

/// Render-pipeline helpers available on every brick.
pub trait BrickWidgetExt: Brick {
    /// Verify this brick before rendering.
    ///
    /// Returns the first failed assertion as an error.
    fn verify_for_render(&self) -> BrickResult<()> {
        let verification = self.verify();
        match verification.failed.into_iter().next() {
            None => Ok(()),
            Some((assertion, reason)) => Err(BrickError::AssertionFailed {
                brick: self.brick_name(),
                assertion,
                reason,
            }),
        }
    }
}

impl<T: Brick + ?Sized> BrickWidgetExt for T {}
