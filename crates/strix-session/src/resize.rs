//! Resize/paint synchronization.
//!
//! Widget resizes and engine paints race: the engine keeps delivering
//! frames at the old size for a while after a resize request. Each tab
//! carries one `ResizeSync`, which decides for every view paint whether
//! its dimensions match the most recently requested size. Mismatched
//! frames are never stretched over the surface; they are discarded and
//! the surface shows a neutral backdrop until a matching frame lands.

use strix_common::geometry::{LogicalSize, PhysicalSize};
use strix_engine::PaintKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePhase {
    Stable,
    AwaitingMatchingPaint,
}

/// What the shell should do with a widget resize event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirective {
    Ignore,
    NotifyEngine(LogicalSize),
}

/// What the shell should do with a delivered paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintDecision {
    /// Dimensions match (or no resize is in flight): present the frame.
    Present,
    /// Stale dimensions: drop the frame, clear the surface to neutral.
    Discard,
    /// Non-view paint: present without a size check.
    Bypass,
}

#[derive(Debug)]
pub struct ResizeSync {
    phase: ResizePhase,
    /// Last size sent to the engine. Stays set after confirmation so
    /// repeated resize events at the same size coalesce to nothing.
    requested: Option<LogicalSize>,
    tolerance: i32,
}

impl ResizeSync {
    /// `tolerance` is the per-axis slack in physical pixels when
    /// comparing a paint against `round(requested × scale)`, absorbing
    /// rounding differences between toolkit and engine.
    pub fn new(tolerance: i32) -> Self {
        Self {
            phase: ResizePhase::Stable,
            requested: None,
            tolerance,
        }
    }

    pub fn phase(&self) -> ResizePhase {
        self.phase
    }

    pub fn requested(&self) -> Option<LogicalSize> {
        self.requested
    }

    /// Feeds a widget resize event. Degenerate sizes (pre-layout) and
    /// repeats of the current request coalesce to `Ignore`; only the
    /// most recent distinct size matters.
    pub fn on_widget_resize(&mut self, size: LogicalSize) -> ResizeDirective {
        if size.is_degenerate() {
            return ResizeDirective::Ignore;
        }
        if self.requested == Some(size) {
            return ResizeDirective::Ignore;
        }
        self.requested = Some(size);
        self.phase = ResizePhase::AwaitingMatchingPaint;
        ResizeDirective::NotifyEngine(size)
    }

    /// Feeds a paint delivery of `size` physical pixels at the given
    /// device scale. Transitions back to `Stable` exactly when a view
    /// paint matches the requested size within tolerance.
    pub fn on_paint(
        &mut self,
        kind: PaintKind,
        size: PhysicalSize,
        scale_factor: f64,
    ) -> PaintDecision {
        if kind == PaintKind::Overlay {
            return PaintDecision::Bypass;
        }
        match (self.phase, self.requested) {
            (ResizePhase::AwaitingMatchingPaint, Some(requested)) => {
                let expected = requested.to_physical(scale_factor);
                if expected.within_tolerance(size, self.tolerance) {
                    self.phase = ResizePhase::Stable;
                    PaintDecision::Present
                } else {
                    PaintDecision::Discard
                }
            }
            _ => PaintDecision::Present,
        }
    }
}
