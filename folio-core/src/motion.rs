//! Entrance and hover animation parameters
//!
//! Pure data describing how page elements animate: a fade-up revealed the
//! first time an element scrolls into view, a staggered variant for lists of
//! siblings, and a hover lift for cards. Renderers translate these into
//! markup; nothing here has side effects.
//!
//! When the reduced motion preference is set, every vertical offset from
//! every animation family is zero. Opacity and timing are unchanged.

use std::time::Duration;

/// Vertical distance a revealed element travels, in CSS pixels.
pub const FADE_UP_OFFSET: f32 = 24.0;

/// Reveal transition length.
pub const REVEAL_DURATION: Duration = Duration::from_millis(600);

/// Fraction of an element that must be visible before it reveals.
pub const REVEAL_VISIBLE_AMOUNT: f32 = 0.2;

/// Delay added per sibling in a staggered reveal.
pub const STAGGER_STEP: Duration = Duration::from_millis(80);

/// Vertical offset of a hovered card, in CSS pixels (negative is up).
pub const HOVER_LIFT_OFFSET: f32 = -4.0;

/// Hover transition length.
pub const HOVER_DURATION: Duration = Duration::from_millis(200);

/// Timing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Decelerating curve
    EaseOut,
}

impl Easing {
    /// CSS `transition-timing-function` value.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::EaseOut => "cubic-bezier(0, 0, 0.58, 1)",
        }
    }
}

/// Opacity and vertical offset of an element at one end of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
    /// Vertical offset in CSS pixels
    pub y: f32,
}

/// When and how fast an animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Transition length
    pub duration: Duration,
    /// Delay before the transition starts
    pub delay: Duration,
    /// Timing curve
    pub easing: Easing,
}

/// Condition under which a reveal fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTrigger {
    /// Reveal only the first time; never replay
    pub once: bool,
    /// Visible fraction required
    pub amount: f32,
}

/// A reveal-on-scroll animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealParams {
    /// Pose before the element is revealed
    pub initial: Pose,
    /// Pose after the reveal
    pub target: Pose,
    /// Transition timing
    pub timing: Timing,
    /// Trigger condition
    pub viewport: ViewportTrigger,
}

/// A hover animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverParams {
    /// Pose at rest
    pub rest: Pose,
    /// Pose while hovered
    pub hover: Pose,
    /// Transition timing
    pub timing: Timing,
}

/// Computes animation parameters for the current motion preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionController {
    reduced_motion: bool,
}

impl MotionController {
    /// Creates a controller for the given reduced motion preference.
    #[must_use]
    pub const fn new(reduced_motion: bool) -> Self {
        Self { reduced_motion }
    }

    /// Whether reduced motion is in effect.
    #[must_use]
    pub const fn reduced_motion(self) -> bool {
        self.reduced_motion
    }

    /// Every vertical offset goes through here.
    fn offset(self, y: f32) -> f32 {
        if self.reduced_motion { 0.0 } else { y }
    }

    /// Single element fade-up, revealed once on first scroll into view.
    #[must_use]
    pub fn fade_up(self) -> RevealParams {
        self.reveal_with_delay(Duration::ZERO)
    }

    /// Fade-up for the `index`th sibling of a staggered list.
    #[must_use]
    pub fn stagger_item(self, index: usize) -> RevealParams {
        let step = u32::try_from(index).unwrap_or(u32::MAX);
        self.reveal_with_delay(STAGGER_STEP.saturating_mul(step))
    }

    /// Fade-ups for `count` siblings, each delayed one step after the last.
    #[must_use]
    pub fn stagger(self, count: usize) -> Vec<RevealParams> {
        (0..count).map(|i| self.stagger_item(i)).collect()
    }

    /// Card lift on hover.
    #[must_use]
    pub fn hover_lift(self) -> HoverParams {
        HoverParams {
            rest: Pose { opacity: 1.0, y: 0.0 },
            hover: Pose {
                opacity: 1.0,
                y: self.offset(HOVER_LIFT_OFFSET),
            },
            timing: Timing {
                duration: HOVER_DURATION,
                delay: Duration::ZERO,
                easing: Easing::EaseOut,
            },
        }
    }

    fn reveal_with_delay(self, delay: Duration) -> RevealParams {
        RevealParams {
            initial: Pose {
                opacity: 0.0,
                y: self.offset(FADE_UP_OFFSET),
            },
            target: Pose { opacity: 1.0, y: 0.0 },
            timing: Timing {
                duration: REVEAL_DURATION,
                delay,
                easing: Easing::EaseOut,
            },
            viewport: ViewportTrigger {
                once: true,
                amount: REVEAL_VISIBLE_AMOUNT,
            },
        }
    }
}
