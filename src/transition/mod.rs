//! Transitions: interpolation with a discrete fallback, easing, timed transitions.

pub mod engine;
pub mod timing;

pub use engine::{discrete_step, Transition, TransitionEngine, TransitionTiming};
pub use timing::{StepPosition, TimingFunction};
