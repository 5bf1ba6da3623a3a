//! Transition engine: intermediate values between two resolved styles.
//!
//! Every pair of values either interpolates through [`Value::transition`] or
//! falls back to a discrete step: the start value before the halfway point,
//! the end value from it on. The fallback applies to every pair without an
//! interpolation, not only `unset`: mismatched kinds, different units,
//! keywords, strings, and properties registered as not animated.

use std::time::Duration;

use tracing::debug;

use super::timing::TimingFunction;
use crate::cascade::ComputedStyle;
use crate::property::{PropertyId, Registry};
use crate::value::Value;

/// The discrete fallback: `start` while `progress < 0.5`, else `end`.
pub fn discrete_step(start: &Value, end: &Value, progress: f64) -> Value {
    if progress < 0.5 {
        start.clone()
    } else {
        end.clone()
    }
}

/// Duration, delay and easing of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    pub duration: Duration,
    pub delay: Duration,
    pub timing: TimingFunction,
}

impl TransitionTiming {
    /// A transition over `duration` with no delay and `ease` timing.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            timing: TimingFunction::default(),
        }
    }

    /// Set the delay (builder).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the timing function (builder).
    pub fn with_timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Total time from start to finish, delay included.
    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }
}

/// A running transition of one property.
///
/// Times are offsets from any fixed epoch the caller chooses (a frame clock,
/// or zero in tests).
#[derive(Debug, Clone)]
pub struct Transition {
    property: PropertyId,
    start: Value,
    end: Value,
    start_time: Duration,
    timing: TransitionTiming,
}

impl Transition {
    pub fn property(&self) -> PropertyId {
        self.property
    }

    pub fn start(&self) -> &Value {
        &self.start
    }

    pub fn end(&self) -> &Value {
        &self.end
    }

    pub fn timing(&self) -> &TransitionTiming {
        &self.timing
    }

    /// Linear progress at `now`: `0` until the delay has passed, `1` once
    /// the duration has elapsed.
    pub fn progress_at(&self, now: Duration) -> f64 {
        let begin = self.start_time + self.timing.delay;
        if now <= begin {
            return 0.0;
        }
        if self.timing.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now - begin;
        (elapsed.as_secs_f64() / self.timing.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.start_time + self.timing.total()
    }

    /// The animated value at `now`.
    pub fn value_at(&self, engine: &TransitionEngine<'_>, now: Duration) -> Value {
        let eased = self.timing.timing.apply(self.progress_at(now));
        engine.interpolate(&self.start, &self.end, self.property, eased)
    }
}

/// Interpolates values and starts transitions for animated properties.
#[derive(Debug, Clone, Copy)]
pub struct TransitionEngine<'r> {
    registry: &'r Registry,
}

impl<'r> TransitionEngine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// The value `progress` of the way from `start` to `end`.
    ///
    /// `progress` is clamped to `[0, 1]`; `0` returns `start` and `1`
    /// returns `end` exactly.
    pub fn interpolate(
        &self,
        start: &Value,
        end: &Value,
        property: PropertyId,
        progress: f64,
    ) -> Value {
        let animated = self.registry.is_animated(property);
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if progress <= 0.0 {
            return start.clone();
        }
        if progress >= 1.0 {
            return end.clone();
        }

        if animated {
            if let Some(value) = start.transition(end, property, progress) {
                return value;
            }
        }
        debug!(
            property = self.registry.name(property),
            %start,
            %end,
            "no interpolation; stepping discretely"
        );
        discrete_step(start, end, progress)
    }

    /// Start a transition of `property` from `start` to `end` at `now`.
    ///
    /// Returns `None` when there is nothing to animate: the property is not
    /// animated, the values are equal, or the transition takes no time.
    pub fn start(
        &self,
        property: PropertyId,
        start: Value,
        end: Value,
        timing: TransitionTiming,
        now: Duration,
    ) -> Option<Transition> {
        if !self.registry.is_animated(property) || start == end || timing.total().is_zero() {
            return None;
        }
        Some(Transition {
            property,
            start,
            end,
            start_time: now,
            timing,
        })
    }

    /// Start transitions for every animated property that differs between
    /// `before` and `after`.
    ///
    /// A property with a transition in `running` starts from that
    /// transition's current value instead of its old resolved value, so a
    /// retargeted animation does not jump.
    pub fn start_all(
        &self,
        before: &ComputedStyle<'_>,
        after: &ComputedStyle<'_>,
        timing: TransitionTiming,
        now: Duration,
        running: &[Transition],
    ) -> Vec<Transition> {
        before
            .changed(after)
            .into_iter()
            .filter_map(|property| {
                let from = match running.iter().find(|t| t.property == property) {
                    Some(current) => current.value_at(self, now),
                    None => before.get(property).clone(),
                };
                self.start(property, from, after.get(property).clone(), timing, now)
            })
            .collect()
    }
}
