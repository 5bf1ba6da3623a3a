//! Numeric values: Number, Unit (plain numbers, px, em, %).

use std::fmt;

/// A CSS unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Unitless number (opacity, font-weight, line-height factors).
    Number,
    /// Absolute length in pixels.
    Px,
    /// Length relative to the font size. Resolved to `Px` during computation.
    Em,
    /// Percentage of some reference the property defines.
    Percent,
}

impl Unit {
    /// The suffix used when printing a number in this unit.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Number => "",
            Unit::Px => "px",
            Unit::Em => "em",
            Unit::Percent => "%",
        }
    }
}

/// A number with a unit, e.g. `1.5`, `10px`, `2em`, `50%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    pub unit: Unit,
}

impl Number {
    /// Create a number with an explicit unit.
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Create a unitless number.
    pub fn number(value: f64) -> Self {
        Self::new(value, Unit::Number)
    }

    /// Create a length in pixels.
    pub fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    /// Create a length in font-relative `em` units.
    pub fn em(value: f64) -> Self {
        Self::new(value, Unit::Em)
    }

    /// Create a percentage.
    pub fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    /// Returns `true` if this number still depends on context to be resolved.
    pub fn is_relative(&self) -> bool {
        self.unit == Unit::Em
    }

    /// Linear interpolation towards `end`. Numbers in different units do not
    /// interpolate.
    pub fn lerp(&self, end: &Number, t: f64) -> Option<Number> {
        if self.unit != end.unit {
            return None;
        }
        Some(Number::new(self.value * (1.0 - t) + end.value * t, self.unit))
    }
}

/// Write a float the way style values are printed: integral values without
/// a fractional part.
pub(crate) fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_float(f, self.value)?;
        f.write_str(self.unit.suffix())
    }
}
