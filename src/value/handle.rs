//! `Value`: the immutable, shared node every cascade step produces.
//!
//! A `Value` is a cheap handle (`Arc`) around a [`ValueKind`]. Cloning takes a
//! reference, dropping releases it. Values never change after construction:
//! the cascade always builds a new `Value` or hands out an existing one.
//!
//! The cascade keywords (`unset`, `inherit`, `initial`) are process-wide
//! singletons created on first use and never freed.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::color::Rgba;
use super::literal::Literal;
use super::number::Number;
use crate::property::standard;
use crate::property::PropertyId;

/// The closed set of value variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// A concrete value such as `10px` or `red`.
    Literal(Literal),
    /// Take the parent's resolved value.
    Inherit,
    /// Take the property's initial value.
    Initial,
    /// No value given here: inherit for inheritable properties, initial otherwise.
    Unset,
    /// The resolved value of another property on the same node.
    /// `currentColor` is `Computed(color)`.
    Computed(PropertyId),
}

/// A reference-counted, immutable style value.
#[derive(Clone)]
pub struct Value(Arc<ValueKind>);

static UNSET: Lazy<Value> = Lazy::new(|| Value(Arc::new(ValueKind::Unset)));
static INHERIT: Lazy<Value> = Lazy::new(|| Value(Arc::new(ValueKind::Inherit)));
static INITIAL: Lazy<Value> = Lazy::new(|| Value(Arc::new(ValueKind::Initial)));

impl Value {
    /// Wrap a kind. Keyword kinds return the shared singletons.
    pub fn new(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Unset => Self::unset(),
            ValueKind::Inherit => Self::inherit(),
            ValueKind::Initial => Self::initial(),
            other => Value(Arc::new(other)),
        }
    }

    /// The shared `unset` marker.
    pub fn unset() -> Self {
        UNSET.clone()
    }

    /// The shared `inherit` marker.
    pub fn inherit() -> Self {
        INHERIT.clone()
    }

    /// The shared `initial` marker.
    pub fn initial() -> Self {
        INITIAL.clone()
    }

    pub fn literal(literal: impl Into<Literal>) -> Self {
        Value(Arc::new(ValueKind::Literal(literal.into())))
    }

    pub fn number(value: f64) -> Self {
        Self::literal(Number::number(value))
    }

    pub fn px(value: f64) -> Self {
        Self::literal(Number::px(value))
    }

    pub fn em(value: f64) -> Self {
        Self::literal(Number::em(value))
    }

    pub fn percent(value: f64) -> Self {
        Self::literal(Number::percent(value))
    }

    pub fn color(color: Rgba) -> Self {
        Self::literal(color)
    }

    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self::literal(Literal::Keyword(keyword.into()))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::literal(Literal::String(s.into()))
    }

    pub fn list(items: Vec<Literal>) -> Self {
        Self::literal(Literal::List(items))
    }

    /// A value deferring to `property` on the same node.
    pub fn reference(property: PropertyId) -> Self {
        Value(Arc::new(ValueKind::Computed(property)))
    }

    /// `currentColor`: the node's own resolved `color`.
    pub fn current_color() -> Self {
        Self::reference(standard::COLOR)
    }

    pub fn kind(&self) -> &ValueKind {
        &self.0
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self.kind() {
            ValueKind::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self.as_literal() {
            Some(Literal::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba> {
        match self.as_literal() {
            Some(Literal::Color(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self.kind(), ValueKind::Unset)
    }

    /// Returns `true` if the value needs no further computation: a literal
    /// without relative units.
    pub fn is_concrete(&self) -> bool {
        matches!(self.kind(), ValueKind::Literal(l) if !l.is_relative())
    }

    /// Identity comparison: `true` if both handles share one allocation.
    pub fn ptr_eq(a: &Value, b: &Value) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live handles to this value.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Interpolate from `self` towards `end` at `progress`.
    ///
    /// Returns `None` when this pair has no interpolation: any cascade
    /// keyword or reference, mismatched literal kinds, or differing keywords.
    /// Callers fall back to a discrete step.
    pub fn transition(&self, end: &Value, property: PropertyId, progress: f64) -> Option<Value> {
        match (self.kind(), end.kind()) {
            (ValueKind::Literal(a), ValueKind::Literal(b)) => {
                if Value::ptr_eq(self, end) {
                    return Some(self.clone());
                }
                let mixed = a.interpolate(b, progress);
                if mixed.is_none() {
                    tracing::trace!(property = property.index(), "literals do not interpolate");
                }
                mixed.map(Value::literal)
            }
            _ => None,
        }
    }

    /// Append the canonical text form to `out`.
    pub fn print(&self, out: &mut String) {
        use fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(out, "{self}");
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        Value::ptr_eq(self, other) || self.kind() == other.kind()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ValueKind::Literal(l) => l.fmt(f),
            ValueKind::Inherit => f.write_str("inherit"),
            ValueKind::Initial => f.write_str("initial"),
            ValueKind::Unset => f.write_str("unset"),
            ValueKind::Computed(id) if *id == standard::COLOR => f.write_str("currentColor"),
            ValueKind::Computed(id) => write!(f, "-ref({})", id.index()),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Value::literal(literal)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::literal(n)
    }
}

impl From<Rgba> for Value {
    fn from(c: Rgba) -> Self {
        Value::literal(c)
    }
}
