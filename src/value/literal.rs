//! Literal payloads: the concrete data a resolved value carries.

use std::fmt;

use super::color::Rgba;
use super::number::Number;

/// A literal style value, e.g. `10px`, `rgb(255,0,0)`, `none`, `"Sans"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A number with a unit.
    Number(Number),
    /// A colour.
    Color(Rgba),
    /// An identifier like `none`, `solid`, `center`.
    Keyword(String),
    /// A quoted string.
    String(String),
    /// A comma separated list, e.g. a font-family stack.
    List(Vec<Literal>),
}

impl Literal {
    /// Returns `true` if this literal contains units that depend on the
    /// node it is computed for.
    pub fn is_relative(&self) -> bool {
        match self {
            Literal::Number(n) => n.is_relative(),
            Literal::List(items) => items.iter().any(Literal::is_relative),
            Literal::Color(_) | Literal::Keyword(_) | Literal::String(_) => false,
        }
    }

    /// Rewrite every number in this literal through `f`.
    pub fn map_numbers(&self, f: &impl Fn(Number) -> Number) -> Literal {
        match self {
            Literal::Number(n) => Literal::Number(f(*n)),
            Literal::List(items) => Literal::List(items.iter().map(|i| i.map_numbers(f)).collect()),
            other => other.clone(),
        }
    }

    /// Interpolate towards `end`. `None` when the two literals have no
    /// meaningful intermediate (different kinds, units or keywords).
    pub fn interpolate(&self, end: &Literal, t: f64) -> Option<Literal> {
        match (self, end) {
            (Literal::Number(a), Literal::Number(b)) => a.lerp(b, t).map(Literal::Number),
            (Literal::Color(a), Literal::Color(b)) => Some(Literal::Color(a.lerp(b, t))),
            (Literal::List(a), Literal::List(b)) if a.len() == b.len() => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.interpolate(y, t))
                .collect::<Option<Vec<_>>>()
                .map(Literal::List),
            (a, b) if a == b => Some(a.clone()),
            _ => None,
        }
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<Rgba> for Literal {
    fn from(c: Rgba) -> Self {
        Literal::Color(c)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => n.fmt(f),
            Literal::Color(c) => c.fmt(f),
            Literal::Keyword(k) => f.write_str(k),
            Literal::String(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str("\"")
            }
            Literal::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}
