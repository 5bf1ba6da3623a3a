//! Style values: numbers, colours, literals and the shared `Value` handle.

pub mod color;
pub mod handle;
pub mod literal;
pub mod number;

pub use color::Rgba;
pub use handle::{Value, ValueKind};
pub use literal::Literal;
pub use number::{Number, Unit};
