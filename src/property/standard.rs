//! The built-in property table.
//!
//! Ids are fixed so callers can name them as constants. Inheritance and
//! animation flags follow CSS: text properties inherit, box properties do not.

use super::registry::{PropertyFlags, PropertyId, Registry, RegistryBuilder};
use crate::value::{Literal, Rgba, Value};

pub const COLOR: PropertyId = PropertyId::from_index(0);
pub const FONT_SIZE: PropertyId = PropertyId::from_index(1);
pub const FONT_FAMILY: PropertyId = PropertyId::from_index(2);
pub const FONT_WEIGHT: PropertyId = PropertyId::from_index(3);
pub const LETTER_SPACING: PropertyId = PropertyId::from_index(4);
pub const TEXT_DECORATION_LINE: PropertyId = PropertyId::from_index(5);
pub const TEXT_DECORATION_COLOR: PropertyId = PropertyId::from_index(6);
pub const BACKGROUND_COLOR: PropertyId = PropertyId::from_index(7);
pub const BORDER_COLOR: PropertyId = PropertyId::from_index(8);
pub const OPACITY: PropertyId = PropertyId::from_index(9);
pub const MARGIN_TOP: PropertyId = PropertyId::from_index(10);
pub const MARGIN_RIGHT: PropertyId = PropertyId::from_index(11);
pub const MARGIN_BOTTOM: PropertyId = PropertyId::from_index(12);
pub const MARGIN_LEFT: PropertyId = PropertyId::from_index(13);
pub const PADDING_TOP: PropertyId = PropertyId::from_index(14);
pub const PADDING_RIGHT: PropertyId = PropertyId::from_index(15);
pub const PADDING_BOTTOM: PropertyId = PropertyId::from_index(16);
pub const PADDING_LEFT: PropertyId = PropertyId::from_index(17);
pub const MIN_WIDTH: PropertyId = PropertyId::from_index(18);
pub const MIN_HEIGHT: PropertyId = PropertyId::from_index(19);

/// Initial font size in pixels (`medium`).
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

fn register(
    builder: &mut RegistryBuilder,
    expected: PropertyId,
    name: &str,
    flags: PropertyFlags,
    initial: Value,
) {
    let id = builder.register(name, flags, initial);
    debug_assert_eq!(id, expected, "standard property {name} registered out of order");
}

pub(crate) fn registry() -> Registry {
    use super::registry::PropertyFlags as F;

    let mut b = RegistryBuilder::new();
    register(&mut b, COLOR, "color", F::INHERIT_ANIMATED, Value::color(Rgba::BLACK));
    register(&mut b, FONT_SIZE, "font-size", F::INHERIT_ANIMATED, Value::px(DEFAULT_FONT_SIZE_PX));
    register(
        &mut b,
        FONT_FAMILY,
        "font-family",
        F::INHERIT,
        Value::list(vec![Literal::String("Sans".into())]),
    );
    register(&mut b, FONT_WEIGHT, "font-weight", F::INHERIT_ANIMATED, Value::number(400.0));
    register(&mut b, LETTER_SPACING, "letter-spacing", F::INHERIT_ANIMATED, Value::px(0.0));
    register(&mut b, TEXT_DECORATION_LINE, "text-decoration-line", F::NONE, Value::keyword("none"));
    register(&mut b, TEXT_DECORATION_COLOR, "text-decoration-color", F::ANIMATED, Value::current_color());
    register(&mut b, BACKGROUND_COLOR, "background-color", F::ANIMATED, Value::color(Rgba::TRANSPARENT));
    register(&mut b, BORDER_COLOR, "border-color", F::ANIMATED, Value::current_color());
    register(&mut b, OPACITY, "opacity", F::ANIMATED, Value::number(1.0));
    register(&mut b, MARGIN_TOP, "margin-top", F::ANIMATED, Value::px(0.0));
    register(&mut b, MARGIN_RIGHT, "margin-right", F::ANIMATED, Value::px(0.0));
    register(&mut b, MARGIN_BOTTOM, "margin-bottom", F::ANIMATED, Value::px(0.0));
    register(&mut b, MARGIN_LEFT, "margin-left", F::ANIMATED, Value::px(0.0));
    register(&mut b, PADDING_TOP, "padding-top", F::ANIMATED, Value::px(0.0));
    register(&mut b, PADDING_RIGHT, "padding-right", F::ANIMATED, Value::px(0.0));
    register(&mut b, PADDING_BOTTOM, "padding-bottom", F::ANIMATED, Value::px(0.0));
    register(&mut b, PADDING_LEFT, "padding-left", F::ANIMATED, Value::px(0.0));
    register(&mut b, MIN_WIDTH, "min-width", F::ANIMATED, Value::px(0.0));
    register(&mut b, MIN_HEIGHT, "min-height", F::ANIMATED, Value::px(0.0));

    match b.build() {
        Ok(registry) => registry,
        Err(err) => unreachable!("standard property table is malformed: {err}"),
    }
}
