//! Integration tests for stylecascade.
//!
//! These tests exercise the public API from outside the crate: the cascade
//! laws over whole trees, the colour/margin scenarios, value equality, and
//! transitions between computed styles.

use std::time::Duration;

use pretty_assertions::assert_eq;
use stylecascade::property::standard;
use stylecascade::{
    CascadeOptions, PropertyFlags, PropertyId, Registry, Resolver, Rgba, StyleNode, StyleNodeId,
    StyleTree, TimingFunction, TransitionEngine, TransitionTiming, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct ColorMargin {
    registry: Registry,
    color: PropertyId,
    margin: PropertyId,
}

/// `color` inherits with initial `black`; `margin` does not, initial `0`.
fn color_margin() -> ColorMargin {
    let mut builder = Registry::builder();
    let color = builder.register("color", PropertyFlags::INHERIT_ANIMATED, Value::color(Rgba::BLACK));
    let margin = builder.register("margin", PropertyFlags::ANIMATED, Value::px(0.0));
    ColorMargin {
        registry: builder.build().unwrap(),
        color,
        margin,
    }
}

/// A chain root -> n1 -> n2 -> n3 with nothing set anywhere.
fn bare_chain(tree: &mut StyleTree) -> Vec<StyleNodeId> {
    let mut ids = vec![tree.insert(StyleNode::new())];
    for _ in 0..3 {
        let parent = *ids.last().unwrap();
        ids.push(tree.insert_child(parent, StyleNode::new()).unwrap());
    }
    ids
}

// ---------------------------------------------------------------------------
// Cascade laws
// ---------------------------------------------------------------------------

#[test]
fn root_fallback_law() {
    init_tracing();
    let registry = Registry::standard();
    let mut tree = StyleTree::new();
    let chain = bare_chain(&mut tree);
    let resolver = Resolver::new(&registry);

    for descriptor in registry.iter() {
        let expected = resolver.compute(
            descriptor.initial_value(),
            descriptor.id(),
            &tree,
            chain[0],
            None,
        );
        for &node in &chain {
            assert_eq!(
                resolver.resolve(&tree, node, descriptor.id()),
                expected,
                "{}",
                descriptor.name()
            );
        }
    }
}

#[test]
fn root_fallback_law_literal_initials() {
    let f = color_margin();
    let mut tree = StyleTree::new();
    let chain = bare_chain(&mut tree);
    let resolver = Resolver::new(&f.registry);
    for &node in &chain {
        assert_eq!(&resolver.resolve(&tree, node, f.color), f.registry.initial_value(f.color));
        assert_eq!(&resolver.resolve(&tree, node, f.margin), f.registry.initial_value(f.margin));
    }
}

#[test]
fn inheritance_law() {
    let registry = Registry::standard();
    let resolver = Resolver::new(&registry);
    let explicit = [
        (standard::COLOR, Value::color(Rgba::RED)),
        (standard::FONT_SIZE, Value::px(11.0)),
        (standard::FONT_WEIGHT, Value::number(700.0)),
        (standard::LETTER_SPACING, Value::px(2.0)),
    ];

    for (property, value) in explicit {
        assert!(registry.is_inheritable(property));
        let mut tree = StyleTree::new();
        let root = tree.insert(StyleNode::new().with(property, value));
        let parent = tree.insert_child(root, StyleNode::new()).unwrap();
        let child = tree.insert_child(parent, StyleNode::new()).unwrap();

        let parent_value = resolver.resolve(&tree, parent, property);
        assert_eq!(resolver.resolve(&tree, child, property), parent_value);
    }
}

#[test]
fn non_inheritance_law() {
    let registry = Registry::standard();
    let resolver = Resolver::new(&registry);
    let explicit = [
        (standard::MARGIN_TOP, Value::px(10.0)),
        (standard::PADDING_RIGHT, Value::px(3.0)),
        (standard::OPACITY, Value::number(0.5)),
        (standard::BACKGROUND_COLOR, Value::color(Rgba::BLUE)),
        (standard::TEXT_DECORATION_LINE, Value::keyword("underline")),
    ];

    for (property, value) in explicit {
        assert!(!registry.is_inheritable(property));
        let mut tree = StyleTree::new();
        let parent = tree.insert(StyleNode::new().with(property, value.clone()));
        let child = tree.insert_child(parent, StyleNode::new()).unwrap();

        assert_eq!(resolver.resolve(&tree, parent, property), value);
        assert_eq!(&resolver.resolve(&tree, child, property), registry.initial_value(property));
    }
}

#[test]
fn idempotence() {
    let registry = Registry::standard();
    let mut tree = StyleTree::new();
    let root = tree.insert(
        StyleNode::new()
            .with(standard::FONT_SIZE, Value::px(14.0))
            .with(standard::COLOR, Value::color(Rgba::GREEN)),
    );
    let child = tree.insert_child(root, StyleNode::new().with(standard::MARGIN_LEFT, Value::em(2.0))).unwrap();

    for options in [CascadeOptions::default(), CascadeOptions::default().without_cache()] {
        let resolver = Resolver::with_options(&registry, options);
        for descriptor in registry.iter() {
            let first = resolver.resolve(&tree, child, descriptor.id());
            let second = resolver.resolve(&tree, child, descriptor.id());
            assert_eq!(first, second, "{}", descriptor.name());
        }
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn color_scenario() {
    let f = color_margin();
    let resolver = Resolver::new(&f.registry);
    let mut tree = StyleTree::new();

    let root = tree.insert(StyleNode::new());
    assert_eq!(resolver.resolve(&tree, root, f.color), Value::color(Rgba::BLACK));

    tree.set(root, f.color, Value::color(Rgba::RED)).unwrap();
    let child = tree.insert_child(root, StyleNode::new()).unwrap();
    assert_eq!(resolver.resolve(&tree, child, f.color), Value::color(Rgba::RED));

    tree.set(child, f.color, Value::color(Rgba::BLUE)).unwrap();
    let grandchild = tree.insert_child(child, StyleNode::new()).unwrap();
    assert_eq!(resolver.resolve(&tree, child, f.color), Value::color(Rgba::BLUE));
    assert_eq!(resolver.resolve(&tree, grandchild, f.color), Value::color(Rgba::BLUE));
}

#[test]
fn margin_scenario() {
    let f = color_margin();
    let resolver = Resolver::new(&f.registry);
    let mut tree = StyleTree::new();
    let parent = tree.insert(StyleNode::new().with(f.margin, Value::px(10.0)));
    let child = tree.insert_child(parent, StyleNode::new()).unwrap();

    assert_eq!(resolver.resolve(&tree, parent, f.margin), Value::px(10.0));
    assert_eq!(resolver.resolve(&tree, child, f.margin), Value::px(0.0));
}

#[test]
fn reparenting_changes_inherited_values() {
    let f = color_margin();
    let resolver = Resolver::new(&f.registry);
    let mut tree = StyleTree::new();
    let red = tree.insert(StyleNode::new().with(f.color, Value::color(Rgba::RED)));
    let blue = tree.insert(StyleNode::new().with(f.color, Value::color(Rgba::BLUE)));
    let leaf = tree.insert_child(red, StyleNode::new()).unwrap();

    assert_eq!(resolver.resolve(&tree, leaf, f.color), Value::color(Rgba::RED));
    tree.reparent(leaf, blue).unwrap();
    assert_eq!(resolver.resolve(&tree, leaf, f.color), Value::color(Rgba::BLUE));
}

#[test]
fn removing_the_explicit_value_restores_the_cascade() {
    let f = color_margin();
    let resolver = Resolver::new(&f.registry);
    let mut tree = StyleTree::new();
    let root = tree.insert(StyleNode::new().with(f.color, Value::color(Rgba::RED)));
    let child = tree.insert_child(root, StyleNode::new().with(f.color, Value::color(Rgba::BLUE))).unwrap();

    assert_eq!(resolver.resolve(&tree, child, f.color), Value::color(Rgba::BLUE));
    tree.unset(child, f.color).unwrap();
    assert_eq!(resolver.resolve(&tree, child, f.color), Value::color(Rgba::RED));
}

#[test]
fn computed_style_snapshot() {
    let registry = Registry::standard();
    let mut tree = StyleTree::new();
    let root = tree.insert(
        StyleNode::new()
            .with(standard::COLOR, Value::color(Rgba::RED))
            .with(standard::FONT_SIZE, Value::px(10.0)),
    );
    let child = tree
        .insert_child(
            root,
            StyleNode::new()
                .with(standard::FONT_SIZE, Value::em(2.0))
                .with(standard::MARGIN_TOP, Value::em(0.5))
                .with(standard::BACKGROUND_COLOR, Value::current_color())
                .with(standard::OPACITY, Value::number(0.25)),
        )
        .unwrap();

    let style = Resolver::new(&registry).compute_style(&tree, child);
    insta::assert_snapshot!(style.to_string(), @r#"
    color: rgb(255,0,0);
    font-size: 20px;
    font-family: "Sans";
    font-weight: 400;
    letter-spacing: 0px;
    text-decoration-line: none;
    text-decoration-color: rgb(255,0,0);
    background-color: rgb(255,0,0);
    border-color: rgb(255,0,0);
    opacity: 0.25;
    margin-top: 10px;
    margin-right: 0px;
    margin-bottom: 0px;
    margin-left: 0px;
    padding-top: 0px;
    padding-right: 0px;
    padding-bottom: 0px;
    padding-left: 0px;
    min-width: 0px;
    min-height: 0px;
    "#);
}

#[test]
fn compute_subtree_visits_parents_first() {
    let f = color_margin();
    let mut tree = StyleTree::new();
    let root = tree.insert(StyleNode::new().with(f.color, Value::color(Rgba::RED)));
    let a = tree.insert_child(root, StyleNode::new()).unwrap();
    let b = tree.insert_child(a, StyleNode::new().with(f.margin, Value::px(2.0))).unwrap();

    let styles = Resolver::new(&f.registry).compute_subtree(&tree, root);
    let ids: Vec<_> = styles.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![root, a, b]);
    assert_eq!(styles[2].1.get(f.color), &Value::color(Rgba::RED));
    assert_eq!(styles[2].1.get(f.margin), &Value::px(2.0));
}

#[test]
fn deep_chain_resolves_at_the_leaf() {
    let registry = Registry::standard();
    let mut tree = StyleTree::new();
    let root = tree.insert(
        StyleNode::new()
            .with(standard::COLOR, Value::color(Rgba::RED))
            .with(standard::FONT_SIZE, Value::px(10.0)),
    );
    let mut leaf = root;
    for _ in 0..5_000 {
        leaf = tree.insert_child(leaf, StyleNode::new()).unwrap();
    }
    tree.set(leaf, standard::MARGIN_TOP, Value::em(2.0)).unwrap();

    for options in [CascadeOptions::default(), CascadeOptions::default().without_cache()] {
        let resolver = Resolver::with_options(&registry, options);
        assert_eq!(resolver.resolve(&tree, leaf, standard::COLOR), Value::color(Rgba::RED));
        assert_eq!(resolver.resolve(&tree, leaf, standard::BORDER_COLOR), Value::color(Rgba::RED));
        assert_eq!(resolver.resolve(&tree, leaf, standard::MARGIN_TOP), Value::px(20.0));
        assert_eq!(resolver.compute_style(&tree, leaf).get(standard::FONT_SIZE), &Value::px(10.0));
    }
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

#[test]
fn unset_singletons_are_equal() {
    let a = Value::unset();
    let b = Value::unset();
    assert!(Value::ptr_eq(&a, &b));
    assert_eq!(a, b);
}

#[test]
fn separately_built_literals_are_equal() {
    let a = Value::px(5.0);
    let b = Value::px(5.0);
    assert!(!Value::ptr_eq(&a, &b));
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

#[test]
fn transition_boundaries() {
    let registry = Registry::standard();
    let engine = TransitionEngine::new(&registry);

    let a = Value::px(3.0);
    let b = Value::px(17.0);
    assert_eq!(engine.interpolate(&a, &b, standard::MARGIN_TOP, 0.0), a);
    assert_eq!(engine.interpolate(&a, &b, standard::MARGIN_TOP, 1.0), b);

    let c = Value::unset();
    let d = Value::px(17.0);
    assert_eq!(engine.interpolate(&c, &d, standard::MARGIN_TOP, 0.49), c);
    assert_eq!(engine.interpolate(&c, &d, standard::MARGIN_TOP, 0.51), d);
}

#[test]
fn style_change_starts_transitions_for_animated_properties() {
    let registry = Registry::standard();
    let resolver = Resolver::new(&registry);
    let engine = TransitionEngine::new(&registry);
    let mut tree = StyleTree::new();
    let node = tree.insert(StyleNode::new());

    let before = resolver.compute_style(&tree, node);
    tree.set(node, standard::OPACITY, Value::number(0.0)).unwrap();
    tree.set(node, standard::TEXT_DECORATION_LINE, Value::keyword("underline")).unwrap();
    tree.set(node, standard::COLOR, Value::color(Rgba::WHITE)).unwrap();
    let after = resolver.compute_style(&tree, node);

    let timing = TransitionTiming::new(Duration::from_secs(1)).with_timing(TimingFunction::Linear);
    let transitions = engine.start_all(&before, &after, timing, Duration::ZERO, &[]);

    // color also changes border-color and text-decoration-color through currentColor.
    let properties: Vec<_> = transitions.iter().map(|t| t.property()).collect();
    assert_eq!(
        properties,
        vec![
            standard::COLOR,
            standard::TEXT_DECORATION_COLOR,
            standard::BORDER_COLOR,
            standard::OPACITY
        ]
    );

    let opacity = &transitions[3];
    assert_eq!(opacity.value_at(&engine, Duration::from_millis(250)), Value::number(0.75));
    assert_eq!(opacity.value_at(&engine, Duration::from_secs(1)), Value::number(0.0));
}

#[test]
fn retargeted_transition_starts_from_current_value() {
    let registry = Registry::standard();
    let resolver = Resolver::new(&registry);
    let engine = TransitionEngine::new(&registry);
    let mut tree = StyleTree::new();
    let node = tree.insert(StyleNode::new().with(standard::MARGIN_TOP, Value::px(0.0)));
    let timing = TransitionTiming::new(Duration::from_secs(1)).with_timing(TimingFunction::Linear);

    let s0 = resolver.compute_style(&tree, node);
    tree.set(node, standard::MARGIN_TOP, Value::px(100.0)).unwrap();
    let s1 = resolver.compute_style(&tree, node);
    let running = engine.start_all(&s0, &s1, timing, Duration::ZERO, &[]);

    tree.set(node, standard::MARGIN_TOP, Value::px(0.0)).unwrap();
    let s2 = resolver.compute_style(&tree, node);
    let half = Duration::from_millis(500);
    let retargeted = engine.start_all(&s1, &s2, timing, half, &running);

    assert_eq!(retargeted.len(), 1);
    assert_eq!(retargeted[0].start(), &Value::px(50.0));
    assert_eq!(retargeted[0].end(), &Value::px(0.0));
    assert_eq!(retargeted[0].value_at(&engine, half), Value::px(50.0));
}
