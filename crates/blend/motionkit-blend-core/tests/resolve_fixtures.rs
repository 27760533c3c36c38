use motionkit_blend_core::{
    parse_blend_tree_json, resolve, BlendError, BlendMode, BlendTree, ChildMotion, Motion, Query,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn load(name: &str) -> BlendTree<Motion<String>> {
    let json = motionkit_test_fixtures::blend_trees::json(name)
        .unwrap_or_else(|e| panic!("load {name} fixture: {e:#}"));
    parse_blend_tree_json(&json).expect("parse blend tree fixture")
}

fn weight_of(tree: &BlendTree<Motion<String>>, weights: &[f32], clip: &str) -> f32 {
    tree.children
        .iter()
        .zip(weights)
        .find(|(c, _)| c.motion.first_clip().map(String::as_str) == Some(clip))
        .map(|(_, w)| *w)
        .unwrap_or_else(|| panic!("no child for clip {clip}"))
}

#[test]
fn every_fixture_parses() {
    for key in motionkit_test_fixtures::blend_trees::keys() {
        let json = motionkit_test_fixtures::blend_trees::json(&key).unwrap();
        parse_blend_tree_json(&json).unwrap_or_else(|e| panic!("{key}: {e}"));
    }
}

#[test]
fn locomotion_weights_are_normalized_across_the_range() {
    let tree = load("locomotion-1d");
    for step in 0..=40 {
        let t = step as f32 / 40.0;
        let r = resolve(&tree, &Query::normalized(t)).unwrap();
        approx(r.sum(), 1.0, 1e-5);
        assert!(r.weights.iter().all(|w| *w >= 0.0), "negative weight at t={t}");
    }
}

#[test]
fn locomotion_exact_and_interpolated() {
    let tree = load("locomotion-1d");
    let r = resolve(&tree, &Query::normalized(0.5)).unwrap();
    assert_eq!(weight_of(&tree, &r.weights, "walk"), 1.0);
    assert_eq!(weight_of(&tree, &r.weights, "idle"), 0.0);
    assert_eq!(weight_of(&tree, &r.weights, "run"), 0.0);

    let r = resolve(&tree, &Query::normalized(0.75)).unwrap();
    approx(weight_of(&tree, &r.weights, "walk"), 0.5, 1e-6);
    approx(weight_of(&tree, &r.weights, "run"), 0.5, 1e-6);
}

#[test]
fn threshold_order_does_not_change_weights() {
    let sorted = load("locomotion-1d");
    let shuffled = load("locomotion-1d-shuffled");
    for t in [0.0, 0.1, 0.25, 0.5, 0.6, 0.99, 1.0] {
        let a = resolve(&sorted, &Query::normalized(t)).unwrap();
        let b = resolve(&shuffled, &Query::normalized(t)).unwrap();
        for clip in ["idle", "walk", "run"] {
            assert_eq!(
                weight_of(&sorted, &a.weights, clip),
                weight_of(&shuffled, &b.weights, clip),
                "clip {clip} at t={t}"
            );
        }
    }
}

#[test]
fn every_permutation_matches_sorted_order() {
    let thresholds = [0.0f32, 0.5, 1.0];
    let perms = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let build = |order: &[usize; 3]| {
        BlendTree::one_dimensional(
            order
                .iter()
                .map(|&i| ChildMotion::at_threshold(i, thresholds[i]))
                .collect(),
        )
    };
    let reference = build(&perms[0]);
    for q in [0.2, 0.5, 0.8] {
        let expected = resolve(&reference, &Query::normalized(q)).unwrap();
        for order in &perms[1..] {
            let tree = build(order);
            let got = resolve(&tree, &Query::normalized(q)).unwrap();
            for (pos, child) in tree.children.iter().enumerate() {
                assert_eq!(got.weights[pos], expected.weights[child.motion]);
            }
        }
    }
}

#[test]
fn strafe_prefers_the_child_under_the_query() {
    let tree = load("strafe-2d");
    assert_eq!(tree.mode, BlendMode::Cartesian2D);

    let on_forward = resolve(&tree, &Query::point(0.0, 1.0)).unwrap();
    let between = resolve(&tree, &Query::point(0.0, 0.5)).unwrap();
    approx(on_forward.sum(), 1.0, 1e-5);
    approx(between.sum(), 1.0, 1e-5);
    assert!(
        weight_of(&tree, &on_forward.weights, "forward")
            > weight_of(&tree, &between.weights, "forward")
    );
    assert_eq!(
        tree.children[on_forward.dominant().unwrap()]
            .motion
            .first_clip(),
        Some(&"forward".to_string())
    );
}

#[test]
fn nested_tree_children_are_resolved_independently() {
    let tree = load("nested-jump");
    assert_eq!(
        Motion::Tree(Box::new(tree.clone())).first_clip(),
        Some(&"takeoff_left".to_string())
    );

    // 0.5 * max(2.0) = 1.0 -> airborne only
    let r = resolve(&tree, &Query::normalized(0.5)).unwrap();
    assert_eq!(r.weights, vec![0.0, 1.0, 0.0]);

    let takeoff = tree.children[0].motion.as_tree().expect("nested takeoff tree");
    assert_eq!(takeoff.mode, BlendMode::Directional2D);
    let r = resolve(takeoff, &Query::point(1.0, 0.0)).unwrap();
    assert!(r.weights[1] > r.weights[0]);

    assert!(matches!(
        resolve(takeoff, &Query::normalized(0.5)),
        Err(BlendError::ModeMismatch { .. })
    ));
}

#[test]
fn empty_tree_returns_no_partial_result() {
    let tree: BlendTree<Motion<String>> = BlendTree::one_dimensional(Vec::new());
    assert_eq!(
        resolve(&tree, &Query::normalized(0.5)),
        Err(BlendError::EmptyTree)
    );
}
