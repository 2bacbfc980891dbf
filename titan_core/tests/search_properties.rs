mod common;

use common::{random_tree, TreeBuilder};
use std::sync::Arc;
use titan_core::engine::{AlphaBetaEngine, MinimaxEngine, SearchError, Searcher};

#[test]
fn test_depth_one_picks_best_terminal_child() {
    let mut tree = TreeBuilder::new();
    let children = tree.terminals(&[3.0, 12.0, 8.0]);
    let root = tree.inner(children.clone(), 0.0);
    let game = Arc::new(tree.build(root, true, 1));
    let engine = AlphaBetaEngine::new(Arc::clone(&game));

    let result = engine.choose_move_as_maximizer(&root).unwrap();
    assert_eq!(result.best_move(), Some(&children[1]));
    assert!((result.value() - 12.0).abs() < f64::EPSILON);
    // Only the root looked at actions; terminal children are leaves.
    assert_eq!(result.nodes(), 0);
    assert!(!result.cutoff());
}

/// The textbook tree: A = [3, 12, 8], B = [2, 4, 6], C = [14, 5, 2].
#[test]
fn test_pruned_siblings_are_never_visited() {
    let mut tree = TreeBuilder::new();
    let a_leaves = tree.terminals(&[3.0, 12.0, 8.0]);
    let b_leaves = tree.terminals(&[2.0, 4.0, 6.0]);
    let c_leaves = tree.terminals(&[14.0, 5.0, 2.0]);
    let a = tree.inner(a_leaves, 0.0);
    let b = tree.inner(b_leaves.clone(), 0.0);
    let c = tree.inner(c_leaves.clone(), 0.0);
    let root = tree.inner(vec![a, b, c], 0.0);
    let game = Arc::new(tree.build(root, true, 4));

    let result = AlphaBetaEngine::new(Arc::clone(&game))
        .choose_move_as_maximizer(&root)
        .unwrap();
    assert!((result.value() - 3.0).abs() < f64::EPSILON);
    assert_eq!(result.best_move(), Some(&a));
    assert_eq!(result.nodes(), 3);

    // B's first grandchild (2) is already <= alpha (3): 4 and 6 are skipped.
    assert_eq!(game.visits(b_leaves[0]), 1);
    assert_eq!(game.visits(b_leaves[1]), 0);
    assert_eq!(game.visits(b_leaves[2]), 0);
    // C only prunes on its last child, so everything there is seen.
    assert!(c_leaves.iter().all(|leaf| game.visits(*leaf) == 1));

    let reference = MinimaxEngine::new(Arc::clone(&game))
        .choose_move_as_maximizer(&root)
        .unwrap();
    assert!((reference.value() - result.value()).abs() < f64::EPSILON);
    assert_eq!(reference.best_move(), result.best_move());
}

#[test]
fn test_minimizer_root_tightens_beta() {
    let mut tree = TreeBuilder::new();
    let a_leaves = tree.terminals(&[3.0, 12.0, 8.0]);
    let b_leaves = tree.terminals(&[15.0, 1.0]);
    let c_leaves = tree.terminals(&[4.0, 6.0]);
    let a = tree.inner(a_leaves, 0.0);
    let b = tree.inner(b_leaves.clone(), 0.0);
    let c = tree.inner(c_leaves, 0.0);
    let root = tree.inner(vec![a, b, c], 0.0);
    let game = Arc::new(tree.build(root, false, 4));
    let engine = AlphaBetaEngine::new(Arc::clone(&game));

    let result = engine.choose_move_as_minimizer(&root).unwrap();
    assert!((result.value() - 6.0).abs() < f64::EPSILON);
    assert_eq!(result.best_move(), Some(&c));
    // B's 15 already beats beta (12), so its second child is never looked at.
    assert_eq!(game.visits(b_leaves[1]), 0);

    // `choose_move` dispatches on the side to move.
    let dispatched = engine.choose_move(&root).unwrap();
    assert_eq!(dispatched.best_move(), Some(&c));
}

#[test]
fn test_cutoff_below_root_uses_heuristic() {
    let mut tree = TreeBuilder::new();
    let deep = tree.terminals(&[100.0, -100.0]);
    let left = tree.inner(vec![deep[0]], 7.0);
    let right = tree.inner(vec![deep[1]], 9.0);
    let win = tree.terminal(4.0);
    let root = tree.inner(vec![left, right, win], 0.0);
    let game = Arc::new(tree.build(root, true, 0));

    let result = AlphaBetaEngine::new(Arc::clone(&game))
        .choose_move_as_maximizer(&root)
        .unwrap();
    assert!((result.value() - 9.0).abs() < f64::EPSILON);
    assert_eq!(result.best_move(), Some(&right));
    assert_eq!(result.nodes(), 0);
    assert!(result.cutoff());
    assert_eq!(game.visits(deep[0]), 0);
    assert_eq!(game.visits(deep[1]), 0);
}

#[test]
fn test_terminal_beats_cutoff() {
    let mut tree = TreeBuilder::new();
    let leaves = tree.terminals(&[-5.0, 42.0]);
    let root = tree.inner(leaves.clone(), 0.0);
    // Every non-root ply is past the limit, yet terminal children keep their utility.
    let game = Arc::new(tree.build(root, true, 0));

    let result = AlphaBetaEngine::new(game)
        .choose_move_as_maximizer(&root)
        .unwrap();
    assert!((result.value() - 42.0).abs() < f64::EPSILON);
    assert_eq!(result.best_move(), Some(&leaves[1]));
    assert!(!result.cutoff());
}

#[test]
fn test_no_legal_moves_fails() {
    let mut tree = TreeBuilder::new();
    let root = tree.terminal(1.0);
    let game = Arc::new(tree.build(root, true, 3));
    let engine = AlphaBetaEngine::new(Arc::clone(&game));

    assert!(matches!(
        engine.choose_move_as_maximizer(&root),
        Err(SearchError::NoLegalMoves)
    ));
    assert!(matches!(
        engine.choose_move_as_minimizer(&root),
        Err(SearchError::NoLegalMoves)
    ));
    assert!(matches!(
        MinimaxEngine::new(game).choose_move_as_maximizer(&root),
        Err(SearchError::NoLegalMoves)
    ));
}

#[test]
fn test_transposition_is_not_expanded_twice() {
    let build = |shared: bool| {
        let mut tree = TreeBuilder::new();
        let s_leaves = tree.terminals(&[5.0, 7.0]);
        let s = tree.inner(s_leaves.clone(), 0.0);
        let s_again = if shared {
            s
        } else {
            let copy = tree.terminals(&[5.0, 7.0]);
            tree.inner(copy, 0.0)
        };
        let high = tree.terminal(10.0);
        let low = tree.terminal(1.0);
        let a = tree.inner(vec![s, high], 0.0);
        let b = tree.inner(vec![s_again, low], 0.0);
        let root = tree.inner(vec![a, b], 0.0);
        (tree.build(root, true, 6), root, s, s_leaves)
    };

    let (shared, root, s, s_leaves) = build(true);
    let shared = Arc::new(shared);
    let memo = AlphaBetaEngine::new(Arc::clone(&shared))
        .choose_move_as_maximizer(&root)
        .unwrap();
    // Reached twice, expanded once.
    assert_eq!(shared.visits(s), 2);
    assert_eq!(shared.visits(s_leaves[0]), 1);

    let (copied, root_copy, _, _) = build(false);
    let copied = Arc::new(copied);
    let plain = AlphaBetaEngine::new(Arc::clone(&copied))
        .choose_move_as_maximizer(&root_copy)
        .unwrap();

    assert!((memo.value() - plain.value()).abs() < f64::EPSILON);
    assert!((memo.value() - 7.0).abs() < f64::EPSILON);
    assert!(memo.nodes() < plain.nodes());
    assert_eq!(memo.nodes(), 3);
    assert_eq!(plain.nodes(), 4);
}

#[test]
fn test_node_count_matches_expansions() {
    for seed in 0..50 {
        let game = Arc::new(random_tree(seed, 4, 3));
        let root = game.root();
        let engine = AlphaBetaEngine::new(Arc::clone(&game));
        let result = engine.choose_move(&root).unwrap();
        let expected = u64::try_from(game.expansions() - 1).unwrap();
        assert_eq!(result.nodes(), expected, "seed {seed}");
    }
}

#[test]
fn test_pruning_matches_plain_minimax() {
    for seed in 0..200 {
        for depth_limit in 0..=5 {
            let game = Arc::new(random_tree(seed, 5, depth_limit));
            let root = game.root();
            let pruned = AlphaBetaEngine::new(Arc::clone(&game));
            let plain = MinimaxEngine::new(Arc::clone(&game));

            for maximizing in [true, false] {
                let (fast, slow) = if maximizing {
                    (
                        pruned.choose_move_as_maximizer(&root).unwrap(),
                        plain.choose_move_as_maximizer(&root).unwrap(),
                    )
                } else {
                    (
                        pruned.choose_move_as_minimizer(&root).unwrap(),
                        plain.choose_move_as_minimizer(&root).unwrap(),
                    )
                };
                assert!(
                    (fast.value() - slow.value()).abs() < f64::EPSILON,
                    "seed {seed} depth {depth_limit} max {maximizing}: {} vs {}",
                    fast.value(),
                    slow.value()
                );
                assert_eq!(fast.best_move(), slow.best_move(), "seed {seed}");
                assert!(fast.nodes() <= slow.nodes(), "seed {seed}");
            }
        }
    }
}

#[test]
fn test_search_state_does_not_leak_between_calls() {
    let game = Arc::new(random_tree(7, 5, 4));
    let root = game.root();
    let engine = AlphaBetaEngine::new(Arc::clone(&game));

    let first = engine.choose_move(&root).unwrap();
    game.reset_counters();
    let second = engine.choose_move(&root).unwrap();

    assert_eq!(first.nodes(), second.nodes());
    assert_eq!(first.best_move(), second.best_move());
    assert!((first.value() - second.value()).abs() < f64::EPSILON);
}
