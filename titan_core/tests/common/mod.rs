#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::convert::Infallible;
use titan_core::engine::{Game, Score};

/// Node of an explicit game tree. Children may be shared, which makes transpositions.
#[derive(Debug, Clone)]
pub enum Node {
    Terminal(Score),
    Inner { children: Vec<usize>, eval: Score },
}

/// Game whose states are node ids of a prebuilt tree. Records every visit.
pub struct TreeGame {
    nodes: Vec<Node>,
    root: usize,
    max_at_root: bool,
    depth_limit: usize,
    visits: RefCell<Vec<usize>>,
    expansions: RefCell<usize>,
}

impl TreeGame {
    pub fn visits(&self, node: usize) -> usize {
        self.visits.borrow()[node]
    }

    /// Calls to `actions`, root included.
    pub fn expansions(&self) -> usize {
        *self.expansions.borrow()
    }

    pub const fn root(&self) -> usize {
        self.root
    }

    pub fn reset_counters(&self) {
        self.visits.borrow_mut().iter_mut().for_each(|v| *v = 0);
        *self.expansions.borrow_mut() = 0;
    }
}

impl Game for TreeGame {
    type State = usize;
    type Action = usize;
    type Key = usize;
    type Error = Infallible;

    fn actions(&self, state: &usize) -> Vec<usize> {
        *self.expansions.borrow_mut() += 1;
        match &self.nodes[*state] {
            Node::Terminal(_) => Vec::new(),
            Node::Inner { children, .. } => children.clone(),
        }
    }

    fn result(&self, _state: &usize, action: &usize) -> Result<usize, Infallible> {
        Ok(*action)
    }

    fn is_terminal(&self, state: &usize) -> bool {
        matches!(self.nodes[*state], Node::Terminal(_))
    }

    fn utility(&self, state: &usize) -> Score {
        match self.nodes[*state] {
            Node::Terminal(value) => value,
            Node::Inner { .. } => panic!("utility asked of non-terminal node {state}"),
        }
    }

    fn cutoff_test(&self, _state: &usize, depth: usize) -> bool {
        depth > self.depth_limit
    }

    fn eval(&self, state: &usize) -> Score {
        match self.nodes[*state] {
            Node::Terminal(value) => value,
            Node::Inner { eval, .. } => eval,
        }
    }

    fn canonical_key(&self, state: &usize) -> usize {
        self.visits.borrow_mut()[*state] += 1;
        *state
    }

    fn maximizer_to_move(&self, _state: &usize) -> bool {
        self.max_at_root
    }
}

#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn terminal(&mut self, value: Score) -> usize {
        self.nodes.push(Node::Terminal(value));
        self.nodes.len() - 1
    }

    pub fn terminals(&mut self, values: &[Score]) -> Vec<usize> {
        values.iter().map(|v| self.terminal(*v)).collect()
    }

    pub fn inner(&mut self, children: Vec<usize>, eval: Score) -> usize {
        self.nodes.push(Node::Inner { children, eval });
        self.nodes.len() - 1
    }

    pub fn build(self, root: usize, max_at_root: bool, depth_limit: usize) -> TreeGame {
        let count = self.nodes.len();
        TreeGame {
            nodes: self.nodes,
            root,
            max_at_root,
            depth_limit,
            visits: RefCell::new(vec![0; count]),
            expansions: RefCell::new(0),
        }
    }
}

/// Random tree of up to `height` plies. Nodes of a level may reuse nodes from the
/// level below, so the same id is reachable along several paths.
pub fn random_tree(seed: u64, height: usize, depth_limit: usize) -> TreeGame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = TreeBuilder::new();

    let bottom: Vec<usize> = (0..rng.gen_range(2..6))
        .map(|_| builder.terminal(f64::from(rng.gen_range(-20_i32..=20))))
        .collect();
    let mut below = bottom;

    for _ in 0..height {
        let width = rng.gen_range(2..6);
        let mut level = Vec::with_capacity(width);
        for _ in 0..width {
            if rng.gen_bool(0.2) {
                level.push(builder.terminal(f64::from(rng.gen_range(-20_i32..=20))));
                continue;
            }
            let fan_out = rng.gen_range(1..=4);
            let children = (0..fan_out)
                .map(|_| below[rng.gen_range(0..below.len())])
                .collect();
            let eval = f64::from(rng.gen_range(-30_i32..=30)) / 2.0;
            level.push(builder.inner(children, eval));
        }
        below = level;
    }

    let children = below;
    let root = builder.inner(children, 0.0);
    builder.build(root, seed % 2 == 0, depth_limit)
}
