use crate::engine::{Game, Score};
use crate::logic::board::{Outcome, Piece, Square, TitanState};
use crate::logic::config::GameConfig;
use crate::logic::eval::evaluate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

const TITAN_MAX_STEPS: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("the game is already over")]
    GameOver,
    #[error("{0:?} cannot move on this turn")]
    WrongSide(Piece),
    #[error("{0:?} is not on the board")]
    PieceNotOnBoard(Piece),
    #[error("square ({row}, {col}) is off the board")]
    OffBoard { row: u8, col: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseActionError {
    #[error("expected `<piece> <row> <col>`, got {0} fields")]
    WrongArity(usize),
    #[error("unknown piece `{0}`")]
    UnknownPiece(String),
    #[error("bad coordinate `{0}`")]
    BadCoordinate(String),
}

/// Move `piece` to `to`. Displayed and parsed as `T 6 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TitanAction {
    pub piece: Piece,
    pub to: Square,
}

impl TitanAction {
    #[must_use]
    pub const fn new(piece: Piece, row: u8, col: u8) -> Self {
        Self {
            piece,
            to: Square::new(row, col),
        }
    }
}

impl fmt::Display for TitanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.piece.letter(), self.to.row, self.to.col)
    }
}

impl FromStr for TitanAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        let [piece, row, col] = fields.as_slice() else {
            return Err(ParseActionError::WrongArity(fields.len()));
        };

        let mut letters = piece.chars();
        let piece = match (letters.next(), letters.next()) {
            (Some(letter), None) => Piece::from_letter(letter),
            _ => None,
        }
        .ok_or_else(|| ParseActionError::UnknownPiece((*piece).to_string()))?;

        let coord = |text: &str| {
            text.parse::<u8>()
                .map_err(|_| ParseActionError::BadCoordinate(text.to_string()))
        };
        Ok(Self::new(piece, coord(*row)?, coord(*col)?))
    }
}

/// Titan Clash: the Titan Hero (max) against the Pantheon and its lesser titans (min).
#[derive(Debug, Clone, Default)]
pub struct TitanGame {
    config: GameConfig,
}

impl TitanGame {
    #[must_use]
    pub const fn new(config: GameConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn initial_state(&self) -> TitanState {
        TitanState::new(self.config.dim, self.config.starting_life)
    }

    /// Clear straight or diagonal line from `from` to `to`, endpoints excluded.
    #[must_use]
    pub fn in_line_of_sight(&self, from: Square, to: Square, state: &TitanState) -> bool {
        let dr = i32::from(to.row) - i32::from(from.row);
        let dc = i32::from(to.col) - i32::from(from.col);
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return false;
        }

        let (step_r, step_c) = (dr.signum(), dc.signum());
        let mut current = from;
        loop {
            let Some(next) = current.offset(step_r, step_c, state.dim) else {
                return false;
            };
            if next == to {
                return true;
            }
            if state.piece_at(next).is_some() {
                return false;
            }
            current = next;
        }
    }

    /// Damage the Titan takes when fighting `enemy`.
    #[must_use]
    pub fn combat_damage(&self, state: &TitanState, enemy: Piece) -> i32 {
        if enemy.weakness().is_some_and(|w| state.has_emblem(w)) {
            self.config.emblem_damage
        } else {
            self.config.base_damage
        }
    }

    #[must_use]
    pub const fn congratulate(&self, state: &TitanState) -> &'static str {
        match state.outcome {
            Some(Outcome::TitanWon) => {
                "Congratulations! The Titan Hero has defeated the Pantheon and restored balance!"
            }
            _ => {
                "Alas! The forces of the Pantheon have drained the Titan Hero's vitality. Better luck next time!"
            }
        }
    }

    fn titan_actions(&self, state: &TitanState) -> Vec<TitanAction> {
        let Some(from) = state.square_of(Piece::Titan) else {
            return Vec::new();
        };
        let guarded = state.lesser_remaining() > 0;

        let mut moves = Vec::new();
        for (dr, dc) in DIRECTIONS {
            for step in 1..=TITAN_MAX_STEPS {
                let Some(to) = from.offset(dr * step, dc * step, state.dim) else {
                    break;
                };
                // The Pantheon can only be attacked once its guard is gone.
                if guarded && state.piece_at(to) == Some(Piece::Pantheon) {
                    continue;
                }
                moves.push(TitanAction {
                    piece: Piece::Titan,
                    to,
                });
            }
        }
        moves
    }

    fn enemy_actions(&self, state: &TitanState) -> Vec<TitanAction> {
        let titan = state.square_of(Piece::Titan);
        let mut moves = Vec::new();
        for piece in Piece::ENEMIES {
            let Some(from) = state.square_of(piece) else {
                continue;
            };
            for (dr, dc) in DIRECTIONS {
                let Some(to) = from.offset(dr, dc, state.dim) else {
                    continue;
                };
                if state.piece_at(to).is_some_and(|p| p != Piece::Titan) {
                    continue;
                }
                if piece == Piece::Pantheon && titan == Some(to) {
                    continue;
                }
                moves.push(TitanAction { piece, to });
            }
        }

        if self.config.shuffle_enemy_moves {
            // Seeded from the position so the order is a pure function of state.
            let mut hasher = DefaultHasher::new();
            state.hash(&mut hasher);
            let mut rng = StdRng::seed_from_u64(hasher.finish() ^ self.config.shuffle_seed);
            moves.shuffle(&mut rng);
        }
        moves
    }

    fn fight(&self, next: &mut TitanState, before: &TitanState, enemy: Piece) {
        next.life -= self.combat_damage(before, enemy);
        next.add_emblem(enemy);
        next.remove(enemy);
    }
}

impl Game for TitanGame {
    type State = TitanState;
    type Action = TitanAction;
    type Key = TitanState;
    type Error = RulesError;

    fn actions(&self, state: &TitanState) -> Vec<TitanAction> {
        if state.is_over() {
            Vec::new()
        } else if state.titan_to_move {
            self.titan_actions(state)
        } else {
            self.enemy_actions(state)
        }
    }

    fn result(&self, state: &TitanState, action: &TitanAction) -> Result<TitanState, RulesError> {
        if state.is_over() {
            return Err(RulesError::GameOver);
        }
        if (action.piece == Piece::Titan) != state.titan_to_move {
            return Err(RulesError::WrongSide(action.piece));
        }
        if state.square_of(action.piece).is_none() {
            return Err(RulesError::PieceNotOnBoard(action.piece));
        }
        let to = action.to;
        if to.row >= state.dim || to.col >= state.dim {
            return Err(RulesError::OffBoard {
                row: to.row,
                col: to.col,
            });
        }

        let mut next = *state;
        next.place(action.piece, to);

        if state.titan_to_move {
            match state.piece_at(to) {
                Some(Piece::Pantheon) => {
                    next.remove(Piece::Pantheon);
                    next.outcome = Some(Outcome::TitanWon);
                    return Ok(next);
                }
                Some(enemy) if enemy.is_lesser() => self.fight(&mut next, state, enemy),
                _ => next.life -= self.config.per_turn_damage,
            }
            next.titan_to_move = false;
        } else {
            if action.piece.is_lesser() && state.square_of(Piece::Titan) == Some(to) {
                self.fight(&mut next, state, action.piece);
            }

            // Divine Smite
            if let (Some(pantheon), Some(titan)) = (
                next.square_of(Piece::Pantheon),
                next.square_of(Piece::Titan),
            ) {
                if self.in_line_of_sight(pantheon, titan, &next) {
                    next.life -= self.config.shot_damage;
                }
            }
            next.titan_to_move = true;
        }

        next.moves_made += 1;
        if next.life <= 0 {
            next.outcome = Some(Outcome::PantheonWon);
        }
        Ok(next)
    }

    fn is_terminal(&self, state: &TitanState) -> bool {
        state.is_over()
    }

    fn utility(&self, state: &TitanState) -> Score {
        match state.outcome {
            Some(Outcome::TitanWon) => self.config.win_utility,
            Some(Outcome::PantheonWon) => -self.config.win_utility,
            None => 0.0,
        }
    }

    fn cutoff_test(&self, _state: &TitanState, depth: usize) -> bool {
        depth > self.config.depth_limit
    }

    fn eval(&self, state: &TitanState) -> Score {
        evaluate(self, state)
    }

    fn canonical_key(&self, state: &TitanState) -> TitanState {
        *state
    }

    fn maximizer_to_move(&self, state: &TitanState) -> bool {
        state.titan_to_move
    }
}
