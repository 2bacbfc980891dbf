use crate::engine::Score;
use crate::logic::board::{Piece, Square, TitanState};
use crate::logic::rules::TitanGame;

/// Where the Pantheon is strongest: its starting square.
pub const IDEAL_PANTHEON: Square = Square::new(0, 3);

/// Heuristic value of a non-terminal position, positive when the Titan is ahead.
#[must_use]
pub fn evaluate(game: &TitanGame, state: &TitanState) -> Score {
    let config = game.config();
    let Some(hero) = state.square_of(Piece::Titan) else {
        return -config.win_utility;
    };
    let pantheon = state.square_of(Piece::Pantheon);

    let lesser: Vec<Square> = Piece::LESSER
        .into_iter()
        .filter_map(|p| state.square_of(p))
        .collect();
    let enemy_count = lesser.len() + usize::from(pantheon.is_some());

    let avg_distance = if lesser.is_empty() {
        0.0
    } else {
        let total: u32 = lesser.iter().map(|sq| hero.manhattan(*sq)).sum();
        f64::from(total) / f64::from(u32::try_from(lesser.len()).unwrap_or(u32::MAX))
    };

    let mut score = config.life_weight * f64::from(state.life);
    score -= config.enemy_weight * f64::from(u32::try_from(enemy_count).unwrap_or(u32::MAX));
    score -= config.distance_weight * avg_distance;
    score += config.emblem_weight * f64::from(state.emblem_count());

    if let Some(pantheon) = pantheon {
        // Alone, the Pantheon is prey: reward closing in.
        if lesser.is_empty() {
            score += config.capture_bonus / f64::from(hero.manhattan(pantheon) + 1);
        }
        if game.in_line_of_sight(pantheon, hero, state) {
            score -= config.smite_penalty;
        }
        score -= config.pantheon_drift_penalty * f64::from(pantheon.manhattan(IDEAL_PANTHEON));
    }

    score
}
