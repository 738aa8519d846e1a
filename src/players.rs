use rand::prelude::*;

use crate::config::UNITS_PER_PLAYER;
use crate::enums::PlayerId;
use crate::game::{GameManager, MoveCommand, Placement};

/// Bot that places its units in a shuffled column order and then plays a
/// uniformly random legal move.
pub struct RandomPlayer {
    pub id: PlayerId,
}

impl RandomPlayer {
    pub fn new(id: PlayerId) -> Self {
        RandomPlayer { id }
    }

    /// Five placements on the home row. Unit 0 and 1 are heroes.
    pub fn plan_setup<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Placement> {
        let mut columns: Vec<usize> = (0..UNITS_PER_PLAYER).collect();
        columns.shuffle(rng);
        columns
            .into_iter()
            .enumerate()
            .map(|(i, col)| {
                let name = match i {
                    0 => format!("H1-{}", self.id),
                    1 => format!("H2-{}", self.id),
                    _ => format!("{}{}", self.id, i),
                };
                Placement::new(self.id.home_row(), col, name)
            })
            .collect()
    }

    /// `None` when the bot has nothing legal to do.
    pub fn decide<R: Rng + ?Sized>(&self, game: &GameManager, rng: &mut R) -> Option<MoveCommand> {
        game.legal_moves(self.id).choose(rng).cloned()
    }
}
