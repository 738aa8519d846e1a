// src/game/placement.rs
use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Position};
use super::phase::{Phase, TurnState};
use crate::config::UNITS_PER_PLAYER;
use crate::enums::PlayerId;
use crate::errors::{GameError, GameResult, PlacementRejection};

/// A unit to drop on the board during setup. Wire name: `character`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub name: String,
}

impl Placement {
    pub fn new(row: usize, col: usize, name: impl Into<String>) -> Self {
        Self {
            row,
            col,
            name: name.into(),
        }
    }
}

/// Unit names each player has placed so far, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementSets {
    a: Vec<String>,
    b: Vec<String>,
}

impl PlacementSets {
    pub fn get(&self, player: PlayerId) -> &[String] {
        match player {
            PlayerId::A => &self.a,
            PlayerId::B => &self.b,
        }
    }

    fn get_mut(&mut self, player: PlayerId) -> &mut Vec<String> {
        match player {
            PlayerId::A => &mut self.a,
            PlayerId::B => &mut self.b,
        }
    }

    pub fn is_full(&self, player: PlayerId) -> bool {
        self.get(player).len() >= UNITS_PER_PLAYER
    }
}

/// What an accepted placement changed besides the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub setup_complete: bool,
    pub play_started: bool,
}

/// Validate and apply one setup placement. Nothing is mutated on rejection.
pub fn resolve_placement(
    board: &mut Board,
    sets: &mut PlacementSets,
    turn: &mut TurnState,
    player: PlayerId,
    placement: &Placement,
) -> GameResult<PlacementOutcome> {
    turn.require_setup(player)?;

    let reject = |reason: PlacementRejection| -> GameResult<PlacementOutcome> {
        Err(GameError::placement(player, reason))
    };

    if sets.is_full(player) {
        return reject(PlacementRejection::QuotaExhausted);
    }
    let home_row = player.home_row();
    if placement.row != home_row {
        return reject(PlacementRejection::WrongRow {
            row: placement.row,
            home_row,
        });
    }
    let Some(pos) = Position::new(placement.row, placement.col) else {
        return reject(PlacementRejection::OutOfBounds { col: placement.col });
    };
    if !board.is_empty(pos) {
        return reject(PlacementRejection::Occupied {
            row: placement.row,
            col: placement.col,
        });
    }

    board.set(pos, Some(Cell::new(player, placement.name.clone())));
    let placed = sets.get_mut(player);
    placed.push(placement.name.clone());
    log::info!(
        "Player {} placed '{}' at ({}, {}) [{}/{}]",
        player,
        placement.name,
        placement.row,
        placement.col,
        placed.len(),
        UNITS_PER_PLAYER
    );

    let setup_complete = sets.is_full(player);
    let play_started = setup_complete && turn.mark_setup_complete(player);
    Ok(PlacementOutcome {
        setup_complete,
        play_started,
    })
}

/// Explicit setup completion. Only a player with every unit placed may
/// complete, and repeating it changes nothing until the match is over.
pub fn complete_setup(
    sets: &PlacementSets,
    turn: &mut TurnState,
    player: PlayerId,
) -> GameResult<PlacementOutcome> {
    if let Phase::GameOver { winner } = turn.phase() {
        return Err(GameError::GameOver { winner });
    }
    if !sets.is_full(player) {
        return Err(GameError::placement(
            player,
            PlacementRejection::SetupIncomplete {
                placed: sets.get(player).len(),
            },
        ));
    }
    let play_started = turn.mark_setup_complete(player);
    Ok(PlacementOutcome {
        setup_complete: true,
        play_started,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        board: Board,
        sets: PlacementSets,
        turn: TurnState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                board: Board::new(),
                sets: PlacementSets::default(),
                turn: TurnState::new(),
            }
        }

        fn place(
            &mut self,
            player: PlayerId,
            row: usize,
            col: usize,
            name: &str,
        ) -> GameResult<PlacementOutcome> {
            resolve_placement(
                &mut self.board,
                &mut self.sets,
                &mut self.turn,
                player,
                &Placement::new(row, col, name),
            )
        }

        fn fill_home_row(&mut self, player: PlayerId) {
            for col in 0..UNITS_PER_PLAYER {
                self.place(player, player.home_row(), col, &format!("U{col}")).unwrap();
            }
        }
    }

    #[test]
    fn test_placement_writes_unit_and_records_name() {
        let mut fx = Fixture::new();
        let outcome = fx.place(PlayerId::A, 0, 2, "H1").unwrap();
        assert_eq!(
            outcome,
            PlacementOutcome {
                setup_complete: false,
                play_started: false
            }
        );
        let pos = Position::new(0, 2).unwrap();
        assert_eq!(fx.board.get(pos), Some(&Cell::new(PlayerId::A, "H1")));
        assert_eq!(fx.sets.get(PlayerId::A), ["H1".to_string()]);
    }

    #[test]
    fn test_off_home_row_rejected_without_mutation() {
        let mut fx = Fixture::new();
        for row in [1, 2, 3, 4] {
            let err = fx.place(PlayerId::A, row, 0, "K").unwrap_err();
            assert_eq!(
                err,
                GameError::placement(PlayerId::A, PlacementRejection::WrongRow { row, home_row: 0 })
            );
        }
        let err = fx.place(PlayerId::B, 0, 0, "K").unwrap_err();
        assert!(matches!(err, GameError::InvalidPlacement { .. }));
        assert_eq!(fx.board, Board::new());
        assert!(fx.sets.get(PlayerId::A).is_empty());
    }

    #[test]
    fn test_occupied_and_off_grid_cells_rejected() {
        let mut fx = Fixture::new();
        fx.place(PlayerId::B, 4, 1, "K").unwrap();

        let err = fx.place(PlayerId::B, 4, 1, "Q").unwrap_err();
        assert_eq!(
            err,
            GameError::placement(PlayerId::B, PlacementRejection::Occupied { row: 4, col: 1 })
        );
        let err = fx.place(PlayerId::B, 4, 5, "Q").unwrap_err();
        assert_eq!(
            err,
            GameError::placement(PlayerId::B, PlacementRejection::OutOfBounds { col: 5 })
        );
        assert_eq!(fx.sets.get(PlayerId::B).len(), 1);
        assert_eq!(fx.board.unit_count(PlayerId::B), 1);
    }

    #[test]
    fn test_fifth_unit_completes_setup_and_locks_quota() {
        let mut fx = Fixture::new();
        for col in 0..4 {
            let outcome = fx.place(PlayerId::A, 0, col, &format!("U{col}")).unwrap();
            assert!(!outcome.setup_complete);
        }
        let outcome = fx.place(PlayerId::A, 0, 4, "U4").unwrap();
        assert!(outcome.setup_complete);
        assert!(!outcome.play_started);
        assert!(fx.turn.setup_flags().a);
        assert!(!fx.turn.setup_flags().b);

        // Quota is exhausted even though the target would otherwise be fine.
        fx.board.clear(Position::new(0, 4).unwrap());
        let err = fx.place(PlayerId::A, 0, 4, "U5").unwrap_err();
        assert_eq!(
            err,
            GameError::placement(PlayerId::A, PlacementRejection::QuotaExhausted)
        );
    }

    #[test]
    fn test_second_full_side_starts_play() {
        let mut fx = Fixture::new();
        fx.fill_home_row(PlayerId::A);
        for col in 0..4 {
            fx.place(PlayerId::B, 4, col, &format!("V{col}")).unwrap();
        }
        let outcome = fx.place(PlayerId::B, 4, 4, "V4").unwrap();
        assert!(outcome.play_started);
        assert_eq!(fx.turn.phase(), Phase::Play);
        assert_eq!(fx.turn.current_turn(), PlayerId::A);

        let err = fx.place(PlayerId::B, 4, 0, "late").unwrap_err();
        assert_eq!(
            err,
            GameError::placement(PlayerId::B, PlacementRejection::NotSetupPhase)
        );
        assert_eq!(fx.board.unit_count(PlayerId::A), 5);
        assert_eq!(fx.board.unit_count(PlayerId::B), 5);
    }

    #[test]
    fn test_explicit_completion_requires_full_set() {
        let mut fx = Fixture::new();
        fx.place(PlayerId::A, 0, 0, "U0").unwrap();
        let err = complete_setup(&fx.sets, &mut fx.turn, PlayerId::A).unwrap_err();
        assert_eq!(
            err,
            GameError::placement(PlayerId::A, PlacementRejection::SetupIncomplete { placed: 1 })
        );
        assert!(!fx.turn.setup_flags().a);

        let mut fx = Fixture::new();
        fx.fill_home_row(PlayerId::A);
        fx.fill_home_row(PlayerId::B);
        let before = fx.turn.clone();
        let outcome = complete_setup(&fx.sets, &mut fx.turn, PlayerId::B).unwrap();
        assert!(outcome.setup_complete);
        assert!(!outcome.play_started);
        assert_eq!(fx.turn, before);
    }

    #[test]
    fn test_completion_rejected_after_game_over() {
        let mut fx = Fixture::new();
        fx.fill_home_row(PlayerId::A);
        fx.fill_home_row(PlayerId::B);
        assert!(complete_setup(&fx.sets, &mut fx.turn, PlayerId::A).is_ok());

        fx.turn.finish(PlayerId::B);
        let before = fx.turn.clone();
        for player in [PlayerId::A, PlayerId::B] {
            let err = complete_setup(&fx.sets, &mut fx.turn, player).unwrap_err();
            assert_eq!(err, GameError::GameOver { winner: PlayerId::B });
        }
        assert_eq!(fx.turn, before);
    }
}
