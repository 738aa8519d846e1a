// src/game/manager.rs
use super::board::Board;
use super::movement::{self, MoveCommand, MoveOutcome};
use super::phase::{Phase, TurnState};
use super::placement::{self, Placement, PlacementOutcome, PlacementSets};
use super::types::GameSnapshot;
use crate::config::Rules;
use crate::enums::PlayerId;
use crate::errors::{GameError, GameResult};

/// The single authoritative match: board, placements and phase/turn state.
/// All mutation goes through the resolvers.
#[derive(Debug, Clone, Default)]
pub struct GameManager {
    board: Board,
    placements: PlacementSets,
    turn: TurnState,
    rules: Rules,
}

impl GameManager {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase()
    }

    pub fn current_turn(&self) -> PlayerId {
        self.turn.current_turn()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn placed_units(&self, player: PlayerId) -> &[String] {
        self.placements.get(player)
    }

    pub fn place_unit(
        &mut self,
        player: PlayerId,
        placement: &Placement,
    ) -> GameResult<PlacementOutcome> {
        placement::resolve_placement(
            &mut self.board,
            &mut self.placements,
            &mut self.turn,
            player,
            placement,
        )
    }

    pub fn complete_setup(&mut self, player: PlayerId) -> GameResult<PlacementOutcome> {
        placement::complete_setup(&self.placements, &mut self.turn, player)
    }

    /// Resolve a raw `"<unit>:<direction>"` command.
    pub fn process_move(&mut self, player: PlayerId, command: &str) -> GameResult<MoveOutcome> {
        // Phase and turn are checked before the command is even parsed.
        self.turn.require_turn(player)?;
        let command = command
            .parse::<MoveCommand>()
            .map_err(|reason| GameError::invalid_move(player, reason))?;
        self.apply_move(player, &command)
    }

    pub fn apply_move(
        &mut self,
        player: PlayerId,
        command: &MoveCommand,
    ) -> GameResult<MoveOutcome> {
        movement::resolve_move(&mut self.board, &mut self.turn, &self.rules, player, command)
    }

    pub fn legal_moves(&self, player: PlayerId) -> Vec<MoveCommand> {
        movement::legal_moves(&self.board, &self.turn, &self.rules, player)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            turn: self.turn.current_turn(),
            player_setup: self.turn.setup_flags(),
            phase: self.turn.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UNITS_PER_PLAYER;
    use crate::errors::{MoveRejection, PlacementRejection};
    use crate::game::board::{Cell, Position};

    fn setup_both(game: &mut GameManager) {
        for player in [PlayerId::A, PlayerId::B] {
            for col in 0..UNITS_PER_PLAYER {
                let name = format!("{player}{col}");
                game.place_unit(player, &Placement::new(player.home_row(), col, name))
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_full_setup_scenario() {
        let mut game = GameManager::default();
        for col in 0..4 {
            game.place_unit(PlayerId::A, &Placement::new(0, col, format!("A{col}")))
                .unwrap();
        }
        assert!(!game.snapshot().player_setup.a);

        let outcome = game.place_unit(PlayerId::A, &Placement::new(0, 4, "A4")).unwrap();
        assert!(outcome.setup_complete);
        let snapshot = game.snapshot();
        assert!(snapshot.player_setup.a);
        assert_eq!(snapshot.board.unit_count(PlayerId::A), 5);
        assert_eq!(snapshot.phase, Phase::Setup);

        for col in 0..5 {
            game.place_unit(PlayerId::B, &Placement::new(4, col, format!("B{col}")))
                .unwrap();
        }
        assert_eq!(game.phase(), Phase::Play);
        assert_eq!(game.current_turn(), PlayerId::A);
        assert_eq!(game.placed_units(PlayerId::B).len(), 5);
    }

    #[test]
    fn test_process_move_checks_turn_before_parsing() {
        let mut game = GameManager::default();
        setup_both(&mut game);

        let err = game.process_move(PlayerId::B, "garbage").unwrap_err();
        assert_eq!(err, GameError::not_player_turn(PlayerId::A, PlayerId::B));

        let err = game.process_move(PlayerId::A, "garbage").unwrap_err();
        assert_eq!(
            err,
            GameError::invalid_move(
                PlayerId::A,
                MoveRejection::MalformedCommand {
                    command: "garbage".into()
                }
            )
        );
        assert_eq!(game.current_turn(), PlayerId::A);
    }

    #[test]
    fn test_moves_alternate_turns() {
        let mut game = GameManager::default();
        setup_both(&mut game);

        assert_eq!(
            game.process_move(PlayerId::A, "A0:FR").unwrap(),
            MoveOutcome::Updated { next_turn: PlayerId::B }
        );
        assert_eq!(
            game.process_move(PlayerId::B, "B4:BL").unwrap(),
            MoveOutcome::Updated { next_turn: PlayerId::A }
        );
        let pos = |r, c| Position::new(r, c).unwrap();
        assert_eq!(game.board().get(pos(1, 1)), Some(&Cell::new(PlayerId::A, "A0")));
        assert_eq!(game.board().get(pos(3, 3)), Some(&Cell::new(PlayerId::B, "B4")));
    }

    #[test]
    fn test_placement_after_setup_rejected() {
        let mut game = GameManager::default();
        setup_both(&mut game);
        let err = game.place_unit(PlayerId::A, &Placement::new(0, 0, "X")).unwrap_err();
        assert_eq!(
            err,
            GameError::placement(PlayerId::A, PlacementRejection::NotSetupPhase)
        );
    }

    #[test]
    fn test_snapshot_wire_format() {
        let mut game = GameManager::default();
        game.place_unit(PlayerId::B, &Placement::new(4, 2, "H2")).unwrap();

        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(json["turn"], "A");
        assert_eq!(json["playerSetup"], serde_json::json!({"A": false, "B": false}));
        assert_eq!(json["phase"]["status"], "setup");
        assert_eq!(json["board"][4][2], serde_json::json!({"player": "B", "name": "H2"}));
    }
}
