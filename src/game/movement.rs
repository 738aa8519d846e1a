// src/game/movement.rs
use std::fmt;
use std::str::FromStr;

use super::board::{Board, Cell, Position};
use super::phase::TurnState;
use crate::config::{Rules, HERO_PREFIXES};
use crate::enums::{Direction, PlayerId, DIRECTIONS};
use crate::errors::{GameError, GameResult, MoveRejection};

/// A parsed `"<unit>:<direction>"` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub unit: String,
    pub direction: Direction,
}

impl MoveCommand {
    pub fn new(unit: impl Into<String>, direction: Direction) -> Self {
        Self {
            unit: unit.into(),
            direction,
        }
    }
}

impl FromStr for MoveCommand {
    type Err = MoveRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (unit, token) = s.split_once(':').ok_or_else(|| MoveRejection::MalformedCommand {
            command: s.to_string(),
        })?;
        let direction = token
            .parse::<Direction>()
            .map_err(|()| MoveRejection::UnknownDirection {
                token: token.to_string(),
            })?;
        Ok(Self::new(unit, direction))
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.unit, self.direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Updated { next_turn: PlayerId },
    GameOver { winner: PlayerId },
}

/// A validated move, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MovePlan {
    from: Position,
    to: Position,
    path_captures: Vec<Position>,
}

pub fn is_hero(name: &str) -> bool {
    HERO_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Cells strictly between `from` and `to` along a straight or diagonal line.
fn path_between(from: Position, to: Position) -> Vec<Position> {
    let d_row = to.row() as isize - from.row() as isize;
    let d_col = to.col() as isize - from.col() as isize;
    let steps = d_row.unsigned_abs().max(d_col.unsigned_abs());
    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    (1..steps)
        .filter_map(|i| {
            let i = i as isize;
            from.offset(step_row * i, step_col * i)
        })
        .collect()
}

/// Enemy cells a hero takes on its way to `to`. Empty for the single-step
/// compass.
fn sweep_path(
    board: &Board,
    player: PlayerId,
    from: Position,
    to: Position,
) -> Result<Vec<Position>, MoveRejection> {
    let mut captures = Vec::new();
    for cursor in path_between(from, to) {
        match board.get(cursor) {
            Some(cell) if cell.owner == player => {
                return Err(MoveRejection::PathBlocked {
                    row: cursor.row(),
                    col: cursor.col(),
                });
            }
            Some(_) => captures.push(cursor),
            None => {}
        }
    }
    Ok(captures)
}

fn plan_move(
    board: &Board,
    rules: &Rules,
    player: PlayerId,
    command: &MoveCommand,
) -> Result<MovePlan, MoveRejection> {
    let from = board
        .find_unit(player, &command.unit)
        .ok_or_else(|| MoveRejection::UnknownUnit {
            unit: command.unit.clone(),
        })?;

    if command.direction.is_straight() && !rules.allow_straight_moves {
        return Err(MoveRejection::StraightDirection {
            direction: command.direction,
        });
    }

    let (d_row, d_col) = command.direction.offset();
    let to = from.offset(d_row, d_col).ok_or(MoveRejection::OutOfBounds)?;

    if board.get(to).is_some_and(|cell| cell.owner == player) {
        return Err(MoveRejection::OwnUnitAtDestination {
            row: to.row(),
            col: to.col(),
        });
    }

    let path_captures = if is_hero(&command.unit) {
        sweep_path(board, player, from, to)?
    } else {
        Vec::new()
    };

    Ok(MovePlan {
        from,
        to,
        path_captures,
    })
}

/// Validate and apply a move. Nothing is mutated on rejection.
pub fn resolve_move(
    board: &mut Board,
    turn: &mut TurnState,
    rules: &Rules,
    player: PlayerId,
    command: &MoveCommand,
) -> GameResult<MoveOutcome> {
    turn.require_turn(player)?;
    let plan = plan_move(board, rules, player, command)
        .map_err(|reason| GameError::invalid_move(player, reason))?;

    for pos in &plan.path_captures {
        if let Some(captured) = board.clear(*pos) {
            log::info!("{} swept '{}' on the way", command.unit, captured.name);
        }
    }
    let mover = board
        .clear(plan.from)
        .unwrap_or_else(|| Cell::new(player, command.unit.clone()));
    if let Some(captured) = board.set(plan.to, Some(mover)) {
        log::info!(
            "Player {}'s {} captured '{}' at ({}, {})",
            player,
            command.unit,
            captured.name,
            plan.to.row(),
            plan.to.col()
        );
    }

    let opponent = player.opponent();
    if board.unit_count(opponent) == 0 {
        turn.finish(player);
        log::info!("🏁 Player {} eliminated every unit of player {}", player, opponent);
        return Ok(MoveOutcome::GameOver { winner: player });
    }

    turn.advance_turn();
    Ok(MoveOutcome::Updated {
        next_turn: turn.current_turn(),
    })
}

/// Every command `player` could submit right now that would be accepted.
pub fn legal_moves(
    board: &Board,
    turn: &TurnState,
    rules: &Rules,
    player: PlayerId,
) -> Vec<MoveCommand> {
    if turn.require_turn(player).is_err() {
        return Vec::new();
    }
    board
        .occupied()
        .filter(|(_, cell)| cell.owner == player)
        .flat_map(|(pos, cell)| {
            DIRECTIONS.iter().filter_map(move |&direction| {
                let command = MoveCommand::new(cell.name.clone(), direction);
                // A duplicate name always resolves to its first cell.
                let plan = plan_move(board, rules, player, &command).ok()?;
                (plan.from == pos).then_some(command)
            })
        })
        .collect()
}
