// src/game/board.rs
use serde::{Deserialize, Serialize};

use crate::config::BOARD_SIZE;
use crate::enums::PlayerId;

/// A cell coordinate that is always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Step by `(d_row, d_col)`, or `None` when the result leaves the grid.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    /// Every position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

/// A unit standing on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "player")]
    pub owner: PlayerId,
    pub name: String,
}

impl Cell {
    pub fn new(owner: PlayerId, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }
}

/// The 5x5 occupancy grid. Serializes as rows of `null | {player, name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Cell>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.cells[pos.row][pos.col].as_ref()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Write a unit (or nothing) into a cell, returning what was there.
    pub fn set(&mut self, pos: Position, cell: Option<Cell>) -> Option<Cell> {
        std::mem::replace(&mut self.cells[pos.row][pos.col], cell)
    }

    pub fn clear(&mut self, pos: Position) -> Option<Cell> {
        self.set(pos, None)
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|cell| (pos, cell)))
    }

    pub fn unit_count(&self, owner: PlayerId) -> usize {
        self.occupied().filter(|(_, cell)| cell.owner == owner).count()
    }

    /// First unit of `owner` named `name`, scanning row-major.
    pub fn find_unit(&self, owner: PlayerId, name: &str) -> Option<Position> {
        self.occupied()
            .find(|(_, cell)| cell.owner == owner && cell.name == name)
            .map(|(pos, _)| pos)
    }
}
