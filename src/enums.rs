use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::BOARD_SIZE;

/// One of the two fixed seats in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    A,
    B,
}

pub const PLAYERS: [PlayerId; 2] = [PlayerId::A, PlayerId::B];

impl PlayerId {
    /// The player who opens the play phase.
    pub const FIRST: PlayerId = PlayerId::A;

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::A => PlayerId::B,
            PlayerId::B => PlayerId::A,
        }
    }

    /// Row this player's units are placed on during setup.
    pub fn home_row(self) -> usize {
        match self {
            PlayerId::A => 0,
            PlayerId::B => BOARD_SIZE - 1,
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            PlayerId::A => "A",
            PlayerId::B => "B",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Compass of move tokens. The compass is fixed and does not flip with the
/// side a player sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Forward,
    Back,
    ForwardLeft,
    ForwardRight,
    BackLeft,
    BackRight,
}

pub const DIRECTIONS: [Direction; 8] = [
    Direction::Left,
    Direction::Right,
    Direction::Forward,
    Direction::Back,
    Direction::ForwardLeft,
    Direction::ForwardRight,
    Direction::BackLeft,
    Direction::BackRight,
];

impl Direction {
    /// Grid offset as `(d_row, d_col)`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Forward => (0, 1),
            Direction::Back => (0, -1),
            Direction::ForwardLeft => (-1, 1),
            Direction::ForwardRight => (1, 1),
            Direction::BackLeft => (-1, -1),
            Direction::BackRight => (1, -1),
        }
    }

    /// True when one of the two axis deltas is zero.
    pub fn is_straight(self) -> bool {
        let (d_row, d_col) = self.offset();
        d_row == 0 || d_col == 0
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Forward => "F",
            Direction::Back => "B",
            Direction::ForwardLeft => "FL",
            Direction::ForwardRight => "FR",
            Direction::BackLeft => "BL",
            Direction::BackRight => "BR",
        }
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DIRECTIONS
            .iter()
            .copied()
            .find(|direction| direction.to_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
