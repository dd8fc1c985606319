//! Four-letter personality codes (e.g. `INFJ`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The four independent binary axes, in code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Energy,
    Cognition,
    Decision,
    Lifestyle,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Energy, Axis::Cognition, Axis::Decision, Axis::Lifestyle];

    /// The two valid letters for this axis. Adjustment tables refer to them
    /// as the first and second pole.
    pub fn letters(self) -> [char; 2] {
        match self {
            Axis::Energy => ['E', 'I'],
            Axis::Cognition => ['N', 'S'],
            Axis::Decision => ['T', 'F'],
            Axis::Lifestyle => ['J', 'P'],
        }
    }

    fn position(self) -> usize {
        match self {
            Axis::Energy => 0,
            Axis::Cognition => 1,
            Axis::Decision => 2,
            Axis::Lifestyle => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("personality code must have 4 letters, got {0}")]
    Length(usize),

    #[error("'{letter}' is not a valid {axis:?} letter")]
    InvalidLetter { axis: Axis, letter: char },
}

/// A validated, upper-cased personality code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalityCode {
    letters: [char; 4],
}

impl PersonalityCode {
    /// Parses a code case-insensitively, ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, CodeError> {
        let upper = raw.trim().to_uppercase();
        let chars: Vec<char> = upper.chars().collect();
        if chars.len() != 4 {
            return Err(CodeError::Length(chars.len()));
        }

        let mut letters = ['\0'; 4];
        for axis in Axis::ALL {
            let letter = chars[axis.position()];
            if !axis.letters().contains(&letter) {
                return Err(CodeError::InvalidLetter { axis, letter });
            }
            letters[axis.position()] = letter;
        }

        Ok(Self { letters })
    }

    pub fn letter(&self, axis: Axis) -> char {
        self.letters[axis.position()]
    }
}

impl FromStr for PersonalityCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PersonalityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
