//! Lexer for custom task markers at the start of a list item.

use nom::{
    bytes::complete::take_while,
    character::complete::{char, one_of},
    combinator::map_opt,
    sequence::{delimited, terminated},
    IResult,
};

/// A custom task category, written as a bracketed symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMarker {
    /// `[!]`
    Important,
    /// `[?]`
    Question,
    /// `[>]`
    Ongoing,
}

impl TaskMarker {
    /// Map a marker symbol to its category.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '!' => Some(Self::Important),
            '?' => Some(Self::Question),
            '>' => Some(Self::Ongoing),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Important => '!',
            Self::Question => '?',
            Self::Ongoing => '>',
        }
    }

    /// Class name selecting this category's presentation.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Important => "task-important",
            Self::Question => "task-question",
            Self::Ongoing => "task-ongoing",
        }
    }
}

/// Parse a task marker followed by optional whitespace.
pub fn task_marker(input: &str) -> IResult<&str, TaskMarker> {
    terminated(
        map_opt(
            delimited(char('['), one_of("!?>"), char(']')),
            TaskMarker::from_symbol,
        ),
        take_while(char::is_whitespace),
    )(input)
}
