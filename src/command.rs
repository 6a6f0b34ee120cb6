use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;

use thiserror::Error;

use crate::{IndexError, PrefixSumIndex};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Input ended while reading {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("Expected an integer for {expected}, found `{token}`")]
    InvalidInteger {
        expected: &'static str,
        token: String,
    },

    #[error("Unknown command `{token}`, expected `q` or `u`")]
    UnknownCommand { token: String },

    #[error("Unexpected token `{token}` after command")]
    TrailingToken { token: String },

    #[error("Command {number}: {source}")]
    Index {
        number: usize,
        #[source]
        source: IndexError,
    },
}

/// One line of the command stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// `q a b`: answer the sum over positions `a..=b`.
    Query { start: usize, end: usize },
    /// `u p d`: add `d` to the value at position `p`.
    Update { position: usize, delta: i64 },
}

impl Command {
    /// Reads one command (three tokens) from `tokens`.
    pub fn parse<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Self, CommandError> {
        let kind = next_token(tokens, "command kind")?;
        match kind {
            "q" => Ok(Self::Query {
                start: next_int(tokens, "query start")?,
                end: next_int(tokens, "query end")?,
            }),
            "u" => Ok(Self::Update {
                position: next_int(tokens, "update position")?,
                delta: next_int(tokens, "update delta")?,
            }),
            _ => Err(CommandError::UnknownCommand {
                token: kind.to_string(),
            }),
        }
    }

    /// Runs the command against `index`. Queries return their answer, updates return `None`.
    pub fn apply(&self, index: &mut PrefixSumIndex) -> Result<Option<i64>, IndexError> {
        match *self {
            Self::Query { start, end } => index.range_sum(start, end).map(Some),
            Self::Update { position, delta } => index.update(position, delta).map(|()| None),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_ascii_whitespace();
        let command = Self::parse(&mut tokens)?;
        if let Some(token) = tokens.next() {
            return Err(CommandError::TrailingToken {
                token: token.to_string(),
            });
        }
        Ok(command)
    }
}

/// A parsed command stream: the initial array followed by the commands to run on it.
///
/// The text format is whitespace-separated:
///
/// ```text
/// N
/// v1 v2 ... vN
/// Q
/// c1 a1 b1
/// ...
/// cQ aQ bQ
/// ```
///
/// ```
/// use fentree::Session;
///
/// let session = Session::parse("3\n7 -2 4\n3\nq 1 3\nu 1 3\nq 1 1\n").unwrap();
/// assert_eq!(session.run().unwrap(), vec![9, 10]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub initial: Vec<i64>,
    pub commands: Vec<Command>,
}

impl Session {
    /// Parses a whole input. Tokens after the last declared command are ignored.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut tokens = input.split_ascii_whitespace();

        let len: usize = next_int(&mut tokens, "array length")?;
        let initial = (0..len)
            .map(|_| next_int(&mut tokens, "array value"))
            .collect::<Result<Vec<i64>, _>>()?;

        let count: usize = next_int(&mut tokens, "command count")?;
        let commands = (0..count)
            .map(|_| Command::parse(&mut tokens))
            .collect::<Result<Vec<_>, _>>()?;

        fdebug!(len, commands = count, "Session::parse");
        Ok(Self { initial, commands })
    }

    /// Runs every command in order, passing each query answer to `on_answer` as it is produced.
    ///
    /// Returns the final index. Stops at the first rejected command; answers produced before it
    /// have already been delivered.
    pub fn run_each(
        &self,
        mut on_answer: impl FnMut(i64),
    ) -> Result<PrefixSumIndex, CommandError> {
        let mut index = PrefixSumIndex::from_values(&self.initial);
        for (i, command) in self.commands.iter().enumerate() {
            let answer = command
                .apply(&mut index)
                .map_err(|source| CommandError::Index {
                    number: i + 1,
                    source,
                })?;
            if let Some(answer) = answer {
                on_answer(answer);
            }
        }
        Ok(index)
    }

    /// Runs every command and collects the query answers.
    pub fn run(&self) -> Result<Vec<i64>, CommandError> {
        let mut answers = Vec::new();
        self.run_each(|answer| answers.push(answer))?;
        Ok(answers)
    }
}

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    tokens
        .next()
        .ok_or(CommandError::UnexpectedEnd { expected })
}

fn next_int<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<T, CommandError> {
    let token = next_token(tokens, expected)?;
    token.parse().map_err(|_| CommandError::InvalidInteger {
        expected,
        token: token.to_string(),
    })
}
