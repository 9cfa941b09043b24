/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Readers for the files that make up an EAM force field.
//!
//! * `.frc` files list the atom types, each pointing at a potential file.
//! * funcfl files (the single-element DYNAMO format) hold the tabulated
//!   `F(rho)`, `Z(r)` and `rho(r)` of one type.
//! * cross-interaction tables hold an explicit `phi(r)` for one pair of types.
//!
//! Numbers may be separated by whitespace, commas or semicolons.

#[macro_use] extern crate log;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod cross;
mod frc;
mod funcfl;
mod search;

pub use crate::cross::CrossTable;
pub use crate::frc::{AtomTypeEntry, BaseTypeEntry, CrossInteractionEntry, FrcFile};
pub use crate::funcfl::FuncflFile;
pub use crate::search::{SearchPath, FORCE_PARAM_PATH};

/// A malformed line in a force field file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{file}:{line}: {message}")]
pub struct ParseError {
    pub file: String,
    /// 1-based.
    pub line: usize,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] path_abs::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("could not find the force field file {name:?} (tried: {})", DisplayPaths(.tried))]
    NotFound {
        name: String,
        tried: Vec<PathBuf>,
    },
}

struct DisplayPaths<'a>(&'a [PathBuf]);

impl fmt::Display for DisplayPaths<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for path in self.0 {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}", path.display())?;
        }
        Ok(())
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String, ReadError> {
    let text = path_abs::FileRead::open(path)?.read_string()?;
    Ok(text)
}

//--------------------------------------------------------------------------------------

pub(crate) const SEPARATORS: &[char] = &[' ', '\t', ',', ';', '\r'];

pub(crate) fn split_words(line: &str) -> impl Iterator<Item=&str> {
    line.split(SEPARATORS).filter(|s| !s.is_empty())
}

/// A stream of words tagged with the (1-based) line they came from.
pub(crate) struct Words<'a> {
    file: &'a str,
    words: Vec<(usize, &'a str)>,
    pos: usize,
    last_line: usize,
}

impl<'a> Words<'a> {
    /// Takes `(0-based index, line)` pairs, as produced by `str::lines().enumerate()`.
    pub fn new(file: &'a str, lines: impl IntoIterator<Item=(usize, &'a str)>) -> Self {
        let mut last_line = 0;
        let mut words = vec![];
        for (index, line) in lines {
            last_line = index + 1;
            words.extend(split_words(line).map(|word| (index + 1, word)));
        }
        Words { file, words, pos: 0, last_line }
    }

    pub fn error(&self, line: usize, message: impl Into<String>) -> ParseError {
        ParseError { file: self.file.to_string(), line, message: message.into() }
    }

    pub fn next_word(&mut self, what: &str) -> Result<(usize, &'a str), ParseError> {
        match self.words.get(self.pos) {
            Some(&word) => {
                self.pos += 1;
                Ok(word)
            },
            None => Err(self.error(self.last_line, format!("expected {}, found end of input", what))),
        }
    }

    pub fn parse<T: ParseWord>(&mut self, what: &str) -> Result<T, ParseError> {
        let (line, word) = self.next_word(what)?;
        T::parse_word(word).ok_or_else(|| self.error(line, format!("could not parse {} from {:?}", what, word)))
    }

    pub fn values(&mut self, count: usize, what: &str) -> Result<Vec<f64>, ParseError> {
        (0..count).map(|i| self.parse(&format!("{} value #{} of {}", what, i + 1, count))).collect()
    }

    pub fn num_remaining(&self) -> usize { self.words.len() - self.pos }
}

pub(crate) trait ParseWord: Sized {
    fn parse_word(word: &str) -> Option<Self>;
}

impl ParseWord for usize {
    fn parse_word(word: &str) -> Option<Self> { word.parse().ok() }
}

impl ParseWord for u32 {
    fn parse_word(word: &str) -> Option<Self> { word.parse().ok() }
}

impl ParseWord for f64 {
    // Fortran writes double precision exponents with a D.
    fn parse_word(word: &str) -> Option<Self> {
        match f64::from_str(word) {
            Ok(x) => Some(x),
            Err(_) => f64::from_str(&word.replace(|c| c == 'D' || c == 'd', "E")).ok(),
        }
    }
}
