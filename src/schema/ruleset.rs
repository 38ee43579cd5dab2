//! Rule tables and their plain-text serialization.
//!
//! A rule table maps every state (color index) to nine successor states, one
//! per cell of a 3×3 subdivision. The text form is:
//!
//! ```text
//! <ncolors> <niters>
//! r0c0 r0c1 ... r0c8
//! ...
//! ```
//!
//! with one line of nine entries per state.

use std::fmt::Write as _;
use std::io::{self, Read, Write};

/// Number of cells in one ternary subdivision step.
pub const CELLS: usize = 9;

/// Largest supported color count (entries are stored as `u8`).
pub const MAX_COLORS: usize = 256;

/// Transition table for a fractal automaton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleTable {
    rows: Vec<[u8; CELLS]>,
}

impl RuleTable {
    /// Build a table from explicit rows, checking every entry is a valid state.
    pub fn from_rows(rows: Vec<[u8; CELLS]>) -> Result<Self, RulesetError> {
        let ncolors = rows.len();
        if ncolors == 0 || ncolors > MAX_COLORS {
            return Err(RulesetError::ColorCount(ncolors));
        }
        for (state, row) in rows.iter().enumerate() {
            for (cell, &value) in row.iter().enumerate() {
                if value as usize >= ncolors {
                    return Err(RulesetError::EntryOutOfRange {
                        state,
                        cell,
                        value: value as usize,
                        ncolors,
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Rows produced by the genome operators, already reduced modulo `ncolors`.
    pub(crate) fn from_rows_unchecked(rows: Vec<[u8; CELLS]>) -> Self {
        debug_assert!(!rows.is_empty() && rows.len() <= MAX_COLORS);
        debug_assert!(
            rows.iter()
                .flatten()
                .all(|&value| (value as usize) < rows.len())
        );
        Self { rows }
    }

    /// Table where every transition leads to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `ncolors` is outside `1..=256` or `value >= ncolors`.
    pub fn uniform(ncolors: usize, value: u8) -> Self {
        assert!((1..=MAX_COLORS).contains(&ncolors), "invalid color count");
        assert!((value as usize) < ncolors, "value out of range");
        Self {
            rows: vec![[value; CELLS]; ncolors],
        }
    }

    /// Number of states.
    #[inline]
    pub fn ncolors(&self) -> usize {
        self.rows.len()
    }

    /// All rows, indexed by state.
    #[inline]
    pub fn rows(&self) -> &[[u8; CELLS]] {
        &self.rows
    }

    /// Successor row for `state`.
    #[inline]
    pub fn row(&self, state: usize) -> &[u8; CELLS] {
        &self.rows[state]
    }

    /// Successor of `state` in subdivision `cell` (`0..9`, row-major).
    #[inline]
    pub fn next_state(&self, state: u8, cell: usize) -> u8 {
        self.rows[state as usize][cell]
    }

    /// Overwrite a single entry.
    pub(crate) fn set(&mut self, state: usize, cell: usize, value: u8) {
        debug_assert!((value as usize) < self.rows.len());
        self.rows[state][cell] = value;
    }

    /// Write the text serialization with the given iteration count.
    pub fn write_to<W: Write>(&self, iterations: u32, w: &mut W) -> io::Result<()> {
        w.write_all(self.to_text(iterations).as_bytes())
    }

    /// Render the text serialization into a string.
    pub fn to_text(&self, iterations: u32) -> String {
        let mut out = format!("{} {}\n", self.ncolors(), iterations);
        for row in &self.rows {
            for (cell, value) in row.iter().enumerate() {
                let sep = if cell == CELLS - 1 { '\n' } else { ' ' };
                let _ = write!(out, "{value}{sep}");
            }
        }
        out
    }
}

/// A rule table paired with the subdivision depth it was evolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    pub table: RuleTable,
    pub iterations: u32,
}

impl Ruleset {
    /// Parse the text serialization.
    pub fn parse(text: &str) -> Result<Self, RulesetError> {
        let mut tokens = text.split_ascii_whitespace().enumerate();
        let mut next_number = |what: &'static str| -> Result<usize, RulesetError> {
            let (position, token) = tokens.next().ok_or(RulesetError::UnexpectedEnd(what))?;
            token.parse().map_err(|_| RulesetError::InvalidNumber {
                token: token.to_string(),
                position,
            })
        };

        let ncolors = next_number("color count")?;
        if ncolors == 0 || ncolors > MAX_COLORS {
            return Err(RulesetError::ColorCount(ncolors));
        }
        let iterations = next_number("iteration count")?;
        let iterations =
            u32::try_from(iterations).map_err(|_| RulesetError::IterationsOverflow(u32::MAX))?;

        let mut rows = Vec::with_capacity(ncolors);
        for state in 0..ncolors {
            let mut row = [0u8; CELLS];
            for (cell, slot) in row.iter_mut().enumerate() {
                let value = next_number("table entry")?;
                if value >= ncolors {
                    return Err(RulesetError::EntryOutOfRange {
                        state,
                        cell,
                        value,
                        ncolors,
                    });
                }
                *slot = value as u8;
            }
            rows.push(row);
        }

        if let Some((position, token)) = tokens.next() {
            return Err(RulesetError::TrailingData {
                token: token.to_string(),
                position,
            });
        }

        let ruleset = Self {
            table: RuleTable::from_rows_unchecked(rows),
            iterations,
        };
        ruleset.resolution()?;
        Ok(ruleset)
    }

    /// Read and parse a serialized ruleset.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RulesetError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Edge length of the image this ruleset renders at (`3^iterations`).
    pub fn resolution(&self) -> Result<usize, RulesetError> {
        crate::compute::resolution_for(self.iterations)
            .ok_or(RulesetError::IterationsOverflow(self.iterations))
    }

    /// Write the text serialization.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.table.write_to(self.iterations, w)
    }
}

/// Errors reading or constructing a rule table.
#[derive(Debug, thiserror::Error)]
pub enum RulesetError {
    #[error("Color count must be between 1 and 256, got {0}")]
    ColorCount(usize),
    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEnd(&'static str),
    #[error("Invalid number {token:?} at token {position}")]
    InvalidNumber { token: String, position: usize },
    #[error("Entry {value} for state {state}, cell {cell} is not below color count {ncolors}")]
    EntryOutOfRange {
        state: usize,
        cell: usize,
        value: usize,
        ncolors: usize,
    },
    #[error("Unexpected trailing token {token:?} at token {position}")]
    TrailingData { token: String, position: usize },
    #[error("Iteration count {0} is too large to render")]
    IterationsOverflow(u32),
    #[error(transparent)]
    Io(#[from] io::Error),
}
