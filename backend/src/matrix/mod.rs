//! Matrix engine over grids of decimal integer tokens.
//!
//! A grid is any `&[R]` where each row `R: AsRef<[S]>` and each cell
//! `S: AsRef<str>`, so `Vec<Vec<String>>` from the CSV reader and string
//! literals in tests are both accepted without copying.
//!
//! | Operation  | Output                         | Empty grid |
//! |------------|--------------------------------|------------|
//! | `invert`   | transposed grid                | `[]`       |
//! | `flatten`  | `a,b,c,...\n`                  | `""`       |
//! | `sum`      | canonical sum                  | `"0"`      |
//! | `multiply` | canonical product, stops at 0  | `"0"`      |
//!
//! The engine is pure and synchronous; it keeps no state between calls.

pub mod number;
pub mod ops;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatrixResult;

pub use ops::{flatten, invert, multiply, sum, validate, Dimensions};

/// Render each row comma-joined on its own line.
pub fn render_rows<R, S>(rows: &[R]) -> String
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for row in rows {
        for (j, cell) in row.as_ref().iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            out.push_str(cell.as_ref());
        }
        out.push('\n');
    }
    out
}

/// A request the engine can serve, as named by the HTTP routes and CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Return the grid unchanged, without validation.
    Echo,
    Invert,
    Flatten,
    Sum,
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Echo,
        Operation::Invert,
        Operation::Flatten,
        Operation::Sum,
        Operation::Multiply,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Invert => "invert",
            Operation::Flatten => "flatten",
            Operation::Sum => "sum",
            Operation::Multiply => "multiply",
        }
    }

    /// Run the operation and render its result as response text.
    ///
    /// Grids render one comma-joined line per row; reductions are followed
    /// by a newline; flatten output is returned as is.
    pub fn apply<R, S>(&self, matrix: &[R]) -> MatrixResult<String>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        match self {
            Operation::Echo => Ok(render_rows::<R, S>(matrix)),
            Operation::Invert => invert::<R, S>(matrix).map(|grid| render_rows(&grid)),
            Operation::Flatten => flatten::<R, S>(matrix),
            Operation::Sum => sum::<R, S>(matrix).map(|total| total + "\n"),
            Operation::Multiply => multiply::<R, S>(matrix).map(|product| product + "\n"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown operation: {}", s))
    }
}
