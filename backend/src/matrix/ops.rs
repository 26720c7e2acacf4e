//! The four matrix operations and standalone validation.
//!
//! All operations walk the grid in row-major order and stop at the first
//! offending row or cell. A row's length is checked when the scan enters it.
//! Inputs are only borrowed.

use std::ops::ControlFlow;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use super::number::{canonical, is_integer, parse_integer};
use crate::error::{MatrixError, MatrixResult};

/// Row and column counts of a grid, taken from its first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn of<R, S>(matrix: &[R]) -> Self
    where
        R: AsRef<[S]>,
    {
        Self {
            rows: matrix.len(),
            cols: matrix.first().map_or(0, |row| row.as_ref().len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

fn check_number(token: &str, row: usize, col: usize) -> MatrixResult<()> {
    if is_integer(token) {
        Ok(())
    } else {
        Err(MatrixError::InvalidNumber { row, col })
    }
}

fn parse_cell(token: &str, row: usize, col: usize) -> MatrixResult<BigInt> {
    parse_integer(token).ok_or(MatrixError::InvalidNumber { row, col })
}

/// Check that every row has the first row's length and every cell is an integer.
///
/// # Example
/// ```
/// use matrixops::matrix::{validate, Dimensions};
///
/// let dims = validate(&[["1", "2", "3"], ["4", "5", "6"]]).unwrap();
/// assert_eq!(dims, Dimensions { rows: 2, cols: 3 });
/// ```
pub fn validate<R, S>(matrix: &[R]) -> MatrixResult<Dimensions>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let dims = Dimensions::of::<R, S>(matrix);

    for (i, row) in matrix.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != dims.cols {
            return Err(MatrixError::InconsistentShape);
        }
        for (j, cell) in row.iter().enumerate() {
            check_number(cell.as_ref(), i, j)?;
        }
    }

    Ok(dims)
}

/// Transpose a grid: output cell `[j][i]` is input cell `[i][j]`.
///
/// Tokens are copied verbatim. An empty input, or rows of zero width,
/// produce an empty result.
pub fn invert<R, S>(matrix: &[R]) -> MatrixResult<Vec<Vec<String>>>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let dims = Dimensions::of::<R, S>(matrix);
    if dims.rows == 0 {
        return Ok(Vec::new());
    }

    let mut inverted: Vec<Vec<String>> = (0..dims.cols)
        .map(|_| Vec::with_capacity(dims.rows))
        .collect();

    for (i, row) in matrix.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != dims.cols {
            return Err(MatrixError::InconsistentShape);
        }
        for (j, cell) in row.iter().enumerate() {
            let token = cell.as_ref();
            check_number(token, i, j)?;
            inverted[j].push(token.to_owned());
        }
    }

    Ok(inverted)
}

/// Exact byte length of the flattened text: every token, one comma between
/// consecutive cells, one trailing newline.
///
/// This pass also enforces the rectangular shape.
pub(crate) fn flattened_len<R, S>(matrix: &[R], cols: usize) -> MatrixResult<usize>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut tokens = 0;
    for row in matrix {
        let row = row.as_ref();
        if row.len() != cols {
            return Err(MatrixError::InconsistentShape);
        }
        tokens += row.iter().map(|cell| cell.as_ref().len()).sum::<usize>();
    }

    let cells = matrix.len() * cols;
    Ok(tokens + cells.saturating_sub(1) + 1)
}

/// Join every cell in row-major order with commas and end with a newline.
///
/// The output buffer is sized exactly before any cell is written, so the
/// shape is checked for the whole grid before cell contents are. An empty
/// input yields `""`; rows of zero width yield `"\n"`.
///
/// # Example
/// ```
/// use matrixops::matrix::flatten;
///
/// let flat = flatten(&[["1", "2", "3"], ["4", "5", "6"]]).unwrap();
/// assert_eq!(flat, "1,2,3,4,5,6\n");
/// ```
pub fn flatten<R, S>(matrix: &[R]) -> MatrixResult<String>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let dims = Dimensions::of::<R, S>(matrix);
    if dims.rows == 0 {
        return Ok(String::new());
    }

    let mut flat = String::with_capacity(flattened_len::<R, S>(matrix, dims.cols)?);
    let last = (dims.rows - 1, dims.cols.saturating_sub(1));

    for (i, row) in matrix.iter().enumerate() {
        for (j, cell) in row.as_ref().iter().enumerate() {
            let token = cell.as_ref();
            if token.contains(&[',', '\n'][..]) {
                return Err(MatrixError::InvalidCharacter { row: i, col: j });
            }
            check_number(token, i, j)?;

            flat.push_str(token);
            if (i, j) != last {
                flat.push(',');
            }
        }
    }

    flat.push('\n');
    Ok(flat)
}

/// Fold every cell into `acc` in row-major order until `step` breaks.
///
/// Cells after a break are neither parsed nor shape-checked.
fn reduce<R, S, F>(matrix: &[R], mut acc: BigInt, mut step: F) -> MatrixResult<BigInt>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
    F: FnMut(&mut BigInt, BigInt) -> ControlFlow<()>,
{
    let cols = Dimensions::of::<R, S>(matrix).cols;
    if cols == 0 {
        return Err(MatrixError::EmptyRow);
    }

    for (i, row) in matrix.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != cols {
            return Err(MatrixError::InconsistentRowLength { row: i });
        }
        for (j, cell) in row.iter().enumerate() {
            let value = parse_cell(cell.as_ref(), i, j)?;
            if step(&mut acc, value).is_break() {
                return Ok(acc);
            }
        }
    }

    Ok(acc)
}

/// Sum of every cell, as canonical text. An empty grid sums to `"0"`.
///
/// # Example
/// ```
/// use matrixops::matrix::sum;
///
/// let total = sum(&[["9223372036854775808", "9223372036854775808"]]).unwrap();
/// assert_eq!(total, "18446744073709551616");
/// ```
pub fn sum<R, S>(matrix: &[R]) -> MatrixResult<String>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    if matrix.is_empty() {
        return Ok("0".to_string());
    }

    let total = reduce::<R, S, _>(matrix, BigInt::zero(), |acc, value| {
        *acc += value;
        ControlFlow::Continue(())
    })?;

    Ok(canonical(&total))
}

/// Product of every cell, as canonical text. An empty grid yields `"0"`.
///
/// The scan stops at the first zero: later cells are not validated, so an
/// invalid token after a zero is never reported.
pub fn multiply<R, S>(matrix: &[R]) -> MatrixResult<String>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    if matrix.is_empty() {
        return Ok("0".to_string());
    }

    let product = reduce::<R, S, _>(matrix, BigInt::one(), |acc, value| {
        if value.is_zero() {
            acc.set_zero();
            return ControlFlow::Break(());
        }
        *acc *= value;
        ControlFlow::Continue(())
    })?;

    Ok(canonical(&product))
}
