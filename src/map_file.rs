//! Reading and writing `*.map` files.
//!
//! The format is a `"<width> <height>"` header followed by `height` lines of
//! `width` space-separated integers. A cell is on when its value is non-zero.

use std::fs;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::grid::{GridError, GridState};

pub const MAP_EXTENSION: &str = "map";

#[derive(Error, Debug)]
pub enum MapFileError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Missing \"<width> <height>\" header")]
    MissingHeader,
    #[error("Line 1: malformed header {0:?}")]
    MalformedHeader(String),
    #[error("Line 1: {0}")]
    Dimensions(#[from] GridError),
    #[error("Line {line}: missing row")]
    MissingRow { line: usize },
    #[error("Line {line}: expected {expected} values, found {found}")]
    ShortRow { line: usize, expected: u32, found: usize },
    #[error("Line {line}, column {column}: {token:?} is not an integer")]
    InvalidCell {
        line: usize,
        column: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },
}

pub fn serialize(grid: &GridState) -> String {
    let mut out = format!("{} {}\n", grid.width(), grid.height());

    for y in 0..grid.height() {
        let row: Vec<&str> = grid
            .row(y)
            .iter()
            .map(|&cell| if cell { "1" } else { "0" })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

pub fn deserialize(text: &str) -> Result<GridState, MapFileError> {
    let mut lines = text.lines();

    let header = lines.next().ok_or(MapFileError::MissingHeader)?;
    let (width, height) = parse_header(header)?;

    let len = GridState::check_size(width, height)?;
    // A short file can claim a large size; grow with the rows actually read.
    let mut cells = Vec::with_capacity(len.min(text.len()));

    for y in 0..height as usize {
        let line_number = y + 2;
        let line = lines
            .next()
            .ok_or(MapFileError::MissingRow { line: line_number })?;

        let tokens: Vec<&str> = line.split_whitespace().take(width as usize).collect();
        if tokens.len() < width as usize {
            return Err(MapFileError::ShortRow {
                line: line_number,
                expected: width,
                found: tokens.len(),
            });
        }

        for (column, token) in tokens.into_iter().enumerate() {
            let value: i64 = token.parse().map_err(|source| MapFileError::InvalidCell {
                line: line_number,
                column: column + 1,
                token: token.to_string(),
                source,
            })?;
            // Anything other than 0 counts as on.
            cells.push(value != 0);
        }
    }

    Ok(GridState::from_cells(width, height, cells)?)
}

fn parse_header(header: &str) -> Result<(u32, u32), MapFileError> {
    let malformed = || MapFileError::MalformedHeader(header.to_string());
    let mut parts = header.split_whitespace();

    let width: i64 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    let height: i64 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;

    let clamp = |value: i64| u32::try_from(value.max(0)).unwrap_or(u32::MAX);
    if width <= 0 || height <= 0 {
        return Err(GridError::InvalidDimensions {
            width: clamp(width),
            height: clamp(height),
        }
        .into());
    }
    if width > u32::MAX as i64 || height > u32::MAX as i64 {
        return Err(GridError::TooLarge {
            width: clamp(width),
            height: clamp(height),
        }
        .into());
    }

    Ok((width as u32, height as u32))
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<GridState, MapFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MapFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize(&text)
}

pub fn write_map<P: AsRef<Path>>(path: P, grid: &GridState) -> Result<(), MapFileError> {
    let path = path.as_ref();
    fs::write(path, serialize(grid)).map_err(|source| MapFileError::Write {
        path: path.to_path_buf(),
        source,
    })
}
