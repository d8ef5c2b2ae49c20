use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::Series;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while reading a result file. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: '{token}' is not an integer")]
    Parse {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: expected {expected} measurements, found {found}")]
    Shape {
        line: usize,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a result file: each non-empty line is `<size> <op0> <op1> ...`.
pub fn load_file(path: &Path) -> Result<Series, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let series = load_reader(BufReader::new(file))?;
    log::info!(
        "Loaded {} rows with {} measurement columns from {path:?}",
        series.len(),
        series.width()
    );
    Ok(series)
}

/// Parse result lines from any buffered reader.
///
/// The first data line fixes the row width; every later line must match it.
/// Blank lines are skipped.
pub fn load_reader<R: BufRead>(reader: R) -> Result<Series, LoadError> {
    let mut series: Option<Series> = None;
    // Reused for every line: the measurements of the row being decoded.
    let mut row: Vec<i64> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::Read {
            line: line_no,
            source,
        })?;

        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let size = parse_token(first, line_no)?;

        row.clear();
        for tok in tokens {
            row.push(parse_token(tok, line_no)?);
        }

        series
            .get_or_insert_with(|| Series::with_width(row.len()))
            .push_row(size, &row)
            .map_err(|e| LoadError::Shape {
                line: line_no,
                expected: e.expected,
                found: e.found,
            })?;
    }

    Ok(series.unwrap_or_default())
}

fn parse_token(tok: &str, line: usize) -> Result<i64, LoadError> {
    tok.parse::<i64>().map_err(|source| LoadError::Parse {
        line,
        token: tok.to_string(),
        source,
    })
}
