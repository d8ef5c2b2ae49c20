use std::io::{self, Write};
use std::num::NonZeroUsize;

use thiserror::Error;

use super::smooth::block_average;

/// A row whose measurement count differs from the series width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row has {found} measurements, but the series has {expected} columns")]
pub struct RowWidthError {
    pub expected: usize,
    pub found: usize,
}

// ---------------------------------------------------------------------------
// Series – one loaded result file
// ---------------------------------------------------------------------------

/// Benchmark results from one file, stored column-wise.
///
/// `sizes[i]` is the element count on line `i`, and `timings[op][i]` the
/// measurement for operation `op` on that line. Every column has the same
/// length as `sizes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    /// Independent variable: number of elements.
    pub sizes: Vec<i64>,
    /// One column of nanosecond timings per operation.
    pub timings: Vec<Vec<i64>>,
}

impl Series {
    /// Empty series with `width` timing columns.
    pub fn with_width(width: usize) -> Self {
        Series {
            sizes: Vec::new(),
            timings: vec![Vec::new(); width],
        }
    }

    /// Append one decoded row. Rejects rows whose length differs from
    /// [`Series::width`], leaving the series unchanged.
    pub fn push_row(&mut self, size: i64, row: &[i64]) -> Result<(), RowWidthError> {
        if row.len() != self.timings.len() {
            return Err(RowWidthError {
                expected: self.timings.len(),
                found: row.len(),
            });
        }
        self.sizes.push(size);
        for (column, &value) in self.timings.iter_mut().zip(row) {
            column.push(value);
        }
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Number of timing columns.
    pub fn width(&self) -> usize {
        self.timings.len()
    }

    /// Timing column for an operation index.
    pub fn timing(&self, op: usize) -> Option<&[i64]> {
        self.timings.get(op).map(Vec::as_slice)
    }

    /// Block-average the sizes and every timing column with the same block
    /// size, so x/y pairs stay aligned.
    pub fn smooth(&self, block_size: NonZeroUsize) -> SmoothedSeries {
        SmoothedSeries {
            sizes: block_average(&self.sizes, block_size),
            timings: self
                .timings
                .iter()
                .map(|column| block_average(column, block_size))
                .collect(),
        }
    }

    /// Write the series back in the input format, one row per line.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for (row, size) in self.sizes.iter().enumerate() {
            write!(writer, "{size}")?;
            for column in &self.timings {
                write!(writer, " {}", column[row])?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }
}

// ---------------------------------------------------------------------------
// SmoothedSeries – block-averaged view of a Series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothedSeries {
    pub sizes: Vec<f64>,
    pub timings: Vec<Vec<f64>>,
}

impl SmoothedSeries {
    /// `[x, y]` points for one operation, or `None` if the column is missing.
    pub fn points(&self, op: usize) -> Option<Vec<[f64; 2]>> {
        let column = self.timings.get(op)?;
        Some(
            self.sizes
                .iter()
                .zip(column)
                .map(|(&x, &y)| [x, y])
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series {
        let mut series = Series::with_width(2);
        series.push_row(10, &[100, 200]).unwrap();
        series.push_row(20, &[110, 210]).unwrap();
        series.push_row(30, &[120, 220]).unwrap();
        series
    }

    #[test]
    fn columns_stay_aligned_with_sizes() {
        let series = sample();
        assert_eq!(series.len(), 3);
        assert_eq!(series.width(), 2);
        assert_eq!(series.timing(1), Some(&[200, 210, 220][..]));
        assert_eq!(series.timing(2), None);
    }

    #[test]
    fn mismatched_row_is_rejected_and_series_unchanged() {
        let mut series = Series::with_width(2);
        assert_eq!(
            series.push_row(1, &[5]),
            Err(RowWidthError {
                expected: 2,
                found: 1
            })
        );
        assert!(series.push_row(1, &[5, 6, 7]).is_err());
        assert!(series.is_empty());
        assert!(series.timings.iter().all(Vec::is_empty));

        let mut out = Vec::new();
        series.write_to(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn smoothing_uses_one_block_size_for_all_columns() {
        let smoothed = sample().smooth(NonZeroUsize::new(2).unwrap());
        assert_eq!(smoothed.sizes, vec![15.0, 30.0]);
        assert_eq!(smoothed.timings[0], vec![105.0, 120.0]);
        assert_eq!(smoothed.timings[1], vec![205.0, 220.0]);
        assert_eq!(smoothed.points(0), Some(vec![[15.0, 105.0], [30.0, 120.0]]));
    }

    #[test]
    fn write_to_uses_input_format() {
        let mut out = Vec::new();
        sample().write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "10 100 200\n20 110 210\n30 120 220\n"
        );
    }
}
