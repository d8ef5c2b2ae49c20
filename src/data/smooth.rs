use std::num::NonZeroUsize;

// ---------------------------------------------------------------------------
// Block averaging
// ---------------------------------------------------------------------------

/// Numeric values that can be averaged.
pub trait Value: Copy {
    fn to_f64(self) -> f64;
}

impl Value for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Value for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Reduce `values` by replacing each run of `block_size` consecutive elements
/// with its arithmetic mean. The last block may be shorter.
///
/// The result has `values.len().div_ceil(block_size)` elements.
pub fn block_average<T: Value>(values: &[T], block_size: NonZeroUsize) -> Vec<f64> {
    values
        .chunks(block_size.get())
        .map(|block| block.iter().map(|&v| v.to_f64()).sum::<f64>() / block.len() as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn length_is_ceil_of_len_over_block() {
        let values: Vec<i64> = (0..23).collect();
        for b in 1..30 {
            assert_eq!(block_average(&values, nz(b)).len(), values.len().div_ceil(b));
        }
    }

    #[test]
    fn each_output_is_block_mean() {
        let values = [1i64, 2, 3, 4, 5, 6, 7];
        assert_eq!(block_average(&values, nz(3)), vec![2.0, 5.0, 7.0]);
    }

    #[test]
    fn block_size_one_is_identity() {
        let values = [3i64, -1, 8];
        let once = block_average(&values, nz(1));
        assert_eq!(once, vec![3.0, -1.0, 8.0]);

        let smoothed = block_average(&[1i64, 2, 4, 8, 16], nz(2));
        assert_eq!(block_average(&smoothed, nz(1)), smoothed);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let empty: [i64; 0] = [];
        assert!(block_average(&empty, nz(1)).is_empty());
        assert!(block_average(&empty, nz(10_000)).is_empty());
    }

    #[test]
    fn block_larger_than_input_averages_everything() {
        assert_eq!(block_average(&[100i64, 110], nz(10_000)), vec![105.0]);
    }
}
