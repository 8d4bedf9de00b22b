#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Row-major boolean matrix reused across ticks (N x N or N x M)
#[derive(Clone, Debug, Default)]
pub struct BoolMatrix {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

impl BoolMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize to rows x cols and clear every cell; keeps the allocation.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.data.clear();
        self.data.resize(rows * cols, false);
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Fill every row with `f(row_index, row)`.
    /// Rows are independent, so they run in parallel with the `parallel` feature.
    pub(crate) fn fill_rows<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [bool]) + Send + Sync,
    {
        if self.cols == 0 {
            return;
        }
        #[cfg(feature = "parallel")]
        {
            self.data
                .par_chunks_mut(self.cols)
                .enumerate()
                .for_each(|(i, row)| f(i, row));
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.data
                .chunks_mut(self.cols)
                .enumerate()
                .for_each(|(i, row)| f(i, row));
        }
    }
}
