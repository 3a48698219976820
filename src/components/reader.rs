use rayon::prelude::*;
use std::fmt::Debug;

use crate::{
    components::band::{BandStats, StatsAccumulator},
    errors::Result,
};

/// Reads pixels of one band as `f64`.
///
/// Implementors hold no open handle so they can be sent to other threads.
pub trait BandReader: Debug + Send + Sync {
    /// 1-based band index.
    fn index(&self) -> usize;

    /// (width, height) of the band.
    fn size(&self) -> (usize, usize);

    fn nodata(&self) -> Option<f64>;

    /// (width, height) of the blocks the band is stored in.
    fn block_size(&self) -> (usize, usize) {
        (self.size().0, 1)
    }

    /// Row-major pixels of the window at `offset` (col, row) with `size` (width, height).
    fn read_window(&self, offset: (usize, usize), size: (usize, usize)) -> Result<Vec<f64>>;

    fn read_pixel(&self, offset: (usize, usize)) -> Result<f64> {
        let window = self.read_window(offset, (1, 1))?;
        Ok(window[0])
    }

    /// Folded over strips one block high, the band is never held whole.
    fn stats(&self) -> Result<BandStats> {
        strip_stats(
            self.size(),
            self.block_size().1,
            self.nodata(),
            |offset, size| self.read_window(offset, size),
        )
    }
}

/// Statistics of a `size` band read through `read` in full width strips of `rows` rows.
pub(crate) fn strip_stats<R>(
    size: (usize, usize),
    rows: usize,
    nodata: Option<f64>,
    mut read: R,
) -> Result<BandStats>
where
    R: FnMut((usize, usize), (usize, usize)) -> Result<Vec<f64>>,
{
    let (width, height) = size;
    let rows = rows.max(1);
    let mut accumulator = StatsAccumulator::new(nodata);
    for row in (0..height).step_by(rows) {
        let strip = read((0, row), (width, rows.min(height - row)))?;
        accumulator.push(&strip);
    }
    Ok(accumulator.finish())
}

/// Statistics of several bands, computed in parallel.
pub fn par_stats(readers: &[Box<dyn BandReader>]) -> Result<Vec<(usize, BandStats)>> {
    readers
        .par_iter()
        .map(|reader| Ok((reader.index(), reader.stats()?)))
        .collect()
}
