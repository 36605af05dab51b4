//! A single wavefront: packed cells for every diagonal at one score.
//!
//! Diagonals are signed (`k = h - v`), so both wings are interleaved into
//! one contiguous array:
//!
//! ```text
//! index: 0,  1,  2,  3,  4,  5,  6
//! k:     0, -1,  1, -2,  2, -3,  3
//! ```
//!
//! A stored value of 0 means there is no cell on that diagonal. `lo` and
//! `hi` track the inclusive diagonal range; they are maintained loosely
//! (deletes only contract an exact endpoint) and every read is
//! bounds-checked against them.

use super::offset::{pack, unpack_offset, unpack_origin, Origin, TAG_BITS};

/// Cells are grown in blocks of this many slots to limit reallocation.
pub const OFFSETS_BASE_LEN: usize = 2048;

/// Packed cells for all diagonals at a fixed score.
#[derive(Debug)]
pub struct WaveFront {
    /// Lowest diagonal with a recorded cell.
    pub lo: i64,
    /// Highest diagonal with a recorded cell.
    pub hi: i64,
    cells: Vec<u32>,
}

/// Interleaved physical index of a diagonal.
#[inline(always)]
fn k_to_index(k: i64) -> usize {
    if k >= 0 {
        (k as usize) << 1
    } else {
        ((-k as usize) << 1) - 1
    }
}

impl WaveFront {
    pub fn new() -> Self {
        WaveFront {
            lo: i64::MAX,
            hi: i64::MIN,
            cells: vec![0; OFFSETS_BASE_LEN],
        }
    }

    /// Reset to the empty state, keeping the allocation.
    pub fn clear(&mut self) {
        self.lo = i64::MAX;
        self.hi = i64::MIN;
        self.cells.truncate(OFFSETS_BASE_LEN);
        self.cells.fill(0);
    }

    /// Grow so `index` is addressable, in whole blocks of zeroed slots.
    #[inline]
    fn ensure_index(&mut self, index: usize) {
        if index >= self.cells.len() {
            let blocks = (index - self.cells.len()) / OFFSETS_BASE_LEN + 1;
            self.cells
                .resize(self.cells.len() + blocks * OFFSETS_BASE_LEN, 0);
        }
    }

    #[inline]
    fn touch(&mut self, k: i64) {
        self.lo = self.lo.min(k);
        self.hi = self.hi.max(k);
    }

    /// Store an offset with its provenance tag.
    #[inline]
    pub fn set(&mut self, k: i64, offset: u32, origin: Origin) {
        let index = k_to_index(k);
        self.ensure_index(index);
        self.cells[index] = pack(offset, origin);
        self.touch(k);
    }

    /// Store an already-packed cell value.
    #[inline]
    pub fn set_raw(&mut self, k: i64, raw: u32) {
        let index = k_to_index(k);
        self.ensure_index(index);
        self.cells[index] = raw;
        self.touch(k);
    }

    /// Advance the offset by `delta` match steps, leaving the tag intact.
    #[inline]
    pub fn increase(&mut self, k: i64, delta: u32) {
        let index = k_to_index(k);
        self.ensure_index(index);
        self.cells[index] += delta << TAG_BITS;
        self.touch(k);
    }

    /// Offset and provenance of the cell on diagonal `k`, if recorded.
    #[inline]
    pub fn get(&self, k: i64) -> Option<(u32, Origin)> {
        let raw = self.get_raw(k)?;
        Some((unpack_offset(raw), unpack_origin(raw)))
    }

    /// Packed cell value on diagonal `k`, if recorded.
    #[inline]
    pub fn get_raw(&self, k: i64) -> Option<u32> {
        if k < self.lo || k > self.hi {
            return None;
        }
        let raw = self.cells[k_to_index(k)];
        if raw == 0 {
            None
        } else {
            Some(raw)
        }
    }

    /// Remove the cell on diagonal `k`. Only an exact endpoint contracts
    /// the range; interior holes are handled by the absent sentinel.
    #[inline]
    pub fn delete(&mut self, k: i64) {
        if k < self.lo || k > self.hi {
            return;
        }
        self.cells[k_to_index(k)] = 0;
        if k == self.hi {
            self.hi -= 1;
        } else if k == self.lo {
            self.lo += 1;
        }
    }
}

impl Default for WaveFront {
    fn default() -> Self {
        Self::new()
    }
}
