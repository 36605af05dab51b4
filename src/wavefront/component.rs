//! A wavefront component: the score axis of one alignment state.
//!
//! Each aligner holds three components (match/mismatch, insertion,
//! deletion). A component is a sparse directory of wavefronts indexed by
//! score; a missing entry means no cell exists at that score. Wavefronts
//! freed by `reset()` are parked on a spare list and handed back out on
//! demand, so repeated alignments reuse their allocations.

use super::front::WaveFront;
use super::offset::Origin;

/// The score directory is grown in blocks of this many entries.
pub const WAVEFRONTS_BASE_LEN: usize = 2048;

/// Score-indexed directory of wavefronts for one alignment state.
#[derive(Debug)]
pub struct Component {
    fronts: Vec<Option<WaveFront>>,
    spare: Vec<WaveFront>,
}

impl Component {
    pub fn new() -> Self {
        let mut fronts = Vec::with_capacity(WAVEFRONTS_BASE_LEN);
        fronts.resize_with(WAVEFRONTS_BASE_LEN, || None);
        Component {
            fronts,
            spare: Vec::new(),
        }
    }

    /// Park every wavefront on the spare list for the next alignment.
    pub fn reset(&mut self) {
        for slot in &mut self.fronts {
            if let Some(mut wf) = slot.take() {
                wf.clear();
                self.spare.push(wf);
            }
        }
    }

    /// Whether a wavefront exists at score `s`.
    #[inline]
    pub fn has_score(&self, s: u32) -> bool {
        matches!(self.fronts.get(s as usize), Some(Some(_)))
    }

    /// Diagonal range of the wavefront at score `s - diff`, or `(0, 0)`
    /// when the subtraction underflows or no wavefront exists there.
    #[inline]
    pub fn k_range(&self, s: u32, diff: u32) -> (i64, i64) {
        let Some(s) = s.checked_sub(diff) else {
            return (0, 0);
        };
        match self.fronts.get(s as usize) {
            Some(Some(wf)) => (wf.lo, wf.hi),
            _ => (0, 0),
        }
    }

    #[inline]
    pub fn front(&self, s: u32) -> Option<&WaveFront> {
        self.fronts.get(s as usize)?.as_ref()
    }

    #[inline]
    pub fn front_mut(&mut self, s: u32) -> Option<&mut WaveFront> {
        self.fronts.get_mut(s as usize)?.as_mut()
    }

    /// Wavefront at score `s`, created from the spare list if absent.
    fn front_or_insert(&mut self, s: u32) -> &mut WaveFront {
        let index = s as usize;
        while self.fronts.len() <= index {
            let new_len = self.fronts.len() + WAVEFRONTS_BASE_LEN;
            self.fronts.resize_with(new_len, || None);
        }
        let spare = &mut self.spare;
        self.fronts[index].get_or_insert_with(|| spare.pop().unwrap_or_default())
    }

    /// Store an offset with its provenance at `(s, k)`.
    #[inline]
    pub fn set(&mut self, s: u32, k: i64, offset: u32, origin: Origin) {
        self.front_or_insert(s).set(k, offset, origin);
    }

    /// Store an already-packed cell value at `(s, k)`.
    #[inline]
    pub fn set_raw(&mut self, s: u32, k: i64, raw: u32) {
        self.front_or_insert(s).set_raw(k, raw);
    }

    /// Offset and provenance at `(s, k)`, if recorded.
    #[inline]
    pub fn get(&self, s: u32, k: i64) -> Option<(u32, Origin)> {
        self.front(s)?.get(k)
    }

    /// Packed cell value at `(s, k)`, if recorded.
    #[inline]
    pub fn get_raw(&self, s: u32, k: i64) -> Option<u32> {
        self.front(s)?.get_raw(k)
    }

    /// Like [`Component::get`] but at score `s - diff`, absent on
    /// underflow.
    #[inline]
    pub fn get_after_diff(&self, s: u32, diff: u32, k: i64) -> Option<(u32, Origin)> {
        self.get(s.checked_sub(diff)?, k)
    }

    /// Remove the cell at `(s, k)` if that score has a wavefront.
    #[inline]
    pub fn delete(&mut self, s: u32, k: i64) {
        if let Some(wf) = self.front_mut(s) {
            wf.delete(k);
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_scores() {
        let mut cpt = Component::new();
        cpt.set(4, 0, 2, Origin::Mismatch);
        cpt.set(10, -1, 3, Origin::InsertOpen);

        assert!(cpt.has_score(4));
        assert!(cpt.has_score(10));
        assert!(!cpt.has_score(5));
        assert_eq!(cpt.get(4, 0), Some((2, Origin::Mismatch)));
        assert_eq!(cpt.get(5, 0), None);
    }

    #[test]
    fn test_k_range_underflow_and_absent() {
        let mut cpt = Component::new();
        cpt.set(6, -2, 1, Origin::DeleteOpen);
        cpt.set(6, 3, 4, Origin::Mismatch);

        assert_eq!(cpt.k_range(6, 0), (-2, 3));
        assert_eq!(cpt.k_range(8, 2), (-2, 3));
        // diff larger than the score reads as absent
        assert_eq!(cpt.k_range(4, 6), (0, 0));
        // missing score reads as absent
        assert_eq!(cpt.k_range(7, 0), (0, 0));
    }

    #[test]
    fn test_get_after_diff() {
        let mut cpt = Component::new();
        cpt.set(8, 1, 5, Origin::InsertExt);
        assert_eq!(cpt.get_after_diff(10, 2, 1), Some((5, Origin::InsertExt)));
        assert_eq!(cpt.get_after_diff(8, 10, 1), None);
    }

    #[test]
    fn test_score_growth() {
        let mut cpt = Component::new();
        let far = WAVEFRONTS_BASE_LEN as u32 + 100;
        cpt.set(far, 0, 1, Origin::Match);
        assert!(cpt.has_score(far));
        assert_eq!(cpt.get(far, 0), Some((1, Origin::Match)));
    }

    #[test]
    fn test_reset_recycles_fronts() {
        let mut cpt = Component::new();
        cpt.set(0, 0, 1, Origin::Match);
        cpt.set(4, 2, 3, Origin::Mismatch);
        cpt.reset();

        assert!(!cpt.has_score(0));
        assert!(!cpt.has_score(4));
        assert_eq!(cpt.spare.len(), 2);

        cpt.set(2, 0, 9, Origin::DeleteExt);
        assert_eq!(cpt.spare.len(), 1);
        assert_eq!(cpt.get(2, 0), Some((9, Origin::DeleteExt)));
    }

    #[test]
    fn test_delete() {
        let mut cpt = Component::new();
        cpt.set(3, 0, 1, Origin::Mismatch);
        cpt.set(3, 1, 2, Origin::Mismatch);
        cpt.delete(3, 1);
        assert_eq!(cpt.get(3, 1), None);
        assert_eq!(cpt.get(3, 0), Some((1, Origin::Mismatch)));
        // deleting at a missing score is a no-op
        cpt.delete(9, 0);
    }
}
