//! REDUCE: the wf-adaptive heuristic.
//!
//! For every diagonal of the current match wavefront, the remaining
//! distance to the bottom-right corner is estimated as
//! `max(m - h, n - v)`. Diagonals whose estimate exceeds the best one by
//! more than the configured threshold are pruned: the wavefront bounds
//! advance past leading and trailing stragglers, and every pruned
//! diagonal is deleted from all three components so it cannot feed
//! spurious candidates into later scores. With reduction disabled the
//! aligner is exact.

use super::aligner::Aligner;

/// Marker for diagonals without a usable distance estimate.
const NO_DISTANCE: i64 = -1;
/// Marker for diagonals pruned by the distance threshold.
const PRUNED: i64 = -2;

impl Aligner {
    /// Prune under-performing diagonals of the wavefront at score `s`.
    pub(crate) fn reduce(&mut self, query: &[u8], target: &[u8], s: u32) {
        let Some(ad) = self.adaptive else {
            return;
        };
        let Some(wf) = self.m.front_mut(s) else {
            return;
        };
        let (lo, hi) = (wf.lo, wf.hi);
        let len_q = query.len() as i64;
        let len_t = target.len() as i64;

        // distance estimate per diagonal
        let dists = &mut self.dist_buf;
        dists.clear();
        let mut min_dist = i64::MAX;
        for k in lo..=hi {
            let Some((offset, _)) = wf.get(k) else {
                dists.push(NO_DISTANCE);
                continue;
            };
            let h = offset as i64;
            let v = h - k;
            if v < 0 || v >= len_q || h >= len_t {
                dists.push(NO_DISTANCE);
                continue;
            }
            let d = (len_t - h).max(len_q - v);
            dists.push(d);
            min_dist = min_dist.min(d);
        }

        // mark diagonals past the threshold and advance the low bound
        // over the leading run of them
        let max_dist_diff = ad.max_dist_diff as i64;
        let mut new_lo = lo;
        let mut new_hi = hi;
        let mut leading = true;
        let mut any_pruned = false;
        for (index, d) in dists.iter_mut().enumerate() {
            if *d < 0 {
                continue;
            }
            if *d - min_dist > max_dist_diff {
                any_pruned = true;
                if leading {
                    new_lo = lo + index as i64 + 1;
                }
                *d = PRUNED;
            } else {
                leading = false;
            }
        }
        if any_pruned {
            for index in (0..dists.len()).rev() {
                if dists[index] >= 0 {
                    new_hi = lo + index as i64;
                    break;
                }
            }
        } else {
            return;
        }

        log::debug!(
            "reduced wavefront at score {}: [{}, {}] -> [{}, {}]",
            s,
            lo,
            hi,
            new_lo,
            new_hi
        );

        // drop pruned diagonals from all three components
        for k in lo..new_lo {
            wf.delete(k);
            self.i.delete(s, k);
            self.d.delete(s, k);
        }
        for k in (new_hi + 1)..=hi {
            wf.delete(k);
            self.i.delete(s, k);
            self.d.delete(s, k);
        }
        for (index, &d) in dists.iter().enumerate() {
            let k = lo + index as i64;
            if d == PRUNED && k >= new_lo && k <= new_hi {
                wf.delete(k);
                self.i.delete(s, k);
                self.d.delete(s, k);
            }
        }

        wf.lo = new_lo;
        wf.hi = new_hi;
    }
}

#[cfg(test)]
mod tests {
    use crate::alignment::aligner::{AdaptiveReduction, Aligner, Options, Penalties};
    use crate::wavefront::offset::Origin;

    fn aligner(max_dist_diff: u32) -> Aligner {
        let mut algn = Aligner::new(Penalties::default(), Options::default());
        algn.set_adaptive(AdaptiveReduction {
            min_wf_len: 1,
            max_dist_diff,
            cutoff_step: 1,
        })
        .unwrap();
        algn
    }

    #[test]
    fn test_reduce_prunes_lagging_wings() {
        let query = vec![b'A'; 100];
        let target = vec![b'A'; 100];
        let mut algn = aligner(10);

        // leading diagonal far ahead, wings far behind
        algn.m.set(5, 0, 90, Origin::Mismatch);
        algn.m.set(5, -2, 3, Origin::Mismatch);
        algn.m.set(5, 2, 4, Origin::Mismatch);
        algn.i.set(5, 2, 4, Origin::InsertOpen);
        algn.d.set(5, -2, 3, Origin::DeleteOpen);

        algn.reduce(&query, &target, 5);

        let wf = algn.m.front(5).unwrap();
        assert_eq!((wf.lo, wf.hi), (-1, 0));
        assert_eq!(algn.m.get(5, -2), None);
        assert_eq!(algn.m.get(5, 2), None);
        assert!(algn.m.get(5, 0).is_some());
        // the counterparts in I and D are pruned too
        assert_eq!(algn.i.get(5, 2), None);
        assert_eq!(algn.d.get(5, -2), None);
    }

    #[test]
    fn test_reduce_keeps_close_diagonals() {
        let query = vec![b'A'; 100];
        let target = vec![b'A'; 100];
        let mut algn = aligner(50);

        algn.m.set(5, -1, 20, Origin::Mismatch);
        algn.m.set(5, 0, 30, Origin::Mismatch);
        algn.m.set(5, 1, 25, Origin::Mismatch);

        algn.reduce(&query, &target, 5);

        let wf = algn.m.front(5).unwrap();
        assert_eq!((wf.lo, wf.hi), (-1, 1));
        assert!(algn.m.get(5, -1).is_some());
        assert!(algn.m.get(5, 0).is_some());
        assert!(algn.m.get(5, 1).is_some());
    }

    #[test]
    fn test_reduce_prunes_interior_diagonal() {
        let query = vec![b'A'; 100];
        let target = vec![b'A'; 100];
        let mut algn = aligner(10);

        algn.m.set(5, -1, 80, Origin::Mismatch);
        algn.m.set(5, 0, 5, Origin::Mismatch);
        algn.m.set(5, 1, 81, Origin::Mismatch);

        algn.reduce(&query, &target, 5);

        let wf = algn.m.front(5).unwrap();
        assert_eq!((wf.lo, wf.hi), (-1, 1));
        assert!(algn.m.get(5, -1).is_some());
        assert_eq!(algn.m.get(5, 0), None);
        assert!(algn.m.get(5, 1).is_some());
    }
}
