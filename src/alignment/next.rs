//! NEXT: derive the wavefronts at score `s` from earlier scores.
//!
//! Candidates come from three source scores: mismatches read the match
//! component at `s - x`, gap opens read it at `s - o - e`, and gap
//! extensions read the insertion/deletion components at `s - e`. Source
//! offsets that already sit on the last row or column are ignored, since
//! nothing can legally follow them.
//!
//! Destination diagonals are processed in ascending order and the stored
//! provenance depends on the comparison order when sources tie: a
//! three-way tie prefers the mismatch tag, then the insertion tag, then
//! the deletion tag.

use super::aligner::Aligner;
use crate::wavefront::offset::Origin;
use crate::wavefront::Component;

/// Source offset and presence at `(s - diff, k)`, with absent cells
/// reading as offset 0.
#[inline(always)]
fn source(cpt: &Component, s: u32, diff: u32, k: i64) -> (u32, bool) {
    match cpt.get_after_diff(s, diff, k) {
        Some((offset, _)) => (offset, true),
        None => (0, false),
    }
}

impl Aligner {
    /// Compute the score-`s` wavefronts of all three components.
    pub(crate) fn next(&mut self, query: &[u8], target: &[u8], s: u32) {
        let p = self.penalties;
        let gap_open_ext = p.gap_open + p.gap_ext;
        let len_q = query.len() as i64;
        let len_t = target.len() as i64;

        let (lo_mismatch, hi_mismatch) = self.m.k_range(s, p.mismatch);
        let (lo_gap_open, hi_gap_open) = self.m.k_range(s, gap_open_ext);
        let (lo_insert, hi_insert) = self.i.k_range(s, p.gap_ext);
        let (lo_delete, hi_delete) = self.d.k_range(s, p.gap_ext);

        let hi = (len_t - 1).min(
            hi_mismatch
                .max(hi_gap_open)
                .max(hi_insert)
                .max(hi_delete)
                + 1,
        );
        let lo = (-(len_q - 1)).max(
            lo_mismatch
                .min(lo_gap_open)
                .min(lo_insert)
                .min(lo_delete)
                - 1,
        );

        for k in lo..=hi {
            // insertion candidate: open from M[s-o-e] or extend I[s-e],
            // one diagonal below
            let (mut v1, mut from_m) = source(&self.m, s, gap_open_ext, k - 1);
            let (mut v2, mut from_i) = source(&self.i, s, p.gap_ext, k - 1);
            if from_m && v1 as i64 > len_t {
                from_m = false;
                v1 = 0;
            }
            if from_i && v2 as i64 > len_t {
                from_i = false;
                v2 = 0;
            }
            let mut isk = 0u32;
            let mut origin_i = Origin::None;
            let updated_i = from_m || from_i;
            if updated_i {
                isk = v1.max(v2) + 1;
                origin_i = if from_m && (!from_i || v1 >= v2) {
                    Origin::InsertOpen
                } else {
                    Origin::InsertExt
                };
                self.i.set(s, k, isk, origin_i);
            }

            // deletion candidate: open from M[s-o-e] or extend D[s-e],
            // one diagonal above
            let (mut v1, mut from_m) = source(&self.m, s, gap_open_ext, k + 1);
            let (mut v2, mut from_d) = source(&self.d, s, p.gap_ext, k + 1);
            if from_m && v1 as i64 - k > len_q {
                from_m = false;
                v1 = 0;
            }
            if from_d && v2 as i64 - k > len_q {
                from_d = false;
                v2 = 0;
            }
            let mut dsk = 0u32;
            let mut origin_d = Origin::None;
            let updated_d = from_m || from_d;
            if updated_d {
                dsk = v1.max(v2);
                origin_d = if from_m && (!from_d || v1 >= v2) {
                    Origin::DeleteOpen
                } else {
                    Origin::DeleteExt
                };
                self.d.set(s, k, dsk, origin_d);
            }

            // mismatch candidate: M[s-x] on the same diagonal
            let (mut v1, mut from_m) = source(&self.m, s, p.mismatch, k);
            if from_m && (v1 as i64 > len_t || v1 as i64 - k > len_q) {
                from_m = false;
                v1 = 0;
            }

            let msk = isk.max(dsk).max(v1 + 1);
            if updated_i || updated_d || from_m {
                let origin_m = if updated_i && updated_d && from_m {
                    if msk == v1 + 1 {
                        Origin::Mismatch
                    } else if msk == isk {
                        origin_i
                    } else {
                        origin_d
                    }
                } else if updated_i {
                    if updated_d {
                        if msk == isk {
                            origin_i
                        } else {
                            origin_d
                        }
                    } else if from_m {
                        if msk == v1 + 1 {
                            Origin::Mismatch
                        } else {
                            origin_i
                        }
                    } else {
                        origin_i
                    }
                } else if updated_d {
                    if from_m {
                        if msk == v1 + 1 {
                            Origin::Mismatch
                        } else {
                            origin_d
                        }
                    } else {
                        origin_d
                    }
                } else {
                    Origin::Mismatch
                };

                self.m.set(s, k, msk, origin_m);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::alignment::aligner::{Aligner, Options, Penalties};
    use crate::wavefront::offset::Origin;

    fn aligner() -> Aligner {
        Aligner::new(Penalties::default(), Options::default())
    }

    #[test]
    fn test_first_mismatch_wavefront() {
        // no gap sources exist below s = o + e, so score x is pure
        // mismatch propagation from the seed
        let q = b"AAAATTTT";
        let t = b"AAAACCCC";
        let mut algn = aligner();
        algn.m.set(0, 0, 1, Origin::Match);
        algn.extend(q, t, 0);
        assert_eq!(algn.m.get(0, 0), Some((4, Origin::Match)));

        for s in 1..=4 {
            algn.next(q, t, s);
        }
        assert_eq!(algn.m.get(4, 0), Some((5, Origin::Mismatch)));
        assert!(!algn.i.has_score(4));
        assert!(!algn.d.has_score(4));
    }

    #[test]
    fn test_gap_open_wavefront() {
        let q = b"AAAATTTT";
        let t = b"AAAACCCC";
        let mut algn = aligner();
        algn.m.set(0, 0, 1, Origin::Match);
        algn.extend(q, t, 0);
        for s in 1..=8 {
            algn.next(q, t, s);
        }
        // s = o + e = 8 opens gaps off the score-0 wavefront
        assert_eq!(algn.i.get(8, 1), Some((5, Origin::InsertOpen)));
        assert_eq!(algn.d.get(8, -1), Some((4, Origin::DeleteOpen)));
        // the M copies carry the gap provenance
        assert_eq!(algn.m.get(8, 1), Some((5, Origin::InsertOpen)));
        assert_eq!(algn.m.get(8, -1), Some((4, Origin::DeleteOpen)));
    }
}
