//! BACKTRACE: reconstruct the alignment from stored provenance.
//!
//! Extension runs are not written into the wavefronts, so each step first
//! recomputes the cell's pre-extension offset from its sources; the
//! difference to the stored offset is the match run consumed by EXTEND.
//! Operations are emitted end-to-start and put in forward order by
//! [`AlignmentResult::finish`].
//!
//! If a source cell cannot be found the walk stops and the partially
//! reconstructed result is returned as-is; the score still reflects the
//! score that was reached.

use super::aligner::Aligner;
use super::result::AlignmentResult;
use crate::wavefront::offset::{unpack_offset, unpack_origin, Origin};
use crate::wavefront::Component;

/// Source offset at `(score, k)` treated as absent on score underflow.
#[inline(always)]
fn source_offset(cpt: &Component, score: Option<u32>, k: i64) -> Option<u32> {
    cpt.get(score?, k).map(|(offset, _)| offset)
}

/// Pre-extension offset of an insertion: the better of gap-open from M
/// and gap-extend from I, one diagonal below, advanced by one.
#[inline]
fn insert_source(m: Option<u32>, i: Option<u32>) -> u32 {
    if m.is_none() && i.is_none() {
        return 0;
    }
    m.unwrap_or(0).max(i.unwrap_or(0)) + 1
}

/// Pre-extension offset of a deletion: the better of gap-open from M and
/// gap-extend from D, one diagonal above.
#[inline]
fn delete_source(m: Option<u32>, d: Option<u32>) -> u32 {
    m.unwrap_or(0).max(d.unwrap_or(0))
}

impl Aligner {
    /// Locate the backtrace origin for semi-global alignment.
    ///
    /// Scans scores downward from the terminal score for a cell on the
    /// last row or last column; the smallest such score wins. Within one
    /// score the walk from the main diagonal toward `lo` runs first and
    /// its hit is kept; the walk toward `hi` is only consulted when the
    /// first one found nothing.
    pub(crate) fn backtrace_origin(&self, query: &[u8], target: &[u8], s: u32) -> (u32, i64) {
        let len_q = query.len() as i64;
        let len_t = target.len() as i64;
        let a_k = len_t - len_q;
        let mut min_s = s;
        let mut last_k = a_k;

        let on_last_row_or_col = |offset: u32, k: i64| -> Option<bool> {
            let h = offset as i64;
            let v = h - k;
            if v <= 0 || v > len_q || h > len_t {
                return None;
            }
            Some((v == len_q && h >= len_q) || (h == len_t && v >= len_t))
        };

        let mut score = s;
        loop {
            if self.m.has_score(score) {
                let (lo, hi) = self.m.k_range(score, 0);
                let mut hit = None;

                let mut k = a_k;
                while k >= lo {
                    match self.m.get(score, k) {
                        None => k -= 1,
                        Some((offset, _)) => match on_last_row_or_col(offset, k) {
                            None => break,
                            Some(true) => {
                                hit = Some(k);
                                break;
                            }
                            Some(false) => k -= 1,
                        },
                    }
                }

                if hit.is_none() {
                    let mut k = a_k + 1;
                    while k <= hi {
                        match self.m.get(score, k) {
                            None => k += 1,
                            Some((offset, _)) => match on_last_row_or_col(offset, k) {
                                None => break,
                                Some(true) => {
                                    hit = Some(k);
                                    break;
                                }
                                Some(false) => k += 1,
                            },
                        }
                    }
                }

                if let Some(k) = hit {
                    if score <= min_s {
                        min_s = score;
                        last_k = k;
                    }
                }
            }

            if score == 0 {
                break;
            }
            score -= 1;
        }

        (min_s, last_k)
    }

    /// Walk the provenance chain from `(s0, k0)` back to the start of the
    /// alignment and build the operation list.
    pub(crate) fn backtrace(
        &self,
        query: &[u8],
        target: &[u8],
        s0: u32,
        k0: i64,
    ) -> AlignmentResult {
        let semi_global = !self.options.global_alignment;
        let p = self.penalties;
        let gap_open_ext = p.gap_open + p.gap_ext;
        let len_q = query.len() as i64;
        let len_t = target.len() as i64;

        let mut result = AlignmentResult::new();
        result.score = s0;

        let mut s = s0;
        let mut k = k0;
        let Some(raw) = self.m.get_raw(s, k) else {
            return result;
        };
        let mut origin = unpack_origin(raw);
        let mut h = unpack_offset(raw) as i64;
        let mut v = h - k;

        // unaligned suffixes outside the matched region
        if h < len_t {
            result.push_n(b'I', (len_t - h) as u32);
        } else if v < len_q {
            result.push_n(b'H', (len_q - v) as u32);
        }

        let mut previous_from_m = true;
        let mut first_match = true;
        let mut t_begin = 0i64;
        let mut q_begin = 0i64;

        'walk: while v > 0 && h > 0 {
            let s_mismatch = s.checked_sub(p.mismatch);
            let s_gap_open = s.checked_sub(gap_open_ext);
            let s_gap_ext = s.checked_sub(p.gap_ext);

            // recompute the pre-extension offset from the sources
            let offset0 = match origin {
                Origin::InsertExt => insert_source(
                    source_offset(&self.m, s_gap_open, k - 1),
                    source_offset(&self.i, s_gap_ext, k - 1),
                ),
                Origin::DeleteExt => delete_source(
                    source_offset(&self.m, s_gap_open, k + 1),
                    source_offset(&self.d, s_gap_ext, k + 1),
                ),
                _ => {
                    let isk = insert_source(
                        source_offset(&self.m, s_gap_open, k - 1),
                        source_offset(&self.i, s_gap_ext, k - 1),
                    );
                    let dsk = delete_source(
                        source_offset(&self.m, s_gap_open, k + 1),
                        source_offset(&self.d, s_gap_ext, k + 1),
                    );
                    match source_offset(&self.m, s_mismatch, k) {
                        Some(v1) => isk.max(dsk).max(v1 + 1),
                        None if isk == 0 && dsk == 0 => break 'walk,
                        None => isk.max(dsk),
                    }
                }
            };
            if offset0 == 0 {
                break;
            }
            let h0 = offset0 as i64;

            // replay the match run consumed by extension
            if previous_from_m {
                let n_matches = h - h0;
                if n_matches > 0 {
                    if first_match {
                        first_match = false;
                        result.t_end = h;
                        result.q_end = v;
                    }
                    result.push_n(b'M', n_matches as u32);
                }

                h = h0;
                v = h - k;

                if origin == Origin::Match {
                    t_begin = h;
                    q_begin = v;
                } else if n_matches > 0 {
                    t_begin = h + 1;
                    q_begin = v + 1;
                }

                if h <= 0 || v <= 0 {
                    break;
                }
            }

            result.push_n(origin.op_byte(), 1);

            if semi_global && (h == 1 || v == 1) {
                break;
            }

            // step to the source cell
            previous_from_m = true;
            let (next_s, next_component) = match origin {
                Origin::Mismatch => {
                    h -= 1;
                    (s_mismatch, &self.m)
                }
                Origin::InsertOpen => {
                    k -= 1;
                    h -= 1;
                    (s_gap_open, &self.m)
                }
                Origin::InsertExt => {
                    k -= 1;
                    h -= 1;
                    previous_from_m = false;
                    (s_gap_ext, &self.i)
                }
                Origin::DeleteOpen => {
                    k += 1;
                    (s_gap_open, &self.m)
                }
                Origin::DeleteExt => {
                    k += 1;
                    previous_from_m = false;
                    (s_gap_ext, &self.d)
                }
                Origin::Match | Origin::None => break 'walk,
            };
            v = h - k;

            let Some(next_s) = next_s else {
                break;
            };
            s = next_s;
            let Some(raw) = next_component.get_raw(s, k) else {
                break;
            };
            origin = unpack_origin(raw);
        }

        // residual cell at the top/left edge
        if h > 0 && v > 0 {
            let n_matches = h.min(v) - 1;
            if n_matches > 0 {
                if first_match {
                    first_match = false;
                    result.t_end = h;
                    result.q_end = v;
                }
                result.push_n(b'M', n_matches as u32);
                h -= n_matches;
                v -= n_matches;

                if origin == Origin::Match {
                    t_begin = h;
                    q_begin = v;
                } else {
                    t_begin = h + 1;
                    q_begin = v + 1;
                }
            } else if origin == Origin::Match {
                t_begin = h;
                q_begin = v;
                if first_match {
                    result.t_end = h;
                    result.q_end = v;
                }
            }

            result.push_n(origin.op_byte(), 1);
        }

        // unaligned prefixes
        if v > 1 {
            result.push_n(b'H', (v - 1) as u32);
        }
        if h > 1 {
            result.push_n(b'I', (h - 1) as u32);
        }

        result.t_begin = t_begin;
        result.q_begin = q_begin;
        result.finish();
        result
    }
}
