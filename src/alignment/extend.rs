//! EXTEND: advance diagonals along runs of matching bases at no cost.
//!
//! Diagonals are visited from `hi` down to `lo` so growth of the backing
//! array happens once per score instead of once per diagonal. The run
//! length is found eight bytes at a time: both windows are loaded as
//! big-endian words, XORed, and the leading zero count gives the number
//! of matching bytes. A byte-wise loop finishes the remainder and short
//! tails. Stored provenance tags are left untouched; match runs stay
//! implicit and are replayed during backtrace.

use super::aligner::Aligner;

impl Aligner {
    /// Extend every diagonal of the match wavefront at score `s`.
    /// Returns the wavefront's diagonal range.
    pub(crate) fn extend(&mut self, query: &[u8], target: &[u8], s: u32) -> (i64, i64) {
        let Some(wf) = self.m.front_mut(s) else {
            return (0, 0);
        };
        let (lo, hi) = (wf.lo, wf.hi);
        let len_q = query.len();
        let len_t = target.len();

        let mut k = hi;
        while k >= lo {
            let Some((offset, _)) = wf.get(k) else {
                k -= 1;
                continue;
            };

            // offset is a 1-based advance: h and v index the next bases
            let h_signed = offset as i64;
            let v_signed = h_signed - k;
            if v_signed <= 0 || v_signed >= len_q as i64 || h_signed >= len_t as i64 {
                k -= 1;
                continue;
            }
            let mut h = h_signed as usize;
            let mut v = v_signed as usize;

            // eight-byte blocks
            if v + 8 <= len_q && h + 8 <= len_t {
                let mut matched = 0u32;
                let mut run;
                loop {
                    let q8 = u64::from_be_bytes(query[v..v + 8].try_into().unwrap());
                    let t8 = u64::from_be_bytes(target[h..h + 8].try_into().unwrap());
                    run = ((q8 ^ t8).leading_zeros() >> 3) as usize;
                    v += run;
                    h += run;
                    matched += run as u32;
                    if run < 8 || v + 8 >= len_q || h + 8 >= len_t {
                        break;
                    }
                }
                if matched == 0 {
                    k -= 1;
                    continue;
                }
                wf.increase(k, matched);

                // only a fully matching last block may continue byte-wise
                if !(run == 8 && v < len_q && h < len_t) {
                    k -= 1;
                    continue;
                }
            }

            // byte-wise remainder
            let mut matched = 0u32;
            while query[v] == target[h] {
                v += 1;
                h += 1;
                matched += 1;
                if v == len_q || h == len_t {
                    break;
                }
            }
            if matched > 0 {
                wf.increase(k, matched);
            }

            k -= 1;
        }

        (lo, hi)
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
    fn test_extend_short_run() {
        let mut algn = aligner();
        // seed k=0 at offset 1 (first bases already consumed)
        algn.m.set(0, 0, 1, Origin::Match);
        algn.extend(b"ACGTT", b"ACGAA", 0);
        // bases 1 and 2 match, base 3 differs
        assert_eq!(algn.m.get(0, 0), Some((3, Origin::Match)));
    }

    #[test]
    fn test_extend_block_path_runs_full_length() {
        let q = b"ACGTACGTACGTACGTACGT";
        let mut algn = aligner();
        algn.m.set(0, 0, 1, Origin::Match);
        algn.extend(q, q, 0);
        assert_eq!(algn.m.get(0, 0), Some((q.len() as u32, Origin::Match)));
    }

    #[test]
    fn test_extend_block_path_stops_at_mismatch() {
        let q = b"ACGTACGTACGTACGTACGTACGTACGT";
        let mut t = q.to_vec();
        t[17] = b'N';
        let mut algn = aligner();
        algn.m.set(0, 0, 1, Origin::Match);
        algn.extend(q, &t, 0);
        assert_eq!(algn.m.get(0, 0), Some((17, Origin::Match)));
    }

    #[test]
    fn test_extend_skips_exhausted_diagonals() {
        let mut algn = aligner();
        // offset already at the end of the target
        algn.m.set(0, 0, 4, Origin::Match);
        algn.extend(b"ACGT", b"ACGT", 0);
        assert_eq!(algn.m.get(0, 0), Some((4, Origin::Match)));
    }
}
