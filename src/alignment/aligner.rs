//! The wavefront aligner: configuration, seeding, and the score loop.
//!
//! One [`Aligner`] serves many query/target pairs but must not be shared
//! between threads during a call; create one aligner per worker instead.
//! All wavefront storage is owned by the aligner and recycled across
//! calls, so repeated alignments do not reallocate.

use crate::alignment::result::AlignmentResult;
use crate::defaults;
use crate::error::AlignError;
use crate::wavefront::offset::{Origin, MAX_SEQ_LEN};
use crate::wavefront::Component;

/// Gap-affine penalties. Matches cost zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Penalties {
    pub mismatch: u32,
    pub gap_open: u32,
    pub gap_ext: u32,
}

impl Default for Penalties {
    fn default() -> Self {
        Penalties {
            mismatch: defaults::MISMATCH_PENALTY,
            gap_open: defaults::GAP_OPEN_PENALTY,
            gap_ext: defaults::GAP_EXTEND_PENALTY,
        }
    }
}

/// Parameters of the wf-adaptive reduction heuristic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AdaptiveReduction {
    /// Reduction only runs on wavefronts at least this wide.
    pub min_wf_len: u32,
    /// Diagonals whose distance estimate exceeds the best one by more
    /// than this are pruned.
    pub max_dist_diff: u32,
    /// Scores between cutoffs. Accepted for compatibility, not used yet.
    pub cutoff_step: u32,
}

impl Default for AdaptiveReduction {
    fn default() -> Self {
        AdaptiveReduction {
            min_wf_len: defaults::MIN_WAVEFRONT_LENGTH,
            max_dist_diff: defaults::MAX_DISTANCE_DIFF,
            cutoff_step: defaults::CUTOFF_STEP,
        }
    }
}

/// Alignment mode options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Global alignment spans both sequences end to end. When false,
    /// semi-global alignment lets the aligned region start and end
    /// anywhere on the first and last row/column at no cost.
    pub global_alignment: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            global_alignment: true,
        }
    }
}

/// Gap-affine pairwise aligner over the three wavefront components.
pub struct Aligner {
    pub(crate) penalties: Penalties,
    pub(crate) options: Options,
    pub(crate) adaptive: Option<AdaptiveReduction>,

    /// Match/mismatch, insertion, and deletion components.
    pub(crate) m: Component,
    pub(crate) i: Component,
    pub(crate) d: Component,

    /// Scratch for reduction distance estimates, reused across calls.
    pub(crate) dist_buf: Vec<i64>,
}

impl Aligner {
    pub fn new(penalties: Penalties, options: Options) -> Self {
        Aligner {
            penalties,
            options,
            adaptive: None,
            m: Component::new(),
            i: Component::new(),
            d: Component::new(),
            dist_buf: Vec::new(),
        }
    }

    /// Enable wf-adaptive reduction. Without it the aligner is exact.
    pub fn set_adaptive(&mut self, ad: AdaptiveReduction) -> Result<(), AlignError> {
        if ad.min_wf_len == 0 {
            return Err(AlignError::InvalidMinWavefrontLength);
        }
        self.adaptive = Some(ad);
        Ok(())
    }

    /// Align `query` against `target` and reconstruct the full alignment.
    pub fn align(&mut self, query: &[u8], target: &[u8]) -> Result<AlignmentResult, AlignError> {
        let n = query.len();
        let m = target.len();
        if n == 0 || m == 0 {
            return Err(AlignError::EmptySequence);
        }
        if n > MAX_SEQ_LEN || m > MAX_SEQ_LEN {
            return Err(AlignError::SequenceTooLong(n.max(m)));
        }

        log::trace!("aligning query ({} bp) against target ({} bp)", n, m);

        self.m.reset();
        self.i.reset();
        self.d.reset();
        self.seed(query, target);

        // terminal diagonal and offset of the bottom-right cell
        let a_k = m as i64 - n as i64;
        let a_offset = m as u32;

        let min_wf_len = self.adaptive.map(|ad| ad.min_wf_len as i64);
        let mut s: u32 = 0;
        loop {
            if self.m.has_score(s) {
                let (lo, hi) = self.extend(query, target, s);

                if let Some((offset, _)) = self.m.get(s, a_k) {
                    if offset >= a_offset {
                        break;
                    }
                }

                if let Some(min_len) = min_wf_len {
                    if hi - lo + 1 >= min_len {
                        self.reduce(query, target, s);
                    }
                }
            }

            s += 1;
            self.next(query, target, s);
        }

        let (final_s, final_k) = if self.options.global_alignment {
            (s, a_k)
        } else {
            self.backtrace_origin(query, target, s)
        };
        log::trace!("terminated at score {}, backtracing from k {}", final_s, final_k);

        Ok(self.backtrace(query, target, final_s, final_k))
    }

    /// Seed the match component before the score loop.
    ///
    /// Global alignment starts from the single top-left cell. Semi-global
    /// alignment additionally seeds the whole first row and first column,
    /// so the aligned region may begin after skipping any prefix of
    /// either sequence for free.
    fn seed(&mut self, query: &[u8], target: &[u8]) {
        let (origin, score) = if query[0] == target[0] {
            (Origin::Match, 0)
        } else {
            (Origin::Mismatch, self.penalties.mismatch)
        };
        self.m.set(score, 0, 1, origin);

        if !self.options.global_alignment {
            for k in 1..target.len() {
                let (origin, score) = if query[0] == target[k] {
                    (Origin::Match, 0)
                } else {
                    (Origin::Mismatch, self.penalties.mismatch)
                };
                self.m.set(score, k as i64, k as u32 + 1, origin);
            }
            for k in 1..query.len() {
                let (origin, score) = if query[k] == target[0] {
                    (Origin::Match, 0)
                } else {
                    (Origin::Mismatch, self.penalties.mismatch)
                };
                self.m.set(score, -(k as i64), 1, origin);
            }
        }
    }
}
