//! Pairwise sequence alignment with the wavefront algorithm (WFA).
//!
//! The aligner computes gap-affine alignments by propagating wavefronts
//! of furthest-reaching diagonal offsets across increasing scores,
//! instead of filling a full dynamic-programming matrix. Matching runs
//! are consumed for free, so the cost is proportional to the alignment
//! score rather than to the product of the sequence lengths.
//!
//! ```
//! use wavefront_align::{Aligner, Options, Penalties};
//!
//! let mut aligner = Aligner::new(Penalties::default(), Options::default());
//! let result = aligner.align(b"ACCATACTCG", b"AGGATGCTCG").unwrap();
//! assert_eq!(result.score, 12);
//! assert_eq!(result.cigar(), "1M2X2M1X4M");
//! ```

pub mod alignment;
pub mod defaults;
pub mod error;
pub mod io;
pub mod wavefront;

pub use alignment::{AdaptiveReduction, Aligner, AlignmentResult, Options, Penalties};
pub use error::AlignError;
pub use wavefront::MAX_SEQ_LEN;
