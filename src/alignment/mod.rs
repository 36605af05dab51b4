//! Gap-affine wavefront alignment: the aligner, its score-loop kernels,
//! and the reconstructed results.

pub mod aligner;
pub mod backtrace;
pub mod extend;
pub mod next;
pub mod reduce;
pub mod result;

pub use aligner::{AdaptiveReduction, Aligner, Options, Penalties};
pub use result::AlignmentResult;
