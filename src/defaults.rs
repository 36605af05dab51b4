// src/defaults.rs

// Gap-affine penalties (from the WFA paper)
pub const MISMATCH_PENALTY: u32 = 4;
pub const GAP_OPEN_PENALTY: u32 = 6;
pub const GAP_EXTEND_PENALTY: u32 = 2;

// Adaptive reduction parameters
pub const MIN_WAVEFRONT_LENGTH: u32 = 10;
pub const MAX_DISTANCE_DIFF: u32 = 50;
pub const CUTOFF_STEP: u32 = 1;

// CLI
pub const VERBOSITY: i32 = 3;
