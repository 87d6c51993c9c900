//! Process exit codes.
//!
//! These values are the external contract scripts depend on; do not renumber.

/// Help, version, bare invocation, or a successful backend result.
pub const OK: i32 = 0;

/// Unexpected failure while evaluating or executing (not a backend-reported failure).
pub const FAILURE: i32 = 1;

/// Command line usage error.
pub const USAGE: i32 = 2;

/// The backend completed and reported a structured failure.
pub const BACKEND_FAILURE: i32 = 30;
