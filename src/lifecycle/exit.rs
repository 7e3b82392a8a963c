//! Exit codes.

use super::Result;

/// Clean exit, including `--list`, `--version` and a signal-driven shutdown.
pub const SUCCESS: u8 = 0;
/// Any validation, guard, runtime or cleanup failure.
pub const FAILURE: u8 = 1;

/// Maps the outcome of an invocation to its exit code.
pub fn exit_code(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => SUCCESS,
        Err(_) => FAILURE,
    }
}
