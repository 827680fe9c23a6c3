//! Error handling and exit codes.

use fwsim_core::constants::exit_codes;
use fwsim_core::SimError;

/// Exit code for a simulator error.
#[must_use]
pub fn handle_error(err: &SimError) -> i32 {
    match err {
        SimError::InvalidShape { .. }
        | SimError::InvalidSize { .. }
        | SimError::InvalidDiagonal { .. }
        | SimError::InvalidInput(_) => exit_codes::ERROR_INPUT,
        SimError::Config(_) => exit_codes::ERROR_CONFIG,
        SimError::Cancelled => exit_codes::ERROR_CANCELED,
    }
}

/// Exit code for an application error, using the first [`SimError`] in its chain.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SimError>())
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
