//! Command implementations.

pub mod api;
pub mod config;
pub mod feed;
pub mod macros;

use serde::Serialize;

use crate::error::ClientResult;

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json<V: Serialize>(value: &V) -> ClientResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
