//! Command implementations for relata

pub mod dispatch;
pub mod init;
pub mod load;
pub mod rank;
pub mod related;
pub mod score;
pub mod status;

use relata_core::error::Result;
use serde::Serialize;

/// Pretty-print a JSON value on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
