//! Hex codec. The only encoder this crate ships: the public boundary is
//! hex in/out plus raw byte buffers, so this wraps the `hex` crate rather
//! than hand-rolling a parser (see DESIGN.md).

use crate::error::Result;

/// Parse a hex string into bytes. Whitespace is not stripped; callers
/// wanting lenient parsing should filter before calling this.
pub fn parse(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s)?)
}

/// Render bytes as a lowercase hex string.
pub fn stringify(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
