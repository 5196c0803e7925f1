use super::types::Color;

/// Why a cell was rejected as a colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HexError {
	/// Not exactly six digits after the optional `#`.
	Length,
	/// A character outside `[0-9a-fA-F]`.
	Digit,
}

/// Parses `#RRGGBB` or `RRGGBB`. Blank input is `Ok(None)`.
pub fn parse_hex(field: &str) -> Result<Option<Color>, HexError> {
	let field = field.trim();
	if field.is_empty() {
		return Ok(None);
	}
	let hex = field.strip_prefix('#').unwrap_or(field);
	if hex.len() != 6 {
		return Err(HexError::Length);
	}
	if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(HexError::Digit);
	}

	let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| HexError::Digit);
	Ok(Some(Color {
		r: channel(0)?,
		g: channel(2)?,
		b: channel(4)?,
		hex: hex.to_string(),
	}))
}
