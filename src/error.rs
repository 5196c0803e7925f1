//! Errors raised while loading and assembling the graph.

use thiserror::Error;

/// Everything that can go wrong between fetching the CSV and handing a
/// finished graph to the canvas.
///
/// Payloads are plain strings so the error can be cloned out of a
/// `LocalResource`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// The browser refused or failed the request.
	#[error("failed to fetch {url}: {message}")]
	Fetch {
		/// Requested URL.
		url: String,
		/// Stringified JS error.
		message: String,
	},

	/// The server answered with a non-success status.
	#[error("fetching {url} returned HTTP {status}")]
	Http {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// The file is not readable as CSV with the expected header.
	#[error("malformed CSV{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
	Csv {
		/// 1-based line number when the reader knows it.
		line: Option<u64>,
		/// Reader error message.
		message: String,
	},

	/// A colour column holds something other than six hex digits.
	#[error("row {row}: column {column:?} is not a hex colour: {value:?}")]
	InvalidColor {
		/// 1-based data row (header excluded).
		row: usize,
		/// Column header.
		column: String,
		/// Offending cell.
		value: String,
	},

	/// Two nodes would share the same label.
	#[error("duplicate node label {0:?}")]
	DuplicateLabel(String),

	/// A link names a label no node carries.
	#[error("link target {0:?} does not resolve to a node")]
	UnknownNode(String),
}

impl From<csv::Error> for GraphError {
	fn from(err: csv::Error) -> Self {
		GraphError::Csv {
			line: err.position().map(|p| p.line()),
			message: err.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn csv_message_includes_line_when_known() {
		let with_line = GraphError::Csv {
			line: Some(4),
			message: "bad".into(),
		};
		let without = GraphError::Csv {
			line: None,
			message: "bad".into(),
		};
		assert_eq!(with_line.to_string(), "malformed CSV at line 4: bad");
		assert_eq!(without.to_string(), "malformed CSV: bad");
	}
}
