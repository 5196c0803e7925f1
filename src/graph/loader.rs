//! CSV rows to artwork records, plus the browser fetch that feeds them.

use js_sys::Promise;
use log::debug;
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::color::{HexError, parse_hex};
use super::types::Color;
use crate::error::GraphError;

/// Number of `Color N` columns.
pub const COLOR_COLUMNS: usize = 8;

#[derive(Debug, Deserialize)]
struct CsvRow {
	#[serde(rename = "Artist Name")]
	artist: String,
	#[serde(rename = "Filename")]
	filename: String,
	#[serde(rename = "Color 1", default)]
	color1: Option<String>,
	#[serde(rename = "Color 2", default)]
	color2: Option<String>,
	#[serde(rename = "Color 3", default)]
	color3: Option<String>,
	#[serde(rename = "Color 4", default)]
	color4: Option<String>,
	#[serde(rename = "Color 5", default)]
	color5: Option<String>,
	#[serde(rename = "Color 6", default)]
	color6: Option<String>,
	#[serde(rename = "Color 7", default)]
	color7: Option<String>,
	#[serde(rename = "Color 8", default)]
	color8: Option<String>,
	#[serde(rename = "Subcategory", default)]
	subcategory: Option<String>,
}

impl CsvRow {
	fn colors(&self) -> [&Option<String>; COLOR_COLUMNS] {
		[
			&self.color1,
			&self.color2,
			&self.color3,
			&self.color4,
			&self.color5,
			&self.color6,
			&self.color7,
			&self.color8,
		]
	}
}

/// One artwork as read from the file.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtworkRecord {
	/// Artist name.
	pub cluster: String,
	/// Filename; the node label.
	pub label: String,
	/// Non-blank colours in column order.
	pub colors: Vec<Color>,
	/// Optional subcategory tag.
	pub subcategory: Option<String>,
}

/// Parses CSV text with a header row into artwork records.
///
/// Blank colour cells are dropped, so a record may carry fewer than eight
/// colours. A cell that is not a six-digit hex colour rejects the load.
pub fn load_records(text: &str) -> Result<Vec<ArtworkRecord>, GraphError> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(true)
		.trim(csv::Trim::All)
		.from_reader(text.as_bytes());

	let mut records = Vec::new();
	for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
		let row = row?;
		let mut colors = Vec::with_capacity(COLOR_COLUMNS);
		for (c, cell) in row.colors().into_iter().enumerate() {
			let Some(cell) = cell else { continue };
			match parse_hex(cell) {
				Ok(Some(color)) => colors.push(color),
				Ok(None) => {}
				Err(HexError::Length | HexError::Digit) => {
					return Err(GraphError::InvalidColor {
						row: i + 1,
						column: format!("Color {}", c + 1),
						value: cell.clone(),
					});
				}
			}
		}
		records.push(ArtworkRecord {
			cluster: row.artist,
			label: row.filename,
			colors,
			subcategory: row.subcategory.filter(|s| !s.is_empty()),
		});
	}
	debug!("parsed {} artwork rows", records.len());
	Ok(records)
}

fn js_message(value: JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Fetches a text resource with the browser's `fetch`.
pub async fn fetch_text(url: &str) -> Result<String, GraphError> {
	let fetch_err = |value: JsValue| GraphError::Fetch {
		url: url.to_string(),
		message: js_message(value),
	};
	let window = web_sys::window().ok_or_else(|| GraphError::Fetch {
		url: url.to_string(),
		message: "no window".into(),
	})?;

	let request: Promise = window.fetch_with_str(url);
	let response: Response = JsFuture::from(request)
		.await
		.map_err(fetch_err)?
		.dyn_into()
		.map_err(fetch_err)?;
	if !response.ok() {
		return Err(GraphError::Http {
			url: url.to_string(),
			status: response.status(),
		});
	}

	let body = JsFuture::from(response.text().map_err(fetch_err)?)
		.await
		.map_err(fetch_err)?;
	body.as_string().ok_or_else(|| GraphError::Fetch {
		url: url.to_string(),
		message: "response body is not text".into(),
	})
}
