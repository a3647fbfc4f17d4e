//! One-shot dataset loading.
//!
//! A chart's upstream load resolves once with the full dataset or fails once; there is no
//! streaming, no partial delivery and no retry. A failed load is terminal for that chart:
//! the scene is never touched and nothing renders.

use csv::StringRecord;
use serde::de::DeserializeOwned;
use std::{fs::File, io, path::Path};
use thiserror::Error;
use tracing::{info, warn};

/// The one-shot load failed. Propagated to the caller; never retried here.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("could not read the dataset: {0}")]
	Io(#[from] io::Error),
	#[error("malformed CSV dataset: {0}")]
	Csv(#[from] csv::Error),
	#[error("malformed JSON dataset: {0}")]
	Json(#[from] serde_json::Error),
}

/// Reads every row of a headed CSV document into a record via [`serde`].
///
/// # Errors
///
/// [`LoadError::Csv`] on the first malformed or undeserializable row; no partial dataset
/// is returned.
pub fn from_csv<R: DeserializeOwned>(reader: impl io::Read) -> Result<Vec<R>, LoadError> {
	let mut csv_reader = csv::Reader::from_reader(reader);
	let mut records = Vec::new();
	for record in csv_reader.deserialize() {
		records.push(record?);
	}
	info!("Loaded {} CSV record(s).", records.len());
	Ok(records)
}

/// Reads a headed CSV document through a caller-supplied row parser, `parse(row, headers)`.
///
/// Rows for which `parse` returns [`None`] are skipped (and counted in a warning), matching
/// the contract of a per-row parse function that simply drops what it cannot read.
///
/// # Errors
///
/// [`LoadError::Csv`] if the document itself is malformed.
pub fn from_csv_with<R, F>(reader: impl io::Read, mut parse: F) -> Result<Vec<R>, LoadError>
where
	F: FnMut(&StringRecord, &StringRecord) -> Option<R>,
{
	let mut csv_reader = csv::Reader::from_reader(reader);
	let headers = csv_reader.headers()?.clone();
	let mut records = Vec::new();
	let mut skipped = 0_usize;
	for row in csv_reader.records() {
		match parse(&row?, &headers) {
			Some(record) => records.push(record),
			None => skipped += 1,
		}
	}
	if skipped != 0 {
		warn!("Skipped {} unparseable CSV row(s).", skipped);
	}
	info!("Loaded {} CSV record(s).", records.len());
	Ok(records)
}

/// Reads one JSON document (for example a GeoJSON feature collection) whole.
///
/// # Errors
///
/// [`LoadError::Json`] if the document does not deserialize into `T`.
pub fn from_json<T: DeserializeOwned>(reader: impl io::Read) -> Result<T, LoadError> {
	let document = serde_json::from_reader(reader)?;
	info!("Loaded JSON document.");
	Ok(document)
}

/// [`from_csv`], opening `path` first.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be opened, otherwise as [`from_csv`].
pub fn from_csv_path<R: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<R>, LoadError> {
	from_csv(File::open(path)?)
}

/// [`from_json`], opening `path` first.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be opened, otherwise as [`from_json`].
pub fn from_json_path<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
	from_json(File::open(path)?)
}
