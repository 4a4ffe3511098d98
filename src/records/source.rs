use log::{debug, info, warn};
use thiserror::Error;

use super::types::{ContentRecord, RecordRef};

/// Dataset bundled with the app.
const BUNDLED_RECORDS: &str = include_str!("../../assets/records.json");

/// Errors raised by a record source.
#[derive(Debug, Error)]
pub enum SourceError {
	/// The payload was not a JSON array.
	#[error("malformed record payload: {0}")]
	Malformed(#[from] serde_json::Error),

	/// The source could not be reached.
	#[error("record source unavailable: {0}")]
	Unavailable(String),
}

/// Ordered-query collaborator feeding the browsers.
pub trait RecordSource {
	/// All records, in source order.
	fn fetch(&self) -> Result<Vec<ContentRecord>, SourceError>;

	/// Reflects an optimistic view-count increment upstream.
	fn record_view(&self, record: &RecordRef) -> Result<(), SourceError>;
}

/// A [`RecordSource`] backed by a JSON document held in memory.
#[derive(Clone, Debug)]
pub struct StaticSource {
	json: String,
}

impl StaticSource {
	pub fn from_json(json: impl Into<String>) -> Self {
		Self { json: json.into() }
	}
}

impl Default for StaticSource {
	fn default() -> Self {
		Self::from_json(BUNDLED_RECORDS)
	}
}

impl RecordSource for StaticSource {
	fn fetch(&self) -> Result<Vec<ContentRecord>, SourceError> {
		// A bad row is skipped; only a payload that is not an array fails.
		let rows: Vec<serde_json::Value> = serde_json::from_str(&self.json)?;
		let total = rows.len();
		let records: Vec<ContentRecord> = rows
			.into_iter()
			.enumerate()
			.filter_map(|(i, row)| match serde_json::from_value(row) {
				Ok(record) => Some(record),
				Err(e) => {
					warn!("Skipping record #{}: {}", i, e);
					None
				}
			})
			.collect();
		info!("Loaded {} of {} records", records.len(), total);
		Ok(records)
	}

	fn record_view(&self, record: &RecordRef) -> Result<(), SourceError> {
		// Nothing upstream to write to.
		debug!("view recorded for {}", record.detail_path());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::records::RecordType;

	#[test]
	fn test_bundled_records_parse() {
		let records = StaticSource::default().fetch().unwrap();
		assert!(!records.is_empty());
		assert!(records.iter().any(|r| r.record_type == RecordType::Archive));
		assert!(records.iter().any(|r| r.record_type == RecordType::Collab));
	}

	#[test]
	fn test_malformed_payload_is_an_error() {
		let err = StaticSource::from_json("{ not json").fetch().unwrap_err();
		assert!(matches!(err, SourceError::Malformed(_)));
	}

	#[test]
	fn test_null_collections_do_not_drop_the_payload() {
		let source = StaticSource::from_json(
			r#"[
				{"id": "ok", "record_type": "archive", "tags": ["space"]},
				{"id": "bad", "record_type": "archive", "tags": null, "models": null}
			]"#,
		);
		let records = source.fetch().unwrap();
		let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
		assert_eq!(ids, vec!["ok", "bad"]);
		assert!(records[1].tags.is_empty());
		assert!(records[1].models.is_empty());
	}

	#[test]
	fn test_unusable_rows_are_skipped() {
		let source = StaticSource::from_json(
			r#"[
				{"record_type": "archive", "title": "no id"},
				{"id": "keep", "record_type": "collab"},
				{"id": "odd", "record_type": "forum"},
				"not a record"
			]"#,
		);
		let ids: Vec<_> = source.fetch().unwrap().into_iter().map(|r| r.id).collect();
		assert_eq!(ids, vec!["keep"]);
	}

	#[test]
	fn test_source_order_preserved() {
		let source = StaticSource::from_json(
			r#"[{"id": "b", "record_type": "archive"}, {"id": "a", "record_type": "archive"}]"#,
		);
		let ids: Vec<_> = source.fetch().unwrap().into_iter().map(|r| r.id).collect();
		assert_eq!(ids, vec!["b", "a"]);
	}
}
