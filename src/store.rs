//! Global Record Store
//!
//! The full record set, loaded once and shared through context. Pages derive
//! their views from it and never write to it, apart from optimistic view counts.

use std::sync::Arc;

use leptos::prelude::*;
use log::{error, warn};

use crate::records::{
	ContentRecord, RecordRef, RecordSource, RecordType, SourceError, bump_view_count,
	restore_view_count,
};

pub type SharedSource = Arc<dyn RecordSource + Send + Sync>;

#[derive(Clone)]
pub struct AppStore {
	pub records: RwSignal<Vec<ContentRecord>>,
	pub load_error: RwSignal<Option<Arc<SourceError>>>,
	source: SharedSource,
}

impl AppStore {
	pub fn load(source: SharedSource) -> Self {
		let (records, load_error) = match source.fetch() {
			Ok(records) => (records, None),
			Err(e) => {
				error!("Failed to load records: {}", e);
				(Vec::new(), Some(Arc::new(e)))
			}
		};
		Self {
			records: RwSignal::new(records),
			load_error: RwSignal::new(load_error),
			source,
		}
	}

	/// Counts a visit to `record`, rolling back if the source refuses it.
	pub fn record_view(&self, record: &RecordRef) {
		let source = self.source.clone();
		self.records.update(|records| {
			if let Err(e) = register_view(records, source.as_ref(), record) {
				warn!("View of {} not recorded: {}", record.detail_path(), e);
			}
		});
	}
}

/// Optimistic view-count bump reflected to `source`. On failure the count is
/// put back and the error returned.
pub fn register_view(
	records: &mut [ContentRecord],
	source: &dyn RecordSource,
	record: &RecordRef,
) -> Result<Option<u64>, SourceError> {
	let previous = records
		.iter()
		.find(|r| r.is(record))
		.and_then(|r| r.view_count);
	let Some(count) = bump_view_count(records, record) else {
		return Ok(None);
	};
	match source.record_view(record) {
		Ok(()) => Ok(Some(count)),
		Err(e) => {
			restore_view_count(records, record, previous);
			Err(e)
		}
	}
}

pub fn records_of_type(records: &[ContentRecord], record_type: RecordType) -> Vec<ContentRecord> {
	records
		.iter()
		.filter(|r| r.record_type == record_type)
		.cloned()
		.collect()
}

pub fn provide_app_store(source: SharedSource) {
	provide_context(AppStore::load(source));
}

pub fn use_app_store() -> AppStore {
	expect_context::<AppStore>()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::records::StaticSource;

	struct OfflineSource;

	impl RecordSource for OfflineSource {
		fn fetch(&self) -> Result<Vec<ContentRecord>, SourceError> {
			Err(SourceError::Unavailable("offline".into()))
		}

		fn record_view(&self, _: &RecordRef) -> Result<(), SourceError> {
			Err(SourceError::Unavailable("offline".into()))
		}
	}

	fn records() -> Vec<ContentRecord> {
		let mut seen = ContentRecord::new("seen", RecordType::Archive);
		seen.view_count = Some(7);
		vec![seen, ContentRecord::new("fresh", RecordType::Collab)]
	}

	#[test]
	fn test_register_view_bumps_count() {
		let mut records = records();
		let source = StaticSource::from_json("[]");
		let target = records[0].record_ref();
		let count = register_view(&mut records, &source, &target).unwrap();
		assert_eq!(count, Some(8));
		assert_eq!(records[0].view_count, Some(8));
	}

	#[test]
	fn test_register_view_rolls_back_on_failure() {
		let mut records = records();
		let target = records[1].record_ref();
		let err = register_view(&mut records, &OfflineSource, &target).unwrap_err();
		assert!(matches!(err, SourceError::Unavailable(_)));
		assert_eq!(records[1].view_count, None);
	}

	#[test]
	fn test_register_view_targets_matching_type() {
		let mut archive = ContentRecord::new("1", RecordType::Archive);
		archive.view_count = Some(10);
		let mut collab = ContentRecord::new("1", RecordType::Collab);
		collab.view_count = Some(3);
		let mut records = vec![archive, collab];
		let collab_ref = records[1].record_ref();

		let source = StaticSource::from_json("[]");
		assert_eq!(register_view(&mut records, &source, &collab_ref).unwrap(), Some(4));
		assert_eq!(records[0].view_count, Some(10));
		assert_eq!(records[1].view_count, Some(4));

		let err = register_view(&mut records, &OfflineSource, &collab_ref).unwrap_err();
		assert!(matches!(err, SourceError::Unavailable(_)));
		assert_eq!(records[0].view_count, Some(10));
		assert_eq!(records[1].view_count, Some(4));
	}

	#[test]
	fn test_unknown_record_is_ignored() {
		let mut records = records();
		let ghost = RecordRef {
			id: "ghost".into(),
			record_type: RecordType::Archive,
		};
		assert_eq!(register_view(&mut records, &OfflineSource, &ghost).unwrap(), None);
	}

	#[test]
	fn test_records_of_type() {
		let split = records_of_type(&records(), RecordType::Collab);
		assert_eq!(split.len(), 1);
		assert_eq!(split[0].id, "fresh");
	}
}
