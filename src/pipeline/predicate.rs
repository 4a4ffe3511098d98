use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::state::NumericField;
use crate::records::{ContentRecord, ContentType, Visibility};

/// One independent filter. Each only ever removes records, so any order of
/// application keeps the same set.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
	/// Lowercased, non-empty needle.
	Search(String),
	Models(BTreeSet<String>),
	ContentType(ContentType),
	Visibility(Visibility),
	/// Inclusive on the record's UTC day.
	DateRange {
		from: Option<NaiveDate>,
		to: Option<NaiveDate>,
	},
	/// Inclusive on both sides.
	NumericRange {
		field: NumericField,
		min: Option<f64>,
		max: Option<f64>,
	},
	/// Matches when any selected tag is present.
	Tags(BTreeSet<String>),
}

impl Predicate {
	pub fn matches(&self, record: &ContentRecord) -> bool {
		match self {
			Predicate::Search(needle) => matches_search(record, needle),
			Predicate::Models(selected) => !record.models.is_disjoint(selected),
			Predicate::ContentType(t) => record.content_type == Some(*t),
			Predicate::Visibility(v) => record.visibility == Some(*v),
			Predicate::DateRange { from, to } => match record.created_on() {
				Some(day) => within(day, *from, *to),
				None => false,
			},
			Predicate::NumericRange { field, min, max } => match field.read(record) {
				Some(value) => within(value, *min, *max),
				None => false,
			},
			Predicate::Tags(selected) => !record.tags.is_disjoint(selected),
		}
	}
}

fn matches_search(record: &ContentRecord, needle: &str) -> bool {
	let hit = |text: &str| text.to_lowercase().contains(needle);
	record.title.as_deref().is_some_and(hit)
		|| record.body.as_deref().is_some_and(hit)
		|| record.tags.iter().any(|t| hit(t))
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
	min.is_none_or(|lo| value >= lo) && max.is_none_or(|hi| value <= hi)
}

/// Keeps the records every predicate accepts, in source order.
pub fn filter(records: &[ContentRecord], predicates: &[Predicate]) -> Vec<ContentRecord> {
	records
		.iter()
		.filter(|r| predicates.iter().all(|p| p.matches(r)))
		.cloned()
		.collect()
}
