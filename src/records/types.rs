use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Which browser a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
	/// Archive post.
	Archive,
	/// Collaboration posting.
	Collab,
}

impl RecordType {
	/// Path segment used by the detail routes.
	pub fn slug(self) -> &'static str {
		match self {
			RecordType::Archive => "archive",
			RecordType::Collab => "collab",
		}
	}
}

impl fmt::Display for RecordType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.slug())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
	Image,
	Video,
	Text,
	Link,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
	Public,
	Unlisted,
	Private,
}

/// Identity handed to navigation: enough to build a detail location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordRef {
	pub id: String,
	pub record_type: RecordType,
}

impl RecordRef {
	pub fn detail_path(&self) -> String {
		format!("/{}/{}", self.record_type.slug(), self.id)
	}
}

/// A content record as delivered by the record source.
///
/// Only `id` and `record_type` are required. Everything else may be missing
/// upstream, and a filter reading a missing field never matches the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
	pub id: String,
	pub record_type: RecordType,
	#[serde(default, deserialize_with = "lenient")]
	pub title: Option<String>,
	#[serde(default, deserialize_with = "lenient")]
	pub body: Option<String>,
	#[serde(default, deserialize_with = "lenient")]
	pub link: Option<String>,
	#[serde(default, deserialize_with = "lenient_set")]
	pub tags: BTreeSet<String>,
	#[serde(default, deserialize_with = "lenient_set")]
	pub models: BTreeSet<String>,
	#[serde(default, deserialize_with = "lenient")]
	pub category: Option<String>,
	#[serde(default, deserialize_with = "lenient")]
	pub content_type: Option<ContentType>,
	#[serde(default, deserialize_with = "lenient")]
	pub visibility: Option<Visibility>,
	#[serde(default, deserialize_with = "lenient_timestamp")]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default, deserialize_with = "lenient")]
	pub view_count: Option<u64>,
	#[serde(default, deserialize_with = "lenient")]
	pub favorite_count: Option<u64>,
	#[serde(default, deserialize_with = "lenient")]
	pub team_size: Option<u32>,
	#[serde(default, deserialize_with = "lenient")]
	pub author: Option<String>,
}

impl ContentRecord {
	/// A record with only its identity set.
	pub fn new(id: impl Into<String>, record_type: RecordType) -> Self {
		Self {
			id: id.into(),
			record_type,
			title: None,
			body: None,
			link: None,
			tags: BTreeSet::new(),
			models: BTreeSet::new(),
			category: None,
			content_type: None,
			visibility: None,
			created_at: None,
			view_count: None,
			favorite_count: None,
			team_size: None,
			author: None,
		}
	}

	pub fn record_ref(&self) -> RecordRef {
		RecordRef {
			id: self.id.clone(),
			record_type: self.record_type,
		}
	}

	/// UTC calendar day of creation.
	pub fn created_on(&self) -> Option<NaiveDate> {
		self.created_at.map(|ts| ts.date_naive())
	}

	/// Whether this is the record `target` points at. Ids are only unique per type.
	pub fn is(&self, target: &RecordRef) -> bool {
		self.record_type == target.record_type && self.id == target.id
	}

	pub fn display_title(&self) -> &str {
		self.title.as_deref().unwrap_or("(untitled)")
	}
}

/// Optimistically bumps the view count of `target`, returning the new count.
pub fn bump_view_count(records: &mut [ContentRecord], target: &RecordRef) -> Option<u64> {
	let record = records.iter_mut().find(|r| r.is(target))?;
	let next = record.view_count.unwrap_or(0) + 1;
	record.view_count = Some(next);
	Some(next)
}

/// Puts back a view count captured before [`bump_view_count`].
pub fn restore_view_count(
	records: &mut [ContentRecord],
	target: &RecordRef,
	previous: Option<u64>,
) {
	if let Some(record) = records.iter_mut().find(|r| r.is(target)) {
		record.view_count = previous;
	}
}

/// Parses `YYYY-MM-DD` or RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
	let raw = raw.trim();
	if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
		return Some(ts.with_timezone(&Utc));
	}
	NaiveDate::parse_from_str(raw, "%Y-%m-%d")
		.ok()
		.and_then(|d| d.and_hms_opt(0, 0, 0))
		.map(|dt| dt.and_utc())
}

fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: serde::de::DeserializeOwned,
{
	let value = serde_json::Value::deserialize(de)?;
	Ok(serde_json::from_value(value).ok())
}

/// Null, a non-array, or non-string members all degrade to an empty or partial set.
fn lenient_set<'de, D>(de: D) -> Result<BTreeSet<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(de)?;
	Ok(value
		.as_array()
		.map(|items| {
			items
				.iter()
				.filter_map(|item| item.as_str().map(str::to_owned))
				.collect()
		})
		.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(de)?;
	Ok(value.as_str().and_then(parse_timestamp))
}
