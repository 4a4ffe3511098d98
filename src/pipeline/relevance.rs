use std::cmp::Reverse;

use crate::records::ContentRecord;

fn score(record: &ContentRecord, needle: &str) -> u8 {
	let hit = |text: &str| text.to_lowercase().contains(needle);
	if record.title.as_deref().is_some_and(hit) {
		3
	} else if record.tags.iter().any(|t| hit(t)) {
		2
	} else if record.body.as_deref().is_some_and(hit) {
		1
	} else {
		0
	}
}

/// Orders `records` by how well they match `query`, most relevant first.
///
/// Title hits outrank tag hits, which outrank body hits. Equal scores keep
/// their input order, and an empty query returns the input unchanged.
pub fn rank_by_relevance(records: &[ContentRecord], query: &str) -> Vec<ContentRecord> {
	let needle = query.trim().to_lowercase();
	let mut ranked = records.to_vec();
	if needle.is_empty() {
		return ranked;
	}
	ranked.sort_by_cached_key(|r| Reverse(score(r, &needle)));
	ranked
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::records::RecordType;

	fn make_record(id: &str, title: &str, body: &str, tags: &[&str]) -> ContentRecord {
		let mut record = ContentRecord::new(id, RecordType::Archive);
		record.title = Some(title.into());
		record.body = Some(body.into());
		record.tags = tags.iter().map(|t| t.to_string()).collect();
		record
	}

	#[test]
	fn test_title_beats_tag_beats_body() {
		let records = vec![
			make_record("body", "Ferns", "a space walk", &[]),
			make_record("none", "Ferns", "moss", &[]),
			make_record("tag", "Comic", "", &["space"]),
			make_record("title", "Space opera", "", &[]),
		];
		let ranked = rank_by_relevance(&records, "SPACE");
		let ids: Vec<_> = ranked.iter().map(|r| r.id.as_str()).collect();
		assert_eq!(ids, vec!["title", "tag", "body", "none"]);
	}

	#[test]
	fn test_empty_query_keeps_order() {
		let records = vec![make_record("b", "B", "", &[]), make_record("a", "A", "", &[])];
		assert_eq!(rank_by_relevance(&records, "  "), records);
	}
}
