//! Filter/sort pipeline behind the archive and collab browsers.
//!
//! Every recompute starts from the full record set: filter with the active
//! predicates, then one stable sort. Nothing is cached between runs, so a
//! superseded result can simply be dropped by the caller.

mod facets;
mod predicate;
mod relevance;
mod sort;
mod state;

use log::debug;

use crate::records::ContentRecord;

pub use facets::{Facet, model_facets, tag_facets};
pub use predicate::{Predicate, filter};
pub use relevance::rank_by_relevance;
pub use sort::sort;
pub use state::{ContentTypeFilter, FilterState, NumericField, SortKey, VisibilityFilter};

/// Records to display for `state`, in display order. `records` is untouched.
pub fn apply(records: &[ContentRecord], state: &FilterState) -> Vec<ContentRecord> {
	let predicates = state.predicates();
	let mut visible = filter(records, &predicates);
	sort(&mut visible, state.sort);
	debug!(
		"pipeline kept {} of {} records ({} predicates, sort {:?})",
		visible.len(),
		records.len(),
		predicates.len(),
		state.sort
	);
	visible
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::records::{RecordType, parse_timestamp};

	/// Ten records dated 2024-01-01 through 2024-01-10.
	fn fixture() -> Vec<ContentRecord> {
		let tag_sets: [&[&str]; 10] = [
			&["space", "render"],
			&["city"],
			&["space"],
			&["nature", "macro"],
			&["render"],
			&["space", "loop"],
			&[],
			&["city", "render"],
			&["loop"],
			&["space", "city"],
		];
		(1..=10)
			.map(|day| {
				let mut record = ContentRecord::new(format!("r{}", day), RecordType::Archive);
				record.title = Some(if day % 2 == 0 {
					format!("Nebula {}", day)
				} else {
					format!("Harbour {}", day)
				});
				record.body = Some(format!("entry for day {}", day));
				record.tags = tag_sets[day - 1].iter().map(|t| t.to_string()).collect();
				record.created_at = parse_timestamp(&format!("2024-01-{:02}", day));
				record.view_count = Some((day as u64 % 3) * 10);
				record
			})
			.collect()
	}

	fn id_set(records: &[ContentRecord]) -> BTreeSet<String> {
		records.iter().map(|r| r.id.clone()).collect()
	}

	fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
		if items.len() <= 1 {
			return vec![items.to_vec()];
		}
		let mut out = Vec::new();
		for i in 0..items.len() {
			let mut rest = items.to_vec();
			let head = rest.remove(i);
			for mut tail in permutations(&rest) {
				tail.insert(0, head.clone());
				out.push(tail);
			}
		}
		out
	}

	#[test]
	fn test_predicate_order_does_not_change_result() {
		let records = fixture();
		let state = FilterState {
			search: "nebula".into(),
			tags: ["space", "city"].iter().map(|t| t.to_string()).collect(),
			date_from: "2024-01-03".into(),
			date_to: "2024-01-10".into(),
			..Default::default()
		};
		let predicates = state.predicates();
		assert_eq!(predicates.len(), 3);

		let expected = id_set(&filter(&records, &predicates));
		assert!(!expected.is_empty());
		let orders = permutations(&predicates);
		assert_eq!(orders.len(), 6);
		for order in orders {
			// Apply one predicate at a time to make the sequencing explicit.
			let mut current = records.clone();
			for p in &order {
				current = filter(&current, std::slice::from_ref(p));
			}
			assert_eq!(id_set(&current), expected);
		}
	}

	#[test]
	fn test_default_state_is_sorted_identity() {
		let records = fixture();
		let mut expected = records.clone();
		sort(&mut expected, SortKey::default());

		let result = apply(&records, &FilterState::default());
		assert_eq!(result, expected);
		assert_eq!(result.len(), records.len());
	}

	#[test]
	fn test_date_bounds_are_inclusive() {
		let records = fixture();
		let state = FilterState {
			date_from: "2024-01-05".into(),
			..Default::default()
		};
		let ids = id_set(&apply(&records, &state));
		let expected: BTreeSet<String> = (5..=10).map(|d| format!("r{}", d)).collect();
		assert_eq!(ids, expected);

		let state = FilterState {
			date_from: "2024-01-04".into(),
			date_to: "2024-01-04".into(),
			..Default::default()
		};
		let ids = id_set(&apply(&records, &state));
		assert_eq!(ids, BTreeSet::from(["r4".to_string()]));
	}

	#[test]
	fn test_apply_is_repeatable_and_leaves_input_alone() {
		let records = fixture();
		let snapshot = records.clone();
		let state = FilterState {
			sort: SortKey::MostViewed,
			..Default::default()
		};
		let first = apply(&records, &state);
		let second = apply(&records, &state);
		assert_eq!(first, second);
		assert_eq!(records, snapshot);
	}

	#[test]
	fn test_tag_selection_uses_or() {
		let mut record = ContentRecord::new("ab", RecordType::Collab);
		record.tags = ["a", "b"].iter().map(|t| t.to_string()).collect();
		let mut state = FilterState::default();
		state.toggle_tag("b");
		state.toggle_tag("c");
		assert_eq!(apply(&[record], &state).len(), 1);
	}

	#[test]
	fn test_malformed_records_drop_out_without_panicking() {
		let mut records = fixture();
		records.push(ContentRecord::new("broken", RecordType::Archive));
		let state = FilterState {
			search: "entry".into(),
			numeric_min: "0".into(),
			date_to: "2024-12-31".into(),
			sort: SortKey::Alphabetical,
			..Default::default()
		};
		let result = apply(&records, &state);
		assert_eq!(result.len(), 10);
		assert!(result.iter().all(|r| r.id != "broken"));
	}
}
