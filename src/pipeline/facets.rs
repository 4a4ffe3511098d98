use std::collections::{BTreeMap, BTreeSet};

use crate::records::ContentRecord;

/// A checkbox option for the filter panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Facet {
	pub value: String,
	pub count: usize,
}

pub fn tag_facets(records: &[ContentRecord]) -> Vec<Facet> {
	count(records.iter().map(|r| &r.tags))
}

pub fn model_facets(records: &[ContentRecord]) -> Vec<Facet> {
	count(records.iter().map(|r| &r.models))
}

/// Most common first, ties by name.
fn count<'a>(sets: impl Iterator<Item = &'a BTreeSet<String>>) -> Vec<Facet> {
	let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
	for value in sets.flatten() {
		*counts.entry(value.as_str()).or_default() += 1;
	}
	let mut facets: Vec<Facet> = counts
		.into_iter()
		.map(|(value, count)| Facet {
			value: value.to_string(),
			count,
		})
		.collect();
	// BTreeMap already yields names in order, the stable sort keeps it for ties.
	facets.sort_by(|a, b| b.count.cmp(&a.count));
	facets
}
