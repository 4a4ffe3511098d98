use std::cmp::{Ordering, Reverse};

use super::state::SortKey;
use crate::records::ContentRecord;

/// Stable sort by `key`. Records missing the sort field go last.
pub fn sort(records: &mut [ContentRecord], key: SortKey) {
	match key {
		// Lowercased once per record, not per comparison.
		SortKey::Alphabetical => records
			.sort_by_cached_key(|r| (r.title.is_none(), r.title.as_deref().map(str::to_lowercase))),
		SortKey::Newest => {
			records.sort_by(|a, b| present_first(a.created_at.map(Reverse), b.created_at.map(Reverse)))
		}
		SortKey::Oldest => records.sort_by(|a, b| present_first(a.created_at, b.created_at)),
		SortKey::MostViewed => {
			records.sort_by(|a, b| present_first(a.view_count.map(Reverse), b.view_count.map(Reverse)))
		}
		SortKey::MostFavorited => records.sort_by(|a, b| {
			present_first(a.favorite_count.map(Reverse), b.favorite_count.map(Reverse))
		}),
	}
}

fn present_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => a.cmp(&b),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}
