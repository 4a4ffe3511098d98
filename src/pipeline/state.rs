use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::predicate::Predicate;
use crate::records::{ContentRecord, ContentType, Visibility};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentTypeFilter {
	#[default]
	All,
	Only(ContentType),
}

impl ContentTypeFilter {
	pub const OPTIONS: [(&'static str, &'static str); 5] = [
		("all", "All types"),
		("image", "Images"),
		("video", "Videos"),
		("text", "Text"),
		("link", "Links"),
	];

	/// Parses a `<select>` value; unknown values mean "all".
	pub fn from_value(value: &str) -> Self {
		match value {
			"image" => Self::Only(ContentType::Image),
			"video" => Self::Only(ContentType::Video),
			"text" => Self::Only(ContentType::Text),
			"link" => Self::Only(ContentType::Link),
			_ => Self::All,
		}
	}

	pub fn as_value(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Only(ContentType::Image) => "image",
			Self::Only(ContentType::Video) => "video",
			Self::Only(ContentType::Text) => "text",
			Self::Only(ContentType::Link) => "link",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityFilter {
	#[default]
	All,
	Only(Visibility),
}

impl VisibilityFilter {
	pub const OPTIONS: [(&'static str, &'static str); 4] = [
		("all", "Any visibility"),
		("public", "Public"),
		("unlisted", "Unlisted"),
		("private", "Private"),
	];

	pub fn from_value(value: &str) -> Self {
		match value {
			"public" => Self::Only(Visibility::Public),
			"unlisted" => Self::Only(Visibility::Unlisted),
			"private" => Self::Only(Visibility::Private),
			_ => Self::All,
		}
	}

	pub fn as_value(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Only(Visibility::Public) => "public",
			Self::Only(Visibility::Unlisted) => "unlisted",
			Self::Only(Visibility::Private) => "private",
		}
	}
}

/// Which numeric field the min/max inputs constrain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumericField {
	#[default]
	Views,
	Favorites,
	TeamSize,
}

impl NumericField {
	pub const OPTIONS: [(&'static str, &'static str); 3] = [
		("views", "Views"),
		("favorites", "Favorites"),
		("team_size", "Team size"),
	];

	pub fn from_value(value: &str) -> Self {
		match value {
			"favorites" => Self::Favorites,
			"team_size" => Self::TeamSize,
			_ => Self::Views,
		}
	}

	pub fn as_value(self) -> &'static str {
		match self {
			Self::Views => "views",
			Self::Favorites => "favorites",
			Self::TeamSize => "team_size",
		}
	}

	pub fn read(self, record: &ContentRecord) -> Option<f64> {
		match self {
			Self::Views => record.view_count.map(|v| v as f64),
			Self::Favorites => record.favorite_count.map(|v| v as f64),
			Self::TeamSize => record.team_size.map(f64::from),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
	Alphabetical,
	#[default]
	Newest,
	Oldest,
	MostViewed,
	MostFavorited,
}

impl SortKey {
	pub const OPTIONS: [(&'static str, &'static str); 5] = [
		("newest", "Newest first"),
		("oldest", "Oldest first"),
		("alphabetical", "Title A-Z"),
		("most_viewed", "Most viewed"),
		("most_favorited", "Most favorited"),
	];

	pub fn from_value(value: &str) -> Self {
		match value {
			"alphabetical" => Self::Alphabetical,
			"oldest" => Self::Oldest,
			"most_viewed" => Self::MostViewed,
			"most_favorited" => Self::MostFavorited,
			_ => Self::Newest,
		}
	}

	pub fn as_value(self) -> &'static str {
		match self {
			Self::Alphabetical => "alphabetical",
			Self::Newest => "newest",
			Self::Oldest => "oldest",
			Self::MostViewed => "most_viewed",
			Self::MostFavorited => "most_favorited",
		}
	}
}

/// Everything the browser's filter panel can set.
///
/// Date and numeric bounds are kept as the raw form input and parsed on read,
/// so a half-typed value simply leaves that side unbounded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
	pub search: String,
	pub models: BTreeSet<String>,
	pub content_type: ContentTypeFilter,
	pub visibility: VisibilityFilter,
	pub date_from: String,
	pub date_to: String,
	pub numeric_field: NumericField,
	pub numeric_min: String,
	pub numeric_max: String,
	pub tags: BTreeSet<String>,
	pub sort: SortKey,
}

impl FilterState {
	/// Resets every field, the "clear filters" action.
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn is_default(&self) -> bool {
		*self == Self::default()
	}

	pub fn toggle_tag(&mut self, tag: &str) {
		if !self.tags.remove(tag) {
			self.tags.insert(tag.to_string());
		}
	}

	pub fn toggle_model(&mut self, model: &str) {
		if !self.models.remove(model) {
			self.models.insert(model.to_string());
		}
	}

	pub fn date_bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
		(parse_date(&self.date_from), parse_date(&self.date_to))
	}

	pub fn numeric_bounds(&self) -> (Option<f64>, Option<f64>) {
		(parse_number(&self.numeric_min), parse_number(&self.numeric_max))
	}

	/// The active predicates. A field at its default contributes nothing.
	pub fn predicates(&self) -> Vec<Predicate> {
		let mut predicates = Vec::new();

		let needle = self.search.trim();
		if !needle.is_empty() {
			predicates.push(Predicate::Search(needle.to_lowercase()));
		}
		if !self.models.is_empty() {
			predicates.push(Predicate::Models(self.models.clone()));
		}
		if let ContentTypeFilter::Only(t) = self.content_type {
			predicates.push(Predicate::ContentType(t));
		}
		if let VisibilityFilter::Only(v) = self.visibility {
			predicates.push(Predicate::Visibility(v));
		}

		let (from, to) = self.date_bounds();
		if from.is_some() || to.is_some() {
			predicates.push(Predicate::DateRange { from, to });
		}

		let (min, max) = self.numeric_bounds();
		if min.is_some() || max.is_some() {
			predicates.push(Predicate::NumericRange {
				field: self.numeric_field,
				min,
				max,
			});
		}

		if !self.tags.is_empty() {
			predicates.push(Predicate::Tags(self.tags.clone()));
		}
		predicates
	}
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
	NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_number(raw: &str) -> Option<f64> {
	raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_state_has_no_predicates() {
		assert!(FilterState::default().predicates().is_empty());
		assert!(FilterState::default().is_default());
	}

	#[test]
	fn test_whitespace_search_is_noop() {
		let state = FilterState {
			search: "   ".into(),
			..Default::default()
		};
		assert!(state.predicates().is_empty());
	}

	#[test]
	fn test_invalid_bounds_are_ignored() {
		let state = FilterState {
			date_from: "2024-13-40".into(),
			date_to: "soon".into(),
			numeric_min: "ten".into(),
			numeric_max: "NaN".into(),
			..Default::default()
		};
		assert_eq!(state.date_bounds(), (None, None));
		assert_eq!(state.numeric_bounds(), (None, None));
		assert!(state.predicates().is_empty());
	}

	#[test]
	fn test_half_open_bounds() {
		let state = FilterState {
			numeric_min: " 5 ".into(),
			date_to: "2024-01-31".into(),
			..Default::default()
		};
		assert_eq!(state.numeric_bounds(), (Some(5.0), None));
		assert_eq!(state.date_bounds().1, NaiveDate::from_ymd_opt(2024, 1, 31));
		assert_eq!(state.predicates().len(), 2);
	}

	#[test]
	fn test_toggle_and_clear() {
		let mut state = FilterState::default();
		state.toggle_tag("space");
		state.toggle_model("diffusion-xl");
		state.sort = SortKey::MostViewed;
		assert!(state.tags.contains("space"));
		state.toggle_tag("space");
		assert!(state.tags.is_empty());
		state.clear();
		assert!(state.is_default());
	}

	#[test]
	fn test_select_values_round_trip_through_options() {
		for (value, _) in SortKey::OPTIONS {
			assert_eq!(SortKey::from_value(value).as_value(), value);
		}
		for (value, _) in ContentTypeFilter::OPTIONS {
			assert_eq!(ContentTypeFilter::from_value(value).as_value(), value);
		}
		for (value, _) in VisibilityFilter::OPTIONS {
			assert_eq!(VisibilityFilter::from_value(value).as_value(), value);
		}
		for (value, _) in NumericField::OPTIONS {
			assert_eq!(NumericField::from_value(value).as_value(), value);
		}
	}

	#[test]
	fn test_select_values() {
		assert_eq!(SortKey::from_value("oldest"), SortKey::Oldest);
		assert_eq!(SortKey::from_value("bogus"), SortKey::Newest);
		assert_eq!(
			ContentTypeFilter::from_value("video"),
			ContentTypeFilter::Only(ContentType::Video)
		);
		assert_eq!(VisibilityFilter::from_value(""), VisibilityFilter::All);
		assert_eq!(NumericField::from_value("team_size"), NumericField::TeamSize);
	}
}
