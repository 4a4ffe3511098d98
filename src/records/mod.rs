//! Content records and where they come from.

mod source;
mod types;

pub use source::{RecordSource, SourceError, StaticSource};
pub use types::{
	ContentRecord, ContentType, RecordRef, RecordType, Visibility, bump_view_count,
	parse_timestamp, restore_view_count,
};
