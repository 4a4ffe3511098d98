use leptos::prelude::*;
use leptos_router::components::A;

use crate::records::ContentRecord;

#[component]
fn RecordRow(record: ContentRecord) -> impl IntoView {
	let href = record.record_ref().detail_path();
	let title = record.display_title().to_string();
	let views = record.view_count.unwrap_or(0);
	let favorites = record.favorite_count.unwrap_or(0);
	let created = record
		.created_on()
		.map(|d| d.format("%Y-%m-%d").to_string())
		.unwrap_or_else(|| "undated".into());
	let tags = record.tags.iter().cloned().collect::<Vec<_>>().join(", ");

	view! {
		<li class="record-row">
			<A href=href>{title}</A>
			<span class="record-meta">
				{created} " · " {views} " views · " {favorites} " favorites"
			</span>
			<span class="record-tags">{tags}</span>
		</li>
	}
}

/// Plain list rendering of the pipeline output.
#[component]
pub fn RecordList(#[prop(into)] records: Signal<Vec<ContentRecord>>) -> impl IntoView {
	view! {
		<Show
			when=move || records.with(|r| !r.is_empty())
			fallback=|| view! { <p class="empty-state">"No records match these filters."</p> }
		>
			<ul class="record-list">
				<For
					each=move || records.get()
					key=|record| (record.id.clone(), record.view_count)
					children=|record| view! { <RecordRow record=record /> }
				/>
			</ul>
		</Show>
	}
}
