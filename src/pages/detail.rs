use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::records::{RecordRef, RecordType};
use crate::store::use_app_store;

/// Single record view. Opening it counts as a view.
#[component]
pub fn Detail(record_type: RecordType) -> impl IntoView {
	let store = use_app_store();
	let records = store.records;
	let params = use_params_map();
	let id = move || params.read().get("id");

	Effect::new(move |_| {
		if let Some(id) = id() {
			store.record_view(&RecordRef { id, record_type });
		}
	});

	let record = move || {
		let id = id()?;
		records.with(|all| {
			all.iter()
				.find(|r| r.id == id && r.record_type == record_type)
				.cloned()
		})
	};
	let back = format!("/{}", if record_type == RecordType::Archive { "" } else { "collab" });

	view! {
		<article class="detail">
			<A href=back>"Back"</A>
			{move || match record() {
				Some(record) => {
					let title = record.display_title().to_string();
					let author = record.author.unwrap_or_else(|| "anonymous".into());
					let views = record.view_count.unwrap_or(0);
					let favorites = record.favorite_count.unwrap_or(0);
					let body = record.body.unwrap_or_default();
					let link = record
						.link
						.map(|href| {
							let text = href.clone();
							view! { <a href=href rel="noopener">{text}</a> }
						});
					let tags = record
						.tags
						.into_iter()
						.map(|t| view! { <li>{t}</li> })
						.collect_view();
					view! {
						<h1>{title}</h1>
						<p class="record-meta">
							{author} " · " {views} " views · " {favorites} " favorites"
						</p>
						<p class="record-body">{body}</p>
						{link}
						<ul class="record-tags">{tags}</ul>
					}
						.into_any()
				}
				None => view! { <p class="empty-state">"This record does not exist."</p> }.into_any(),
			}}
		</article>
	}
}
