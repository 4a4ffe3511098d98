use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::filter_panel::FilterPanel;
use crate::components::nebula::NebulaCanvas;
use crate::components::record_list::RecordList;
use crate::pipeline::{self, FilterState, model_facets, rank_by_relevance, tag_facets};
use crate::records::{RecordRef, RecordType};
use crate::store::{records_of_type, use_app_store};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewMode {
	List,
	Nebula,
}

/// Archive or collab browser: filter panel, then either a list or the Nebula view.
#[component]
pub fn Browser(record_type: RecordType) -> impl IntoView {
	let store = use_app_store();
	let records = store.records;
	let load_error = store.load_error;
	let filter = RwSignal::new(FilterState::default());
	let (mode, set_mode) = signal(ViewMode::List);

	let pool = Memo::new(move |_| records.with(|all| records_of_type(all, record_type)));
	let visible = Memo::new(move |_| pool.with(|pool| filter.with(|state| pipeline::apply(pool, state))));
	let tags = Memo::new(move |_| pool.with(|pool| tag_facets(pool)));
	let models = Memo::new(move |_| pool.with(|pool| model_facets(pool)));
	let ranked = Signal::derive(move || {
		let query = filter.with(|f| f.search.clone());
		visible.with(|v| rank_by_relevance(v, &query))
	});

	// Node clicks land here and are turned into a route change.
	let selected = RwSignal::new(None::<RecordRef>);
	let navigate = use_navigate();
	Effect::new(move |_| {
		if let Some(record) = selected.get() {
			navigate(&record.detail_path(), Default::default());
		}
	});

	let heading = match record_type {
		RecordType::Archive => "Archive",
		RecordType::Collab => "Collaborations",
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{move || match load_error.get() {
				Some(e) => Err(e),
				None => Ok(()),
			}}
			<div class="browser">
				<header class="browser-header">
					<h1>{heading}</h1>
					<span class="result-count">
						{move || visible.with(|v| v.len())} " results"
					</span>
					<div class="view-toggle">
						<button
							class:active=move || mode.get() == ViewMode::List
							on:click=move |_| set_mode.set(ViewMode::List)
						>
							"List"
						</button>
						<button
							class:active=move || mode.get() == ViewMode::Nebula
							on:click=move |_| set_mode.set(ViewMode::Nebula)
						>
							"Nebula"
						</button>
					</div>
				</header>
				<FilterPanel filter=filter tags=tags models=models />
				<Show
					when=move || mode.get() == ViewMode::Nebula
					fallback=move || view! { <RecordList records=visible /> }
				>
					<div class="nebula-host">
						<NebulaCanvas
							data=ranked
							on_select=move |record: RecordRef| selected.set(Some(record))
						/>
						<p class="nebula-hint">
							"Most relevant result in the middle. Drag to pan, scroll to zoom, click a star to open it."
						</p>
					</div>
				</Show>
			</div>
		</ErrorBoundary>
	}
}
