//! Filter Panel
//!
//! Form controls that write into the shared `FilterState`. The search box is
//! debounced here; the pipeline itself never waits.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::config::UiConfig;
use crate::pipeline::{
	ContentTypeFilter, Facet, FilterState, NumericField, SortKey, VisibilityFilter,
};

#[derive(Clone, Copy)]
enum FacetKind {
	Tag,
	Model,
}

#[component]
fn FacetList(
	title: &'static str,
	kind: FacetKind,
	#[prop(into)] facets: Signal<Vec<Facet>>,
	filter: RwSignal<FilterState>,
) -> impl IntoView {
	view! {
		<fieldset class="facet-list">
			<legend>{title}</legend>
			<For
				each=move || facets.get()
				key=|facet| (facet.value.clone(), facet.count)
				children=move |facet: Facet| {
					let checked_value = facet.value.clone();
					let toggled_value = facet.value.clone();
					view! {
						<label class="facet">
							<input
								type="checkbox"
								prop:checked=move || {
									filter
										.with(|f| match kind {
											FacetKind::Tag => f.tags.contains(&checked_value),
											FacetKind::Model => f.models.contains(&checked_value),
										})
								}
								on:change=move |_| {
									filter
										.update(|f| match kind {
											FacetKind::Tag => f.toggle_tag(&toggled_value),
											FacetKind::Model => f.toggle_model(&toggled_value),
										})
								}
							/>
							{facet.value}
							<span class="facet-count">{facet.count}</span>
						</label>
					}
				}
			/>
		</fieldset>
	}
}

#[component]
pub fn FilterPanel(
	filter: RwSignal<FilterState>,
	#[prop(into)] tags: Signal<Vec<Facet>>,
	#[prop(into)] models: Signal<Vec<Facet>>,
	#[prop(default = UiConfig::default())] ui: UiConfig,
) -> impl IntoView {
	// Dropping a pending timeout cancels it.
	let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

	let pending_clear = pending.clone();
	let delay = ui.search_debounce_ms;

	view! {
		<aside class="filter-panel">
			<input
				type="search"
				placeholder="Search titles, text and tags"
				prop:value=move || filter.with(|f| f.search.clone())
				on:input=move |ev| {
					let value = event_target_value(&ev);
					*pending.borrow_mut() = Some(Timeout::new(delay, move || {
						filter.update(|f| f.search = value);
					}));
				}
			/>

			<select
				prop:value=move || filter.with(|f| f.sort.as_value().to_string())
				on:change=move |ev| {
					let value = event_target_value(&ev);
					filter.update(|f| f.sort = SortKey::from_value(&value));
				}
			>
				{SortKey::OPTIONS
					.iter()
					.map(|(value, label)| view! { <option value=*value>{*label}</option> })
					.collect_view()}
			</select>

			<select
				prop:value=move || filter.with(|f| f.content_type.as_value().to_string())
				on:change=move |ev| {
					let value = event_target_value(&ev);
					filter.update(|f| f.content_type = ContentTypeFilter::from_value(&value));
				}
			>
				{ContentTypeFilter::OPTIONS
					.iter()
					.map(|(value, label)| view! { <option value=*value>{*label}</option> })
					.collect_view()}
			</select>

			<select
				prop:value=move || filter.with(|f| f.visibility.as_value().to_string())
				on:change=move |ev| {
					let value = event_target_value(&ev);
					filter.update(|f| f.visibility = VisibilityFilter::from_value(&value));
				}
			>
				{VisibilityFilter::OPTIONS
					.iter()
					.map(|(value, label)| view! { <option value=*value>{*label}</option> })
					.collect_view()}
			</select>

			<fieldset class="range">
				<legend>"Created"</legend>
				<input
					type="date"
					prop:value=move || filter.with(|f| f.date_from.clone())
					on:input=move |ev| {
						let value = event_target_value(&ev);
						filter.update(|f| f.date_from = value);
					}
				/>
				<input
					type="date"
					prop:value=move || filter.with(|f| f.date_to.clone())
					on:input=move |ev| {
						let value = event_target_value(&ev);
						filter.update(|f| f.date_to = value);
					}
				/>
			</fieldset>

			<fieldset class="range">
				<legend>
					<select
						prop:value=move || filter.with(|f| f.numeric_field.as_value().to_string())
						on:change=move |ev| {
							let value = event_target_value(&ev);
							filter.update(|f| f.numeric_field = NumericField::from_value(&value));
						}
					>
						{NumericField::OPTIONS
							.iter()
							.map(|(value, label)| view! { <option value=*value>{*label}</option> })
							.collect_view()}
					</select>
				</legend>
				<input
					type="number"
					placeholder="min"
					prop:value=move || filter.with(|f| f.numeric_min.clone())
					on:input=move |ev| {
						let value = event_target_value(&ev);
						filter.update(|f| f.numeric_min = value);
					}
				/>
				<input
					type="number"
					placeholder="max"
					prop:value=move || filter.with(|f| f.numeric_max.clone())
					on:input=move |ev| {
						let value = event_target_value(&ev);
						filter.update(|f| f.numeric_max = value);
					}
				/>
			</fieldset>

			<FacetList title="Models" kind=FacetKind::Model facets=models filter=filter />
			<FacetList title="Tags" kind=FacetKind::Tag facets=tags filter=filter />

			<button
				class="clear-filters"
				disabled=move || filter.with(FilterState::is_default)
				on:click=move |_| {
					pending_clear.borrow_mut().take();
					filter.update(FilterState::clear);
				}
			>
				"Clear filters"
			</button>
		</aside>
	}
}
