//! Leptos client-side app: archive and collab browsers with a Nebula view.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod components;
pub mod config;
mod pages;
pub mod pipeline;
pub mod records;
pub mod store;

// Top-Level pages
use crate::pages::browser::Browser;
use crate::pages::detail::Detail;
use crate::pages::not_found::NotFound;
use crate::records::{RecordType, StaticSource};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router for the two browsers, their detail pages and 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	store::provide_app_store(Arc::new(StaticSource::default()));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Archive Nebula" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="site-nav">
				<A href="/">"Archive"</A>
				<A href="/collab">"Collaborations"</A>
			</nav>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=|| view! { <Browser record_type=RecordType::Archive /> } />
				<Route
					path=path!("/collab")
					view=|| view! { <Browser record_type=RecordType::Collab /> }
				/>
				<Route
					path=path!("/archive/:id")
					view=|| view! { <Detail record_type=RecordType::Archive /> }
				/>
				<Route
					path=path!("/collab/:id")
					view=|| view! { <Detail record_type=RecordType::Collab /> }
				/>
			</Routes>
		</Router>
	}
}
