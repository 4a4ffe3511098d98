//! Leptos components shared by the browser pages.

pub mod filter_panel;
pub mod nebula;
pub mod record_list;
