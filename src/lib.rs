//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod components;
pub mod config;
pub mod editor;
pub mod engine;
mod pages;
pub mod store;

// Top-Level pages
use crate::components::navbar::Navbar;
use crate::config::AppConfig;
use crate::engine::Mode;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::solver::Solver;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router with the landing page, both solver pages and a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(AppConfig::default());

	view! {
		<Html attr:lang="fr" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Algorithme de Demoucron" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Navbar />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/maximum") view=|| view! { <Solver mode=Mode::Max /> } />
					<Route path=path!("/minimum") view=|| view! { <Solver mode=Mode::Min /> } />
				</Routes>
			</main>
		</Router>
	}
}
