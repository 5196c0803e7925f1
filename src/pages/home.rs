use leptos::prelude::*;

use crate::components::palette_graph::PaletteGraphCanvas;
use crate::config::GraphConfig;
use crate::graph::load_graph;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = GraphConfig::default();
	let graph = LocalResource::new({
		let config = config.clone();
		move || load_graph(config.clone())
	});

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

			<div class="palette-graph">
				<Suspense fallback=|| view! { <p class="loading">"Loading artworks..."</p> }>
					{move || {
						let config = config.clone();
						Suspend::new(async move {
							graph
								.await
								.map(|data| {
									view! {
										<PaletteGraphCanvas
											data=Signal::derive(move || data.clone())
											config=config
										/>
									}
								})
						})
					}}
				</Suspense>
				<div class="graph-overlay">
					<h1>"Artist Palettes"</h1>
					<p class="subtitle">
						"Drag nodes to reposition. Scroll to zoom. Drag background to pan. Hover an artwork to see its palette."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
