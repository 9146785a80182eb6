use leptos::{
    component, create_rw_signal, spawn_local, store_value, view, Callback, IntoView, Signal,
    SignalGetUntracked, SignalSet, SignalWith,
};
use leptos_meta::{provide_meta_context, Title};

use super::metro_canvas::{Scene, TimeoutDelay};
use super::metro_map::MetroMap;
use super::route_summary::RouteSummaryPanel;
use super::station_label_tooltip::TooltipPool;
use super::station_select::StationSelect;
use super::toast::NoticeToast;
use crate::api::{page_origin, resolve_url, CachedMapData, HttpMapData, HttpRouteService, RouteMode};
use crate::config::MapConfig;
use crate::interaction::{MapSession, ViewSnapshot};
use crate::logging::{log, log_error};
use crate::storage::BrowserSessionStore;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = MapConfig::load_from_document();
    let viewport = config.viewport;

    let scene = create_rw_signal(Scene::new());
    let tooltip = create_rw_signal(TooltipPool::new(config.tooltip_offset));
    let snapshot = create_rw_signal(ViewSnapshot::default());
    let station_names = create_rw_signal(Vec::<String>::new());
    let source = create_rw_signal(String::new());
    let destination = create_rw_signal(String::new());

    let origin = page_origin().unwrap_or_default();
    let data = CachedMapData::new(
        HttpMapData::new(
            resolve_url(&origin, &config.coordinates_url),
            resolve_url(&origin, &config.connections_url),
        ),
        BrowserSessionStore,
    );
    let routes = HttpRouteService::new(resolve_url(&origin, &config.route_service_url));
    let session = MapSession::new(config, data, routes, scene, TimeoutDelay)
        .with_observer(move |next| snapshot.set(next));
    let session = store_value(session);

    // Warm the connection cache and fill the selectors
    spawn_local({
        let session = session.get_value();
        async move {
            session.prefetch_connections().await;
            match session.station_names().await {
                Ok(names) => station_names.set(names),
                Err(e) => log_error!("Error loading station names: {}", e),
            }
        }
    });

    let show_map = move |_| {
        let session = session.get_value();
        spawn_local(async move {
            if let Err(e) = session.show_map().await {
                log!("Show map failed: {}", e);
            }
        });
    };

    let search = move |_| {
        let session = session.get_value();
        let from = source.get_untracked();
        let to = destination.get_untracked();
        spawn_local(async move {
            if let Err(e) = session.search(&from, &to).await {
                log!("Search failed: {}", e);
            }
        });
    };

    let query_route = move |mode: RouteMode| {
        let session = session.get_value();
        let from = source.get_untracked();
        let to = destination.get_untracked();
        spawn_local(async move {
            if let Err(e) = session.query_route(mode, &from, &to).await {
                log!("Route query failed: {}", e);
            }
        });
    };

    let dismiss_notice = Callback::new(move |()| session.with_value(|s| s.dismiss_notice()));

    let shows_home = move || snapshot.with(|s| s.view.shows_home());
    let shows_map = move || snapshot.with(|s| s.view.shows_map());
    let shows_route_buttons = move || snapshot.with(|s| s.awaiting_route || s.view.shows_result());

    view! {
        <Title text="Metro Map"/>

        <div class="app">
            <header class="search-bar">
                <StationSelect label="Source" stations=station_names.into() selected=source />
                <StationSelect label="Destination" stations=station_names.into() selected=destination />
                <button id="search-button" on:click=search>"Search"</button>
                <button id="show-map" on:click=show_map>"Show Map"</button>
            </header>

            <section id="home-container" class="home" class:hidden=move || !shows_home()>
                <h1>"Metro route planner"</h1>
                <p>"Pick two stations to find a route, or open the full network map."</p>
            </section>

            <section id="map-area" class="map-area" class:hidden=move || !shows_map()>
                <div id="result-buttons" class="route-buttons" class:hidden=move || !shows_route_buttons()>
                    <button id="shortest-path-btn" on:click=move |_| query_route(RouteMode::ShortestPath)>
                        "Shortest Path"
                    </button>
                    <button id="min-interchange-btn" on:click=move |_| query_route(RouteMode::MinimumInterchange)>
                        "Minimum Interchange"
                    </button>
                </div>
                <RouteSummaryPanel summary=Signal::derive(move || snapshot.with(|s| s.summary.clone())) />
                <MetroMap scene=scene tooltip=tooltip viewport=viewport />
            </section>

            <NoticeToast
                notice=Signal::derive(move || snapshot.with(|s| s.notice.clone()))
                on_dismiss=dismiss_notice
            />
        </div>
    }
}
