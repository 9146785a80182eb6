use leptos::{component, view, For, IntoView, RwSignal, SignalSet, SignalUpdate, SignalWith, SignalWithUntracked};

use super::metro_canvas::{Edge, MapSurface, Marker, MarkerHandle, Scene};
use super::station_label_tooltip::{StationLabelTooltip, TooltipPool};
use crate::geometry::Viewport;

/// The reactive scene is the surface the session draws on; the view below
/// re-renders whenever it changes.
impl MapSurface for RwSignal<Scene> {
    fn clear(&mut self) {
        self.update(|scene| scene.clear());
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerHandle {
        self.try_update(|scene| scene.add_marker(marker))
            .unwrap_or_default()
    }

    fn add_edge(&mut self, edge: Edge) {
        self.update(|scene| scene.add_edge(edge));
    }

    fn clear_edges(&mut self) {
        self.update(|scene| scene.clear_edges());
    }

    fn clear_highlights(&mut self) {
        self.update(|scene| scene.clear_highlights());
    }

    fn highlight_marker(&mut self, handle: MarkerHandle) {
        self.update(|scene| scene.highlight_marker(handle));
    }

    /// Draw into a detached copy and publish it with a single notification
    fn batch<R>(&mut self, draw: impl FnOnce(&mut dyn MapSurface) -> R) -> R {
        let mut staged = self
            .try_with_untracked(Scene::clone)
            .unwrap_or_default();
        let drawn = draw(&mut staged);
        self.set(staged);
        drawn
    }
}

fn edge_view(edge: &Edge) -> impl IntoView {
    view! {
        <line
            class=edge.kind.css_class()
            x1=edge.from.0
            y1=edge.from.1
            x2=edge.to.0
            y2=edge.to.1
            stroke=edge.color
            stroke-width=edge.width
        />
    }
}

fn marker_view(marker: &Marker, tooltip: RwSignal<TooltipPool>) -> impl IntoView {
    let (left, top) = marker.top_left();
    let size = marker.radius * 2.0;
    let class = if marker.highlighted { "station highlighted-station" } else { "station" };
    let style = format!(
        "left: {left}px; top: {top}px; width: {size}px; height: {size}px; background-color: {};",
        marker.color
    );
    let hovered = marker.station.clone();
    let left_station = marker.station.clone();

    view! {
        <div
            class=class
            style=style
            on:mousemove=move |ev| {
                let pointer = (f64::from(ev.client_x()), f64::from(ev.client_y()));
                tooltip.update(|t| t.show(&hovered, pointer));
            }
            on:mouseleave=move |_| tooltip.update(|t| t.hide(&left_station))
        ></div>
    }
}

#[component]
#[must_use]
pub fn MetroMap(
    scene: RwSignal<Scene>,
    tooltip: RwSignal<TooltipPool>,
    viewport: Viewport,
) -> impl IntoView {
    let size_style = format!("width: {}px; height: {}px;", viewport.width, viewport.height);

    view! {
        <div id="metro-map" class="metro-map" style=size_style>
            // Lines sit under the markers and never take pointer input
            <svg class="map-lines" width=viewport.width height=viewport.height>
                <For
                    each=move || scene.with(|s| s.edges.iter().cloned().enumerate().collect::<Vec<_>>())
                    key=|(index, edge)| (*index, edge.key())
                    children=|(_, edge)| edge_view(&edge)
                />
            </svg>
            // Keyed by render pass so markers survive edge updates during an animation
            <For
                each=move || scene.with(|s| {
                    let generation = s.generation();
                    s.markers
                        .iter()
                        .cloned()
                        .enumerate()
                        .map(|(index, marker)| (generation, index, marker))
                        .collect::<Vec<_>>()
                })
                key=|(generation, index, marker)| (*generation, *index, marker.highlighted)
                children=move |(_, _, marker)| marker_view(&marker, tooltip)
            />
            <StationLabelTooltip tooltip=tooltip />
        </div>
    }
}
