use leptos::{component, view, IntoView, Signal, SignalWith};

use crate::interaction::RouteSummary;

#[component]
#[must_use]
pub fn RouteSummaryPanel(summary: Signal<Option<RouteSummary>>) -> impl IntoView {
    view! {
        {move || summary.with(|summary| {
            summary.as_ref().map(|s| {
                let interchanges = s.interchanges.map(|count| view! {
                    <p class="route-interchanges">"Interchanges: " {count}</p>
                });
                view! {
                    <div id="search-result" class="route-summary">
                        <h2 class="path-heading">{s.heading}</h2>
                        <p>"From: " <span class="route-source">{s.source.clone()}</span></p>
                        <p>"To: " <span class="route-destination">{s.destination.clone()}</span></p>
                        <p>"Travel time: " {s.travel_minutes} " min"</p>
                        <p>"Fare: ₹" {s.fare}</p>
                        {interchanges}
                        <p>"Distance: " {s.distance_label()} " km"</p>
                    </div>
                }
            })
        })}
    }
}
