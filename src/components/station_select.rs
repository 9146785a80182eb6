use leptos::{component, event_target_value, view, IntoView, RwSignal, Signal, SignalGet, SignalSet, SignalWith};

/// Dropdown over the known station names
#[component]
#[must_use]
pub fn StationSelect(
    #[prop(into)] label: String,
    stations: Signal<Vec<String>>,
    selected: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label class="station-select">
            <span>{label}</span>
            <select on:change=move |ev| selected.set(event_target_value(&ev))>
                <option value="" selected=move || selected.get().is_empty()>"Select station"</option>
                {move || stations.with(|names| {
                    names
                        .iter()
                        .map(|name| {
                            let value = name.clone();
                            let is_selected = move || selected.with(|s| *s == value);
                            view! {
                                <option value=name.clone() selected=is_selected>{name.clone()}</option>
                            }
                        })
                        .collect::<Vec<_>>()
                })}
            </select>
        </label>
    }
}
