use leptos::{component, view, IntoView, RwSignal, SignalWith};

use crate::constants::TOOLTIP_OFFSET;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipLabel {
    pub text: String,
    pub position: (f64, f64),
    pub visible: bool,
}

/// The single floating label shared by every station marker.
///
/// Showing it for one station implicitly takes it away from any other, so at most
/// one station name is ever visible.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipPool {
    label: TooltipLabel,
    offset: f64,
}

impl Default for TooltipPool {
    fn default() -> Self {
        Self::new(TOOLTIP_OFFSET)
    }
}

impl TooltipPool {
    #[must_use]
    pub fn new(offset: f64) -> Self {
        Self {
            label: TooltipLabel::default(),
            offset,
        }
    }

    /// Pointer moved over a station marker
    pub fn show(&mut self, station: &str, (pointer_x, pointer_y): (f64, f64)) {
        if self.label.text != station {
            self.label.text = station.to_string();
        }
        self.label.position = (pointer_x + self.offset, pointer_y + self.offset);
        self.label.visible = true;
    }

    /// Pointer left a station marker
    pub fn hide(&mut self, station: &str) {
        if self.label.text == station {
            self.label.visible = false;
        }
    }

    #[must_use]
    pub fn label(&self) -> &TooltipLabel {
        &self.label
    }

    #[must_use]
    pub fn visible_label(&self) -> Option<&TooltipLabel> {
        self.label.visible.then_some(&self.label)
    }
}

#[component]
#[must_use]
pub fn StationLabelTooltip(tooltip: RwSignal<TooltipPool>) -> impl IntoView {
    view! {
        <div
            class="tooltip"
            class:visible=move || tooltip.with(|t| t.label().visible)
            style=move || tooltip.with(|t| {
                let (x, y) = t.label().position;
                format!("left: {x}px; top: {y}px;")
            })
        >
            {move || tooltip.with(|t| t.label().text.clone())}
        </div>
    }
}
