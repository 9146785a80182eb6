#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod metro_canvas;
pub mod metro_map;
pub mod route_summary;
pub mod station_label_tooltip;
pub mod station_select;
pub mod toast;
