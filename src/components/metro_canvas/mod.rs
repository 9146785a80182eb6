pub mod path_highlighter;
pub mod renderer;
pub mod scene;

pub use path_highlighter::{Delay, HighlightPlan, TimeoutDelay};
pub use renderer::{render_map, RenderContext, RenderOptions};
pub use scene::{Edge, EdgeKind, MapSurface, Marker, MarkerHandle, Scene};
