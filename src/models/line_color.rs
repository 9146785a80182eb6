/// Resolves a line color name from the data files to a CSS color.
///
/// Matching is case-insensitive; unknown names fall back to black.
#[must_use]
pub fn css_color(name: &str) -> &'static str {
    match name.trim().to_lowercase().as_str() {
        "blue" => "blue",
        "red" => "red",
        "yellow" => "yellow",
        "green" => "green",
        "violet" => "purple",
        "magenta" => "magenta",
        "orange" => "orange",
        "pink" => "hotpink",
        _ => FALLBACK_COLOR,
    }
}

pub const FALLBACK_COLOR: &str = "black";
