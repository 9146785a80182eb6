/// Which regions of the page are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Home,
    MapOnly,
    Result,
}

impl ViewState {
    #[must_use]
    pub const fn shows_home(self) -> bool {
        matches!(self, Self::Home)
    }

    #[must_use]
    pub const fn shows_map(self) -> bool {
        matches!(self, Self::MapOnly | Self::Result)
    }

    #[must_use]
    pub const fn shows_result(self) -> bool {
        matches!(self, Self::Result)
    }
}
