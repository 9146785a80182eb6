mod memory;
mod session;

pub use memory::MemoryStore;
pub use session::BrowserSessionStore;

/// Key-value store scoped to one browsing session.
///
/// Used as a transient cache only; nothing stored here outlives the tab.
pub trait SessionStore {
    /// Read a value, `None` if it was never stored or the store is unavailable
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write (quota, privacy mode)
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
}
