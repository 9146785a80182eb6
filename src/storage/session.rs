use super::SessionStore;

/// `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }
}

impl SessionStore for BrowserSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = Self::storage().ok_or("Session storage is not available")?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("Failed to write session storage: {e:?}"))
    }
}
