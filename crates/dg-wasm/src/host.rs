//! Browser services: local storage, wall clock, and console logging.
//!
//! Off the wasm32 target (native unit tests) the browser is absent, so
//! storage falls back to memory, the clock to the system clock, and
//! logging is a no-op.

use dg_core::{Clock, KeyValueStore, MemoryStore, StoreError};
use wasm_bindgen::JsValue;

fn backend_error(err: JsValue) -> StoreError {
    StoreError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

// ─── Storage ─────────────────────────────────────────────────────────────

/// `window.localStorage`, or memory when it is unavailable (private
/// browsing, sandboxed iframes, native builds).
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
    memory: MemoryStore,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = browser_storage();
        if storage.is_none() {
            log::warn!("local storage unavailable; designs will not persist");
        }
        Self {
            storage,
            memory: MemoryStore::new(),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_storage() -> Option<web_sys::Storage> {
    None
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(backend_error),
            None => self.memory.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(backend_error),
            None => self.memory.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage.remove_item(key).map_err(backend_error),
            None => self.memory.remove(key),
        }
    }
}

// ─── Clock ───────────────────────────────────────────────────────────────

/// `Date.now()` in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostClock;

impl Clock for HostClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        dg_core::SystemClock.now_ms()
    }
}

// ─── Console ─────────────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route panics and `log` records to the browser console. Safe to call
/// more than once.
pub fn install_console() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("DreamGarden WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(log::LevelFilter::Info);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::LAYOUT_KEY;

    #[test]
    fn native_store_is_memory_backed() {
        let mut store = LocalStore::open();
        assert!(!store.is_persistent());
        store.set(LAYOUT_KEY, "[]").unwrap();
        assert_eq!(store.get(LAYOUT_KEY).unwrap().as_deref(), Some("[]"));
        store.remove(LAYOUT_KEY).unwrap();
        assert_eq!(store.get(LAYOUT_KEY).unwrap(), None);
    }

    #[test]
    fn clock_is_after_2020() {
        assert!(HostClock.now_ms() > 1_577_836_800_000);
    }
}
