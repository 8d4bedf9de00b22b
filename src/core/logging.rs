//! Log sink for the browser host
//!
//! The engine logs through the `log` facade. Native hosts install whatever
//! logger they like; on wasm32 `init_console_logger` routes records to the
//! devtools console via `web_sys::console`.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{}] {}", record.target(), record.args());
            let value = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the console logger. Returns false when a logger is already set
/// or when there is no console to write to (native targets).
pub fn init_console_logger(level: LevelFilter) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        if log::set_logger(&console::LOGGER).is_err() {
            return false;
        }
        log::set_max_level(level);
        true
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = level;
        false
    }
}
