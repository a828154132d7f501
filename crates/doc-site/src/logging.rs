//! Browser console logging for `tracing`.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Install a global subscriber that writes to the browser console.
///
/// `directive` is an `EnvFilter` directive such as `"info"` or
/// `"doc_site=debug"`; an invalid one falls back to `info`. Calling this more
/// than once keeps the first subscriber.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    // No timestamps: the console adds its own, and there is no system clock
    // on wasm32-unknown-unknown.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .without_time()
        .with_writer(ConsoleWriterMaker);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Report panics through `tracing` so they reach the console.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            &s[..]
        } else {
            "Unknown panic message"
        };

        let location = match panic_info.location() {
            Some(location) => format!(" at {}:{}", location.file(), location.line()),
            None => String::new(),
        };

        tracing::error!("Panic occurred{}: {}", location, message);
    }));
}

#[derive(Debug, Clone, Copy)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
    Log,
}

struct ConsoleWriterMaker;

struct ConsoleWriter {
    method: ConsoleMethod,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let message = String::from_utf8_lossy(buf);
        let message = JsValue::from_str(message.trim_end());
        match self.method {
            ConsoleMethod::Error => console::error_1(&message),
            ConsoleMethod::Warn => console::warn_1(&message),
            ConsoleMethod::Info => console::info_1(&message),
            ConsoleMethod::Debug => console::debug_1(&message),
            ConsoleMethod::Log => console::log_1(&message),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriterMaker {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::Log,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        let method = match *meta.level() {
            Level::ERROR => ConsoleMethod::Error,
            Level::WARN => ConsoleMethod::Warn,
            Level::INFO => ConsoleMethod::Info,
            Level::DEBUG | Level::TRACE => ConsoleMethod::Debug,
        };
        ConsoleWriter { method }
    }
}
