use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// JSON logs with target, thread, and source location on every event
pub fn init_structured_logging() {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json();

    tracing_subscriber::registry()
        .with(crate::logging::filter())
        .with(fmt_layer)
        .init();
}
