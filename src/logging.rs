/// Installs the process-wide logger. `default_level` is used unless `RUST_LOG` overrides it.
pub fn init(default_level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init();
}

/// Logs a panic message with its source location.
pub fn log_panic(info: &std::panic::PanicInfo<'_>) {
    let message = panic_message(info);
    match info.location() {
        Some(location) => log::error!(
            "💥 Uncaught panic at {}:{}: {}",
            location.file(),
            location.line(),
            message
        ),
        None => log::error!("💥 Uncaught panic: {}", message),
    }
}

fn panic_message(info: &std::panic::PanicInfo<'_>) -> String {
    let payload = info.payload();
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
