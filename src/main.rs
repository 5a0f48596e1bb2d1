use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = trybox::cli::run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// File-based logging, opt-in via TRYBOX_LOG=<file>. Stderr is the UI
/// surface, so nothing is ever logged there.
fn init_tracing() {
    let Ok(path) = std::env::var("TRYBOX_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
}
