//! perfdash CLI entry point.

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = perfdash_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
