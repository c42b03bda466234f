use std::env;

use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() {
    let raw_args: Vec<String> = env::args().collect();
    if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        init_logging(LevelFilter::INFO);
        let port = raw_args
            .get(2)
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        if let Err(e) = investsmart::api::run_http_server(port).await {
            error!(error = %e, "server stopped");
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    init_logging(LevelFilter::WARN);
    match investsmart::api::run_cli(raw_args) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(msg) => {
            eprintln!("Error: {msg}");
            std::process::exit(1);
        }
    }
}

// Logs go to stderr so JSON on stdout stays machine-readable. RUST_LOG overrides
// the default level.
fn init_logging(default_level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}
