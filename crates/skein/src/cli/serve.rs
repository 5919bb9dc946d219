//! `skein serve` command implementation.

use std::io;

use skein::SkeinConfig;
use skein::router::Router;

/// Run the line-delimited JSON router over stdin/stdout.
pub fn run(config: SkeinConfig) -> Result<(), skein::Error> {
    tracing::info!("Serving line-delimited JSON requests on stdin");

    let router = Router::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    router.serve(stdin.lock(), stdout.lock())
}
