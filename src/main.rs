//! rTimeledger main entrypoint.

use rtimeledger::run;
use rtimeledger::ui::messages;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rtimeledger=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!();
    if let Err(e) = run().await {
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
