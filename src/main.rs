use clap::Parser;
use slack_data_collector::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    // rustls refuses to pick a backend on its own when more than one is compiled in.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    if let Err(e) = slack_data_collector::commands::run_collect(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
