use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "moviefinder-server")]
#[command(about = "Movie search proxy in front of the OMDb API", long_about = None)]
struct Args {
    /// YAML config file. Without one, defaults plus environment are used.
    #[arg(short, long)]
    config: Option<String>,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "moviefinder_rs=debug,tower_http=debug"
    } else {
        "moviefinder_rs=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = moviefinder_rs::run(args.config.as_deref(), args.debug).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
