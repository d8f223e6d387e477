use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use snag::app::AppContext;
use snag::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for JSON output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Extract {
            urls,
            static_only,
            compact,
            with_source,
        } => {
            let ctx = AppContext::new(config_path, static_only)?;
            commands::extract(&ctx, &urls, compact, with_source).await?;
        }
        Commands::Config => {
            let ctx = AppContext::new(config_path, true)?;
            commands::show_config(&ctx, config_path)?;
        }
    }

    Ok(())
}
