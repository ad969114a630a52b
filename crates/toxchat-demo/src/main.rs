use clap::Parser;
use std::net::SocketAddr;
use toxchat_classifier::{LoadOptions, ModelLifecycle, ToxicityModel as _};
use toxchat_core::Verdict;
use toxchat_demo::cli::{Cli, Commands};
use toxchat_demo::models::ChatConfig;
use toxchat_demo::server::run_server;
use toxchat_demo::state::build_loader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            address,
            backend,
            remote_url,
            threshold,
            verbose,
        } => {
            init_logging(verbose);

            let config = ChatConfig {
                backend,
                remote_url,
                threshold,
            };

            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            println!();
            println!("  toxchat — toxicity-screened chat");
            println!();
            println!("  Backend:   {}", config.backend);
            println!("  Threshold: {}", config.threshold);
            println!();
            println!("  Open http://{} in your browser", addr);
            println!();

            run_server(config, addr).await?;
        }

        Commands::Classify {
            message,
            backend,
            remote_url,
            threshold,
            verbose,
        } => {
            init_logging(verbose);

            let config = ChatConfig {
                backend,
                remote_url,
                threshold,
            };

            let loader = build_loader(&config)?;
            let lifecycle =
                ModelLifecycle::new(loader, LoadOptions::default().with_threshold(threshold));
            lifecycle.start().await;

            let model = match lifecycle.model() {
                Some(model) => model,
                None => anyhow::bail!(
                    "model failed to load: {}",
                    lifecycle.failure().unwrap_or_default()
                ),
            };

            let predictions = model.classify(std::slice::from_ref(&message)).await?;
            let verdict = Verdict::from_predictions(&predictions)?;

            if verdict.is_toxic {
                println!("TOXIC");
            } else {
                println!("No toxicity detected");
            }
            for evidence in &verdict.evidence {
                println!("  {:<18} {}%", evidence.label, evidence.confidence_percent);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "toxchat_demo=debug,toxchat_session=debug,toxchat_classifier=debug,tower_http=debug"
    } else {
        "toxchat_demo=info,toxchat_session=info,toxchat_classifier=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
