#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::{Args, Command, GenerateArgs, ServeArgs};
use clap::Parser;
use colorbook_client::{ColorbookClient, Composer, ComposerState, ImageFile};
use colorbook_config::Config;
use colorbook_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The client talks to a remote server and needs no server configuration
    if !args.needs_server_config() {
        let _telemetry_guard = colorbook_telemetry::init(None, &args.log)?;
        return match args.command {
            Some(Command::Generate(generate_args)) => generate(generate_args).await,
            _ => Ok(()),
        };
    }

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let config = Config::from_env();
            config.validate()?;
            config
        }
    };

    // Initialize telemetry
    let _telemetry_guard = colorbook_telemetry::init(config.telemetry.as_ref(), &args.log)?;

    let serve_args = match args.command {
        Some(Command::Serve(serve_args)) => serve_args,
        Some(Command::Generate(_)) | None => ServeArgs::default(),
    };

    serve(config, serve_args, args.config.as_deref()).await
}

async fn serve(mut config: Config, args: ServeArgs, config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    let source = config_path.map_or_else(|| "environment".to_string(), |p| p.display().to_string());
    tracing::info!(config = %source, model = %config.prediction.model, "starting colorbook");

    // Build server
    let server = Server::new(&config)?;

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    // Run server
    server.serve(shutdown).await?;

    tracing::info!("colorbook stopped");
    Ok(())
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let client = ColorbookClient::new(&args.server)?;
    let image = ImageFile::from_path(&args.image).await?;

    let mut composer = Composer::new();
    composer.select_image(image);
    composer.set_name(args.name);

    tracing::info!(server = %client.base_url(), style = %args.style, "generating coloring page");

    let image_url = match composer.submit(&client, args.style).await {
        ComposerState::Success { image_url } => image_url.clone(),
        ComposerState::Error { message } => anyhow::bail!("{message}"),
        state => anyhow::bail!("generation ended in unexpected state: {state:?}"),
    };

    println!("{image_url}");

    if let Some(output) = args.output {
        let bytes = client.download(&image_url).await?;
        tokio::fs::write(&output, bytes).await?;
        tracing::info!(path = %output.display(), "saved coloring page");
    }

    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
