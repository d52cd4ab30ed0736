use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colorbook_client::Style;

/// Colorbook coloring-page generator
#[derive(Debug, Parser)]
#[command(name = "colorbook", about = "Turn photos into printable coloring pages")]
pub struct Args {
    /// Path to configuration file; defaults and environment only when omitted
    #[arg(short, long, env = "COLORBOOK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter in `EnvFilter` syntax
    #[arg(long, default_value = "info", env = "COLORBOOK_LOG", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Only the server reads the configuration file
    pub const fn needs_server_config(&self) -> bool {
        !matches!(self.command, Some(Command::Generate(_)))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Send one photo to a running server
    Generate(GenerateArgs),
}

#[derive(Debug, Default, clap::Args)]
pub struct ServeArgs {
    /// Override the listen address
    #[arg(long, env = "COLORBOOK_LISTEN")]
    pub listen: Option<SocketAddr>,
}

#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Base URL of the Colorbook server
    #[arg(long, default_value = "http://localhost:3000", env = "COLORBOOK_SERVER")]
    pub server: String,

    /// Photo to transform
    #[arg(long)]
    pub image: PathBuf,

    /// Name printed below the drawing
    #[arg(long, default_value = "")]
    pub name: String,

    /// Background style: `mindful` or `plain`
    #[arg(long, default_value = "plain")]
    pub style: Style,

    /// Save the generated page here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
