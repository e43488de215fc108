mod commands;

use anyhow::Result;
use bridge_uri::PortletPhase;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bridge")]
#[command(version, about = "Portlet bridge URL encoder", long_about = None)]
struct Cli {
    #[command(flatten)]
    request: RequestArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Describes the request the target is encoded in
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "bridge.toml")]
    pub config: PathBuf,

    /// Request context path (defaults to the configured portlet context path)
    #[arg(long, global = true)]
    pub context_path: Option<String>,

    /// View currently being rendered
    #[arg(long, global = true)]
    pub view_id: Option<String>,

    /// Life-cycle phase of the request
    #[arg(long, global = true, default_value = "render")]
    pub phase: Phase,

    /// Treat the request as a partial (ajax) request
    #[arg(long, global = true)]
    pub partial: bool,

    /// Ambient render parameter, as name=value (repeatable)
    #[arg(long = "render-param", global = true, value_parser = commands::parse_key_value)]
    pub render_params: Vec<(String, String)>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Phase {
    Action,
    Render,
    Resource,
}

impl From<Phase> for PortletPhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Action => PortletPhase::Action,
            Phase::Render => PortletPhase::Render,
            Phase::Resource => PortletPhase::Resource,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a target as a resource URL
    Encode {
        /// Target to encode
        target: String,

        /// Navigate to the target as a view
        #[arg(long)]
        view_link: bool,

        /// Serve the target through a container resource URL
        #[arg(long)]
        in_protocol: bool,
    },

    /// Encode a redirect target
    Redirect {
        /// Target to redirect to
        target: String,

        /// Redirect parameter, as name=value (repeatable)
        #[arg(long = "param", value_parser = commands::parse_key_value)]
        params: Vec<(String, String)>,

        /// Parameter to clear from the target (repeatable)
        #[arg(long)]
        clear: Vec<String>,
    },

    /// Encode a partial (ajax) action target
    Partial {
        /// Target to encode
        target: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            target,
            view_link,
            in_protocol,
        } => {
            commands::encode::execute(&cli.request, &target, view_link, in_protocol)?;
        }
        Commands::Redirect { target, params, clear } => {
            commands::redirect::execute(&cli.request, &target, &params, &clear)?;
        }
        Commands::Partial { target } => {
            commands::partial::execute(&cli.request, &target)?;
        }
    }

    Ok(())
}
