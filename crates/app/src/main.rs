//! sharedraw - shared ray-cast drawing demo
//!
//! Runs one authoritative drawer and a set of observer peers over an
//! in-process transport, then reports whether every observer canvas matches
//! the authority's. Set `SHAREDRAW_CONFIG` to a JSON file to override the
//! defaults and `RUST_LOG` to adjust logging.

use sharedraw_config::SessionConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod export;
mod motion;
mod session;

use session::{Session, SessionError};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SessionError> {
    let config = SessionConfig::from_env()?;
    info!(
        "Starting session: canvas {}x{}, ray {:?} {} units",
        config.canvas.width,
        config.canvas.height,
        config.drawer.ray_direction,
        config.drawer.ray_distance
    );

    let mut session = Session::new(config)?;
    session.run().await?;
    session.shutdown();

    let written = session.export()?;
    if !written.is_empty() {
        info!("Exported {} canvases", written.len());
    }
    Ok(())
}
