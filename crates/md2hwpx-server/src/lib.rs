//! md2hwpx HTTP service
//!
//! Exposes the converter over HTTP:
//!
//! - `GET /` - single-page editor
//! - `GET /health` - liveness and version
//! - `GET /styles` - available style presets
//! - `POST /convert` - multipart upload (`file`, `style`, `encoding`)
//! - `POST /convert/text` - form body (`markdown`, `style`)
//!
//! Both conversion endpoints answer with an `application/hwpx+zip`
//! attachment.

pub mod error;
pub mod routes;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use error::ServerError;
pub use routes::{content_disposition, output_file_name, HWPX_MEDIA_TYPE};

/// Largest request body accepted by the conversion endpoints
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "md2hwpx-server")]
#[command(author, version, about = "Serve the Markdown to HWPX converter over HTTP", long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,
}

/// Build the service routes
pub fn router() -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/styles", get(routes::styles))
        .route("/convert", post(routes::convert_upload))
        .route("/convert/text", post(routes::convert_text))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// Serve the routes on `addr` until the process is stopped
pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, router()).await
}

/// Parse arguments, set up logging and run the server
pub async fn run_server() -> Result<()> {
    let args = Args::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();

    info!("Starting md2hwpx server v{}", env!("CARGO_PKG_VERSION"));
    serve(SocketAddr::new(args.host, args.port)).await?;
    Ok(())
}
