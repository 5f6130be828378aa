//! md2hwpx HTTP server binary entry point
//!
//! This is a thin wrapper that calls the library's `run_server()` function.

use anyhow::Result;
use md2hwpx_server::run_server;

#[tokio::main]
async fn main() -> Result<()> {
    run_server().await
}
