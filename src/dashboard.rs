//! Interactive dashboard for classifying messages and browsing the dataset.
//!
//! The dashboard process loads the persisted pipeline artifact and the
//! source table once at startup into an [`AppState`]; both stay read-only
//! for the life of the process. Handlers classify user-entered messages
//! with the same analyzer chain used at training time and recompute the
//! overview charts on every request.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::analysis::analyzer::message::MessageAnalyzer;
use crate::data::table::MessageTable;
use crate::error::Result;
use crate::ml::pipeline::ClassificationPipeline;

pub mod charts;
pub mod handlers;
pub mod routes;

pub use charts::{CountEntry, Overview};
pub use routes::build_router;

/// Shared application state.
///
/// Constructed once at process start and handed to every request handler;
/// nothing writes to it afterwards.
#[derive(Clone)]
pub struct AppState {
    /// The fitted pipeline, loaded from the artifact file.
    pub pipeline: Arc<ClassificationPipeline>,
    /// The source message table.
    pub table: Arc<MessageTable>,
    /// Analyzer for the overview token counts; same chain as training.
    pub analyzer: Arc<MessageAnalyzer>,
}

impl AppState {
    /// Create the application state.
    pub fn new(pipeline: ClassificationPipeline, table: MessageTable) -> Result<Self> {
        Ok(AppState {
            pipeline: Arc::new(pipeline),
            table: Arc::new(table),
            analyzer: Arc::new(MessageAnalyzer::new()?),
        })
    }
}

/// Serve the dashboard until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "dashboard listening");
    axum::serve(listener, router).await?;
    Ok(())
}
