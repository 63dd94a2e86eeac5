use std::sync::Arc;

use configs::Environment;
use service::tuan::{TuanRepository, TuanService};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub tuans: TuanService<dyn TuanRepository>,
    pub env: Environment,
}

impl AppState {
    pub fn new(repo: Arc<dyn TuanRepository>, env: Environment) -> Self {
        Self { tuans: TuanService::new(repo), env }
    }
}
