pub mod handlers;
pub mod routes;
pub mod server;

pub use routes::create_routes;
pub use server::run_server;

use std::sync::Arc;

use crate::services::AnswerService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnswerService>,
}

impl AppState {
    pub fn new(service: AnswerService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
