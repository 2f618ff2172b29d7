use std::sync::Arc;

use crate::{
    config::Config,
    upstream::{Forward, Web3Forms},
};

pub struct AppState {
    pub config: Config,
    pub upstream: Arc<dyn Forward>,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();
        let upstream = Arc::new(Web3Forms::new(&config.upstream_url));

        Arc::new(Self { config, upstream })
    }
}
