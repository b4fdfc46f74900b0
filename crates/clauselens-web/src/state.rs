//! Shared application state for the web server.

use std::sync::Arc;
use tokio::sync::RwLock;

use clauselens_analysis::Contract;
use clauselens_common::Result;
use clauselens_config::Config;

use crate::relay::AnalysisClient;
use crate::view::ViewState;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub analysis: AnalysisClient,
    /// Contracts analyzed during this process lifetime; never persisted.
    pub contracts: RwLock<Vec<Contract>>,
    pub view: RwLock<ViewState>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let analysis = AnalysisClient::new(&config.analysis)?;
        Ok(Self {
            config,
            analysis,
            contracts: RwLock::new(Vec::new()),
            view: RwLock::new(ViewState::default()),
        })
    }

    /// Store an analyzed contract and select it for the analysis view.
    pub async fn add_contract(&self, contract: Contract) {
        let id = contract.id.clone();
        self.contracts.write().await.push(contract);
        self.view.write().await.open_contract(id);
    }

    pub async fn find_contract(&self, id: &str) -> Option<Contract> {
        self.contracts
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }
}

pub type SharedState = Arc<AppState>;
