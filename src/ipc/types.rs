use crate::auth::ViewState;
use crate::seed::Seed;
use crate::store::CampusState;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub campus: CampusState,
    pub view: ViewState,
    /// Kept so `state.reset` can rebuild the collections.
    pub seed: Seed,
}

impl AppState {
    pub fn new(seed: Seed) -> Self {
        Self {
            campus: CampusState::from_seed(&seed),
            view: ViewState::default(),
            seed,
        }
    }
}
