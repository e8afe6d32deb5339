use serde::Deserialize;

use crate::anchor::LoadedAnchor;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    /// The one piece of session state: the currently loaded anchor dataset.
    /// Every summary is recomputed from it on each request.
    pub anchor: Option<LoadedAnchor>,
}
