use dioxus::prelude::*;

use crate::backend::models::{ServerQuery, ServerView};

/// Server listing endpoint. No authentication layer exists, so callers are anonymous.
#[server]
pub async fn list_servers(query: ServerQuery) -> Result<Vec<ServerView>, ServerFnError> {
    let catalog = crate::backend::shared_catalog().map_err(|e| ServerFnError::new(e.to_string()))?;
    crate::backend::select_servers(catalog, query, crate::backend::query::Viewer::Anonymous)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}
