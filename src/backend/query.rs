use crate::backend::error::{DirectoryError, DirectoryResult};
use crate::backend::models::ServerQuery;

/// Who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User(i64),
}

/// Validated selection criteria, ready for the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFilter {
    pub category: Option<String>,
    pub member: Option<i64>,
    pub server_id: Option<i64>,
    pub limit: Option<usize>,
    pub with_num_members: bool,
}

// Empty parameters count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn flag(value: &Option<String>) -> bool {
    value.as_deref() == Some("true")
}

impl ServerQuery {
    pub fn resolve(&self, viewer: &Viewer) -> DirectoryResult<ServerFilter> {
        let mut filter = ServerFilter {
            category: present(&self.category).map(str::to_string),
            with_num_members: flag(&self.with_num_members),
            ..Default::default()
        };

        if flag(&self.by_user) {
            match viewer {
                Viewer::User(id) => filter.member = Some(*id),
                Viewer::Anonymous => return Err(DirectoryError::AuthenticationFailed),
            }
        }

        if let Some(qty) = present(&self.qty) {
            let limit = qty.parse::<usize>().map_err(|_| {
                DirectoryError::Validation(format!("qty {} is not a non-negative integer", qty))
            })?;
            filter.limit = Some(limit);
        }

        if let Some(raw) = present(&self.by_serverid) {
            if *viewer == Viewer::Anonymous {
                return Err(DirectoryError::AuthenticationFailed);
            }
            let id = raw.trim().parse::<i64>().map_err(|_| {
                DirectoryError::Validation(format!("Server with id {} value error", raw))
            })?;
            filter.server_id = Some(id);
        }

        Ok(filter)
    }
}
