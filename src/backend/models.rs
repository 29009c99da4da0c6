use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub owner: i64,
    pub topic: String,
    pub server: i64,
}

/// A server as returned to clients. Membership is never exposed, only its count on request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerView {
    pub id: i64,
    pub name: String,
    pub owner: i64,
    pub category: i64,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_members: Option<i64>,
    pub channel_server: Vec<Channel>,
}

/// Raw query parameters of a server listing, kept as strings the way they arrive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub by_user: Option<String>,
    #[serde(default)]
    pub by_serverid: Option<String>,
    #[serde(default)]
    pub with_num_members: Option<String>,
}
