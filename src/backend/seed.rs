use serde::Deserialize;

/// Initial catalog contents, read from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub servers: Vec<SeedServer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedServer {
    pub name: String,
    pub owner: i64,
    /// Category name, resolved while loading.
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<i64>,
    #[serde(default)]
    pub channels: Vec<SeedChannel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedChannel {
    pub name: String,
    pub owner: i64,
    pub topic: String,
}
