use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::error::{DirectoryError, DirectoryResult};
use crate::backend::models::{Channel, ServerView};
use crate::backend::query::ServerFilter;
use crate::backend::seed::Seed;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS category (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    );
    CREATE TABLE IF NOT EXISTS server (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        owner INTEGER NOT NULL,
        category INTEGER NOT NULL REFERENCES category(id),
        description TEXT
    );
    CREATE TABLE IF NOT EXISTS channel (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        owner INTEGER NOT NULL,
        topic TEXT NOT NULL,
        server INTEGER NOT NULL REFERENCES server(id)
    );
    CREATE TABLE IF NOT EXISTS server_member (
        server INTEGER NOT NULL REFERENCES server(id),
        user_id INTEGER NOT NULL,
        PRIMARY KEY (server, user_id)
    );
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// SQLite-backed store of categories, servers, channels and memberships.
#[derive(Clone)]
pub struct Catalog {
    conn: Arc<Mutex<Connection>>,
}

impl Catalog {
    pub fn open<P: AsRef<Path>>(path: P) -> DirectoryResult<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> DirectoryResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> DirectoryResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    fn lock(&self) -> DirectoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DirectoryError::LockPoisoned)
    }

    pub fn add_category(&self, name: &str, description: Option<&str>) -> DirectoryResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO category (name, description) VALUES (?1, ?2)",
            params![name, description],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_server(
        &self,
        name: &str,
        owner: i64,
        category: i64,
        description: Option<&str>,
    ) -> DirectoryResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO server (name, owner, category, description) VALUES (?1, ?2, ?3, ?4)",
            params![name, owner, category, description],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_channel(&self, name: &str, owner: i64, topic: &str, server: i64) -> DirectoryResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO channel (name, owner, topic, server) VALUES (?1, ?2, ?3, ?4)",
            params![name, owner, topic, server],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_member(&self, server: i64, user_id: i64) -> DirectoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO server_member (server, user_id) VALUES (?1, ?2)",
            params![server, user_id],
        )?;
        Ok(())
    }

    pub fn categories(&self) -> DirectoryResult<Vec<Category>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, description FROM category ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })?;
        let categories = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Inserts every category, server, member and channel in `seed`.
    pub fn load_seed(&self, seed: &Seed) -> DirectoryResult<()> {
        let mut category_ids = HashMap::new();
        for category in &seed.categories {
            let id = self.add_category(&category.name, category.description.as_deref())?;
            category_ids.insert(category.name.as_str(), id);
        }

        for server in &seed.servers {
            let category = *category_ids.get(server.category.as_str()).ok_or_else(|| {
                DirectoryError::Validation(format!(
                    "Server {} references unknown category {}",
                    server.name, server.category
                ))
            })?;
            let id = self.add_server(&server.name, server.owner, category, server.description.as_deref())?;
            for user_id in &server.members {
                self.add_member(id, *user_id)?;
            }
            for channel in &server.channels {
                self.add_channel(&channel.name, channel.owner, &channel.topic, id)?;
            }
        }

        tracing::info!(
            "Seeded catalog with {} categories and {} servers",
            seed.categories.len(),
            seed.servers.len()
        );
        Ok(())
    }

    /// Servers matching `filter`, ordered by id, each with its channels.
    pub fn select(&self, filter: &ServerFilter) -> DirectoryResult<Vec<ServerView>> {
        let mut sql = String::from(
            "SELECT s.id, s.name, s.owner, s.category, s.description,
                    (SELECT COUNT(*) FROM server_member m WHERE m.server = s.id)
             FROM server s JOIN category c ON c.id = s.category
             WHERE 1 = 1",
        );
        let mut args: Vec<Value> = Vec::new();

        if let Some(name) = &filter.category {
            sql.push_str(" AND c.name = ?");
            args.push(Value::Text(name.clone()));
        }
        if let Some(user_id) = filter.member {
            sql.push_str(
                " AND EXISTS (SELECT 1 FROM server_member m WHERE m.server = s.id AND m.user_id = ?)",
            );
            args.push(Value::Integer(user_id));
        }
        if let Some(id) = filter.server_id {
            sql.push_str(" AND s.id = ?");
            args.push(Value::Integer(id));
        }
        sql.push_str(" ORDER BY s.id");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            args.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        let conn = self.lock()?;
        let mut servers = {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(args), |row| {
                let count: i64 = row.get(5)?;
                Ok(ServerView {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    owner: row.get(2)?,
                    category: row.get(3)?,
                    description: row.get(4)?,
                    num_members: filter.with_num_members.then_some(count),
                    channel_server: Vec::new(),
                })
            })?;
            let servers = rows.collect::<Result<Vec<_>, _>>()?;
            servers
        };

        let mut stmt = conn.prepare(
            "SELECT id, name, owner, topic, server FROM channel WHERE server = ?1 ORDER BY id",
        )?;
        for server in servers.iter_mut() {
            let rows = stmt.query_map(params![server.id], |row| {
                Ok(Channel {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    owner: row.get(2)?,
                    topic: row.get(3)?,
                    server: row.get(4)?,
                })
            })?;
            server.channel_server = rows.collect::<Result<Vec<_>, _>>()?;
        }

        Ok(servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seeded() -> (Catalog, i64, i64) {
        let catalog = Catalog::open_in_memory().expect("Failed to open catalog");
        let gaming = catalog.add_category("Gaming", Some("Games and more")).unwrap();
        let music = catalog.add_category("Music", None).unwrap();

        let a = catalog.add_server("Speedrunners", 1, gaming, None).unwrap();
        let b = catalog.add_server("Synthwave", 2, music, Some("Retro sounds")).unwrap();
        catalog.add_server("Tabletop", 1, gaming, None).unwrap();

        catalog.add_channel("general", 1, "anything goes", a).unwrap();
        catalog.add_channel("routes", 1, "route planning", a).unwrap();
        catalog.add_member(a, 10).unwrap();
        catalog.add_member(a, 11).unwrap();
        catalog.add_member(a, 11).unwrap();
        catalog.add_member(b, 10).unwrap();

        (catalog, a, b)
    }

    #[test]
    fn test_select_all_in_id_order() {
        let (catalog, a, _) = seeded();
        let servers = catalog.select(&ServerFilter::default()).unwrap();

        let names: Vec<_> = servers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Speedrunners", "Synthwave", "Tabletop"]);
        assert!(servers.iter().all(|s| s.num_members.is_none()));

        let first = &servers[0];
        assert_eq!(first.id, a);
        let channels: Vec<_> = first.channel_server.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(channels, ["general", "routes"]);
    }

    #[test]
    fn test_select_by_category_and_limit() {
        let (catalog, _, _) = seeded();
        let filter = ServerFilter {
            category: Some("Gaming".into()),
            limit: Some(1),
            ..Default::default()
        };
        let servers = catalog.select(&filter).unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].name, "Speedrunners");
    }

    #[test]
    fn test_select_by_member_with_counts() {
        let (catalog, a, b) = seeded();
        let filter = ServerFilter {
            member: Some(10),
            with_num_members: true,
            ..Default::default()
        };
        let servers = catalog.select(&filter).unwrap();
        let counts: Vec<_> = servers.iter().map(|s| (s.id, s.num_members)).collect();
        assert_eq!(counts, [(a, Some(2)), (b, Some(1))]);
    }

    #[test]
    fn test_categories_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.db");

        {
            let catalog = Catalog::open(&path).unwrap();
            catalog.add_category("Science", Some("Labs")).unwrap();
        }

        let catalog = Catalog::open(&path).unwrap();
        let categories = catalog.categories().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Science");
        assert_eq!(categories[0].description.as_deref(), Some("Labs"));
    }

    #[test]
    fn test_load_seed() {
        let seed: Seed = serde_json::from_str(
            r#"{
                "categories": [{"name": "Gaming", "description": null}],
                "servers": [{
                    "name": "Speedrunners", "owner": 1, "category": "Gaming",
                    "members": [3, 4],
                    "channels": [{"name": "general", "owner": 1, "topic": "hi"}]
                }]
            }"#,
        )
        .unwrap();

        let catalog = Catalog::open_in_memory().unwrap();
        catalog.load_seed(&seed).unwrap();

        let filter = ServerFilter { with_num_members: true, ..Default::default() };
        let servers = catalog.select(&filter).unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].num_members, Some(2));
        assert_eq!(servers[0].channel_server[0].topic, "hi");
        assert_eq!(catalog.categories().unwrap()[0].name, "Gaming");
    }

    #[test]
    fn test_seed_with_unknown_category_fails() {
        let seed: Seed = serde_json::from_str(
            r#"{"servers": [{"name": "Orphan", "owner": 1, "category": "Nowhere"}]}"#,
        )
        .unwrap();

        let catalog = Catalog::open_in_memory().unwrap();
        assert!(matches!(
            catalog.load_seed(&seed),
            Err(DirectoryError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_category_is_storage_error() {
        let (catalog, _, _) = seeded();
        assert!(matches!(
            catalog.add_category("Music", None),
            Err(DirectoryError::Storage(_))
        ));
    }
}
