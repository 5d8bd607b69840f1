//! Nationality descriptors for one agent

use lux_common::Result;
use sqlx::SqliteConnection;
use std::collections::HashMap;

/// Descriptors linked to `agent_id`, sorted case-insensitively
///
/// Null and empty descriptors are dropped; duplicates are kept.
pub async fn fetch_nationalities(conn: &mut SqliteConnection, agent_id: i64) -> Result<Vec<String>> {
    let rows: Vec<Option<String>> = sqlx::query_scalar(
        r#"
        SELECT nationalities.descriptor
        FROM agents_nationalities
        JOIN nationalities ON nationalities.id = agents_nationalities.nat_id
        WHERE agents_nationalities.agt_id = ?
        "#,
    )
    .bind(agent_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut descriptors: Vec<String> = rows
        .into_iter()
        .flatten()
        .filter(|d| !d.is_empty())
        .collect();
    sort_case_insensitive(&mut descriptors);

    Ok(descriptors)
}

/// Stable ascending sort on the lowercased value
pub fn sort_case_insensitive(values: &mut [String]) {
    values.sort_by_cached_key(|v| v.to_lowercase());
}

/// Per-request memo of agent nationalities
///
/// An agent credited on many objects in one result set is looked up once.
/// Never shared across requests.
#[derive(Debug, Default)]
pub struct NationalityCache {
    by_agent: HashMap<i64, Vec<String>>,
}

impl NationalityCache {
    pub async fn get(&mut self, conn: &mut SqliteConnection, agent_id: i64) -> Result<Vec<String>> {
        if let Some(cached) = self.by_agent.get(&agent_id) {
            return Ok(cached.clone());
        }

        let descriptors = fetch_nationalities(conn, agent_id).await?;
        self.by_agent.insert(agent_id, descriptors.clone());
        Ok(descriptors)
    }

    pub fn len(&self) -> usize {
        self.by_agent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_agent.is_empty()
    }
}
