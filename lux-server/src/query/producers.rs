//! Producers of one object
//!
//! Each production row becomes one [`Producer`]. The store pre-sorts by
//! agent name then part, but the authoritative order is the case-insensitive
//! `(name, part, nationalities)` key applied after assembly.

use lux_common::{ProducerRecord, Result};
use sqlx::{Row, SqliteConnection};

use super::nationalities::NationalityCache;
use super::timespan::format_timespan;

/// One agent's contribution to an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Producer {
    /// Role string (e.g. "painter"); empty when the store has none
    pub part: String,
    pub name: String,
    /// Sorted case-insensitively, duplicates kept
    pub nationalities: Vec<String>,
    pub timespan: String,
}

impl Producer {
    /// Nationalities as they appear on the wire
    pub fn nationalities_joined(&self) -> String {
        self.nationalities.join("\n")
    }

    fn sort_key(&self) -> (String, String, String) {
        (
            self.name.to_lowercase(),
            self.part.to_lowercase(),
            self.nationalities_joined().to_lowercase(),
        )
    }

    pub fn into_record(self) -> ProducerRecord {
        let nationalities = self.nationalities_joined();
        ProducerRecord {
            part: self.part,
            name: self.name,
            nationalities,
            timespan: self.timespan,
        }
    }
}

/// Order producers by lowercased name, then part, then nationality string
pub fn sort_producers(producers: &mut [Producer]) {
    producers.sort_by_cached_key(Producer::sort_key);
}

/// All producers of `object_id`, fully resolved and sorted
pub async fn fetch_producers(
    conn: &mut SqliteConnection,
    object_id: i64,
    nationalities: &mut NationalityCache,
) -> Result<Vec<Producer>> {
    let rows = sqlx::query(
        r#"
        SELECT agents.name, productions.part, agents.begin_date, agents.end_date, agents.id
        FROM productions
        JOIN agents ON productions.agt_id = agents.id
        WHERE productions.obj_id = ?
        ORDER BY agents.name ASC, productions.part ASC
        "#,
    )
    .bind(object_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut producers = Vec::with_capacity(rows.len());
    for row in rows {
        let name: Option<String> = row.try_get("name")?;
        let part: Option<String> = row.try_get("part")?;
        let begin_date: Option<String> = row.try_get("begin_date")?;
        let end_date: Option<String> = row.try_get("end_date")?;
        let agent_id: i64 = row.try_get("id")?;

        producers.push(Producer {
            part: part.unwrap_or_default(),
            name: name.unwrap_or_default(),
            nationalities: nationalities.get(conn, agent_id).await?,
            timespan: format_timespan(begin_date.as_deref(), end_date.as_deref()),
        });
    }

    sort_producers(&mut producers);
    Ok(producers)
}
