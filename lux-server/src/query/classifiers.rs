//! Classifier tags for one object

use lux_common::Result;
use sqlx::SqliteConnection;

use super::nationalities::sort_case_insensitive;

/// Classifier names of `object_id`, sorted case-insensitively and newline-joined
///
/// Null and empty names are dropped; duplicates are kept. Empty string when
/// the object has no classifiers.
pub async fn fetch_classifications(conn: &mut SqliteConnection, object_id: i64) -> Result<String> {
    let rows: Vec<Option<String>> = sqlx::query_scalar(
        r#"
        SELECT classifiers.name
        FROM objects_classifiers
        JOIN classifiers ON objects_classifiers.cls_id = classifiers.id
        WHERE objects_classifiers.obj_id = ?
        "#,
    )
    .bind(object_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut names: Vec<String> = rows
        .into_iter()
        .flatten()
        .filter(|n| !n.is_empty())
        .collect();
    sort_case_insensitive(&mut names);

    Ok(names.join("\n"))
}
