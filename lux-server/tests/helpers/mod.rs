//! Fixture collection for integration tests
//!
//! Builds a collection database in a temporary directory, then reopens it
//! read-only exactly as the server does.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use lux_common::db::init_collection_database;
use lux_server::config::ServerConfig;
use lux_server::AppState;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub struct TestCollection {
    dir: TempDir,
    writer: SqlitePool,
}

impl TestCollection {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let writer = init_collection_database(&dir.path().join("lux.sqlite"))
            .await
            .expect("Failed to create collection database");
        Self { dir, writer }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("lux.sqlite")
    }

    pub async fn object(&self, id: i64, label: Option<&str>, date: Option<&str>) -> &Self {
        sqlx::query("INSERT INTO objects (id, label, date) VALUES (?, ?, ?)")
            .bind(id)
            .bind(label)
            .bind(date)
            .execute(&self.writer)
            .await
            .expect("insert object");
        self
    }

    pub async fn agent(&self, id: i64, name: &str, begin: Option<&str>, end: Option<&str>) -> &Self {
        sqlx::query("INSERT INTO agents (id, name, begin_date, end_date) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(begin)
            .bind(end)
            .execute(&self.writer)
            .await
            .expect("insert agent");
        self
    }

    pub async fn production(&self, obj_id: i64, agt_id: i64, part: Option<&str>) -> &Self {
        sqlx::query("INSERT INTO productions (obj_id, agt_id, part) VALUES (?, ?, ?)")
            .bind(obj_id)
            .bind(agt_id)
            .bind(part)
            .execute(&self.writer)
            .await
            .expect("insert production");
        self
    }

    pub async fn nationality(&self, id: i64, descriptor: Option<&str>) -> &Self {
        sqlx::query("INSERT INTO nationalities (id, descriptor) VALUES (?, ?)")
            .bind(id)
            .bind(descriptor)
            .execute(&self.writer)
            .await
            .expect("insert nationality");
        self
    }

    pub async fn agent_nationality(&self, agt_id: i64, nat_id: i64) -> &Self {
        sqlx::query("INSERT INTO agents_nationalities (agt_id, nat_id) VALUES (?, ?)")
            .bind(agt_id)
            .bind(nat_id)
            .execute(&self.writer)
            .await
            .expect("insert agent nationality");
        self
    }

    pub async fn classifier(&self, id: i64, name: Option<&str>) -> &Self {
        sqlx::query("INSERT INTO classifiers (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&self.writer)
            .await
            .expect("insert classifier");
        self
    }

    pub async fn object_classifier(&self, obj_id: i64, cls_id: i64) -> &Self {
        sqlx::query("INSERT INTO objects_classifiers (obj_id, cls_id) VALUES (?, ?)")
            .bind(obj_id)
            .bind(cls_id)
            .execute(&self.writer)
            .await
            .expect("insert object classifier");
        self
    }

    /// Insert `count` unlinked objects starting at `first_id`, in one transaction
    pub async fn bulk_objects(&self, first_id: i64, count: i64) {
        let mut tx = self.writer.begin().await.expect("begin");
        for id in first_id..first_id + count {
            sqlx::query("INSERT INTO objects (id, label, date) VALUES (?, ?, ?)")
                .bind(id)
                .bind(format!("Object {:05}", id))
                .bind("1900")
                .execute(&mut *tx)
                .await
                .expect("insert bulk object");
        }
        tx.commit().await.expect("commit");
    }

    /// Read-only pool over the fixture, as the server opens it
    pub async fn readonly_pool(&self) -> SqlitePool {
        lux_server::db::connect_readonly(&self.db_path(), 4)
            .await
            .expect("Should connect read-only")
    }

    pub async fn app_state(&self, request_timeout: Option<Duration>) -> AppState {
        let config = ServerConfig {
            database_path: self.db_path(),
            request_timeout,
            ..ServerConfig::default()
        };
        AppState::new(self.readonly_pool().await, &config)
    }

    /// "Blue Vase" by Maria Alba (Spanish, born 1950), classified as Ceramics
    pub async fn blue_vase() -> Self {
        let collection = Self::new().await;
        collection
            .object(1, Some("Blue Vase"), Some("1951"))
            .await
            .agent(10, "Maria Alba", Some("1950"), None)
            .await
            .production(1, 10, None)
            .await
            .nationality(100, Some("Spanish"))
            .await
            .agent_nationality(10, 100)
            .await
            .classifier(1000, Some("Ceramics"))
            .await
            .object_classifier(1, 1000)
            .await;
        collection
    }
}
