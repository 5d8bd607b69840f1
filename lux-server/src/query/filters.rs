//! Object filter composition
//!
//! A request's non-blank fields each become one [`Predicate`]; the object
//! query ANDs them together. No predicates means every object matches.
//! Filter text is always bound as a parameter, never spliced into SQL.

use lux_common::{Result, SearchRequest};
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};

/// Maximum number of objects returned for one request
pub const RESULT_LIMIT: i64 = 1000;

const LIKE_ESCAPE: char = '\\';

/// Attribute a predicate tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// `objects.date`
    Date,
    /// Name of any agent with a production on the object
    Agent,
    /// Name of any classifier applied to the object
    Classifier,
    /// `objects.label`
    Label,
}

impl FilterField {
    /// SQL up to (not including) the bound pattern
    fn condition_prefix(self) -> &'static str {
        match self {
            FilterField::Date => "objects.date LIKE ",
            FilterField::Label => "objects.label LIKE ",
            FilterField::Agent => {
                "objects.id IN (\
                 SELECT productions.obj_id FROM productions \
                 JOIN agents ON productions.agt_id = agents.id \
                 WHERE agents.name LIKE "
            }
            FilterField::Classifier => {
                "objects.id IN (\
                 SELECT objects_classifiers.obj_id FROM objects_classifiers \
                 JOIN classifiers ON objects_classifiers.cls_id = classifiers.id \
                 WHERE classifiers.name LIKE "
            }
        }
    }

    /// Agent and classifier predicates match if any linked row matches
    pub fn is_existential(self) -> bool {
        matches!(self, FilterField::Agent | FilterField::Classifier)
    }
}

/// How a predicate compares its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring containment (ASCII folding, as SQLite LIKE)
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: FilterField,
    pub mode: MatchMode,
    pub value: String,
}

impl Predicate {
    pub fn contains(field: FilterField, value: impl Into<String>) -> Self {
        Self {
            field,
            mode: MatchMode::Contains,
            value: value.into(),
        }
    }

    /// Bound LIKE pattern; wildcards in the value match literally
    pub fn like_pattern(&self) -> String {
        match self.mode {
            MatchMode::Contains => format!("%{}%", escape_like(&self.value)),
        }
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Row from the `objects` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionObject {
    pub id: i64,
    pub label: Option<String>,
    pub date: Option<String>,
}

/// Ordered list of predicates, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectFilter {
    predicates: Vec<Predicate>,
}

impl ObjectFilter {
    /// One predicate per non-blank request field
    pub fn from_request(request: &SearchRequest) -> Self {
        let fields = [
            (FilterField::Date, &request.date),
            (FilterField::Agent, &request.agent),
            (FilterField::Classifier, &request.classifier),
            (FilterField::Label, &request.label),
        ];

        let predicates = fields
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(field, value)| Predicate::contains(field, value.as_str()))
            .collect();

        Self { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Object query: predicates, then store-native `(label, date)` order and the row cap
    pub fn build_query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder =
            QueryBuilder::new("SELECT objects.id, objects.label, objects.date FROM objects WHERE 1=1");

        for predicate in &self.predicates {
            builder.push(" AND ");
            builder.push(predicate.field.condition_prefix());
            builder.push_bind(predicate.like_pattern());
            builder.push(format!(" ESCAPE '{}'", LIKE_ESCAPE));
            if predicate.field.is_existential() {
                builder.push(")");
            }
        }

        builder.push(" ORDER BY objects.label ASC, objects.date ASC LIMIT ");
        builder.push_bind(RESULT_LIMIT);
        builder
    }
}

/// Objects matching `filter`, at most [`RESULT_LIMIT`]
pub async fn fetch_matching_objects(
    conn: &mut SqliteConnection,
    filter: &ObjectFilter,
) -> Result<Vec<CollectionObject>> {
    let mut builder = filter.build_query();
    let rows = builder.build().fetch_all(&mut *conn).await?;

    rows.iter()
        .map(|row| -> Result<CollectionObject> {
            Ok(CollectionObject {
                id: row.try_get("id")?,
                label: row.try_get("label")?,
                date: row.try_get("date")?,
            })
        })
        .collect()
}
