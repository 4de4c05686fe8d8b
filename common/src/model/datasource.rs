use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A configured connection to a database.
///
/// Connection parameters differ per engine and are kept in `connection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datasource {
    pub key: String,
    pub datasource_name: String,
    pub engine: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(flatten)]
    pub connection: Map<String, Value>,
}

impl Datasource {
    pub fn engine_kind(&self) -> Option<Engine> {
        Engine::from_name(&self.engine)
    }
}

/// Database engines the backend can connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    Postgresql,
    Redshift,
    Snowflake,
    Mysql,
    Bigquery,
    Athena,
    Trino,
}

impl Engine {
    pub const ALL: [Engine; 7] = [
        Engine::Postgresql,
        Engine::Redshift,
        Engine::Snowflake,
        Engine::Mysql,
        Engine::Bigquery,
        Engine::Athena,
        Engine::Trino,
    ];

    /// Case-insensitive lookup by schema title or record `engine` value.
    pub fn from_name(name: &str) -> Option<Engine> {
        Engine::ALL
            .into_iter()
            .find(|engine| engine.path_segment().eq_ignore_ascii_case(name))
    }

    /// Lowercase name used as the `/datasources/{engine}` path segment.
    pub fn path_segment(self) -> &'static str {
        match self {
            Engine::Postgresql => "postgresql",
            Engine::Redshift => "redshift",
            Engine::Snowflake => "snowflake",
            Engine::Mysql => "mysql",
            Engine::Bigquery => "bigquery",
            Engine::Athena => "athena",
            Engine::Trino => "trino",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Engine::Postgresql => "/static/images/postgresql.svg",
            Engine::Redshift => "/static/images/redshift.svg",
            Engine::Snowflake => "/static/images/snowflake.svg",
            Engine::Mysql => "/static/images/mysql.svg",
            Engine::Bigquery => "/static/images/bigquery.svg",
            Engine::Athena => "/static/images/athena.svg",
            Engine::Trino => "/static/images/trino.svg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn engine_lookup_ignores_case() {
        assert_eq!(Engine::from_name("PostgreSQL"), Some(Engine::Postgresql));
        assert_eq!(Engine::from_name("BigQuery"), Some(Engine::Bigquery));
        assert_eq!(Engine::from_name("oracle"), None);
    }

    #[test]
    fn connection_fields_are_flattened() {
        let ds: Datasource = serde_json::from_value(json!({
            "key": "ds-1",
            "datasource_name": "warehouse",
            "engine": "PostgreSQL",
            "database": "analytics",
            "host": "db.internal",
            "port": 5432
        }))
        .unwrap();
        assert_eq!(ds.engine_kind(), Some(Engine::Postgresql));
        assert_eq!(ds.connection.get("port"), Some(&json!(5432)));
        assert_eq!(ds.database.as_deref(), Some("analytics"));
    }
}
