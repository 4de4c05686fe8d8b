use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    pub key: String,
    pub dataset_id: String,
    pub datasource_id: String,
    pub expectation_type: String,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
}
