use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeParameters {
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

/// A sample of rows fetched from the dataset, used to offer column names in
/// column-select widgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSample {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub key: String,
    pub datasource_id: String,
    #[serde(default)]
    pub datasource_name: Option<String>,
    pub dataset_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub runtime_parameters: Option<RuntimeParameters>,
    #[serde(default)]
    pub sampling: Option<Value>,
    #[serde(default)]
    pub sample: Option<DataSample>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
}

impl Dataset {
    pub fn sample_columns(&self) -> Option<&[String]> {
        self.sample.as_ref().map(|s| s.columns.as_slice())
    }
}

/// Where a dataset's rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetResource {
    pub schema: Option<String>,
    pub name: String,
    /// `true` for query-backed datasets, `false` for `schema.table` ones.
    pub is_virtual: bool,
}

/// Splits a dataset into schema and name. Query datasets take the schema from
/// their runtime parameters; table datasets encode it as `schema.table`.
pub fn split_dataset_resource(dataset: &Dataset) -> DatasetResource {
    if let Some(params) = &dataset.runtime_parameters {
        return DatasetResource {
            schema: params.schema.clone(),
            name: dataset.dataset_name.clone(),
            is_virtual: true,
        };
    }
    match dataset.dataset_name.split_once('.') {
        Some((schema, table)) => DatasetResource {
            schema: Some(schema.to_string()),
            name: table.to_string(),
            is_virtual: false,
        },
        None => DatasetResource {
            schema: None,
            name: dataset.dataset_name.clone(),
            is_virtual: false,
        },
    }
}
