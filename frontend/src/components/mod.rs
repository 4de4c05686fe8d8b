pub mod dashboard;
pub mod data_sources;
pub mod dataset;
pub mod dataset_creator;
pub mod datasets;
pub mod destinations;
pub mod helpers;
pub mod list;
pub mod login;
pub mod nav;
pub mod schema_modal;
pub mod settings;
