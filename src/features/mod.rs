// Application features built on the models and storage
pub mod dashboard;
pub mod profile_editor;
pub mod profile_store;
pub mod reconcile;
