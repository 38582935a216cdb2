// Adjustment workflow core
pub mod adjustments;
pub mod configuration;
pub mod numbering;

// Lookups feeding the workflow
pub mod articles;
pub mod catalogs;
pub mod stock;
