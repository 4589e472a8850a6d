//! Core of the bundle URL tool: the reference codec plus the catalog,
//! release listings, quarterly support dates, release-properties and
//! checksum helpers built around it.

pub mod config;
pub mod logging;

pub mod bundle;
pub mod checksum;
pub mod codec;
pub mod product_info;
pub mod quarterly;
pub mod release_properties;
pub mod releases;
