//! HTTP API handlers for hcal-re

pub mod audio;
pub mod buildinfo;
pub mod health;
pub mod recommendations;

pub use audio::{get_audio, list_audio, random_audio};
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use recommendations::{recommendations_from_body, recommendations_from_query};
