//! API layer - HTTP endpoint handlers organized by domain.

mod document;
mod health;
mod metrics;
mod render;
mod routes;

pub use document::{
    apply_edit, create_document, delete_document, generate_letter, get_document, list_documents,
    remove_placeholder, restore_selection, set_placeholder, update_selection, update_template,
};
pub use health::{health, stats};
pub use metrics::prometheus_metrics;
pub use render::{extract, render_format, render_substitute};
pub use routes::{api_routes, public_routes};
