// Infrastructure layer (shared components)
pub mod config;
pub mod error;
pub mod metrics;

// Core text transformations
pub mod editor;
pub mod format;
pub mod placeholder;

// Domain layer (session state)
pub mod document;

// Application layer
pub mod api;
pub mod server;

// Supporting modules
pub mod tasks;
