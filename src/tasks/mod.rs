//! Background tasks.

mod session_cleanup;

pub use session_cleanup::SessionCleanupTask;
