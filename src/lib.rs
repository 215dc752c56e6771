// Shared service utilities
// Typed environment access, API response envelope, email validation, graceful shutdown

pub mod env;
pub mod observability;
pub mod response;
pub mod shutdown;
pub mod validation;

pub use response::{ApiResponse, ListData};
pub use shutdown::{wait_for_shutdown, ShutdownContext, ShutdownSignal, ShutdownWaiter};
pub use validation::is_valid_email;
