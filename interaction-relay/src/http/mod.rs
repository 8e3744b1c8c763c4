mod handle;
pub use handle::{handle, health};

mod response;
pub use response::ErrorResponse;

mod server;
pub use server::Server;
