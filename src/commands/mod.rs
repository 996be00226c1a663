pub mod auth;
pub mod fetch;
pub mod whoami;

pub use auth::handle_auth;
pub use fetch::handle_fetch;
pub use whoami::handle_whoami;
