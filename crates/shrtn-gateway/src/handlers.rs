mod health;
mod url;

pub use self::health::health_handler;
pub use self::url::{create_handler, index_handler, method_not_allowed, not_found_handler, redirect_handler};
