pub mod config;
pub mod error;
pub mod types;
pub mod url_norm;

pub use config::Config;
pub use error::{CommonError, Result};
pub use types::*;
pub use url_norm::{is_valid_http_url, normalize_url, parse_absolute};
