//! HTTP middleware shared by the message log API: shared-secret authorization and request logging.

pub mod auth;
pub mod logging;

#[cfg(test)]
mod test;

pub use auth::{
    authorize, extract_secret_key, require_secret_key, AuthRejection, SecretKeyConfig,
    SECRET_KEY_HEADER, SECRET_KEY_QUERY_PARAM,
};
pub use logging::request_logging;
