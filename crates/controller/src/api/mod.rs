//! HTTP boundary: the JSON response envelope, error mapping and the
//! handlers the controller serves itself.

pub mod error;
pub mod health;
pub mod params;
pub mod response;

pub use error::ApiError;
pub use params::parse_int_param;
pub use response::{
    respond, Envelope, PaginationLinks, FAILED_DB_CONN_MESSAGE,
    FAILED_PAYLOAD_VALIDATION_MESSAGE, PARAM_IS_NOT_INT_MESSAGE,
};
