pub mod result;
pub mod status;
pub mod status_code;
pub mod time;

pub use result::{Result, make_error, make_error_msg};
pub use status::Status;
pub use status_code::{
    IngestCode, RegistryCode, StatusCode, StatusCodeType, StoreCode, status_code_t,
};
pub use time::LocalTime;
