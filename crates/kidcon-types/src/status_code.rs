#![allow(non_snake_case)]

/// Status code type alias, `u16` across every subsystem.
#[allow(non_camel_case_types)]
pub type status_code_t = u16;

/// Common status codes (0-999).
pub mod StatusCode {
    use super::status_code_t;

    pub const OK: status_code_t = 0;
    pub const INVALID_ARG: status_code_t = 1;
    pub const INVALID_FORMAT: status_code_t = 2;
    pub const IO_ERROR: status_code_t = 3;
    pub const CONFIG_PARSE_ERROR: status_code_t = 4;
    pub const UNKNOWN: status_code_t = 999;
}

/// Device registry status codes (1xxx).
pub mod RegistryCode {
    use super::status_code_t;

    pub const DEVICE_NOT_FOUND: status_code_t = 1000;
    pub const QUERY_FAILED: status_code_t = 1001;
    pub const RESET_FAILED: status_code_t = 1002;
}

/// Log ingest status codes (2xxx).
pub mod IngestCode {
    use super::status_code_t;

    pub const INVALID_UNIT: status_code_t = 2000;
    pub const INVALID_TIMESTAMP: status_code_t = 2001;
}

/// Sample store status codes (3xxx).
pub mod StoreCode {
    use super::status_code_t;

    pub const OPEN_FAILED: status_code_t = 3000;
    pub const SCHEMA_FAILED: status_code_t = 3001;
    pub const UPSERT_FAILED: status_code_t = 3002;
    pub const QUERY_FAILED: status_code_t = 3003;
}

/// Classification of status code ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum StatusCodeType {
    Invalid = -1,
    Common = 0,
    Registry = 1,
    Ingest = 2,
    Store = 3,
}

/// Determine the type/category of a status code.
pub fn type_of(code: status_code_t) -> StatusCodeType {
    match code {
        0..=999 => StatusCodeType::Common,
        1000..=1999 => StatusCodeType::Registry,
        2000..=2999 => StatusCodeType::Ingest,
        3000..=3999 => StatusCodeType::Store,
        _ => StatusCodeType::Invalid,
    }
}

/// Convert a status code to its human-readable name.
pub fn to_string(code: status_code_t) -> &'static str {
    match code {
        // Common
        StatusCode::OK => "OK",
        StatusCode::INVALID_ARG => "InvalidArg",
        StatusCode::INVALID_FORMAT => "InvalidFormat",
        StatusCode::IO_ERROR => "IOError",
        StatusCode::CONFIG_PARSE_ERROR => "ConfigParseError",
        StatusCode::UNKNOWN => "Unknown",

        // Registry
        RegistryCode::DEVICE_NOT_FOUND => "Registry::DeviceNotFound",
        RegistryCode::QUERY_FAILED => "Registry::QueryFailed",
        RegistryCode::RESET_FAILED => "Registry::ResetFailed",

        // Ingest
        IngestCode::INVALID_UNIT => "Ingest::InvalidUnit",
        IngestCode::INVALID_TIMESTAMP => "Ingest::InvalidTimestamp",

        // Store
        StoreCode::OPEN_FAILED => "Store::OpenFailed",
        StoreCode::SCHEMA_FAILED => "Store::SchemaFailed",
        StoreCode::UPSERT_FAILED => "Store::UpsertFailed",
        StoreCode::QUERY_FAILED => "Store::QueryFailed",

        _ => "UnknownStatusCode",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::OK, 0);
        assert_eq!(StatusCode::UNKNOWN, 999);
        assert_eq!(RegistryCode::DEVICE_NOT_FOUND, 1000);
        assert_eq!(IngestCode::INVALID_UNIT, 2000);
        assert_eq!(StoreCode::OPEN_FAILED, 3000);
    }

    #[test]
    fn test_type_of() {
        assert_eq!(type_of(StatusCode::OK), StatusCodeType::Common);
        assert_eq!(type_of(StatusCode::UNKNOWN), StatusCodeType::Common);
        assert_eq!(type_of(RegistryCode::RESET_FAILED), StatusCodeType::Registry);
        assert_eq!(type_of(IngestCode::INVALID_TIMESTAMP), StatusCodeType::Ingest);
        assert_eq!(type_of(StoreCode::QUERY_FAILED), StatusCodeType::Store);
        assert_eq!(type_of(4000), StatusCodeType::Invalid);
        assert_eq!(type_of(65535), StatusCodeType::Invalid);
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(StatusCode::OK), "OK");
        assert_eq!(to_string(StatusCode::IO_ERROR), "IOError");
        assert_eq!(to_string(RegistryCode::DEVICE_NOT_FOUND), "Registry::DeviceNotFound");
        assert_eq!(to_string(StoreCode::UPSERT_FAILED), "Store::UpsertFailed");
        assert_eq!(to_string(12345), "UnknownStatusCode");
    }
}
