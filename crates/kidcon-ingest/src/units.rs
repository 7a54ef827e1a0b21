use kidcon_types::{IngestCode, Result, Status};

/// Parse a byte count as reported by the router: a plain number or a
/// number with a binary-unit suffix (`KiB`, `MiB`, `GiB`).
pub fn parse_bytes(value: &str) -> Result<f64> {
    let (number, multiplier) = if let Some(n) = value.strip_suffix("KiB") {
        (n, 1024.0)
    } else if let Some(n) = value.strip_suffix("MiB") {
        (n, 1024.0 * 1024.0)
    } else if let Some(n) = value.strip_suffix("GiB") {
        (n, 1024.0 * 1024.0 * 1024.0)
    } else {
        (value, 1.0)
    };

    number
        .parse::<f64>()
        .map(|n| n * multiplier)
        .map_err(|_| {
            Status::with_message(
                IngestCode::INVALID_UNIT,
                format!("unparseable byte value {:?}", value),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_number() {
        assert_eq!(parse_bytes("0").unwrap(), 0.0);
        assert_eq!(parse_bytes("100").unwrap(), 100.0);
        assert_eq!(parse_bytes("123.5").unwrap(), 123.5);
    }

    #[test]
    fn test_binary_units() {
        assert_eq!(parse_bytes("1KiB").unwrap(), 1024.0);
        assert_eq!(parse_bytes("1.5KiB").unwrap(), 1536.0);
        assert_eq!(parse_bytes("2MiB").unwrap(), 2.0 * 1024.0 * 1024.0);
        assert_eq!(parse_bytes("1GiB").unwrap(), 1024.0 * 1024.0 * 1024.0);
    }

    #[test]
    fn test_invalid_values() {
        for bad in ["", "KiB", "abc", "1.2.3MiB", "12TiB"] {
            let err = parse_bytes(bad).unwrap_err();
            assert_eq!(err.code(), IngestCode::INVALID_UNIT, "value {:?}", bad);
        }
    }
}
