use std::time::Duration;

use super::ValueError;

/// Parses an unsigned integer number of milliseconds (e.g. `3000`).
pub fn parse_milliseconds(value: &str) -> Result<Duration, ValueError> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::Malformed {
            expected: "an unsigned number of milliseconds",
        });
    }
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ValueError::Malformed {
            expected: "a number of milliseconds that fits in 64 bits",
        })
}
