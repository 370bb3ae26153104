//! Size string handling
//!
//! Host SDKs pass sizes as `"WIDTHxHEIGHT"`. Parsing is lenient: an edge that
//! cannot be read falls back to the default and every edge is clamped into
//! the range Firefly accepts, so a bad size never fails a call.

use crate::types::{DEFAULT_DIMENSION, MAX_DIMENSION, MIN_DIMENSION, Size};

/// Parse and clamp a `"WIDTHxHEIGHT"` string.
pub fn parse_size(size: &str) -> Size {
    let mut parts = size.splitn(2, ['x', 'X']);
    let width = parts.next().and_then(parse_leading_int);
    let height = parts.next().and_then(parse_leading_int);

    Size {
        width: clamp_dimension(width),
        height: clamp_dimension(height),
    }
}

/// Missing or zero falls back to the default; everything else is clamped.
fn clamp_dimension(value: Option<i64>) -> u32 {
    match value {
        None | Some(0) => DEFAULT_DIMENSION,
        Some(v) => {
            let clamped = v.clamp(i64::from(MIN_DIMENSION), i64::from(MAX_DIMENSION));
            u32::try_from(clamped).unwrap_or(DEFAULT_DIMENSION)
        }
    }
}

/// Read an optionally signed integer prefix, ignoring leading whitespace
/// and anything after the digits (`"1024px"` reads as 1024).
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // Saturate absurdly long inputs instead of failing; they clamp anyway.
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
