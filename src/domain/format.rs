use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const INVALID_DATE: &str = "Invalid Date";

/// Fixed-point rendering in the style of `Number.prototype.toFixed`: the exact binary
/// value is rounded half away from zero, and only a negative input gets a minus sign.
pub fn fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", round_half_up(value.abs(), digits))
}

/// Decimal places needed to print a finite `f64` without any rounding.
fn exact_fraction_digits(magnitude: f64) -> usize {
    let biased_exponent = ((magnitude.to_bits() >> 52) & 0x7ff) as usize;
    match biased_exponent {
        0 => 1074,
        exponent => 1075_usize.saturating_sub(exponent),
    }
}

fn round_half_up(magnitude: f64, digits: usize) -> String {
    let precision = exact_fraction_digits(magnitude).max(digits + 1);
    let exact = format!("{magnitude:.precision$}");
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = whole.bytes().chain(fraction.bytes().take(digits)).collect();
    if fraction.as_bytes().get(digits).is_some_and(|digit| *digit >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let whole_len = kept.len() - digits;
    let mut rendered: String = kept[..whole_len].iter().map(|digit| char::from(*digit)).collect();
    if digits > 0 {
        rendered.push('.');
        rendered.extend(kept[whole_len..].iter().map(|digit| char::from(*digit)));
    }
    rendered
}

pub fn meters(value: f64) -> String {
    format!("{} m", fixed(value, 3))
}

pub fn station_label(name: &str, latitude: f64, longitude: f64) -> String {
    format!("{name} ({}, {})", fixed(latitude, 6), fixed(longitude, 6))
}

/// Upload dates come as ISO-8601 with or without an offset; naive values are read as UTC.
pub fn parse_upload_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// True when every specifier in a strftime pattern is one chrono can render.
pub fn is_valid_date_pattern(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

pub fn format_upload_date(raw: &str, pattern: &str) -> String {
    let Some(date) = parse_upload_date(raw) else {
        return INVALID_DATE.to_string();
    };

    let mut rendered = String::new();
    match write!(rendered, "{}", date.format(pattern)) {
        Ok(()) => rendered,
        Err(_) => INVALID_DATE.to_string(),
    }
}

pub fn upload_timestamp_ms(raw: &str) -> Option<i64> {
    parse_upload_date(raw).map(|date| date.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::{
        fixed, format_upload_date, is_valid_date_pattern, meters, station_label,
        upload_timestamp_ms,
    };

    #[test]
    fn fixed_rounds_to_requested_digits() {
        assert_eq!(fixed(0.012_345, 3), "0.012");
        assert_eq!(fixed(1.0, 3), "1.000");
        assert_eq!(fixed(52.123_456_789, 7), "52.1234568");
        assert_eq!(fixed(1.005, 2), "1.00");
    }

    #[test]
    fn fixed_rounds_exact_ties_away_from_zero() {
        assert_eq!(fixed(0.0625, 3), "0.063");
        assert_eq!(fixed(1.0625, 3), "1.063");
        assert_eq!(fixed(0.125, 2), "0.13");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(99.5, 0), "100");
        assert_eq!(fixed(-2.5, 0), "-3");
        assert_eq!(meters(0.0625), "0.063 m");
    }

    #[test]
    fn fixed_keeps_sign_of_negative_inputs_only() {
        assert_eq!(fixed(-0.000_1, 3), "-0.000");
        assert_eq!(fixed(-0.0, 3), "0.000");
        assert_eq!(fixed(0.0, 2), "0.00");
        assert_eq!(fixed(-24.5, 7), "-24.5000000");
    }

    #[test]
    fn fixed_renders_non_finite_like_javascript() {
        assert_eq!(fixed(f64::NAN, 3), "NaN");
        assert_eq!(fixed(f64::NEG_INFINITY, 3), "-Infinity");
    }

    #[test]
    fn meters_appends_unit() {
        assert_eq!(meters(0.5), "0.500 m");
    }

    #[test]
    fn station_label_uses_six_decimals() {
        assert_eq!(
            station_label("Alpha", 12.345678, 98.765432),
            "Alpha (12.345678, 98.765432)"
        );
        assert_eq!(station_label("Beta", -1.5, 0.0), "Beta (-1.500000, 0.000000)");
    }

    #[test]
    fn formats_naive_and_offset_dates() {
        assert_eq!(
            format_upload_date("2024-03-01T10:00:00.123456", "%Y-%m-%d"),
            "2024-03-01"
        );
        assert_eq!(
            format_upload_date("2024-03-01T23:30:00-02:00", "%Y-%m-%d"),
            "2024-03-02"
        );
        assert_eq!(format_upload_date("yesterday", "%Y-%m-%d"), "Invalid Date");
    }

    #[test]
    fn unrenderable_pattern_falls_back_instead_of_panicking() {
        assert_eq!(format_upload_date("2024-03-01T10:00:00", "%Q"), "Invalid Date");
        assert!(!is_valid_date_pattern("%Q"));
        assert!(is_valid_date_pattern("%d.%m.%Y %H:%M"));
    }

    #[test]
    fn timestamp_is_epoch_millis() {
        assert_eq!(
            upload_timestamp_ms("2023-11-14T22:13:20Z"),
            Some(1_700_000_000_000)
        );
        assert_eq!(upload_timestamp_ms("2024-01-01"), Some(1_704_067_200_000));
        assert_eq!(upload_timestamp_ms(""), None);
    }
}
