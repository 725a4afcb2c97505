// SRT timestamp parsing.
//
// Accepts `HH:MM:SS,mmm` and the sloppier variants seen in fan-made files:
// period instead of comma, 1-3 digits per field, and a short fractional
// part (`00:00:01,5` is 1.5 seconds, not 1.005).

use anyhow::{anyhow, Result};

/// Convert one timestamp to total seconds.
pub fn parse_timestamp(raw: &str) -> Result<f64> {
    let t = raw.trim();

    let (hms, frac) = match t.find([',', '.']) {
        Some(pos) => (&t[..pos], Some(&t[pos + 1..])),
        None => (t, None),
    };

    let parts: Vec<&str> = hms.split(':').collect();
    if parts.len() != 3 {
        return Err(anyhow!("expected HH:MM:SS, got '{t}'"));
    }

    let hours = parse_field(parts[0], "hours", t)?;
    let minutes = parse_field(parts[1], "minutes", t)?;
    let seconds = parse_field(parts[2], "seconds", t)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(anyhow!("minutes/seconds out of range in '{t}'"));
    }

    let millis = match frac {
        Some(f) => {
            let mut digits = f.to_string();
            if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(anyhow!("bad milliseconds in '{t}'"));
            }
            while digits.len() < 3 {
                digits.push('0');
            }
            digits
                .parse::<u32>()
                .map_err(|_| anyhow!("bad milliseconds in '{t}'"))?
        }
        None => 0,
    };

    Ok(f64::from(hours * 3600 + minutes * 60 + seconds) + f64::from(millis) / 1000.0)
}

/// Parse a `start --> end` timing line into (start, end) seconds.
pub fn parse_time_range(line: &str) -> Result<(f64, f64)> {
    let (start, end) = line
        .split_once("-->")
        .ok_or_else(|| anyhow!("missing '-->' in timing line '{}'", line.trim()))?;

    // Some files append positioning hints after the end time ("X1:40 X2:600")
    let end = end.split_whitespace().next().unwrap_or("");

    Ok((parse_timestamp(start)?, parse_timestamp(end)?))
}

fn parse_field(field: &str, name: &str, whole: &str) -> Result<u32> {
    if field.is_empty() || field.len() > 3 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(anyhow!("bad {name} in '{whole}'"));
    }
    field
        .parse()
        .map_err(|_| anyhow!("bad {name} in '{whole}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_standard_timestamp() {
        assert!(approx(parse_timestamp("01:02:03,456").unwrap(), 3723.456));
    }

    #[test]
    fn test_period_separator() {
        assert!(approx(parse_timestamp("00:00:10.250").unwrap(), 10.25));
    }

    #[test]
    fn test_short_fields_and_fraction() {
        assert!(approx(parse_timestamp("0:1:2,5").unwrap(), 62.5));
    }

    #[test]
    fn test_no_fraction() {
        assert!(approx(parse_timestamp("00:01:00").unwrap(), 60.0));
    }

    #[test]
    fn test_malformed_timestamps_are_errors() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("00:00").is_err());
        assert!(parse_timestamp("aa:00:00,000").is_err());
        assert!(parse_timestamp("00:00:00,abcd").is_err());
        assert!(parse_timestamp("00:75:00,000").is_err());
        assert!(parse_timestamp("0000:00:00,000").is_err());
    }

    #[test]
    fn test_time_range_with_trailing_hints() {
        let (s, e) = parse_time_range("00:00:01,000 --> 00:00:02,500 X1:40 X2:600").unwrap();
        assert!(approx(s, 1.0));
        assert!(approx(e, 2.5));
    }

    #[test]
    fn test_time_range_without_arrow() {
        assert!(parse_time_range("00:00:01,000 00:00:02,000").is_err());
    }
}
