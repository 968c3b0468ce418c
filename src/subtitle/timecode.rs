use crate::error::EmotionArcError;

/// Parses `HH:MM:SS,mmm` (or `HH:MM:SS.mmm`) into seconds.
///
/// The comma is normalized to a dot before splitting on `:`, so exactly three
/// fields are expected: hours, minutes, and seconds with fraction.
pub fn parse_timecode(timecode: &str) -> Result<f64, EmotionArcError> {
    let trimmed = timecode.trim();
    let normalized = trimmed.replace(',', ".");
    let fields: Vec<&str> = normalized.split(':').collect();
    if fields.len() != 3 {
        return Err(EmotionArcError::parse(
            "parse timecode",
            format!("expected HH:MM:SS,mmm, got '{trimmed}'"),
        ));
    }

    let hours = parse_field(fields[0], "hours", trimmed)?;
    let minutes = parse_field(fields[1], "minutes", trimmed)?;
    let seconds = parse_field(fields[2], "seconds", trimmed)?;
    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn parse_field(field: &str, name: &str, timecode: &str) -> Result<f64, EmotionArcError> {
    // f64::from_str also accepts "inf", "NaN", signs and exponents.
    let well_formed = !field.is_empty()
        && field.chars().all(|c| c.is_ascii_digit() || c == '.')
        && field.chars().filter(|&c| c == '.').count() <= 1
        && field.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(EmotionArcError::parse(
            "parse timecode",
            format!("invalid {name} '{field}' in '{timecode}'"),
        ));
    }
    let value = field.parse::<f64>().map_err(|e| {
        EmotionArcError::parse(
            "parse timecode",
            format!("invalid {name} '{field}' in '{timecode}': {e}"),
        )
    })?;
    if !value.is_finite() {
        return Err(EmotionArcError::parse(
            "parse timecode",
            format!("{name} out of range in '{timecode}'"),
        ));
    }
    Ok(value)
}
