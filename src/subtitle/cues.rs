use std::sync::OnceLock;

use regex::Regex;

use crate::error::EmotionArcError;
use crate::subtitle::timecode::parse_timecode;
use crate::types::Cue;

const TIMING_LINE_PATTERN: &str =
    r"^\s*(\d{2,}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2,}:\d{2}:\d{2}[,.]\d{3})";

fn timing_line() -> &'static Regex {
    static TIMING_LINE: OnceLock<Regex> = OnceLock::new();
    TIMING_LINE.get_or_init(|| Regex::new(TIMING_LINE_PATTERN).expect("timing line pattern"))
}

/// Extracts cues from subtitle text in document order.
///
/// A block is an index line, a `start --> end` line and one or more text
/// lines, terminated by an empty line or the end of the document. Blocks that
/// do not have this shape are skipped; a document with no matching block
/// yields an empty vector. A whitespace-only line inside cue text does not end
/// the cue: lines after it that do not open a new cue are appended to it.
pub fn extract_cues(content: &str) -> Result<Vec<Cue>, EmotionArcError> {
    let normalized = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");
    let mut cues = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut continues_cue = false;

    for line in normalized.split('\n') {
        if line.trim().is_empty() {
            if !block.is_empty() {
                let extended = flush_block(&block, continues_cue, &mut cues)?;
                block.clear();
                continues_cue = extended && !line.is_empty();
            } else if line.is_empty() {
                continues_cue = false;
            }
            continue;
        }
        block.push(line);
    }
    if !block.is_empty() {
        flush_block(&block, continues_cue, &mut cues)?;
    }

    tracing::debug!(cue_count = cues.len(), "subtitle: extracted cues");
    Ok(cues)
}

/// Returns whether the block produced or extended a cue.
fn flush_block(
    lines: &[&str],
    continues_cue: bool,
    cues: &mut Vec<Cue>,
) -> Result<bool, EmotionArcError> {
    if continues_cue && !opens_cue(lines) {
        if let Some(last) = cues.last_mut() {
            for line in lines {
                last.text.push(' ');
                last.text.push_str(line.trim_end());
            }
            return Ok(true);
        }
    }
    match parse_block(lines)? {
        Some(cue) => {
            cues.push(cue);
            Ok(true)
        }
        None => Ok(false),
    }
}

fn is_index_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

fn opens_cue(lines: &[&str]) -> bool {
    lines.len() >= 2 && is_index_line(lines[0]) && timing_line().is_match(lines[1])
}

fn parse_block(lines: &[&str]) -> Result<Option<Cue>, EmotionArcError> {
    if lines.len() < 3 {
        tracing::debug!(line_count = lines.len(), "subtitle: skipping short block");
        return Ok(None);
    }

    let index_line = lines[0].trim();
    if !is_index_line(index_line) {
        tracing::debug!(line = index_line, "subtitle: skipping block without index line");
        return Ok(None);
    }
    let Some(caps) = timing_line().captures(lines[1]) else {
        tracing::debug!(line = lines[1], "subtitle: skipping block without timing line");
        return Ok(None);
    };

    let index = index_line.parse::<i64>().map_err(|e| {
        EmotionArcError::parse("parse cue index", format!("'{index_line}': {e}"))
    })?;
    let start = parse_timecode(&caps[1])?;
    let end = parse_timecode(&caps[2])?;
    let text = lines[2..]
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Some(Cue {
        index,
        start,
        end,
        text,
    }))
}

/// Largest cue end time; the denominator of every progression value.
pub fn document_duration(name: &str, cues: &[Cue]) -> Result<f64, EmotionArcError> {
    if cues.is_empty() {
        return Err(EmotionArcError::empty_document(name));
    }
    let duration = cues.iter().map(|cue| cue.end).fold(f64::NEG_INFINITY, f64::max);
    if !duration.is_finite() || duration <= 0.0 {
        tracing::warn!(
            document = name,
            duration,
            "subtitle: document duration is not positive"
        );
        return Err(EmotionArcError::empty_document(name));
    }
    Ok(duration)
}
