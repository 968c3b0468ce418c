mod cues;
mod reader;
mod timecode;

pub use cues::{document_duration, extract_cues};
pub use reader::{decode_document, read_document};
pub use timecode::parse_timecode;
