mod segment;
mod segment_attachments;
mod segment_chapters;
mod segment_cues;
mod segment_info;
mod segment_tags;
mod segment_tracks;

pub(crate) use segment::{ParsedSegment, read_from};
