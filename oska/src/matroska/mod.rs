//! Matroska/WebM demuxing
//!
//! The demuxer walks a Matroska byte stream in two stages: the Segment's metadata is
//! materialized eagerly at construction (tracks, chapters, tags, attachments, cues),
//! then media packets are pulled lazily from the clusters, one coded frame at a time.

pub(crate) mod block;
mod demuxer;
mod packet;
pub(crate) mod properties;
mod read;

pub use demuxer::MatroskaDemuxer;
pub use packet::Packet;
pub use properties::{
	Attachment, AudioTrack, Chapter, ChapterDisplay, ChapterProcess, ChapterProcessCommand,
	Colour, Compression, CompressionMethod, Cue, DocumentType, EbmlHeaderProperties,
	MasteringMetadata, SegmentInfo, SimpleTag, Tag, TagTarget, TrackInfo, TrackType, VideoTrack,
};
