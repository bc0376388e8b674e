//! [![GitHub Workflow Status](https://img.shields.io/github/actions/workflow/status/oska-rs/oska/ci.yml?branch=main&logo=github&style=for-the-badge)](https://github.com/oska-rs/oska/actions/workflows/ci.yml)
//! [![Downloads](https://img.shields.io/crates/d/oska?style=for-the-badge&logo=rust)](https://crates.io/crates/oska)
//! [![Version](https://img.shields.io/crates/v/oska?style=for-the-badge&logo=rust)](https://crates.io/crates/oska)
//!
//! A Matroska/WebM demuxer.
//!
//! oska reads a Matroska or WebM byte stream and surfaces the segment's structural
//! metadata — tracks, chapters, tags, attachments, cues — along with a lazy sequence
//! of media [`Packet`]s, one coded frame per packet.
//!
//! It is the container layer only: codec payloads are never decoded, files are never
//! written, and validation is deliberately permissive, mirroring real-world player
//! behavior.
//!
//! # Examples
//!
//! ## Reading a file
//!
//! ```rust,no_run
//! use oska::MatroskaDemuxer;
//! use oska::config::ParseOptions;
//!
//! use std::fs::File;
//!
//! # fn main() -> oska::error::Result<()> {
//! let file = File::open("video.mkv")?;
//! let mut demuxer = MatroskaDemuxer::new(file, ParseOptions::new())?;
//!
//! for track in demuxer.tracks() {
//! 	println!("#{}: {}", track.number(), track.codec_id());
//! }
//!
//! while let Some(packet) = demuxer.read_packet()? {
//! 	println!(
//! 		"track {} @ {}ns ({} bytes)",
//! 		packet.track,
//! 		packet.start_time,
//! 		packet.data.len()
//! 	);
//! }
//! # Ok(()) }
//! ```
//!
//! ## Seeking
//!
//! ```rust,no_run
//! use oska::MatroskaDemuxer;
//! use oska::config::ParseOptions;
//!
//! # fn main() -> oska::error::Result<()> {
//! # let file = std::fs::File::open("video.mkv")?;
//! let mut demuxer = MatroskaDemuxer::new(file, ParseOptions::new())?;
//!
//! // Jump to the cluster covering 90 seconds in, then resume on a keyframe
//! demuxer.seek(90_000_000_000)?;
//! demuxer.skip_to_keyframe()?;
//!
//! let packet = demuxer.read_packet()?;
//! # Ok(()) }
//! ```
//!
//! ## Streaming sources
//!
//! Sources that cannot seek (sockets, pipes) are wrapped in
//! [`ReadOnlySource`](crate::io::ReadOnlySource), which implements forward-only
//! seeking by draining. Timestamp seeking and the trailing-cues rescan are disabled
//! in that mode.
//!
//! ```rust,no_run
//! use oska::MatroskaDemuxer;
//! use oska::config::ParseOptions;
//! use oska::io::ReadOnlySource;
//!
//! # fn main() -> oska::error::Result<()> {
//! # let socket: &[u8] = &[];
//! let source = ReadOnlySource::new(socket);
//! let mut demuxer = MatroskaDemuxer::new(source, ParseOptions::new().streaming(true))?;
//! # Ok(()) }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod ebml;
pub mod error;
pub mod io;
pub(crate) mod macros;
mod matroska;
mod util;

pub use matroska::{
	Attachment, AudioTrack, Chapter, ChapterDisplay, ChapterProcess, ChapterProcessCommand,
	Colour, Compression, CompressionMethod, Cue, DocumentType, EbmlHeaderProperties,
	MasteringMetadata, MatroskaDemuxer, Packet, SegmentInfo, SimpleTag, Tag, TagTarget,
	TrackInfo, TrackType, VideoTrack,
};
