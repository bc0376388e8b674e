use super::block::{DecodedBlock, decode_block};
use super::packet::Packet;
use super::properties::{
	Attachment, Chapter, Cue, EbmlHeaderProperties, SegmentInfo, Tag, TrackInfo,
};
use super::read::{self, ParsedSegment};
use crate::config::{ParseOptions, ParsingMode};
use crate::ebml::element_id;
use crate::ebml::element_reader::{ElementHeader, ElementReader};
use crate::error::Result;
use crate::macros::err;

use std::collections::VecDeque;
use std::io::{Read, Seek, SeekFrom};

/// A Matroska/WebM demuxer
///
/// Construction parses the EBML header and walks the Segment's metadata, stopping at
/// the first Cluster. The metadata is immutable from then on; media is pulled lazily
/// through [`Self::read_packet`].
///
/// The demuxer is single-threaded cooperative: it blocks only on the underlying byte
/// source and never touches it outside of a call. It does not close the source;
/// resource release stays with the caller.
///
/// # Examples
///
/// ```rust,no_run
/// use oska::MatroskaDemuxer;
/// use oska::config::ParseOptions;
///
/// use std::fs::File;
///
/// # fn main() -> oska::error::Result<()> {
/// let file = File::open("video.mkv")?;
/// let mut demuxer = MatroskaDemuxer::new(file, ParseOptions::new())?;
///
/// while let Some(packet) = demuxer.read_packet()? {
/// 	println!("track {} @ {}ns", packet.track, packet.start_time);
/// }
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct MatroskaDemuxer<R>
where
	R: Read + Seek,
{
	reader: ElementReader<R>,
	parse_options: ParseOptions,
	header: EbmlHeaderProperties,
	info: Option<SegmentInfo>,
	timestamp_scale: u64,
	tracks: Vec<TrackInfo>,
	chapters: Vec<Chapter>,
	tags: Vec<Tag>,
	attachments: Vec<Attachment>,
	cues: Vec<Cue>,
	segment_pos: u64,
	segment_end: Option<u64>,
	cues_pos: Option<(u64, u64)>,
	cluster_timestamp: u64,
	pending: Option<ElementHeader>,
	queued: VecDeque<Packet>,
	track_mask: u64,
}

impl<R> MatroskaDemuxer<R>
where
	R: Read + Seek,
{
	/// Create a new `MatroskaDemuxer`
	///
	/// The source need not be positioned at the start of a file: when no EBML header
	/// is found at the current position, the demuxer falls back to safe defaults
	/// (empty metadata, millisecond timestamp scale) and delivers packets from the
	/// current position — the "resuming mid-stream at a Cluster" use-case.
	///
	/// # Errors
	///
	/// * The EBML header declares a DocType other than "matroska" or "webm" ([`BadDocType`])
	/// * The header or Segment is malformed or truncated
	/// * `reader`: see [`std::io::Read::read`]
	///
	/// [`BadDocType`]: crate::error::ErrorKind::BadDocType
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use oska::MatroskaDemuxer;
	/// use oska::config::ParseOptions;
	///
	/// use std::fs::File;
	///
	/// # fn main() -> oska::error::Result<()> {
	/// let file = File::open("video.webm")?;
	///
	/// // Only the track list matters to us, skip everything else
	/// let parse_options = ParseOptions::new()
	/// 	.read_cues(false)
	/// 	.read_chapters(false)
	/// 	.read_tags(false)
	/// 	.read_attachments(false);
	///
	/// let demuxer = MatroskaDemuxer::new(file, parse_options)?;
	/// # Ok(()) }
	/// ```
	pub fn new(reader: R, parse_options: ParseOptions) -> Result<Self> {
		let mut element_reader = ElementReader::new(reader, !parse_options.streaming)?;

		let ParsedSegment {
			header,
			info,
			tracks,
			chapters,
			tags,
			attachments,
			cues,
			segment_pos,
			segment_end,
			cues_pos,
			pending,
		} = read::read_from(&mut element_reader, parse_options)?;

		let timestamp_scale = info
			.as_ref()
			.map_or(SegmentInfo::DEFAULT_TIMESTAMP_SCALE, |info| {
				info.timestamp_scale
			});

		Ok(Self {
			reader: element_reader,
			parse_options,
			header,
			info,
			timestamp_scale,
			tracks,
			chapters,
			tags,
			attachments,
			cues,
			segment_pos,
			segment_end,
			cues_pos,
			cluster_timestamp: 0,
			pending,
			queued: VecDeque::new(),
			track_mask: 0,
		})
	}

	/// The EBML header of the file
	pub fn ebml_header(&self) -> &EbmlHeaderProperties {
		&self.header
	}

	/// The Segment's information, when an Info element was parsed
	pub fn file_info(&self) -> Option<&SegmentInfo> {
		self.info.as_ref()
	}

	/// The number of tracks in the segment
	pub fn num_tracks(&self) -> usize {
		self.tracks.len()
	}

	/// The track at `index`, or `None` when out of range
	///
	/// Tracks are sorted ascending by track number, regardless of their order in
	/// the file.
	pub fn track_info(&self, index: usize) -> Option<&TrackInfo> {
		self.tracks.get(index)
	}

	/// All tracks of the segment, sorted ascending by track number
	pub fn tracks(&self) -> &[TrackInfo] {
		&self.tracks
	}

	/// The segment's chapters (possibly empty)
	pub fn chapters(&self) -> &[Chapter] {
		&self.chapters
	}

	/// The segment's tags (possibly empty)
	pub fn tags(&self) -> &[Tag] {
		&self.tags
	}

	/// The segment's attachments (possibly empty)
	pub fn attachments(&self) -> &[Attachment] {
		&self.attachments
	}

	/// The segment's seek index, sorted ascending by time (possibly empty)
	pub fn cues(&self) -> &[Cue] {
		&self.cues
	}

	/// The absolute byte offset of the Segment's payload
	///
	/// All segment-relative positions (cue positions among them) are relative to
	/// this offset.
	pub fn segment_position(&self) -> u64 {
		self.segment_pos
	}

	/// The absolute byte offset of the Segment's end, or `None` when the Segment
	/// declared an unknown size and extends to the end of the source
	pub fn segment_top_position(&self) -> Option<u64> {
		self.segment_end
	}

	/// The absolute byte offset of the Cues element's payload, when one was located
	pub fn cues_position(&self) -> Option<u64> {
		self.cues_pos.map(|(start, _)| start)
	}

	/// The absolute byte offset of the Cues element's end, when one was located
	pub fn cues_top_position(&self) -> Option<u64> {
		self.cues_pos.map(|(_, end)| end)
	}

	/// Read the next packet in file order
	///
	/// Returns `Ok(None)` on a clean end of the media: the declared Segment size was
	/// reached, or the source ended under an unknown-size Segment.
	///
	/// Packets of masked tracks (see [`Self::set_track_mask`]) are decoded and
	/// discarded, never returned.
	///
	/// # Errors
	///
	/// * The source ends before the Segment's declared size ([`TruncatedSegment`])
	/// * A block is undecodable ([`BadBlock`]); the bad block is *not* skipped, a
	///   caller wanting resilience catches the error and calls again
	/// * `reader`: see [`std::io::Read::read`]
	///
	/// [`TruncatedSegment`]: crate::error::ErrorKind::TruncatedSegment
	/// [`BadBlock`]: crate::error::ErrorKind::BadBlock
	pub fn read_packet(&mut self) -> Result<Option<Packet>> {
		loop {
			if let Some(packet) = self.queued.pop_front() {
				return Ok(Some(packet));
			}

			if self
				.segment_end
				.is_some_and(|end| self.reader.position() >= end)
			{
				return Ok(None);
			}

			let header = match self.pending.take() {
				Some(pending) => pending,
				None => match self.reader.read_element_header() {
					Ok(header) => header,
					Err(e) if e.is_eof() => {
						if self.segment_end.is_some() {
							// The Segment promised more data than the source holds
							err!(TruncatedSegment);
						}

						return Ok(None);
					},
					Err(e) => return Err(e),
				},
			};

			if header.size.is_unknown()
				&& header.id != element_id::CLUSTER
				&& header.id != element_id::SEGMENT
			{
				err!(UnknownSizeUnsupported(header.id.value()));
			}

			match header.id {
				element_id::CLUSTER => {
					// Each cluster carries its own base timestamp; descend into the
					// cluster and pick it up from the Timestamp child
					self.cluster_timestamp = 0;
				},
				element_id::SEGMENT => {
					// A chained file: enter the next segment
					log::debug!("Entering a chained Segment");
					self.segment_pos = self.reader.position();
					self.segment_end = (!header.size.is_unknown())
						.then(|| self.reader.position() + header.size.value());
				},
				element_id::TIMESTAMP => {
					self.cluster_timestamp =
						self.reader.read_unsigned_int(header.size.value())?;
				},
				element_id::SIMPLE_BLOCK => {
					let file_pos = self.reader.position();
					let data = self.reader.read_binary(header.size.value())?;

					let block = decode_block(&data, true)?;
					self.enqueue_block(block, file_pos, None);
				},
				element_id::BLOCK_GROUP => {
					let end = self.reader.position() + header.size.value();
					self.read_block_group(end)?;
				},
				_ => {
					// Metadata encountered after construction, Void, CRC-32, and
					// anything unknown
					self.reader.skip_element(header)?;
				},
			}
		}
	}

	// A BlockGroup wraps a Block with a duration and reference information. The
	// children may come in any order, so the block is decoded once the walk is done.
	fn read_block_group(&mut self, end: u64) -> Result<()> {
		let mut block_data = None;
		let mut file_pos = 0;
		let mut duration = None;
		let mut has_reference = false;

		while self.reader.position() < end {
			let child = self.reader.read_element_header()?;
			if child.size.is_unknown() {
				err!(UnknownSizeUnsupported(child.id.value()));
			}

			let size = child.size.value();
			match child.id {
				element_id::BLOCK => {
					file_pos = self.reader.position();
					block_data = Some(self.reader.read_binary(size)?);
				},
				element_id::BLOCK_DURATION => {
					duration = Some(self.reader.read_unsigned_int(size)?);
				},
				element_id::REFERENCE_BLOCK => {
					has_reference |= size > 0;
					self.reader.skip(size)?;
				},
				_ => self.reader.skip_element(child)?,
			}
		}

		let Some(data) = block_data else {
			log::debug!("BlockGroup carries no Block, ignoring");
			return Ok(());
		};

		let mut block = decode_block(&data, false)?;

		// BlockGroup packets count as keyframes, matching the players this was
		// validated against; Strict mode consults the ReferenceBlock instead.
		block.keyframe =
			!(self.parse_options.parsing_mode == ParsingMode::Strict && has_reference);

		self.enqueue_block(block, file_pos, duration);
		Ok(())
	}

	fn enqueue_block(&mut self, block: DecodedBlock, file_pos: u64, duration: Option<u64>) {
		if self.track_is_masked(block.track) {
			return;
		}

		let start_time = (self.cluster_timestamp as i64
			+ i64::from(block.relative_timestamp))
			* self.timestamp_scale as i64;
		let end_time = match duration {
			Some(duration) => start_time + duration.saturating_mul(self.timestamp_scale) as i64,
			None => start_time,
		};

		let mut flags = 0;
		if block.keyframe {
			flags |= Packet::FLAG_KEYFRAME;
		}

		// Laced frames share the block's timestamps and are queued in stored order
		for frame in block.frames {
			self.queued.push_back(Packet {
				track: block.track,
				start_time,
				end_time,
				file_pos,
				data: frame,
				flags,
				discard: block.discardable,
			});
		}
	}

	fn track_is_masked(&self, track: u64) -> bool {
		(1..=64).contains(&track) && self.track_mask & (1 << (track - 1)) != 0
	}

	/// Seek to the cluster covering `timestamp_ns`
	///
	/// The greatest cue with a time at or before the target is chosen (the first cue
	/// when the target precedes them all), and the reader is positioned at its
	/// cluster. The next [`Self::read_packet`] call will observe that Cluster's
	/// header; callers wanting to resume on a clean frame follow up with
	/// [`Self::skip_to_keyframe`].
	///
	/// # Errors
	///
	/// * The source is a stream ([`SeekUnsupported`])
	/// * The file carries no usable Cues index ([`NoCues`])
	/// * `reader`: see [`std::io::Seek::seek`]
	///
	/// [`SeekUnsupported`]: crate::error::ErrorKind::SeekUnsupported
	/// [`NoCues`]: crate::error::ErrorKind::NoCues
	pub fn seek(&mut self, timestamp_ns: u64) -> Result<()> {
		if self.parse_options.streaming {
			err!(SeekUnsupported);
		}

		if self.cues.is_empty() {
			err!(NoCues);
		}

		// The greatest cue with time <= target, or the first cue
		let index = self
			.cues
			.partition_point(|cue| cue.time <= timestamp_ns)
			.saturating_sub(1);
		let cue = self.cues[index];

		log::debug!(
			"Seeking to {}ns via the cue at {}ns (segment-relative offset {})",
			timestamp_ns,
			cue.time,
			cue.position
		);

		self.reader
			.seek(SeekFrom::Start(self.segment_pos + cue.position))?;

		self.pending = None;
		self.queued.clear();
		self.cluster_timestamp = 0;

		Ok(())
	}

	/// Skip forward until the next keyframe of an unmasked track
	///
	/// The keyframe packet is not consumed; it is handed back by the next
	/// [`Self::read_packet`] call. Reaching the end of the media without finding a
	/// keyframe is not an error.
	///
	/// # Errors
	///
	/// * Same as [`Self::read_packet`]
	pub fn skip_to_keyframe(&mut self) -> Result<()> {
		loop {
			match self.read_packet()? {
				None => return Ok(()),
				Some(packet) if packet.is_keyframe() => {
					self.queued.push_front(packet);
					return Ok(());
				},
				Some(_) => continue,
			}
		}
	}

	/// Select which tracks to ignore
	///
	/// Bit `i - 1` set means track `i` is ignored: its packets are decoded and
	/// dropped rather than returned. Tracks with numbers above 64 are never masked.
	/// Setting a new mask discards any queued-but-unreturned packets.
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use oska::MatroskaDemuxer;
	/// use oska::config::ParseOptions;
	///
	/// # fn main() -> oska::error::Result<()> {
	/// # let file = std::fs::File::open("video.mkv")?;
	/// let mut demuxer = MatroskaDemuxer::new(file, ParseOptions::new())?;
	///
	/// // Ignore track 2, e.g. a commentary audio track
	/// demuxer.set_track_mask(0b10);
	/// # Ok(()) }
	/// ```
	pub fn set_track_mask(&mut self, mask: u64) {
		self.track_mask = mask;
		self.queued.clear();
	}

	/// Consume the demuxer, handing back the byte source
	///
	/// The demuxer never closes the source itself; dropping or closing it is the
	/// caller's responsibility.
	pub fn close(self) -> R {
		self.reader.into_inner()
	}
}
