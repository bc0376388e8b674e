use super::{
	segment_attachments, segment_chapters, segment_cues, segment_info, segment_tags,
	segment_tracks,
};
use crate::config::ParseOptions;
use crate::ebml::element_id;
use crate::ebml::element_reader::{ElementHeader, ElementReader};
use crate::error::Result;
use crate::macros::{decode_err, err};
use crate::matroska::properties::{
	Attachment, Chapter, Cue, DocumentType, EbmlHeaderProperties, SegmentInfo, Tag, TrackInfo,
};

use std::io::{Read, Seek, SeekFrom};
use std::str::FromStr;

/// Everything gathered while walking the Segment's metadata
///
/// Produced once during demuxer construction; the reader is left positioned at the
/// first byte of the first Cluster's payload (its header stashed in `pending`), or
/// at the segment end if the file carries no clusters.
pub(crate) struct ParsedSegment {
	pub(crate) header: EbmlHeaderProperties,
	pub(crate) info: Option<SegmentInfo>,
	pub(crate) tracks: Vec<TrackInfo>,
	pub(crate) chapters: Vec<Chapter>,
	pub(crate) tags: Vec<Tag>,
	pub(crate) attachments: Vec<Attachment>,
	pub(crate) cues: Vec<Cue>,
	pub(crate) segment_pos: u64,
	pub(crate) segment_end: Option<u64>,
	pub(crate) cues_pos: Option<(u64, u64)>,
	pub(crate) pending: Option<ElementHeader>,
}

impl ParsedSegment {
	fn empty(segment_pos: u64, segment_end: Option<u64>) -> Self {
		Self {
			header: EbmlHeaderProperties::default(),
			info: None,
			tracks: Vec::new(),
			chapters: Vec::new(),
			tags: Vec::new(),
			attachments: Vec::new(),
			cues: Vec::new(),
			segment_pos,
			segment_end,
			cues_pos: None,
			pending: None,
		}
	}

	pub(crate) fn timestamp_scale(&self) -> u64 {
		self.info
			.as_ref()
			.map_or(SegmentInfo::DEFAULT_TIMESTAMP_SCALE, |info| {
				info.timestamp_scale
			})
	}
}

pub(crate) fn read_from<R>(
	reader: &mut ElementReader<R>,
	parse_options: ParseOptions,
) -> Result<ParsedSegment>
where
	R: Read + Seek,
{
	let first = reader.read_element_header()?;
	if first.id != element_id::EBML {
		// A common use-case when resuming a previous session: the source is parked
		// at some Cluster boundary rather than the start of a file. Fall back to
		// safe defaults and let the packet engine take it from here.
		log::warn!(
			"Byte source does not start with an EBML header (found {:X}), assuming a mid-stream \
			 start",
			first.id
		);

		let mut parsed = ParsedSegment::empty(reader.position(), None);
		parsed.pending = Some(first);
		return Ok(parsed);
	}

	let mut header = EbmlHeaderProperties::default();
	read_ebml_header(reader, first, &mut header)?;

	log::debug!("File verified to be {}", header.doc_type);

	// Now locate the Segment, the root of everything else
	let segment_header = loop {
		let element_header = reader.read_element_header()?;
		match element_header.id {
			element_id::SEGMENT => break element_header,
			// CRC-32 (0xBF) and Void (0xEC) elements can occur at the top level.
			// This is valid, and we can just skip them.
			element_id::CRC32 | element_id::VOID => {
				reader.skip_element(element_header)?;
				continue;
			},
			_ => decode_err!(@BAIL "File does not contain a Segment element"),
		}
	};

	let segment_pos = reader.position();
	let segment_end = if segment_header.size.is_unknown() {
		// The Segment extends to the end of the byte source
		None
	} else {
		Some(segment_pos + segment_header.size.value())
	};

	let mut parsed = ParsedSegment::empty(segment_pos, segment_end);
	parsed.header = header;

	walk_segment(reader, parse_options, &mut parsed)?;

	if parsed.cues.is_empty()
		&& parsed.cues_pos.is_none()
		&& parse_options.read_cues
		&& !parse_options.streaming
	{
		rescan_for_cues(reader, &mut parsed)?;
	}

	Ok(parsed)
}

fn read_ebml_header<R>(
	reader: &mut ElementReader<R>,
	ebml_root: ElementHeader,
	properties: &mut EbmlHeaderProperties,
) -> Result<()>
where
	R: Read + Seek,
{
	log::trace!("Reading EBML header");

	if ebml_root.size.is_unknown() {
		err!(UnknownSizeUnsupported(ebml_root.id.value()));
	}

	let header_end = reader.position() + ebml_root.size.value();
	let mut doc_type = None;

	while reader.position() < header_end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::EBML_VERSION => properties.version = reader.read_unsigned_int(size)?,
			element_id::EBML_READ_VERSION => {
				properties.read_version = reader.read_unsigned_int(size)?
			},
			element_id::EBML_MAX_ID_LENGTH => {
				let len = reader.read_unsigned_int(size)?;
				if (1..=8).contains(&len) {
					properties.max_id_length = len as u8;
					reader.set_max_id_length(properties.max_id_length);
				} else {
					log::warn!("EBMLMaxIDLength `{}` is out of range, keeping 4", len);
				}
			},
			element_id::EBML_MAX_SIZE_LENGTH => {
				let len = reader.read_unsigned_int(size)?;
				if (1..=8).contains(&len) {
					properties.max_size_length = len as u8;
					reader.set_max_size_length(properties.max_size_length);
				} else {
					log::warn!("EBMLMaxSizeLength `{}` is out of range, keeping 8", len);
				}
			},
			element_id::DOC_TYPE => {
				let doc_type_str = reader.read_string(size)?;
				let Ok(parsed_doc_type) = DocumentType::from_str(&doc_type_str) else {
					err!(BadDocType(doc_type_str));
				};

				properties.doc_type = parsed_doc_type;
				doc_type = Some(parsed_doc_type);
			},
			element_id::DOC_TYPE_VERSION => {
				properties.doc_type_version = reader.read_unsigned_int(size)?
			},
			element_id::DOC_TYPE_READ_VERSION => {
				properties.doc_type_read_version = reader.read_unsigned_int(size)?
			},
			_ => reader.skip_element(child)?,
		}
	}

	if doc_type.is_none() {
		err!(BadDocType(String::new()));
	}

	Ok(())
}

fn walk_segment<R>(
	reader: &mut ElementReader<R>,
	parse_options: ParseOptions,
	parsed: &mut ParsedSegment,
) -> Result<()>
where
	R: Read + Seek,
{
	loop {
		if parsed
			.segment_end
			.is_some_and(|end| reader.position() >= end)
		{
			break;
		}

		let header = match reader.read_element_header() {
			Ok(header) => header,
			Err(e) if e.is_eof() => {
				if parsed.segment_end.is_some() {
					// The Segment promised more data than the source holds
					err!(TruncatedSegment);
				}

				break;
			},
			Err(e) => return Err(e),
		};

		if header.id == element_id::CLUSTER {
			// Metadata parsing ends at the first Cluster; the packet engine picks
			// up from here.
			parsed.pending = Some(header);
			break;
		}

		if header.size.is_unknown() {
			err!(UnknownSizeUnsupported(header.id.value()));
		}

		let end = reader.position() + header.size.value();
		match header.id {
			element_id::INFO if parse_options.read_info => {
				parsed.info = Some(segment_info::read_from(reader, end, parse_options)?);
			},
			element_id::TRACKS if parse_options.read_tracks => {
				parsed.tracks = segment_tracks::read_from(reader, end)?;
			},
			element_id::CUES if parse_options.read_cues => {
				parsed.cues_pos = Some((reader.position(), end));
				parsed.cues = segment_cues::read_from(reader, end, parsed.timestamp_scale())?;
			},
			element_id::CHAPTERS if parse_options.read_chapters => {
				parsed.chapters = segment_chapters::read_from(reader, end)?;
			},
			element_id::TAGS if parse_options.read_tags => {
				parsed.tags = segment_tags::read_from(reader, end)?;
			},
			element_id::ATTACHMENTS if parse_options.read_attachments => {
				parsed.attachments =
					segment_attachments::read_from(reader, end, parse_options)?;
			},
			element_id::SEEK_HEAD => {
				// The metadata walk is linear, the index adds nothing
				log::debug!("Skipping SeekHead");
				reader.skip(header.size.value())?;
			},
			_ => {
				// Void, CRC-32, deselected sections, and anything we do not
				// recognize at all
				reader.skip_element(header)?;
			},
		}
	}

	Ok(())
}

// A Cues element placed after the clusters will not have been seen by the metadata
// walk. Scan the remaining top-level children for one, then restore the position.
fn rescan_for_cues<R>(reader: &mut ElementReader<R>, parsed: &mut ParsedSegment) -> Result<()>
where
	R: Read + Seek,
{
	// Nothing to scan unless the walk stopped at a Cluster
	let Some(pending) = parsed.pending else {
		return Ok(());
	};

	if pending.size.is_unknown() {
		log::debug!("First Cluster has an unknown size, cannot rescan for trailing Cues");
		return Ok(());
	}

	log::debug!("No Cues encountered, rescanning segment for a trailing Cues element");

	let resume = reader.position();
	reader.seek(SeekFrom::Start(resume + pending.size.value()))?;

	loop {
		if parsed
			.segment_end
			.is_some_and(|end| reader.position() >= end)
		{
			break;
		}

		let header = match reader.read_element_header() {
			Ok(header) => header,
			// The rescan is best-effort; a short or damaged tail only costs us the
			// seek index.
			Err(e) if e.is_eof() => break,
			Err(e) => return Err(e),
		};

		if header.size.is_unknown() {
			// Usually an unknown-size Cluster, which cannot be stepped over
			log::debug!("Encountered an unknown-size element, giving up the Cues rescan");
			break;
		}

		if header.id == element_id::CUES {
			let end = reader.position() + header.size.value();
			parsed.cues_pos = Some((reader.position(), end));
			parsed.cues = segment_cues::read_from(reader, end, parsed.timestamp_scale())?;
			break;
		}

		reader.skip_element(header)?;
	}

	let _ = reader.seek(SeekFrom::Start(resume))?;
	Ok(())
}
