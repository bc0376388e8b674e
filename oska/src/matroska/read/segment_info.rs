use crate::config::{ParseOptions, ParsingMode};
use crate::ebml::element_id;
use crate::ebml::element_reader::ElementReader;
use crate::error::Result;
use crate::macros::{decode_err, err};
use crate::matroska::properties::SegmentInfo;

use std::io::{Read, Seek};
use std::time::Duration;

pub(super) fn read_from<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	parse_options: ParseOptions,
) -> Result<SegmentInfo>
where
	R: Read + Seek,
{
	let mut info = SegmentInfo::default();

	// Deal with the duration after parsing, in case the timestamp scale appears
	// after it for some reason.
	let mut duration = None;

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::SEGMENT_UID => info.uid = read_uid(reader, size)?,
			element_id::PREV_UID => info.prev_uid = read_uid(reader, size)?,
			element_id::NEXT_UID => info.next_uid = read_uid(reader, size)?,
			element_id::SEGMENT_FILENAME => info.filename = Some(reader.read_utf8(size)?),
			element_id::PREV_FILENAME => info.prev_filename = Some(reader.read_utf8(size)?),
			element_id::NEXT_FILENAME => info.next_filename = Some(reader.read_utf8(size)?),
			element_id::TITLE => info.title = Some(reader.read_utf8(size)?),
			element_id::MUXING_APP => info.muxing_app = reader.read_utf8(size)?,
			element_id::WRITING_APP => info.writing_app = reader.read_utf8(size)?,
			element_id::TIMESTAMP_SCALE => {
				info.timestamp_scale = reader.read_unsigned_int(size)?;
			},
			element_id::DURATION => duration = Some(reader.read_float(size)?),
			element_id::DATE_UTC => info.date_utc = Some(reader.read_signed_int(size)?),
			_ => reader.skip_element(child)?,
		}
	}

	if info.timestamp_scale == 0 {
		log::warn!("Segment.Info.TimestampScale is 0, which is invalid");
		if parse_options.parsing_mode == ParsingMode::Strict {
			decode_err!(@BAIL "Segment.Info.TimestampScale must be non-zero");
		}

		info.timestamp_scale = SegmentInfo::DEFAULT_TIMESTAMP_SCALE;
	}

	if let Some(duration) = duration {
		if duration >= 0.0 {
			// The duration is stored in timestamp-scale units, we want nanoseconds
			let scaled_duration = duration * info.timestamp_scale as f64;
			info.duration = Some(Duration::from_nanos(scaled_duration.round() as u64));
		}
	}

	Ok(info)
}

fn read_uid<R>(reader: &mut ElementReader<R>, size: u64) -> Result<Option<[u8; 16]>>
where
	R: Read + Seek,
{
	let bytes = reader.read_binary(size)?;
	let Ok(uid) = <[u8; 16]>::try_from(bytes) else {
		log::warn!("Segment UID is not 16 bytes long, ignoring");
		return Ok(None);
	};

	Ok(Some(uid))
}
