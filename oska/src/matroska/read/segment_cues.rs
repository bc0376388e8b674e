use crate::ebml::element_id;
use crate::ebml::element_reader::ElementReader;
use crate::error::Result;
use crate::macros::err;
use crate::matroska::properties::Cue;

use std::io::{Read, Seek};

pub(super) fn read_from<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	timestamp_scale: u64,
) -> Result<Vec<Cue>>
where
	R: Read + Seek,
{
	let mut cues = Vec::new();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		match child.id {
			element_id::CUE_POINT => {
				let point_end = reader.position() + child.size.value();
				read_cue_point(reader, point_end, timestamp_scale, &mut cues)?;
			},
			_ => reader.skip_element(child)?,
		}
	}

	// Files are not required to store cue points in order, but callers (and our
	// own binary search) rely on it.
	cues.sort_by_key(|cue| cue.time);

	Ok(cues)
}

#[derive(Default)]
struct RawTrackPosition {
	track: u64,
	position: u64,
	relative_position: Option<u64>,
	duration: Option<u64>,
	block: Option<u64>,
}

// A CuePoint carries one CueTime and one or more CueTrackPositions; each of the
// latter becomes its own `Cue`. The time may legally appear after the positions,
// so everything is collected first and combined at the end.
fn read_cue_point<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	timestamp_scale: u64,
	cues: &mut Vec<Cue>,
) -> Result<()>
where
	R: Read + Seek,
{
	let mut cue_time = 0u64;
	let mut positions = Vec::new();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::CUE_TIME => cue_time = reader.read_unsigned_int(size)?,
			element_id::CUE_TRACK_POSITIONS => {
				let positions_end = reader.position() + size;
				positions.push(read_cue_track_positions(reader, positions_end)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	for raw in positions {
		cues.push(Cue {
			time: cue_time.saturating_mul(timestamp_scale),
			duration: raw
				.duration
				.map(|duration| duration.saturating_mul(timestamp_scale)),
			track: raw.track,
			position: raw.position,
			relative_position: raw.relative_position,
			block: raw.block,
		});
	}

	Ok(())
}

fn read_cue_track_positions<R>(
	reader: &mut ElementReader<R>,
	end: u64,
) -> Result<RawTrackPosition>
where
	R: Read + Seek,
{
	let mut raw = RawTrackPosition::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::CUE_TRACK => raw.track = reader.read_unsigned_int(size)?,
			element_id::CUE_CLUSTER_POSITION => raw.position = reader.read_unsigned_int(size)?,
			element_id::CUE_RELATIVE_POSITION => {
				raw.relative_position = Some(reader.read_unsigned_int(size)?)
			},
			element_id::CUE_DURATION => raw.duration = Some(reader.read_unsigned_int(size)?),
			element_id::CUE_BLOCK_NUMBER => raw.block = Some(reader.read_unsigned_int(size)?),
			_ => reader.skip_element(child)?,
		}
	}

	Ok(raw)
}
