use crate::ebml::element_id;
use crate::ebml::element_reader::ElementReader;
use crate::error::Result;
use crate::macros::{decode_err, err};
use crate::matroska::properties::{
	Chapter, ChapterDisplay, ChapterProcess, ChapterProcessCommand,
};

use std::io::{Read, Seek};

// Chapter atoms nest arbitrarily; a hostile file should not be able to nest us
// off the stack.
const MAX_NESTING_DEPTH: u8 = 16;

pub(super) fn read_from<R>(reader: &mut ElementReader<R>, end: u64) -> Result<Vec<Chapter>>
where
	R: Read + Seek,
{
	let mut chapters = Vec::new();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		match child.id {
			element_id::EDITION_ENTRY => {
				let edition_end = reader.position() + child.size.value();
				read_edition_entry(reader, edition_end, &mut chapters)?;
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(chapters)
}

// An edition's ChapterAtoms form a flat list at the edition level. The edition's
// own flags apply to the whole list, so they are copied onto its atoms once the
// walk is done (they may be stored after the atoms).
fn read_edition_entry<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	chapters: &mut Vec<Chapter>,
) -> Result<()>
where
	R: Read + Seek,
{
	let mut atoms = Vec::new();
	let mut hidden = false;
	let mut default = false;
	let mut ordered = false;

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::EDITION_UID => {
				let uid = reader.read_unsigned_int(size)?;
				log::trace!("Reading chapters of edition {}", uid);
			},
			element_id::EDITION_FLAG_HIDDEN => hidden = reader.read_flag(size)?,
			element_id::EDITION_FLAG_DEFAULT => default = reader.read_flag(size)?,
			element_id::EDITION_FLAG_ORDERED => ordered = reader.read_flag(size)?,
			element_id::CHAPTER_ATOM => {
				let atom_end = reader.position() + size;
				atoms.push(read_chapter_atom(reader, atom_end, 1)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	for atom in &mut atoms {
		atom.default = default;
		atom.ordered = ordered;
		atom.hidden |= hidden;
	}

	chapters.append(&mut atoms);
	Ok(())
}

fn read_chapter_atom<R>(reader: &mut ElementReader<R>, end: u64, depth: u8) -> Result<Chapter>
where
	R: Read + Seek,
{
	if depth > MAX_NESTING_DEPTH {
		decode_err!(@BAIL "Maximum chapter nesting depth reached");
	}

	let mut chapter = <Chapter as Default>::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::CHAPTER_UID => chapter.uid = reader.read_unsigned_int(size)?,
			element_id::CHAPTER_TIME_START => {
				chapter.time_start = reader.read_unsigned_int(size)?
			},
			element_id::CHAPTER_TIME_END => {
				chapter.time_end = Some(reader.read_unsigned_int(size)?)
			},
			element_id::CHAPTER_FLAG_HIDDEN => chapter.hidden = reader.read_flag(size)?,
			element_id::CHAPTER_FLAG_ENABLED => chapter.enabled = reader.read_flag(size)?,
			element_id::CHAPTER_SEGMENT_UID => {
				let bytes = reader.read_binary(size)?;
				match <[u8; 16]>::try_from(bytes) {
					Ok(uid) => chapter.segment_uid = Some(uid),
					Err(_) => log::warn!("ChapterSegmentUID is not 16 bytes long, ignoring"),
				}
			},
			element_id::CHAPTER_TRACK => {
				let track_end = reader.position() + size;
				read_chapter_track(reader, track_end, &mut chapter.tracks)?;
			},
			element_id::CHAPTER_DISPLAY => {
				let display_end = reader.position() + size;
				chapter.displays.push(read_chapter_display(reader, display_end)?);
			},
			element_id::CHAP_PROCESS => {
				let process_end = reader.position() + size;
				chapter.processes.push(read_chapter_process(reader, process_end)?);
			},
			element_id::CHAPTER_ATOM => {
				let atom_end = reader.position() + size;
				chapter
					.children
					.push(read_chapter_atom(reader, atom_end, depth + 1)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(chapter)
}

fn read_chapter_track<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	tracks: &mut Vec<u64>,
) -> Result<()>
where
	R: Read + Seek,
{
	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		match child.id {
			element_id::CHAPTER_TRACK_UID => {
				tracks.push(reader.read_unsigned_int(child.size.value())?)
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(())
}

fn read_chapter_display<R>(reader: &mut ElementReader<R>, end: u64) -> Result<ChapterDisplay>
where
	R: Read + Seek,
{
	let mut string = String::new();
	let mut language = String::from("eng");
	let mut country = None;

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::CHAP_STRING => string = reader.read_utf8(size)?,
			element_id::CHAP_LANGUAGE => language = reader.read_string(size)?,
			element_id::CHAP_COUNTRY => country = Some(reader.read_string(size)?),
			_ => reader.skip_element(child)?,
		}
	}

	Ok(ChapterDisplay {
		string,
		language,
		country,
	})
}

fn read_chapter_process<R>(reader: &mut ElementReader<R>, end: u64) -> Result<ChapterProcess>
where
	R: Read + Seek,
{
	let mut process = ChapterProcess::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::CHAP_PROCESS_CODEC_ID => {
				process.codec_id = reader.read_unsigned_int(size)?
			},
			element_id::CHAP_PROCESS_PRIVATE => {
				process.private = Some(reader.read_binary(size)?)
			},
			element_id::CHAP_PROCESS_COMMAND => {
				let command_end = reader.position() + size;
				read_chapter_process_command(reader, command_end, &mut process.commands)?;
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(process)
}

fn read_chapter_process_command<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	commands: &mut Vec<ChapterProcessCommand>,
) -> Result<()>
where
	R: Read + Seek,
{
	let mut time = 0;
	let mut data = Vec::new();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::CHAP_PROCESS_TIME => time = reader.read_unsigned_int(size)?,
			element_id::CHAP_PROCESS_DATA => data = reader.read_binary(size)?,
			_ => reader.skip_element(child)?,
		}
	}

	commands.push(ChapterProcessCommand { time, data });
	Ok(())
}
