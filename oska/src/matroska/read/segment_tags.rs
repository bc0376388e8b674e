use crate::ebml::element_id;
use crate::ebml::element_reader::ElementReader;
use crate::error::Result;
use crate::macros::err;
use crate::matroska::properties::{SimpleTag, Tag, TagTarget};

use std::io::{Read, Seek};

pub(super) fn read_from<R>(reader: &mut ElementReader<R>, end: u64) -> Result<Vec<Tag>>
where
	R: Read + Seek,
{
	let mut tags = Vec::new();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		match child.id {
			element_id::TAG => {
				let tag_end = reader.position() + child.size.value();
				tags.push(read_tag(reader, tag_end)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(tags)
}

fn read_tag<R>(reader: &mut ElementReader<R>, end: u64) -> Result<Tag>
where
	R: Read + Seek,
{
	let mut tag = Tag::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		match child.id {
			element_id::TARGETS => {
				let targets_end = reader.position() + child.size.value();
				read_targets(reader, targets_end, &mut tag.targets)?;
			},
			element_id::SIMPLE_TAG => {
				let simple_tag_end = reader.position() + child.size.value();
				read_simple_tag(reader, simple_tag_end, &mut tag.simple_tags)?;
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(tag)
}

// A Targets element carries one type value and any number of UID elements; each UID
// becomes its own target. With no UIDs at all, the tag applies to the whole segment,
// expressed as the single target {type, 0}.
fn read_targets<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	targets: &mut Vec<TagTarget>,
) -> Result<()>
where
	R: Read + Seek,
{
	// TargetTypeValue defaults to 50 ("ALBUM"/"MOVIE" level)
	let mut target_type = 50;
	let mut uids = Vec::new();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::TARGET_TYPE_VALUE => target_type = reader.read_unsigned_int(size)?,
			// The string form is informational only, the numeric level is authoritative
			element_id::TARGET_TYPE => {
				let _ = reader.read_string(size)?;
			},
			element_id::TAG_TRACK_UID
			| element_id::TAG_EDITION_UID
			| element_id::TAG_CHAPTER_UID
			| element_id::TAG_ATTACHMENT_UID => uids.push(reader.read_unsigned_int(size)?),
			_ => reader.skip_element(child)?,
		}
	}

	if uids.is_empty() {
		targets.push(TagTarget {
			target_type,
			uid: 0,
		});
	} else {
		for uid in uids {
			targets.push(TagTarget { target_type, uid });
		}
	}

	Ok(())
}

// SimpleTags may nest; the tree is flattened into the owning tag, keeping every
// name retrievable.
fn read_simple_tag<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	simple_tags: &mut Vec<SimpleTag>,
) -> Result<()>
where
	R: Read + Seek,
{
	let mut name = String::new();
	let mut value = None;
	let mut binary = None;
	let mut language = String::from("eng");
	let mut default = true;

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::TAG_NAME => name = reader.read_utf8(size)?,
			element_id::TAG_STRING => value = Some(reader.read_utf8(size)?),
			element_id::TAG_BINARY => binary = Some(reader.read_binary(size)?),
			element_id::TAG_LANGUAGE | element_id::TAG_LANGUAGE_BCP47 => {
				language = reader.read_string(size)?
			},
			element_id::TAG_DEFAULT | element_id::TAG_DEFAULT_BOGUS => {
				default = reader.read_flag(size)?
			},
			element_id::SIMPLE_TAG => {
				let nested_end = reader.position() + size;
				read_simple_tag(reader, nested_end, simple_tags)?;
			},
			_ => reader.skip_element(child)?,
		}
	}

	simple_tags.push(SimpleTag {
		name,
		value,
		binary,
		language,
		default,
	});

	Ok(())
}
