use crate::config::{ParseOptions, ParsingMode};
use crate::ebml::element_id;
use crate::ebml::element_reader::ElementReader;
use crate::error::Result;
use crate::macros::{decode_err, err};
use crate::matroska::properties::Attachment;

use std::io::{Read, Seek};

pub(super) fn read_from<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	parse_options: ParseOptions,
) -> Result<Vec<Attachment>>
where
	R: Read + Seek,
{
	let mut attachments = Vec::new();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		match child.id {
			element_id::ATTACHED_FILE => {
				let file_end = reader.position() + child.size.value();
				if let Some(attachment) = read_attachment(reader, file_end, parse_options)? {
					attachments.push(attachment);
				}
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(attachments)
}

fn read_attachment<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	parse_options: ParseOptions,
) -> Result<Option<Attachment>>
where
	R: Read + Seek,
{
	let mut name = None;
	let mut description = None;
	let mut mime_type = None;
	let mut uid = None;
	let mut data = None;
	let mut position = 0;

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::FILE_NAME => name = Some(reader.read_utf8(size)?),
			element_id::FILE_DESCRIPTION => description = Some(reader.read_utf8(size)?),
			element_id::FILE_MIME_TYPE => mime_type = Some(reader.read_string(size)?),
			element_id::FILE_UID => uid = Some(reader.read_unsigned_int(size)?),
			element_id::FILE_DATA => {
				position = reader.position();
				data = Some(reader.read_binary(size)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	let (Some(name), Some(uid), Some(data)) = (name, uid, data) else {
		// FileName, FileUID and FileData are required fields
		log::warn!("Incomplete attached file, ignoring");
		if parse_options.parsing_mode == ParsingMode::Strict {
			decode_err!(@BAIL "Attached file is missing required fields");
		}

		return Ok(None);
	};

	Ok(Some(Attachment {
		name,
		description,
		mime_type: mime_type.unwrap_or_default(),
		uid,
		data,
		position,
	}))
}
