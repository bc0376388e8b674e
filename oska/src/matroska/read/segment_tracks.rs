use crate::ebml::element_id;
use crate::ebml::element_reader::ElementReader;
use crate::error::Result;
use crate::macros::err;
use crate::matroska::properties::{
	AudioTrack, Colour, Compression, CompressionMethod, MasteringMetadata, TrackInfo, TrackType,
	VideoTrack,
};

use std::io::{Read, Seek};

pub(super) fn read_from<R>(reader: &mut ElementReader<R>, end: u64) -> Result<Vec<TrackInfo>>
where
	R: Read + Seek,
{
	let mut tracks = Vec::new();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		match child.id {
			element_id::TRACK_ENTRY => {
				let entry_end = reader.position() + child.size.value();
				tracks.push(read_track_entry(reader, entry_end)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	// The file may list tracks in any order; the public accessors promise them
	// sorted ascending by track number.
	tracks.sort_by_key(|track| track.number);

	Ok(tracks)
}

fn read_track_entry<R>(reader: &mut ElementReader<R>, end: u64) -> Result<TrackInfo>
where
	R: Read + Seek,
{
	let mut track = <TrackInfo as Default>::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::TRACK_NUMBER => track.number = reader.read_unsigned_int(size)?,
			element_id::TRACK_UID => track.uid = reader.read_unsigned_int(size)?,
			element_id::TRACK_TYPE => {
				let track_type = reader.read_unsigned_int(size)?;
				log::trace!("Encountered new track of type: {}", track_type);
				track.track_type = TrackType::from_raw(track_type);
			},
			element_id::FLAG_ENABLED => track.enabled = reader.read_flag(size)?,
			element_id::FLAG_DEFAULT => track.default = reader.read_flag(size)?,
			element_id::FLAG_FORCED => track.forced = reader.read_flag(size)?,
			element_id::FLAG_LACING => track.lacing = reader.read_flag(size)?,
			element_id::CODEC_DECODE_ALL => track.decode_all = reader.read_flag(size)?,
			element_id::MIN_CACHE => track.min_cache = reader.read_unsigned_int(size)?,
			element_id::MAX_CACHE => track.max_cache = reader.read_unsigned_int(size)?,
			element_id::DEFAULT_DURATION => {
				track.default_duration = reader.read_unsigned_int(size)?
			},
			element_id::CODEC_DELAY => track.codec_delay = reader.read_unsigned_int(size)?,
			element_id::SEEK_PRE_ROLL => track.seek_pre_roll = reader.read_unsigned_int(size)?,
			element_id::TRACK_TIMESTAMP_SCALE => {
				track.timestamp_scale = reader.read_float(size)?
			},
			element_id::NAME => track.name = Some(reader.read_utf8(size)?),
			element_id::CODEC_ID => track.codec_id = reader.read_string(size)?,
			element_id::CODEC_NAME => track.codec_name = Some(reader.read_utf8(size)?),
			element_id::CODEC_PRIVATE => track.codec_private = Some(reader.read_binary(size)?),
			element_id::LANGUAGE => {
				let language = reader.read_string(size)?;

				// ISO 639-2 codes are three letters; anything shorter cannot be one,
				// so the "eng" default stands.
				if language.len() >= 3 {
					track.language = language;
				} else {
					log::debug!("Track language `{}` is too short, ignoring", language);
				}
			},
			element_id::LANGUAGE_BCP47 => track.language_ietf = Some(reader.read_string(size)?),
			element_id::VIDEO => {
				let video_end = reader.position() + size;
				track.video = Some(read_video(reader, video_end)?);
			},
			element_id::AUDIO => {
				let audio_end = reader.position() + size;
				track.audio = Some(read_audio(reader, audio_end)?);
			},
			element_id::CONTENT_ENCODINGS => {
				let encodings_end = reader.position() + size;
				read_content_encodings(reader, encodings_end, &mut track)?;
			},
			_ => reader.skip_element(child)?,
		}
	}

	if let Some(video) = &mut track.video {
		// The display dimensions default to the pixel dimensions
		if video.display_width == 0 {
			video.display_width = video.pixel_width;
		}
		if video.display_height == 0 {
			video.display_height = video.pixel_height;
		}
	}

	if let Some(audio) = &mut track.audio {
		if audio.output_sampling_frequency == 0.0 {
			audio.output_sampling_frequency = audio.sampling_frequency;
		}
	}

	Ok(track)
}

fn read_video<R>(reader: &mut ElementReader<R>, end: u64) -> Result<VideoTrack>
where
	R: Read + Seek,
{
	let mut video = VideoTrack::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::PIXEL_WIDTH => video.pixel_width = reader.read_unsigned_int(size)?,
			element_id::PIXEL_HEIGHT => video.pixel_height = reader.read_unsigned_int(size)?,
			element_id::DISPLAY_WIDTH => video.display_width = reader.read_unsigned_int(size)?,
			element_id::DISPLAY_HEIGHT => {
				video.display_height = reader.read_unsigned_int(size)?
			},
			element_id::FLAG_INTERLACED => video.interlaced = reader.read_unsigned_int(size)?,
			element_id::COLOUR => {
				let colour_end = reader.position() + size;
				video.colour = Some(read_colour(reader, colour_end)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(video)
}

fn read_colour<R>(reader: &mut ElementReader<R>, end: u64) -> Result<Colour>
where
	R: Read + Seek,
{
	let mut colour = Colour::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::MATRIX_COEFFICIENTS => {
				colour.matrix_coefficients = Some(reader.read_unsigned_int(size)?)
			},
			element_id::BITS_PER_CHANNEL => {
				colour.bits_per_channel = Some(reader.read_unsigned_int(size)?)
			},
			element_id::RANGE => colour.range = Some(reader.read_unsigned_int(size)?),
			element_id::TRANSFER_CHARACTERISTICS => {
				colour.transfer_characteristics = Some(reader.read_unsigned_int(size)?)
			},
			element_id::PRIMARIES => colour.primaries = Some(reader.read_unsigned_int(size)?),
			element_id::MAX_CLL => colour.max_cll = Some(reader.read_unsigned_int(size)?),
			element_id::MAX_FALL => colour.max_fall = Some(reader.read_unsigned_int(size)?),
			element_id::MASTERING_METADATA => {
				let mastering_end = reader.position() + size;
				colour.mastering_metadata = Some(read_mastering_metadata(reader, mastering_end)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(colour)
}

fn read_mastering_metadata<R>(reader: &mut ElementReader<R>, end: u64) -> Result<MasteringMetadata>
where
	R: Read + Seek,
{
	let mut mastering = MasteringMetadata::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		let target = match child.id {
			element_id::PRIMARY_R_CHROMATICITY_X => &mut mastering.primary_r_chromaticity_x,
			element_id::PRIMARY_R_CHROMATICITY_Y => &mut mastering.primary_r_chromaticity_y,
			element_id::PRIMARY_G_CHROMATICITY_X => &mut mastering.primary_g_chromaticity_x,
			element_id::PRIMARY_G_CHROMATICITY_Y => &mut mastering.primary_g_chromaticity_y,
			element_id::PRIMARY_B_CHROMATICITY_X => &mut mastering.primary_b_chromaticity_x,
			element_id::PRIMARY_B_CHROMATICITY_Y => &mut mastering.primary_b_chromaticity_y,
			element_id::WHITE_POINT_CHROMATICITY_X => &mut mastering.white_point_chromaticity_x,
			element_id::WHITE_POINT_CHROMATICITY_Y => &mut mastering.white_point_chromaticity_y,
			element_id::LUMINANCE_MAX => &mut mastering.luminance_max,
			element_id::LUMINANCE_MIN => &mut mastering.luminance_min,
			_ => {
				reader.skip_element(child)?;
				continue;
			},
		};

		*target = Some(reader.read_float(size)?);
	}

	Ok(mastering)
}

fn read_audio<R>(reader: &mut ElementReader<R>, end: u64) -> Result<AudioTrack>
where
	R: Read + Seek,
{
	let mut audio = AudioTrack::default();

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::SAMPLING_FREQUENCY => {
				audio.sampling_frequency = reader.read_float(size)?
			},
			element_id::OUTPUT_SAMPLING_FREQUENCY => {
				audio.output_sampling_frequency = reader.read_float(size)?
			},
			element_id::CHANNELS => audio.channels = reader.read_unsigned_int(size)?,
			element_id::BIT_DEPTH => audio.bit_depth = Some(reader.read_unsigned_int(size)?),
			_ => reader.skip_element(child)?,
		}
	}

	Ok(audio)
}

fn read_content_encodings<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	track: &mut TrackInfo,
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
			element_id::CONTENT_ENCODING => {
				let encoding_end = reader.position() + child.size.value();
				read_content_encoding(reader, encoding_end, track)?;
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(())
}

fn read_content_encoding<R>(
	reader: &mut ElementReader<R>,
	end: u64,
	track: &mut TrackInfo,
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
			element_id::CONTENT_COMPRESSION => {
				let compression_end = reader.position() + child.size.value();
				track.compression = Some(read_content_compression(reader, compression_end)?);
			},
			element_id::CONTENT_ENCRYPTION => {
				// Encryption is reported, never handled
				log::warn!("Track {} is encrypted, packets will not be usable", track.number);
				track.encrypted = true;
				reader.skip_element(child)?;
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(())
}

fn read_content_compression<R>(reader: &mut ElementReader<R>, end: u64) -> Result<Compression>
where
	R: Read + Seek,
{
	// ContentCompAlgo defaults to zlib
	let mut method = CompressionMethod::Zlib;
	let mut settings = None;

	while reader.position() < end {
		let child = reader.read_element_header()?;
		if child.size.is_unknown() {
			err!(UnknownSizeUnsupported(child.id.value()));
		}

		let size = child.size.value();
		match child.id {
			element_id::CONTENT_COMP_ALGO => {
				method = CompressionMethod::from_raw(reader.read_unsigned_int(size)?);
			},
			element_id::CONTENT_COMP_SETTINGS => {
				settings = Some(reader.read_binary(size)?);
			},
			_ => reader.skip_element(child)?,
		}
	}

	Ok(Compression { method, settings })
}
