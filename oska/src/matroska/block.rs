//! SimpleBlock/Block payload decoding
//!
//! A block payload is a track number (VInt), a signed 16-bit timestamp relative to
//! the cluster, a flags byte, and one or more frames packed by the lacing mode in
//! the flags:
//!
//! ```text
//! [track: vint] [rel. timestamp: i16] [flags: u8] [lacing head?] [frame data...]
//! ```
//!
//! Flag bits: 7 keyframe (SimpleBlock only), 3 invisible, 2-1 lacing
//! (0 none, 1 Xiph, 2 fixed-size, 3 EBML), 0 discardable.

use crate::ebml::vint::VInt;
use crate::error::Result;
use crate::macros::err;

const LACING_NONE: u8 = 0b00;
const LACING_XIPH: u8 = 0b01;
const LACING_FIXED: u8 = 0b10;
const LACING_EBML: u8 = 0b11;

/// A decoded block: its header fields plus the delaced frames
pub(crate) struct DecodedBlock {
	pub(crate) track: u64,
	pub(crate) relative_timestamp: i16,
	pub(crate) keyframe: bool,
	pub(crate) discardable: bool,
	pub(crate) frames: Vec<Vec<u8>>,
}

/// Decode a SimpleBlock or Block payload
///
/// `simple` selects SimpleBlock semantics: only there do the keyframe and
/// discardable flag bits carry meaning; a Block's keyframe status comes from its
/// enclosing BlockGroup.
pub(crate) fn decode_block(data: &[u8], simple: bool) -> Result<DecodedBlock> {
	let mut reader = data;
	let Ok((track, _octets)) = VInt::<u64>::parse_raw(&mut reader, 8) else {
		err!(BadBlock("invalid track number"));
	};

	if reader.len() < 3 {
		err!(BadBlock("payload shorter than its header"));
	}

	let relative_timestamp = i16::from_be_bytes([reader[0], reader[1]]);
	let flags = reader[2];
	let laced_data = &reader[3..];

	let frames = match (flags >> 1) & 0b11 {
		LACING_NONE => vec![laced_data.to_vec()],
		LACING_XIPH => delace_xiph(laced_data)?,
		LACING_FIXED => delace_fixed(laced_data)?,
		LACING_EBML => delace_ebml(laced_data)?,
		_ => unreachable!(),
	};

	Ok(DecodedBlock {
		track,
		relative_timestamp,
		keyframe: simple && (flags & 0x80) != 0,
		discardable: simple && (flags & 0x01) != 0,
		frames,
	})
}

// Split `payload` at the given sizes; whatever remains is the final frame.
fn split_frames(payload: &[u8], sizes: &[usize]) -> Result<Vec<Vec<u8>>> {
	let mut frames = Vec::with_capacity(sizes.len() + 1);

	let mut start = 0;
	for &size in sizes {
		let Some(frame) = payload.get(start..start + size) else {
			err!(BadBlock("lace sizes exceed the payload"));
		};

		frames.push(frame.to_vec());
		start += size;
	}

	frames.push(payload[start..].to_vec());
	Ok(frames)
}

// Each size is a run of 0xFF octets plus one terminating octet, summed together.
// The last frame has no stored size; it takes the remaining payload.
fn delace_xiph(data: &[u8]) -> Result<Vec<Vec<u8>>> {
	let Some((&head, mut rest)) = data.split_first() else {
		err!(BadBlock("missing lace head"));
	};

	let frame_count = usize::from(head) + 1;
	let mut sizes = Vec::with_capacity(frame_count - 1);
	for _ in 0..frame_count - 1 {
		let mut size = 0usize;
		loop {
			let Some((&octet, remaining)) = rest.split_first() else {
				err!(BadBlock("truncated Xiph lace sizes"));
			};

			rest = remaining;
			size += usize::from(octet);
			if octet != 0xFF {
				break;
			}
		}

		sizes.push(size);
	}

	split_frames(rest, &sizes)
}

// All frames share one size. A payload that doesn't divide evenly is tolerated,
// with the last frame absorbing the remainder.
fn delace_fixed(data: &[u8]) -> Result<Vec<Vec<u8>>> {
	let Some((&head, rest)) = data.split_first() else {
		err!(BadBlock("missing lace head"));
	};

	let frame_count = usize::from(head) + 1;
	let frame_size = rest.len() / frame_count;
	if rest.len() % frame_count != 0 {
		log::warn!("Fixed-size lace does not divide evenly, last frame absorbs the remainder");
	}

	let sizes = vec![frame_size; frame_count - 1];
	split_frames(rest, &sizes)
}

// The first size is a plain VInt; every following size is a signed VInt delta from
// the previous one, signed by centering the VInt range.
fn delace_ebml(data: &[u8]) -> Result<Vec<Vec<u8>>> {
	let Some((&head, mut rest)) = data.split_first() else {
		err!(BadBlock("missing lace head"));
	};

	let frame_count = usize::from(head) + 1;
	if frame_count == 1 {
		return split_frames(rest, &[]);
	}

	let Ok((first_size, _)) = VInt::<u64>::parse_raw(&mut rest, 8) else {
		err!(BadBlock("truncated EBML lace sizes"));
	};

	let mut sizes = Vec::with_capacity(frame_count - 1);
	sizes.push(first_size as usize);

	let mut previous = first_size as i64;
	for _ in 1..frame_count - 1 {
		let Ok((raw, octets)) = VInt::<u64>::parse_raw(&mut rest, 8) else {
			err!(BadBlock("truncated EBML lace sizes"));
		};

		let delta = raw as i64 - ((1i64 << (7 * i64::from(octets) - 1)) - 1);
		previous += delta;
		if previous < 0 {
			err!(BadBlock("negative EBML lace size"));
		}

		sizes.push(previous as usize);
	}

	split_frames(rest, &sizes)
}

#[cfg(test)]
mod tests {
	use super::decode_block;

	#[test_log::test]
	fn no_lacing() {
		// Track 1, rel 0, keyframe, one frame
		let data = [&[0x81, 0x00, 0x00, 0x80][..], b"frame"].concat();
		let block = decode_block(&data, true).unwrap();

		assert_eq!(block.track, 1);
		assert_eq!(block.relative_timestamp, 0);
		assert!(block.keyframe);
		assert!(!block.discardable);
		assert_eq!(block.frames, vec![b"frame".to_vec()]);
	}

	#[test_log::test]
	fn negative_relative_timestamp() {
		let data = [0x81, 0xFF, 0xFE, 0x00, 0xAA];
		let block = decode_block(&data, true).unwrap();

		assert_eq!(block.relative_timestamp, -2);
		assert!(!block.keyframe);
	}

	#[test_log::test]
	fn block_keyframe_bit_is_ignored() {
		// Inside a BlockGroup, bit 7 carries no meaning
		let data = [0x81, 0x00, 0x00, 0x80, 0xAA];
		let block = decode_block(&data, false).unwrap();
		assert!(!block.keyframe);
	}

	#[test_log::test]
	fn xiph_lacing() {
		// 3 frames, sizes [5, 5], payload "hello" "world" "abcde"
		let data = [
			&[0x81, 0x00, 0x00, 0b0000_0010, 0x02, 5, 5][..],
			b"helloworldabcde",
		]
		.concat();
		let block = decode_block(&data, true).unwrap();

		assert_eq!(
			block.frames,
			vec![b"hello".to_vec(), b"world".to_vec(), b"abcde".to_vec()]
		);
	}

	#[test_log::test]
	fn xiph_lacing_multi_octet_sizes() {
		// One stored size of 258 (0xFF + 0x03), then the remainder
		let frame0 = vec![0xAAu8; 258];
		let frame1 = vec![0xBBu8; 7];
		let data = [
			&[0x81, 0x00, 0x00, 0b0000_0010, 0x01, 0xFF, 0x03][..],
			&frame0,
			&frame1,
		]
		.concat();
		let block = decode_block(&data, true).unwrap();

		assert_eq!(block.frames, vec![frame0, frame1]);
	}

	#[test_log::test]
	fn fixed_lacing() {
		let data = [&[0x81, 0x00, 0x00, 0b0000_0100, 0x02][..], b"aabbcc"].concat();
		let block = decode_block(&data, true).unwrap();

		assert_eq!(
			block.frames,
			vec![b"aa".to_vec(), b"bb".to_vec(), b"cc".to_vec()]
		);
	}

	#[test_log::test]
	fn fixed_lacing_last_frame_absorbs_remainder() {
		let data = [&[0x81, 0x00, 0x00, 0b0000_0100, 0x02][..], b"aabbccd"].concat();
		let block = decode_block(&data, true).unwrap();

		assert_eq!(
			block.frames,
			vec![b"aa".to_vec(), b"bb".to_vec(), b"ccd".to_vec()]
		);
	}

	#[test_log::test]
	fn ebml_lacing() {
		// Sizes 3, then +1 (raw 64 as a 1-octet signed VInt), remainder
		let data = [
			&[0x81, 0x00, 0x00, 0b0000_0110, 0x02, 0x83, 0xC0][..],
			b"aaabbbbcc",
		]
		.concat();
		let block = decode_block(&data, true).unwrap();

		assert_eq!(
			block.frames,
			vec![b"aaa".to_vec(), b"bbbb".to_vec(), b"cc".to_vec()]
		);
	}

	#[test_log::test]
	fn ebml_lacing_negative_delta() {
		// Sizes 4, then -2 (raw 61 as a 1-octet signed VInt), remainder
		let data = [
			&[0x81, 0x00, 0x00, 0b0000_0110, 0x02, 0x84, 0xBD][..],
			b"aaaabbccc",
		]
		.concat();
		let block = decode_block(&data, true).unwrap();

		assert_eq!(
			block.frames,
			vec![b"aaaa".to_vec(), b"bb".to_vec(), b"ccc".to_vec()]
		);
	}

	#[test_log::test]
	fn truncated_block_fails() {
		assert!(decode_block(&[0x81, 0x00], true).is_err());
		assert!(decode_block(&[], true).is_err());
	}

	#[test_log::test]
	fn oversized_lace_sizes_fail() {
		// Xiph size of 200 with only 4 payload bytes behind it
		let data = [0x81, 0x00, 0x00, 0b0000_0010, 0x01, 200, 1, 2, 3, 4];
		assert!(decode_block(&data, true).is_err());
	}

	#[test_log::test]
	fn zero_length_frame_is_allowed() {
		let data = [0x81, 0x00, 0x00, 0x80];
		let block = decode_block(&data, true).unwrap();
		assert_eq!(block.frames, vec![Vec::<u8>::new()]);
	}
}
