use crate::ebml::vint::{ElementId, VInt};
use crate::error::Result;
use crate::macros::{decode_err, err, try_vec};

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

/// An element header, the `(id, size)` pair framing every EBML element
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct ElementHeader {
	pub(crate) id: ElementId,
	pub(crate) size: VInt<u64>,
}

impl ElementHeader {
	fn read<R>(reader: &mut R, max_id_length: u8, max_vint_length: u8) -> Result<Self>
	where
		R: Read,
	{
		Ok(Self {
			id: ElementId::parse(reader, max_id_length)?.0,
			size: VInt::<u64>::parse(reader, max_vint_length)?.0,
		})
	}
}

/// An EBML element reader
///
/// Wraps the byte source, tracking the current byte position so that callers can
/// compute element addresses without re-seeking. The position is advanced by exactly
/// the bytes consumed, whether through reads, skips, or seeks.
#[derive(Debug)]
pub(crate) struct ElementReader<R> {
	reader: R,
	position: u64,
	seekable: bool,
	/// Maximum size in octets of all element IDs
	max_id_length: u8,
	/// Maximum size in octets of all element data sizes
	max_size_length: u8,
}

impl<R> Read for ElementReader<R>
where
	R: Read,
{
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let ret = self.reader.read(buf)?;
		self.position += ret as u64;
		Ok(ret)
	}
}

impl<R> ElementReader<R>
where
	R: Read + Seek,
{
	pub(crate) fn new(mut reader: R, seekable: bool) -> Result<Self> {
		// The source need not be at offset zero; a caller resuming a previous
		// session will hand us a reader parked at some Cluster boundary.
		let position = reader.stream_position()?;

		Ok(Self {
			reader,
			position,
			seekable,
			// https://www.rfc-editor.org/rfc/rfc8794.html#name-ebmlmaxidlength-element
			max_id_length: 4,
			// https://www.rfc-editor.org/rfc/rfc8794.html#name-ebmlmaxsizelength-element
			max_size_length: 8,
		})
	}

	pub(crate) fn into_inner(self) -> R {
		self.reader
	}

	pub(crate) fn position(&self) -> u64 {
		self.position
	}

	pub(crate) fn set_max_id_length(&mut self, len: u8) {
		self.max_id_length = len
	}

	pub(crate) fn set_max_size_length(&mut self, len: u8) {
		self.max_size_length = len
	}

	/// Read the next element header at the current position
	///
	/// An end of stream on the very first octet surfaces as an I/O `UnexpectedEof`,
	/// which callers classify through [`DemuxError::is_eof`](crate::error::DemuxError::is_eof)
	/// to tell a clean end from a truncated stream.
	pub(crate) fn read_element_header(&mut self) -> Result<ElementHeader> {
		ElementHeader::read(self, self.max_id_length, self.max_size_length)
	}

	pub(crate) fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
		let new_position = self.reader.seek(pos)?;
		self.position = new_position;
		Ok(new_position)
	}

	/// Move past `length` bytes of element data
	///
	/// On a seekable source this is a forward seek; otherwise the bytes are drained
	/// into a sink so that streaming sources can skip without random access.
	pub(crate) fn skip(&mut self, length: u64) -> Result<()> {
		log::trace!("Skipping {} bytes", length);

		if length == 0 {
			return Ok(());
		}

		if self.seekable {
			self.seek(SeekFrom::Current(length as i64))?;
			return Ok(());
		}

		let drained = std::io::copy(&mut self.by_ref().take(length), &mut io::sink())?;
		if drained != length {
			err!(TruncatedElement);
		}

		Ok(())
	}

	pub(crate) fn skip_element(&mut self, element_header: ElementHeader) -> Result<()> {
		log::debug!(
			"Skipping EBML element: {:X} ({} bytes)",
			element_header.id,
			element_header.size
		);
		self.skip(element_header.size.value())?;
		Ok(())
	}

	pub(crate) fn read_signed_int(&mut self, element_length: u64) -> Result<i64> {
		// https://www.rfc-editor.org/rfc/rfc8794.html#section-7.1
		// A Signed Integer Element MUST declare a length from zero to eight octets
		if element_length > 8 {
			decode_err!(@BAIL "Invalid size for signed int element")
		}

		let mut buf = [0; 8];
		self.read_exact(&mut buf[8 - element_length as usize..])?;
		let value = u64::from_be_bytes(buf);

		// Signed Integers are stored with two's complement notation with the leftmost bit being the sign bit.
		let value_width = element_length * 8;
		let shift = (64 - value_width) as u32;
		Ok((value.wrapping_shl(shift) as i64).wrapping_shr(shift))
	}

	pub(crate) fn read_unsigned_int(&mut self, element_length: u64) -> Result<u64> {
		// https://www.rfc-editor.org/rfc/rfc8794.html#section-7.2
		// An Unsigned Integer Element MUST declare a length from zero to eight octets
		if element_length > 8 {
			decode_err!(@BAIL "Invalid size for unsigned int element")
		}

		let mut buf = [0; 8];
		self.read_exact(&mut buf[8 - element_length as usize..])?;
		Ok(u64::from_be_bytes(buf))
	}

	/// Same as `read_unsigned_int`, but will warn if the value is out of range.
	pub(crate) fn read_flag(&mut self, element_length: u64) -> Result<bool> {
		let val = self.read_unsigned_int(element_length)?;
		if val > 1 {
			log::warn!("Flag value `{}` is out of range, assuming true", val);
		}

		Ok(val != 0)
	}

	pub(crate) fn read_float(&mut self, element_length: u64) -> Result<f64> {
		// https://www.rfc-editor.org/rfc/rfc8794.html#section-7.3
		// A Float Element MUST declare a length of either zero octets (0 bit),
		// four octets (32 bit), or eight octets (64 bit)
		Ok(match element_length {
			0 => 0.0,
			4 => f64::from(self.read_f32::<BigEndian>()?),
			8 => self.read_f64::<BigEndian>()?,
			_ => {
				// Real-world muxers get this wrong often enough that bailing would be
				// a net loss; the data is unusable either way.
				log::warn!(
					"Float element has an invalid length ({}), assuming 0.0",
					element_length
				);
				self.skip(element_length)?;
				0.0
			},
		})
	}

	pub(crate) fn read_string(&mut self, element_length: u64) -> Result<String> {
		// https://www.rfc-editor.org/rfc/rfc8794.html#section-7.4
		// A String Element MUST declare a length in octets from zero to VINTMAX
		let mut content = try_vec![0; element_length as usize];
		self.read_exact(&mut content)?;

		// https://www.rfc-editor.org/rfc/rfc8794.html#section-13
		// Null Octets, which are octets with all bits set to zero,
		// MAY follow the value of a String Element or UTF-8 Element to serve as a terminator.
		if let Some(i) = content.iter().rposition(|x| *x != 0) {
			let new_len = i + 1;
			content.truncate(new_len);
		} else {
			content.clear();
		}

		String::from_utf8(content).map_err(Into::into)
	}

	pub(crate) fn read_utf8(&mut self, element_length: u64) -> Result<String> {
		// https://www.rfc-editor.org/rfc/rfc8794.html#section-7.5
		// A UTF-8 Element MUST declare a length in octets from zero to VINTMAX

		// Since the UTF-8 and String elements are both just turned into `String`s,
		// we can just reuse the `read_string` method.
		self.read_string(element_length)
	}

	pub(crate) fn read_binary(&mut self, element_length: u64) -> Result<Vec<u8>> {
		// https://www.rfc-editor.org/rfc/rfc8794.html#section-7.8
		// A Binary Element MUST declare a length in octets from zero to VINTMAX.
		let mut content = try_vec![0; element_length as usize];
		self.read_exact(&mut content)?;
		Ok(content)
	}
}

#[cfg(test)]
mod tests {
	use super::ElementReader;

	use std::io::Cursor;

	fn reader_over(data: &[u8]) -> ElementReader<Cursor<&[u8]>> {
		ElementReader::new(Cursor::new(data), true).unwrap()
	}

	#[test_log::test]
	fn unsigned_int_big_endian() {
		let mut reader = reader_over(&[0x01, 0x02, 0x03]);
		assert_eq!(reader.read_unsigned_int(3).unwrap(), 0x0001_0203);
		assert_eq!(reader.position(), 3);
	}

	#[test_log::test]
	fn unsigned_int_empty_payload_is_zero() {
		let mut reader = reader_over(&[]);
		assert_eq!(reader.read_unsigned_int(0).unwrap(), 0);
	}

	#[test_log::test]
	fn signed_int_sign_extension() {
		// Two's complement at each stored width
		let mut reader = reader_over(&[0xFF]);
		assert_eq!(reader.read_signed_int(1).unwrap(), -1);

		let mut reader = reader_over(&[0xFF, 0xFF, 0xFE]);
		assert_eq!(reader.read_signed_int(3).unwrap(), -2);

		let mut reader = reader_over(&[0x7F, 0xFF]);
		assert_eq!(reader.read_signed_int(2).unwrap(), 32767);

		let mut reader = reader_over(&[0x80, 0x00, 0x00, 0x00]);
		assert_eq!(reader.read_signed_int(4).unwrap(), i64::from(i32::MIN));
	}

	#[test_log::test]
	fn float_lengths() {
		let f32_bytes = 1.5f32.to_be_bytes();
		let mut reader = reader_over(&f32_bytes);
		assert_eq!(reader.read_float(4).unwrap(), 1.5);

		let f64_bytes = 2.5f64.to_be_bytes();
		let mut reader = reader_over(&f64_bytes);
		assert_eq!(reader.read_float(8).unwrap(), 2.5);

		let mut reader = reader_over(&[]);
		assert_eq!(reader.read_float(0).unwrap(), 0.0);

		// Anything else is unusable, but tolerated
		let mut reader = reader_over(&[0xAA, 0xBB, 0xCC]);
		assert_eq!(reader.read_float(3).unwrap(), 0.0);
		assert_eq!(reader.position(), 3);
	}

	#[test_log::test]
	fn string_strips_trailing_nuls() {
		let mut reader = reader_over(b"matroska\0\0");
		assert_eq!(reader.read_string(10).unwrap(), "matroska");

		let mut reader = reader_over(b"\0\0");
		assert_eq!(reader.read_string(2).unwrap(), "");
	}

	#[test_log::test]
	fn skip_advances_position() {
		let mut reader = reader_over(&[0u8; 32]);
		reader.skip(10).unwrap();
		assert_eq!(reader.position(), 10);
		reader.skip(0).unwrap();
		assert_eq!(reader.position(), 10);
	}
}
