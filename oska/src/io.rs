//! I/O utilities

use std::io::{self, Read, Seek, SeekFrom};

/// Adapter making a one-shot stream usable where `Read + Seek` is required
///
/// The demuxer is generic over `Read + Seek`, but sockets, pipes, and other
/// one-shot streams only implement `Read`. `ReadOnlySource` bridges the gap by
/// implementing *forward-only* seeking: a seek to a later offset drains the
/// intervening bytes, and a seek backwards fails.
///
/// Use it together with [`ParseOptions::streaming`](crate::config::ParseOptions::streaming),
/// which disables the operations that genuinely need random access (timestamp
/// seeking and the trailing-cues rescan).
///
/// # Examples
///
/// ```rust,no_run
/// use oska::MatroskaDemuxer;
/// use oska::config::ParseOptions;
/// use oska::io::ReadOnlySource;
///
/// # fn main() -> oska::error::Result<()> {
/// # let socket: &[u8] = &[];
/// let source = ReadOnlySource::new(socket);
/// let demuxer = MatroskaDemuxer::new(source, ParseOptions::new().streaming(true))?;
/// # Ok(()) }
/// ```
pub struct ReadOnlySource<R: Read> {
	inner: R,
	position: u64,
}

impl<R: Read> ReadOnlySource<R> {
	/// Wraps a `Read` source
	pub fn new(inner: R) -> Self {
		Self { inner, position: 0 }
	}

	/// Gets a reference to the underlying reader
	pub fn get_ref(&self) -> &R {
		&self.inner
	}

	/// Unwraps this `ReadOnlySource`, returning the underlying reader
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read> Read for ReadOnlySource<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let n = self.inner.read(buf)?;
		self.position += n as u64;
		Ok(n)
	}
}

impl<R: Read> Seek for ReadOnlySource<R> {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		let target = match pos {
			SeekFrom::Start(offset) => offset,
			SeekFrom::Current(offset) => {
				if offset < 0 && self.position.checked_sub(offset.unsigned_abs()).is_none() {
					return Err(io::Error::new(
						io::ErrorKind::InvalidInput,
						"Cannot seek before the start of a read-only source",
					));
				}

				self.position.wrapping_add_signed(offset)
			},
			SeekFrom::End(_) => {
				return Err(io::Error::new(
					io::ErrorKind::Unsupported,
					"Cannot seek relative to the end of a read-only source",
				));
			},
		};

		let Some(distance) = target.checked_sub(self.position) else {
			return Err(io::Error::new(
				io::ErrorKind::Unsupported,
				"Cannot seek backwards in a read-only source",
			));
		};

		let drained = io::copy(&mut self.by_ref().take(distance), &mut io::sink())?;
		if drained != distance {
			return Err(io::Error::new(
				io::ErrorKind::UnexpectedEof,
				"Stream ended while seeking forward",
			));
		}

		Ok(self.position)
	}

	fn stream_position(&mut self) -> io::Result<u64> {
		Ok(self.position)
	}
}

#[cfg(test)]
mod tests {
	use super::ReadOnlySource;

	use std::io::{Read, Seek, SeekFrom};

	#[test_log::test]
	fn forward_seeks_drain() {
		let mut source = ReadOnlySource::new(&[0u8, 1, 2, 3, 4, 5][..]);

		source.seek(SeekFrom::Current(2)).unwrap();
		assert_eq!(source.stream_position().unwrap(), 2);

		let mut buf = [0u8; 2];
		source.read_exact(&mut buf).unwrap();
		assert_eq!(buf, [2, 3]);

		source.seek(SeekFrom::Start(5)).unwrap();
		let mut rest = Vec::new();
		source.read_to_end(&mut rest).unwrap();
		assert_eq!(rest, vec![5]);
	}

	#[test_log::test]
	fn backward_seeks_fail() {
		let mut source = ReadOnlySource::new(&[0u8; 16][..]);
		source.seek(SeekFrom::Start(8)).unwrap();

		assert!(source.seek(SeekFrom::Start(4)).is_err());
		assert!(source.seek(SeekFrom::Current(-1)).is_err());
		assert!(source.seek(SeekFrom::End(0)).is_err());
	}
}
