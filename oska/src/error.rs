//! Contains the errors that can arise within oska
//!
//! The primary error is [`DemuxError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, DemuxError>`
pub type Result<T> = std::result::Result<T, DemuxError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Structural errors
	/// The EBML header declares a DocType other than "matroska" or "webm"
	BadDocType(String),
	/// A variable-length integer is malformed or wider than its context allows
	BadVintSize,
	/// An element other than Segment or Cluster declared an unknown size
	///
	/// Unknown sizes only make sense for containers that are terminated by
	/// their surroundings; for everything else the element cannot be framed.
	UnknownSizeUnsupported(u64),
	/// An element's payload ended before its declared size was reached
	TruncatedElement,
	/// The byte source ended before the Segment's declared size was reached
	TruncatedSegment,
	/// A SimpleBlock/Block payload is too short or its lacing table is malformed
	BadBlock(&'static str),
	/// Errors that occur while decoding a stream
	Decoding(DecodingError),

	// Semantic errors
	/// A timestamp seek was requested, but the file carries no Cues index
	NoCues,
	/// A timestamp seek was requested on a non-seekable (streaming) source
	SeekUnsupported,

	// Resource errors
	/// Attempting to allocate an abnormally large amount of data
	///
	/// Declared element sizes are untrusted input; anything above
	/// [`GlobalOptions::allocation_limit`](crate::config::GlobalOptions) is refused.
	TooMuchData,
	/// Expected the data to be a different size than provided
	SizeMismatch,

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// An error that arises while decoding a stream
pub struct DecodingError {
	description: &'static str,
}

impl DecodingError {
	/// Create a `DecodingError` from a description
	#[must_use]
	pub const fn new(description: &'static str) -> Self {
		Self { description }
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for DecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.description)
	}
}

impl Display for DecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.description)
	}
}

/// The error type for all demuxing operations
pub struct DemuxError {
	kind: ErrorKind,
}

impl DemuxError {
	/// Create a `DemuxError` from an [`ErrorKind`]
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Whether this error is an unexpected end of the byte source
	///
	/// End of stream is a signalling condition rather than a failure in
	/// several places (an unknown-size Segment simply extends to EOF), so
	/// callers need to tell it apart from real I/O errors.
	pub fn is_eof(&self) -> bool {
		matches!(
			self.kind,
			ErrorKind::Io(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof
		)
	}
}

impl From<DecodingError> for DemuxError {
	fn from(value: DecodingError) -> Self {
		Self {
			kind: ErrorKind::Decoding(value),
		}
	}
}

impl From<std::io::Error> for DemuxError {
	fn from(value: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(value),
		}
	}
}

impl From<std::string::FromUtf8Error> for DemuxError {
	fn from(value: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(value),
		}
	}
}

impl From<TryReserveError> for DemuxError {
	fn from(value: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(value),
		}
	}
}

impl Debug for DemuxError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl Display for DemuxError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			// Structural errors
			ErrorKind::BadDocType(doc_type) => {
				write!(f, "Unsupported EBML DocType: {doc_type:?}")
			},
			ErrorKind::BadVintSize => write!(f, "Encountered an invalid VInt size"),
			ErrorKind::UnknownSizeUnsupported(id) => write!(
				f,
				"Element {id:#X} declared an unknown size, which is only allowed for Segment and \
				 Cluster"
			),
			ErrorKind::TruncatedElement => {
				write!(f, "Element data ended before its declared size was reached")
			},
			ErrorKind::TruncatedSegment => write!(
				f,
				"Byte source ended before the Segment's declared size was reached"
			),
			ErrorKind::BadBlock(reason) => write!(f, "Unable to decode block: {reason}"),
			ErrorKind::Decoding(err) => write!(f, "{err}"),

			// Semantic errors
			ErrorKind::NoCues => write!(f, "File contains no Cues index to seek with"),
			ErrorKind::SeekUnsupported => {
				write!(f, "Timestamp seeking is unavailable on a streaming source")
			},

			// Resource errors
			ErrorKind::TooMuchData => write!(
				f,
				"An abnormally large amount of data was provided, and an overflow occurred"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),

			// Conversions for external errors
			ErrorKind::StringFromUtf8(err) => write!(f, "{err}"),
			ErrorKind::Io(err) => write!(f, "{err}"),
			ErrorKind::Alloc(err) => write!(f, "{err}"),
		}
	}
}

impl std::error::Error for DemuxError {}
