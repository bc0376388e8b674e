/// Options to control how oska parses a file
///
/// The `read_*` switches select which top-level Segment sections are decoded;
/// a disabled section is skipped even when present in the file. Callers that
/// only want, say, the track list can avoid paying for Cues and Chapters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) streaming: bool,
	pub(crate) read_info: bool,
	pub(crate) read_tracks: bool,
	pub(crate) read_cues: bool,
	pub(crate) read_chapters: bool,
	pub(crate) read_tags: bool,
	pub(crate) read_attachments: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	streaming: false,
	/// 	read_info: true,
	/// 	read_tracks: true,
	/// 	read_cues: true,
	/// 	read_chapters: true,
	/// 	read_tags: true,
	/// 	read_attachments: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			streaming: false,
			read_info: true,
			read_tracks: true,
			read_cues: true,
			read_chapters: true,
			read_tags: true,
			read_attachments: true,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether the byte source is a one-shot stream
	///
	/// In streaming mode the source is never seeked backwards; skips are performed by
	/// draining bytes forward. Timestamp seeking ([`MatroskaDemuxer::seek`]) and the
	/// trailing-Cues rescan are disabled.
	///
	/// [`MatroskaDemuxer::seek`]: crate::MatroskaDemuxer::seek
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::ParseOptions;
	///
	/// // Reading from a socket, no going back
	/// let parsing_options = ParseOptions::new().streaming(true);
	/// ```
	pub fn streaming(&mut self, streaming: bool) -> Self {
		self.streaming = streaming;
		*self
	}

	/// Whether or not to read the SegmentInfo section
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::ParseOptions;
	///
	/// // By default, `read_info` is enabled. Here, we don't want to read it.
	/// let parsing_options = ParseOptions::new().read_info(false);
	/// ```
	pub fn read_info(&mut self, read_info: bool) -> Self {
		self.read_info = read_info;
		*self
	}

	/// Whether or not to read the Tracks section
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().read_tracks(false);
	/// ```
	pub fn read_tracks(&mut self, read_tracks: bool) -> Self {
		self.read_tracks = read_tracks;
		*self
	}

	/// Whether or not to read the Cues section
	///
	/// Without cues, [`MatroskaDemuxer::seek`](crate::MatroskaDemuxer::seek) is unavailable.
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().read_cues(false);
	/// ```
	pub fn read_cues(&mut self, read_cues: bool) -> Self {
		self.read_cues = read_cues;
		*self
	}

	/// Whether or not to read the Chapters section
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().read_chapters(false);
	/// ```
	pub fn read_chapters(&mut self, read_chapters: bool) -> Self {
		self.read_chapters = read_chapters;
		*self
	}

	/// Whether or not to read the Tags section
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().read_tags(false);
	/// ```
	pub fn read_tags(&mut self, read_tags: bool) -> Self {
		self.read_tags = read_tags;
		*self
	}

	/// Whether or not to read the Attachments section
	///
	/// Attachment payloads are loaded into memory, subject to
	/// [`GlobalOptions::allocation_limit`](crate::config::GlobalOptions).
	///
	/// # Examples
	///
	/// ```rust
	/// use oska::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().read_attachments(false);
	/// ```
	pub fn read_attachments(&mut self, read_attachments: bool) -> Self {
		self.read_attachments = read_attachments;
		*self
	}
}

/// The parsing strictness mode
///
/// This can be set with [`ParseOptions::parsing_mode`].
///
/// # Examples
///
/// ```rust
/// use oska::config::{ParseOptions, ParsingMode};
///
/// // By default, BestAttempt is used
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::BestAttempt);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Unrecoverable errors **and** recoverable errors will stop parsing
	Strict,
	/// Recoverable errors will be ignored, and parsing will continue with a sane default
	///
	/// This is the default mode, and the one that mirrors real-world player behavior.
	#[default]
	BestAttempt,
	/// Same as [`ParsingMode::BestAttempt`], but decode errors on individual items are
	/// also ignored where possible
	Relaxed,
}
