use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// The supported EBML document types
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocumentType {
	/// Matroska (`audio/x-matroska` / `video/x-matroska`)
	Matroska,
	/// WebM (`audio/webm` / `video/webm`)
	Webm,
}

impl FromStr for DocumentType {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"matroska" => Ok(DocumentType::Matroska),
			"webm" => Ok(DocumentType::Webm),
			_ => Err(()),
		}
	}
}

impl Display for DocumentType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DocumentType::Matroska => write!(f, "matroska"),
			DocumentType::Webm => write!(f, "webm"),
		}
	}
}

/// Properties from the EBML header
///
/// These are present for all EBML formats.
#[derive(Debug, Clone, PartialEq)]
pub struct EbmlHeaderProperties {
	pub(crate) version: u64,
	pub(crate) read_version: u64,
	pub(crate) max_id_length: u8,
	pub(crate) max_size_length: u8,
	pub(crate) doc_type: DocumentType,
	pub(crate) doc_type_version: u64,
	pub(crate) doc_type_read_version: u64,
}

impl Default for EbmlHeaderProperties {
	fn default() -> Self {
		Self {
			version: 1,
			read_version: 1,
			max_id_length: 4,
			max_size_length: 8,
			doc_type: DocumentType::Matroska,
			doc_type_version: 1,
			doc_type_read_version: 1,
		}
	}
}

impl EbmlHeaderProperties {
	/// The EBML version, should be `1`
	pub fn version(&self) -> u64 {
		self.version
	}

	/// The minimum EBML version required to read the file, <= [`Self::version()`]
	pub fn read_version(&self) -> u64 {
		self.read_version
	}

	/// The maximum length of an EBML element ID, in octets
	pub fn max_id_length(&self) -> u8 {
		self.max_id_length
	}

	/// The maximum length of an EBML element size, in octets
	pub fn max_size_length(&self) -> u8 {
		self.max_size_length
	}

	/// The type of document
	pub fn doc_type(&self) -> DocumentType {
		self.doc_type
	}

	/// The version of DocType interpreter used to create the EBML Document
	pub fn doc_type_version(&self) -> u64 {
		self.doc_type_version
	}

	/// The minimum DocType interpreter version needed to read the EBML Document
	pub fn doc_type_read_version(&self) -> u64 {
		self.doc_type_read_version
	}
}

/// The Segment's `Info` element
///
/// General information about the segment: identity, titles, applications, and the
/// all-important timestamp scale every other timestamp in the file is multiplied by.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInfo {
	pub(crate) uid: Option<[u8; 16]>,
	pub(crate) prev_uid: Option<[u8; 16]>,
	pub(crate) next_uid: Option<[u8; 16]>,
	pub(crate) filename: Option<String>,
	pub(crate) prev_filename: Option<String>,
	pub(crate) next_filename: Option<String>,
	pub(crate) title: Option<String>,
	pub(crate) muxing_app: String,
	pub(crate) writing_app: String,
	pub(crate) timestamp_scale: u64,
	pub(crate) duration: Option<Duration>,
	pub(crate) date_utc: Option<i64>,
}

impl SegmentInfo {
	/// Nanoseconds per timestamp unit when the file does not say otherwise (1ms)
	pub const DEFAULT_TIMESTAMP_SCALE: u64 = 1_000_000;
}

impl Default for SegmentInfo {
	fn default() -> Self {
		Self {
			uid: None,
			prev_uid: None,
			next_uid: None,
			filename: None,
			prev_filename: None,
			next_filename: None,
			title: None,
			muxing_app: String::new(),
			writing_app: String::new(),
			timestamp_scale: Self::DEFAULT_TIMESTAMP_SCALE,
			duration: None,
			date_utc: None,
		}
	}
}

impl SegmentInfo {
	/// A random unique ID identifying the segment
	pub fn uid(&self) -> Option<&[u8; 16]> {
		self.uid.as_ref()
	}

	/// The UID of the previous segment in a chained file
	pub fn prev_uid(&self) -> Option<&[u8; 16]> {
		self.prev_uid.as_ref()
	}

	/// The UID of the next segment in a chained file
	pub fn next_uid(&self) -> Option<&[u8; 16]> {
		self.next_uid.as_ref()
	}

	/// The filename corresponding to this segment
	pub fn filename(&self) -> Option<&str> {
		self.filename.as_deref()
	}

	/// The filename of the previous segment in a chained file
	pub fn prev_filename(&self) -> Option<&str> {
		self.prev_filename.as_deref()
	}

	/// The filename of the next segment in a chained file
	pub fn next_filename(&self) -> Option<&str> {
		self.next_filename.as_deref()
	}

	/// General name of the segment
	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	/// Muxing application or library
	pub fn muxing_app(&self) -> &str {
		&self.muxing_app
	}

	/// Writing application
	pub fn writing_app(&self) -> &str {
		&self.writing_app
	}

	/// Nanoseconds per timestamp unit
	///
	/// All timestamps in the segment (cluster timestamps, cue times, block durations)
	/// are expressed in units of this scale. Guaranteed to be non-zero.
	pub fn timestamp_scale(&self) -> u64 {
		self.timestamp_scale
	}

	/// Duration of the segment
	///
	/// Stored in the file as a float in timestamp-scale units; converted to
	/// nanoseconds at parse time.
	pub fn duration(&self) -> Option<Duration> {
		self.duration
	}

	/// The date and time the segment was created
	///
	/// Expressed in nanoseconds since 2001-01-01T00:00:00 UTC (the Matroska epoch),
	/// and may be negative for earlier dates.
	pub fn date_utc(&self) -> Option<i64> {
		self.date_utc
	}
}

/// The type of a [`TrackInfo`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrackType {
	/// A video track
	Video,
	/// An audio track
	Audio,
	/// A subtitle track
	Subtitle,
	/// Any other track type, preserved verbatim
	Other(u64),
}

impl TrackType {
	pub(crate) fn from_raw(value: u64) -> Self {
		match value {
			1 => TrackType::Video,
			2 => TrackType::Audio,
			17 => TrackType::Subtitle,
			other => TrackType::Other(other),
		}
	}
}

/// The compression applied to a track's block data
///
/// oska reports compression, it does not undo it; callers feed
/// [`Compression::settings`] to their codec layer as needed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
	/// zlib (RFC 1950)
	Zlib,
	/// bzip2
	Bzip2,
	/// LZO 1x
	Lzo1x,
	/// Header stripping: the settings bytes must be prepended to each frame
	HeaderStripping,
	/// Any other method, preserved verbatim
	Other(u64),
}

impl CompressionMethod {
	pub(crate) fn from_raw(value: u64) -> Self {
		match value {
			0 => CompressionMethod::Zlib,
			1 => CompressionMethod::Bzip2,
			2 => CompressionMethod::Lzo1x,
			3 => CompressionMethod::HeaderStripping,
			other => CompressionMethod::Other(other),
		}
	}
}

/// A track's `ContentCompression` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compression {
	pub(crate) method: CompressionMethod,
	pub(crate) settings: Option<Vec<u8>>,
}

impl Compression {
	/// The compression method
	pub fn method(&self) -> CompressionMethod {
		self.method
	}

	/// Method-private settings (the stripped header bytes for
	/// [`CompressionMethod::HeaderStripping`])
	pub fn settings(&self) -> Option<&[u8]> {
		self.settings.as_deref()
	}
}

/// Chromaticity coordinates and luminance of the mastering display
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MasteringMetadata {
	pub(crate) primary_r_chromaticity_x: Option<f64>,
	pub(crate) primary_r_chromaticity_y: Option<f64>,
	pub(crate) primary_g_chromaticity_x: Option<f64>,
	pub(crate) primary_g_chromaticity_y: Option<f64>,
	pub(crate) primary_b_chromaticity_x: Option<f64>,
	pub(crate) primary_b_chromaticity_y: Option<f64>,
	pub(crate) white_point_chromaticity_x: Option<f64>,
	pub(crate) white_point_chromaticity_y: Option<f64>,
	pub(crate) luminance_max: Option<f64>,
	pub(crate) luminance_min: Option<f64>,
}

impl MasteringMetadata {
	/// Red X chromaticity coordinate (CIE 1931)
	pub fn primary_r_chromaticity_x(&self) -> Option<f64> {
		self.primary_r_chromaticity_x
	}

	/// Red Y chromaticity coordinate (CIE 1931)
	pub fn primary_r_chromaticity_y(&self) -> Option<f64> {
		self.primary_r_chromaticity_y
	}

	/// Green X chromaticity coordinate (CIE 1931)
	pub fn primary_g_chromaticity_x(&self) -> Option<f64> {
		self.primary_g_chromaticity_x
	}

	/// Green Y chromaticity coordinate (CIE 1931)
	pub fn primary_g_chromaticity_y(&self) -> Option<f64> {
		self.primary_g_chromaticity_y
	}

	/// Blue X chromaticity coordinate (CIE 1931)
	pub fn primary_b_chromaticity_x(&self) -> Option<f64> {
		self.primary_b_chromaticity_x
	}

	/// Blue Y chromaticity coordinate (CIE 1931)
	pub fn primary_b_chromaticity_y(&self) -> Option<f64> {
		self.primary_b_chromaticity_y
	}

	/// White point X chromaticity coordinate (CIE 1931)
	pub fn white_point_chromaticity_x(&self) -> Option<f64> {
		self.white_point_chromaticity_x
	}

	/// White point Y chromaticity coordinate (CIE 1931)
	pub fn white_point_chromaticity_y(&self) -> Option<f64> {
		self.white_point_chromaticity_y
	}

	/// Maximum luminance, in cd/m²
	pub fn luminance_max(&self) -> Option<f64> {
		self.luminance_max
	}

	/// Minimum luminance, in cd/m²
	pub fn luminance_min(&self) -> Option<f64> {
		self.luminance_min
	}
}

/// Colour information for a video track
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Colour {
	pub(crate) matrix_coefficients: Option<u64>,
	pub(crate) bits_per_channel: Option<u64>,
	pub(crate) range: Option<u64>,
	pub(crate) transfer_characteristics: Option<u64>,
	pub(crate) primaries: Option<u64>,
	pub(crate) max_cll: Option<u64>,
	pub(crate) max_fall: Option<u64>,
	pub(crate) mastering_metadata: Option<MasteringMetadata>,
}

impl Colour {
	/// Matrix coefficients (ITU-T H.273)
	pub fn matrix_coefficients(&self) -> Option<u64> {
		self.matrix_coefficients
	}

	/// Number of decoded bits per channel
	pub fn bits_per_channel(&self) -> Option<u64> {
		self.bits_per_channel
	}

	/// Clipping of colour ranges (0 unspecified, 1 broadcast, 2 full, 3 defined by matrix/transfer)
	pub fn range(&self) -> Option<u64> {
		self.range
	}

	/// Transfer characteristics (ITU-T H.273)
	pub fn transfer_characteristics(&self) -> Option<u64> {
		self.transfer_characteristics
	}

	/// Colour primaries (ITU-T H.273)
	pub fn primaries(&self) -> Option<u64> {
		self.primaries
	}

	/// Maximum content light level, in cd/m²
	pub fn max_cll(&self) -> Option<u64> {
		self.max_cll
	}

	/// Maximum frame-average light level, in cd/m²
	pub fn max_fall(&self) -> Option<u64> {
		self.max_fall
	}

	/// SMPTE 2086 mastering data
	pub fn mastering_metadata(&self) -> Option<&MasteringMetadata> {
		self.mastering_metadata.as_ref()
	}
}

/// Video-specific settings of a track
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoTrack {
	pub(crate) pixel_width: u64,
	pub(crate) pixel_height: u64,
	pub(crate) display_width: u64,
	pub(crate) display_height: u64,
	pub(crate) interlaced: u64,
	pub(crate) colour: Option<Colour>,
}

impl VideoTrack {
	/// Width of the encoded frames, in pixels
	pub fn pixel_width(&self) -> u64 {
		self.pixel_width
	}

	/// Height of the encoded frames, in pixels
	pub fn pixel_height(&self) -> u64 {
		self.pixel_height
	}

	/// Width at which the frames should be displayed
	///
	/// Falls back to [`Self::pixel_width`] when the file declares none.
	pub fn display_width(&self) -> u64 {
		self.display_width
	}

	/// Height at which the frames should be displayed
	///
	/// Falls back to [`Self::pixel_height`] when the file declares none.
	pub fn display_height(&self) -> u64 {
		self.display_height
	}

	/// Interlacing status (0 undetermined, 1 interlaced, 2 progressive)
	pub fn interlaced(&self) -> u64 {
		self.interlaced
	}

	/// Colour information, when present
	pub fn colour(&self) -> Option<&Colour> {
		self.colour.as_ref()
	}
}

/// Audio-specific settings of a track
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
	pub(crate) sampling_frequency: f64,
	pub(crate) output_sampling_frequency: f64,
	pub(crate) channels: u64,
	pub(crate) bit_depth: Option<u64>,
}

impl Default for AudioTrack {
	fn default() -> Self {
		Self {
			sampling_frequency: 8000.0,
			output_sampling_frequency: 0.0,
			channels: 1,
			bit_depth: None,
		}
	}
}

impl AudioTrack {
	/// Sampling frequency, in Hz
	pub fn sampling_frequency(&self) -> f64 {
		self.sampling_frequency
	}

	/// Real output sampling frequency, in Hz (e.g. after SBR expansion)
	///
	/// Falls back to [`Self::sampling_frequency`] when the file declares none.
	pub fn output_sampling_frequency(&self) -> f64 {
		self.output_sampling_frequency
	}

	/// Number of channels
	pub fn channels(&self) -> u64 {
		self.channels
	}

	/// Bits per sample, mostly used for PCM
	pub fn bit_depth(&self) -> Option<u64> {
		self.bit_depth
	}
}

/// A single `TrackEntry`
///
/// Tracks are sorted ascending by [`Self::number`] after parsing, regardless of
/// their order in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
	pub(crate) number: u64,
	pub(crate) uid: u64,
	pub(crate) track_type: TrackType,
	pub(crate) enabled: bool,
	pub(crate) default: bool,
	pub(crate) forced: bool,
	pub(crate) lacing: bool,
	pub(crate) decode_all: bool,
	pub(crate) default_duration: u64,
	pub(crate) codec_delay: u64,
	pub(crate) seek_pre_roll: u64,
	pub(crate) timestamp_scale: f64,
	pub(crate) min_cache: u64,
	pub(crate) max_cache: u64,
	pub(crate) name: Option<String>,
	pub(crate) codec_id: String,
	pub(crate) codec_name: Option<String>,
	pub(crate) codec_private: Option<Vec<u8>>,
	pub(crate) language: String,
	pub(crate) language_ietf: Option<String>,
	pub(crate) compression: Option<Compression>,
	pub(crate) encrypted: bool,
	pub(crate) video: Option<VideoTrack>,
	pub(crate) audio: Option<AudioTrack>,
}

impl Default for TrackInfo {
	fn default() -> Self {
		Self {
			number: 0,
			uid: 0,
			track_type: TrackType::Other(0),
			enabled: true,
			default: true,
			forced: false,
			lacing: true,
			decode_all: false,
			default_duration: 0,
			codec_delay: 0,
			seek_pre_roll: 0,
			timestamp_scale: 1.0,
			min_cache: 0,
			max_cache: 0,
			name: None,
			codec_id: String::new(),
			codec_name: None,
			codec_private: None,
			language: String::from("eng"),
			language_ietf: None,
			compression: None,
			encrypted: false,
			video: None,
			audio: None,
		}
	}
}

impl TrackInfo {
	/// The track number blocks refer to, unique within the segment (1-255)
	pub fn number(&self) -> u64 {
		self.number
	}

	/// A unique ID identifying the track, stable across remuxes
	pub fn uid(&self) -> u64 {
		self.uid
	}

	/// The type of the track
	pub fn track_type(&self) -> TrackType {
		self.track_type
	}

	/// Whether the track is usable
	pub fn enabled(&self) -> bool {
		self.enabled
	}

	/// Whether the track is eligible for automatic selection
	pub fn default(&self) -> bool {
		self.default
	}

	/// Whether the track must be played (e.g. forced subtitles)
	pub fn forced(&self) -> bool {
		self.forced
	}

	/// Whether blocks of this track may use lacing
	pub fn lacing(&self) -> bool {
		self.lacing
	}

	/// Whether the codec can decode damaged data
	pub fn decode_all(&self) -> bool {
		self.decode_all
	}

	/// Duration of each frame, in nanoseconds (0 when unknown)
	pub fn default_duration(&self) -> u64 {
		self.default_duration
	}

	/// Codec-built-in delay, in nanoseconds
	pub fn codec_delay(&self) -> u64 {
		self.codec_delay
	}

	/// Amount to pre-roll after a seek, in nanoseconds
	pub fn seek_pre_roll(&self) -> u64 {
		self.seek_pre_roll
	}

	/// The scale to apply to this track's timestamps (historical, normally `1.0`)
	pub fn timestamp_scale(&self) -> f64 {
		self.timestamp_scale
	}

	/// Minimum number of frames a player should be able to cache
	pub fn min_cache(&self) -> u64 {
		self.min_cache
	}

	/// Maximum number of frames a player should be able to cache
	pub fn max_cache(&self) -> u64 {
		self.max_cache
	}

	/// A human-readable track name
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// An ID corresponding to the codec, e.g. "V_MPEG4/ISO/AVC"
	pub fn codec_id(&self) -> &str {
		&self.codec_id
	}

	/// A human-readable codec name
	pub fn codec_name(&self) -> Option<&str> {
		self.codec_name.as_deref()
	}

	/// Private data for the codec, e.g. the AVC decoder configuration record
	pub fn codec_private(&self) -> Option<&[u8]> {
		self.codec_private.as_deref()
	}

	/// The track's language, in ISO 639-2 form
	///
	/// Defaults to "eng"; a stored language shorter than 3 bytes is ignored in
	/// favor of the default.
	pub fn language(&self) -> &str {
		&self.language
	}

	/// The track's language, in BCP 47 form (takes precedence when present)
	pub fn language_ietf(&self) -> Option<&str> {
		self.language_ietf.as_deref()
	}

	/// The compression applied to this track's block data, when any
	pub fn compression(&self) -> Option<&Compression> {
		self.compression.as_ref()
	}

	/// Whether the track's content is encrypted
	///
	/// Encryption is reported, never handled; packets of such tracks carry the
	/// stored (encrypted) bytes.
	pub fn encrypted(&self) -> bool {
		self.encrypted
	}

	/// Video-specific settings, when [`Self::track_type`] is [`TrackType::Video`]
	pub fn video(&self) -> Option<&VideoTrack> {
		self.video.as_ref()
	}

	/// Audio-specific settings, when [`Self::track_type`] is [`TrackType::Audio`]
	pub fn audio(&self) -> Option<&AudioTrack> {
		self.audio.as_ref()
	}
}

/// A single string of a [`Chapter`], with its language
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterDisplay {
	pub(crate) string: String,
	pub(crate) language: String,
	pub(crate) country: Option<String>,
}

impl ChapterDisplay {
	/// The chapter's name in [`Self::language`]
	pub fn string(&self) -> &str {
		&self.string
	}

	/// The language of the string, in ISO 639-2 form (defaults to "eng")
	pub fn language(&self) -> &str {
		&self.language
	}

	/// The country this string applies to
	pub fn country(&self) -> Option<&str> {
		self.country.as_deref()
	}
}

/// A single command of a [`ChapterProcess`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterProcessCommand {
	pub(crate) time: u64,
	pub(crate) data: Vec<u8>,
}

impl ChapterProcessCommand {
	/// When the command should be executed (0 during, 1 before, 2 after the chapter)
	pub fn time(&self) -> u64 {
		self.time
	}

	/// The command itself, opaque to oska
	pub fn data(&self) -> &[u8] {
		&self.data
	}
}

/// A process attached to a [`Chapter`]
///
/// Commands are surfaced as opaque data; executing them is a menu-system concern
/// far outside a demuxer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChapterProcess {
	pub(crate) codec_id: u64,
	pub(crate) private: Option<Vec<u8>>,
	pub(crate) commands: Vec<ChapterProcessCommand>,
}

impl ChapterProcess {
	/// The process codec (0 chapter control, 1 DVD menu)
	pub fn codec_id(&self) -> u64 {
		self.codec_id
	}

	/// Codec-private data for the process
	pub fn private(&self) -> Option<&[u8]> {
		self.private.as_deref()
	}

	/// The commands of the process
	pub fn commands(&self) -> &[ChapterProcessCommand] {
		&self.commands
	}
}

/// A chapter, possibly carrying nested sub-chapters
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
	pub(crate) uid: u64,
	pub(crate) time_start: u64,
	pub(crate) time_end: Option<u64>,
	pub(crate) hidden: bool,
	pub(crate) enabled: bool,
	pub(crate) default: bool,
	pub(crate) ordered: bool,
	pub(crate) tracks: Vec<u64>,
	pub(crate) displays: Vec<ChapterDisplay>,
	pub(crate) children: Vec<Chapter>,
	pub(crate) processes: Vec<ChapterProcess>,
	pub(crate) segment_uid: Option<[u8; 16]>,
}

impl Default for Chapter {
	fn default() -> Self {
		Self {
			uid: 0,
			time_start: 0,
			time_end: None,
			hidden: false,
			enabled: true,
			default: false,
			ordered: false,
			tracks: Vec::new(),
			displays: Vec::new(),
			children: Vec::new(),
			processes: Vec::new(),
			segment_uid: None,
		}
	}
}

impl Chapter {
	/// A unique ID identifying the chapter
	pub fn uid(&self) -> u64 {
		self.uid
	}

	/// Start time of the chapter, in nanoseconds
	pub fn time_start(&self) -> u64 {
		self.time_start
	}

	/// End time of the chapter, in nanoseconds
	pub fn time_end(&self) -> Option<u64> {
		self.time_end
	}

	/// Whether the chapter should be hidden from the user
	pub fn hidden(&self) -> bool {
		self.hidden
	}

	/// Whether the chapter's content should be played
	pub fn enabled(&self) -> bool {
		self.enabled
	}

	/// Whether the owning edition is the default one (top-level chapters only)
	pub fn default(&self) -> bool {
		self.default
	}

	/// Whether the owning edition is an ordered one (top-level chapters only)
	pub fn ordered(&self) -> bool {
		self.ordered
	}

	/// The UIDs of the tracks this chapter applies to (empty = all tracks)
	pub fn tracks(&self) -> &[u64] {
		&self.tracks
	}

	/// The chapter's names, one per language
	pub fn displays(&self) -> &[ChapterDisplay] {
		&self.displays
	}

	/// Nested sub-chapters
	pub fn children(&self) -> &[Chapter] {
		&self.children
	}

	/// Processes attached to the chapter
	pub fn processes(&self) -> &[ChapterProcess] {
		&self.processes
	}

	/// The segment this chapter links to, for linked-segments files
	pub fn segment_uid(&self) -> Option<&[u8; 16]> {
		self.segment_uid.as_ref()
	}
}

/// What a [`Tag`] applies to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagTarget {
	pub(crate) target_type: u64,
	pub(crate) uid: u64,
}

impl TagTarget {
	/// The logical level of the target (e.g. 50 = movie, 30 = track)
	pub fn target_type(&self) -> u64 {
		self.target_type
	}

	/// The UID of the element the tag applies to
	///
	/// A UID of 0 means the tag applies to the whole segment.
	pub fn uid(&self) -> u64 {
		self.uid
	}
}

/// A single name/value pair of a [`Tag`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTag {
	pub(crate) name: String,
	pub(crate) value: Option<String>,
	pub(crate) binary: Option<Vec<u8>>,
	pub(crate) language: String,
	pub(crate) default: bool,
}

impl SimpleTag {
	/// The name of the tag, e.g. "TITLE"
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The string value of the tag
	pub fn value(&self) -> Option<&str> {
		self.value.as_deref()
	}

	/// The binary value of the tag
	pub fn binary(&self) -> Option<&[u8]> {
		self.binary.as_deref()
	}

	/// The language of the tag, in ISO 639-2 form (defaults to "eng")
	pub fn language(&self) -> &str {
		&self.language
	}

	/// Whether this is the default/original language of the tag
	pub fn default(&self) -> bool {
		self.default
	}
}

/// A tag: a set of targets and the simple tags that apply to them
///
/// Nested simple tags are flattened into the owning tag; every name remains
/// retrievable, only the nesting is lost.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tag {
	pub(crate) targets: Vec<TagTarget>,
	pub(crate) simple_tags: Vec<SimpleTag>,
}

impl Tag {
	/// What the tag applies to (empty = the whole segment)
	pub fn targets(&self) -> &[TagTarget] {
		&self.targets
	}

	/// The name/value pairs of the tag
	pub fn simple_tags(&self) -> &[SimpleTag] {
		&self.simple_tags
	}
}

/// A file attached to the segment (fonts, cover art, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
	pub(crate) name: String,
	pub(crate) description: Option<String>,
	pub(crate) mime_type: String,
	pub(crate) uid: u64,
	pub(crate) data: Vec<u8>,
	pub(crate) position: u64,
}

impl Attachment {
	/// The attachment's filename
	pub fn name(&self) -> &str {
		&self.name
	}

	/// A human-friendly description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// The attachment's media type
	pub fn mime_type(&self) -> &str {
		&self.mime_type
	}

	/// A unique ID identifying the attachment
	pub fn uid(&self) -> u64 {
		self.uid
	}

	/// The attachment's content
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// The length of the content, in bytes
	pub fn length(&self) -> u64 {
		self.data.len() as u64
	}

	/// The absolute byte offset of the content within the byte source
	pub fn position(&self) -> u64 {
		self.position
	}
}

/// An index entry mapping a timestamp to a cluster position
///
/// The cue list is sorted ascending by [`Self::time`] after parsing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cue {
	pub(crate) time: u64,
	pub(crate) duration: Option<u64>,
	pub(crate) track: u64,
	pub(crate) position: u64,
	pub(crate) relative_position: Option<u64>,
	pub(crate) block: Option<u64>,
}

impl Cue {
	/// The timestamp the entry points at, in nanoseconds
	pub fn time(&self) -> u64 {
		self.time
	}

	/// Duration of the block, in nanoseconds
	pub fn duration(&self) -> Option<u64> {
		self.duration
	}

	/// The track the entry applies to
	pub fn track(&self) -> u64 {
		self.track
	}

	/// The segment-relative byte offset of the cluster containing the block
	pub fn position(&self) -> u64 {
		self.position
	}

	/// The byte offset of the block inside its cluster
	pub fn relative_position(&self) -> Option<u64> {
		self.relative_position
	}

	/// The block's number within its cluster (1-based)
	pub fn block(&self) -> Option<u64> {
		self.block
	}
}
