//! The element IDs this crate recognizes
//!
//! The set is fixed and exhaustive: any ID outside it is tolerated and skipped,
//! which is what gives the parser its forward compatibility. Values are from the
//! [Matroska element registry](https://www.matroska.org/technical/elements.html).

use crate::ebml::vint::ElementId;

macro_rules! element_ids {
	($($(#[$attr:meta])? $name:ident = $value:literal;)+) => {
		$(
			$(#[$attr])?
			pub(crate) const $name: ElementId = ElementId($value);
		)+
	};
}

element_ids! {
	// EBML header
	EBML = 0x1A45_DFA3;
	EBML_VERSION = 0x4286;
	EBML_READ_VERSION = 0x42F7;
	EBML_MAX_ID_LENGTH = 0x42F2;
	EBML_MAX_SIZE_LENGTH = 0x42F3;
	DOC_TYPE = 0x4282;
	DOC_TYPE_VERSION = 0x4287;
	DOC_TYPE_READ_VERSION = 0x4285;

	// Global elements, valid at any level
	CRC32 = 0xBF;
	VOID = 0xEC;

	// The Root Element that contains all other Top-Level Elements
	SEGMENT = 0x1853_8067;

	// \Segment
	SEEK_HEAD = 0x114D_9B74;
	INFO = 0x1549_A966;
	TRACKS = 0x1654_AE6B;
	CUES = 0x1C53_BB6B;
	CHAPTERS = 0x1043_A770;
	TAGS = 0x1254_C367;
	ATTACHMENTS = 0x1941_A469;
	CLUSTER = 0x1F43_B675;

	// \Segment\Info
	SEGMENT_UID = 0x73A4;
	SEGMENT_FILENAME = 0x7384;
	PREV_UID = 0x3CB9_23;
	PREV_FILENAME = 0x3C83_AB;
	NEXT_UID = 0x3EB9_23;
	NEXT_FILENAME = 0x3E83_BB;
	TIMESTAMP_SCALE = 0x2AD7_B1;
	DURATION = 0x4489;
	DATE_UTC = 0x4461;
	TITLE = 0x7BA9;
	MUXING_APP = 0x4D80;
	WRITING_APP = 0x5741;

	// \Segment\Tracks
	TRACK_ENTRY = 0xAE;

	// \Segment\Tracks\TrackEntry
	TRACK_NUMBER = 0xD7;
	TRACK_UID = 0x73C5;
	TRACK_TYPE = 0x83;
	FLAG_ENABLED = 0xB9;
	FLAG_DEFAULT = 0x88;
	FLAG_FORCED = 0x55AA;
	FLAG_LACING = 0x9C;
	MIN_CACHE = 0x6DE7;
	MAX_CACHE = 0x6DF8;
	DEFAULT_DURATION = 0x23E3_83;
	TRACK_TIMESTAMP_SCALE = 0x2331_4F;
	NAME = 0x536E;
	LANGUAGE = 0x22B5_9C;
	LANGUAGE_BCP47 = 0x22B5_9D;
	CODEC_ID = 0x86;
	CODEC_PRIVATE = 0x63A2;
	CODEC_NAME = 0x2586_88;
	CODEC_DECODE_ALL = 0xAA;
	CODEC_DELAY = 0x56AA;
	SEEK_PRE_ROLL = 0x56BB;
	VIDEO = 0xE0;
	AUDIO = 0xE1;
	CONTENT_ENCODINGS = 0x6D80;

	// \Segment\Tracks\TrackEntry\Video
	FLAG_INTERLACED = 0x9A;
	PIXEL_WIDTH = 0xB0;
	PIXEL_HEIGHT = 0xBA;
	DISPLAY_WIDTH = 0x54B0;
	DISPLAY_HEIGHT = 0x54BA;
	COLOUR = 0x55B0;

	// \Segment\Tracks\TrackEntry\Video\Colour
	MATRIX_COEFFICIENTS = 0x55B1;
	BITS_PER_CHANNEL = 0x55B2;
	RANGE = 0x55B9;
	TRANSFER_CHARACTERISTICS = 0x55BA;
	PRIMARIES = 0x55BB;
	MAX_CLL = 0x55BC;
	MAX_FALL = 0x55BD;
	MASTERING_METADATA = 0x55D0;

	// \Segment\Tracks\TrackEntry\Video\Colour\MasteringMetadata
	PRIMARY_R_CHROMATICITY_X = 0x55D1;
	PRIMARY_R_CHROMATICITY_Y = 0x55D2;
	PRIMARY_G_CHROMATICITY_X = 0x55D3;
	PRIMARY_G_CHROMATICITY_Y = 0x55D4;
	PRIMARY_B_CHROMATICITY_X = 0x55D5;
	PRIMARY_B_CHROMATICITY_Y = 0x55D6;
	WHITE_POINT_CHROMATICITY_X = 0x55D7;
	WHITE_POINT_CHROMATICITY_Y = 0x55D8;
	LUMINANCE_MAX = 0x55D9;
	LUMINANCE_MIN = 0x55DA;

	// \Segment\Tracks\TrackEntry\Audio
	SAMPLING_FREQUENCY = 0xB5;
	OUTPUT_SAMPLING_FREQUENCY = 0x78B5;
	CHANNELS = 0x9F;
	BIT_DEPTH = 0x6264;

	// \Segment\Tracks\TrackEntry\ContentEncodings
	CONTENT_ENCODING = 0x6240;

	// \Segment\Tracks\TrackEntry\ContentEncodings\ContentEncoding
	CONTENT_COMPRESSION = 0x5034;
	CONTENT_ENCRYPTION = 0x5035;

	// \Segment\Tracks\TrackEntry\ContentEncodings\ContentEncoding\ContentCompression
	CONTENT_COMP_ALGO = 0x4254;
	CONTENT_COMP_SETTINGS = 0x4255;

	// \Segment\Cues
	CUE_POINT = 0xBB;

	// \Segment\Cues\CuePoint
	CUE_TIME = 0xB3;
	CUE_TRACK_POSITIONS = 0xB7;

	// \Segment\Cues\CuePoint\CueTrackPositions
	CUE_TRACK = 0xF7;
	CUE_CLUSTER_POSITION = 0xF1;
	CUE_RELATIVE_POSITION = 0xF0;
	CUE_DURATION = 0xB2;
	CUE_BLOCK_NUMBER = 0x5378;

	// \Segment\Chapters
	EDITION_ENTRY = 0x45B9;

	// \Segment\Chapters\EditionEntry
	EDITION_UID = 0x45BC;
	EDITION_FLAG_HIDDEN = 0x45BD;
	EDITION_FLAG_DEFAULT = 0x45DB;
	EDITION_FLAG_ORDERED = 0x45DD;
	CHAPTER_ATOM = 0xB6;

	// \Segment\Chapters\EditionEntry\ChapterAtom
	CHAPTER_UID = 0x73C4;
	CHAPTER_TIME_START = 0x91;
	CHAPTER_TIME_END = 0x92;
	CHAPTER_FLAG_HIDDEN = 0x98;
	CHAPTER_FLAG_ENABLED = 0x4598;
	CHAPTER_SEGMENT_UID = 0x6E67;
	CHAPTER_TRACK = 0x8F;
	CHAPTER_DISPLAY = 0x80;
	CHAP_PROCESS = 0x6944;

	// \Segment\Chapters\EditionEntry\ChapterAtom\ChapterTrack
	CHAPTER_TRACK_UID = 0x89;

	// \Segment\Chapters\EditionEntry\ChapterAtom\ChapterDisplay
	CHAP_STRING = 0x85;
	CHAP_LANGUAGE = 0x437C;
	CHAP_COUNTRY = 0x437E;

	// \Segment\Chapters\EditionEntry\ChapterAtom\ChapProcess
	CHAP_PROCESS_CODEC_ID = 0x6955;
	CHAP_PROCESS_PRIVATE = 0x450D;
	CHAP_PROCESS_COMMAND = 0x6911;

	// \Segment\Chapters\EditionEntry\ChapterAtom\ChapProcess\ChapProcessCommand
	CHAP_PROCESS_TIME = 0x6922;
	CHAP_PROCESS_DATA = 0x6933;

	// \Segment\Tags
	TAG = 0x7373;

	// \Segment\Tags\Tag
	TARGETS = 0x63C0;
	SIMPLE_TAG = 0x67C8;

	// \Segment\Tags\Tag\Targets
	TARGET_TYPE_VALUE = 0x68CA;
	TARGET_TYPE = 0x63CA;
	TAG_TRACK_UID = 0x63C5;
	TAG_EDITION_UID = 0x63C9;
	TAG_CHAPTER_UID = 0x63C4;
	TAG_ATTACHMENT_UID = 0x63C6;

	// \Segment\Tags\Tag\SimpleTag
	TAG_NAME = 0x45A3;
	TAG_LANGUAGE = 0x447A;
	TAG_LANGUAGE_BCP47 = 0x447B;
	TAG_DEFAULT = 0x4484;
	// Some older muxers wrote TagDefault under this ID
	TAG_DEFAULT_BOGUS = 0x44B4;
	TAG_STRING = 0x4487;
	TAG_BINARY = 0x4485;

	// \Segment\Attachments
	ATTACHED_FILE = 0x61A7;

	// \Segment\Attachments\AttachedFile
	FILE_DESCRIPTION = 0x467E;
	FILE_NAME = 0x466E;
	FILE_MIME_TYPE = 0x4660;
	FILE_DATA = 0x465C;
	FILE_UID = 0x46AE;

	// \Segment\Cluster
	TIMESTAMP = 0xE7;
	SIMPLE_BLOCK = 0xA3;
	BLOCK_GROUP = 0xA0;

	// \Segment\Cluster\BlockGroup
	BLOCK = 0xA1;
	BLOCK_DURATION = 0x9B;
	REFERENCE_BLOCK = 0xFB;
}
