#![allow(missing_docs)]

mod util;

use util::{
	cluster, cue_point, ebml_header, element, element_unknown_size, id_bytes, info_with_title,
	segment, simple_block, size_vint, track_entry, tracks, uint, void,
};

use oska::config::{ParseOptions, ParsingMode};
use oska::error::ErrorKind;
use oska::io::ReadOnlySource;
use oska::{MatroskaDemuxer, Packet};

use std::io::Cursor;

fn minimal_matroska() -> Vec<u8> {
	[
		ebml_header("matroska"),
		segment(
			&[
				info_with_title("Test Title"),
				tracks(&track_entry(1, 1, "V_TEST")),
				cluster(0, &simple_block(1, 0, 0x80, b"frame")),
			]
			.concat(),
		),
	]
	.concat()
}

#[test_log::test]
fn minimal_file() {
	let file = minimal_matroska();
	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	let info = demuxer.file_info().expect("Info element should be parsed");
	assert_eq!(info.title(), Some("Test Title"));
	assert_eq!(info.timestamp_scale(), 1_000_000);

	assert_eq!(demuxer.num_tracks(), 1);
	let track = demuxer.track_info(0).unwrap();
	assert_eq!(track.number(), 1);
	assert_eq!(track.codec_id(), "V_TEST");
	assert_eq!(track.track_type(), oska::TrackType::Video);

	// Defaults hold for everything the file left unsaid
	assert!(track.enabled());
	assert!(track.default());
	assert!(!track.forced());
	assert!(track.lacing());
	assert_eq!(track.language(), "eng");

	let packet = demuxer.read_packet().unwrap().expect("one media packet");
	assert_eq!(packet.track, 1);
	assert_eq!(packet.start_time, 0);
	assert_eq!(packet.end_time, 0);
	assert_eq!(packet.data, b"frame");
	assert!(packet.is_keyframe());

	assert!(demuxer.read_packet().unwrap().is_none());
}

#[test_log::test]
fn webm_doc_type_is_accepted() {
	let file = [
		ebml_header("webm"),
		segment(&cluster(0, &simple_block(1, 0, 0x80, b"x"))),
	]
	.concat();

	let demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();
	assert_eq!(
		demuxer.ebml_header().doc_type(),
		oska::DocumentType::Webm
	);
}

#[test_log::test]
fn non_matroska_doc_type_is_rejected() {
	let file = [
		ebml_header("otherdoc"),
		segment(&cluster(0, &simple_block(1, 0, 0x80, b"x"))),
	]
	.concat();

	let err = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::BadDocType(doc_type) if doc_type == "otherdoc"));
}

// Builds a segment whose first cluster sits at segment-relative offset 100 and the
// second at offset 200, indexed by two (deliberately unsorted) cue points.
fn file_with_cues() -> Vec<u8> {
	let mut children = [
		info_with_title("T"),
		tracks(&track_entry(1, 1, "V_TEST")),
		element(
			0x1C53_BB6B,
			&[cue_point(2000, 1, 200), cue_point(1000, 1, 100)].concat(),
		),
	]
	.concat();

	assert!(children.len() < 100);
	children.extend(void(100 - children.len()));
	children.extend(cluster(1000, &simple_block(1, 0, 0x80, b"first")));

	assert!(children.len() < 200);
	children.extend(void(200 - children.len()));
	children.extend(cluster(2000, &simple_block(1, 0, 0x80, b"second")));

	[ebml_header("matroska"), segment(&children)].concat()
}

#[test_log::test]
fn cues_are_sorted_by_time() {
	let demuxer =
		MatroskaDemuxer::new(Cursor::new(file_with_cues()), ParseOptions::new()).unwrap();

	let cues = demuxer.cues();
	assert_eq!(cues.len(), 2);
	assert_eq!(cues[0].time(), 1_000_000_000);
	assert_eq!(cues[0].position(), 100);
	assert_eq!(cues[1].time(), 2_000_000_000);
	assert_eq!(cues[1].position(), 200);
}

#[test_log::test]
fn seek_with_cues() {
	let mut demuxer =
		MatroskaDemuxer::new(Cursor::new(file_with_cues()), ParseOptions::new()).unwrap();

	// 1.5s falls between the two cue points; the earlier one wins
	demuxer.seek(1_500_000_000).unwrap();
	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"first");
	assert_eq!(packet.start_time, 1_000_000_000);

	// Past the last cue point, the last one wins
	demuxer.seek(10_000_000_000).unwrap();
	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"second");
	assert_eq!(packet.start_time, 2_000_000_000);

	// Before the first cue point, the first one wins
	demuxer.seek(0).unwrap();
	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"first");
}

#[test_log::test]
fn seek_without_cues_fails() {
	let mut demuxer =
		MatroskaDemuxer::new(Cursor::new(minimal_matroska()), ParseOptions::new()).unwrap();

	let err = demuxer.seek(0).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NoCues));
}

#[test_log::test]
fn seek_in_streaming_mode_fails() {
	let mut demuxer = MatroskaDemuxer::new(
		Cursor::new(file_with_cues()),
		ParseOptions::new().streaming(true),
	)
	.unwrap();

	let err = demuxer.seek(1_500_000_000).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SeekUnsupported));
}

#[test_log::test]
fn track_mask_filters_packets() {
	let file = [
		ebml_header("matroska"),
		segment(
			&[
				info_with_title("T"),
				tracks(&[track_entry(1, 1, "V_TEST"), track_entry(2, 2, "A_TEST")].concat()),
				cluster(
					0,
					&[
						simple_block(1, 0, 0x80, b"v0"),
						simple_block(2, 0, 0x80, b"a0"),
						simple_block(1, 10, 0x80, b"v1"),
						simple_block(2, 10, 0x80, b"a1"),
					]
					.concat(),
				),
			]
			.concat(),
		),
	]
	.concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	// Ignore track 2
	demuxer.set_track_mask(0b10);

	let mut seen = Vec::new();
	while let Some(packet) = demuxer.read_packet().unwrap() {
		assert_eq!(packet.track, 1);
		seen.push(packet.data);
	}

	assert_eq!(seen, vec![b"v0".to_vec(), b"v1".to_vec()]);
}

#[test_log::test]
fn full_track_mask_reads_to_eof() {
	let mut demuxer =
		MatroskaDemuxer::new(Cursor::new(minimal_matroska()), ParseOptions::new()).unwrap();

	demuxer.set_track_mask(u64::MAX);
	assert!(demuxer.read_packet().unwrap().is_none());
}

#[test_log::test]
fn xiph_laced_block() {
	// One SimpleBlock, Xiph lacing, three frames of sizes [5, 5, remainder]
	let laced_payload = [&[0x02, 5, 5][..], b"helloworldabcde"].concat();
	let file = [
		ebml_header("matroska"),
		segment(
			&[
				info_with_title("T"),
				tracks(&track_entry(1, 2, "A_TEST")),
				cluster(0, &simple_block(1, 0, 0x80 | 0b010, &laced_payload)),
			]
			.concat(),
		),
	]
	.concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	let mut frames = Vec::new();
	while let Some(packet) = demuxer.read_packet().unwrap() {
		assert_eq!(packet.track, 1);
		assert_eq!(packet.start_time, 0);
		frames.push(packet.data);
	}

	assert_eq!(
		frames,
		vec![b"hello".to_vec(), b"world".to_vec(), b"abcde".to_vec()]
	);
}

#[test_log::test]
fn mid_stream_construction_from_cluster() {
	// The byte source starts directly at a Cluster, no EBML header anywhere
	let file = cluster(5000, &simple_block(1, 0, 0x80, b"resumed"));

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	assert_eq!(demuxer.num_tracks(), 0);
	assert!(demuxer.file_info().is_none());
	assert!(demuxer.chapters().is_empty());
	assert!(demuxer.tags().is_empty());
	assert!(demuxer.cues().is_empty());
	assert!(demuxer.attachments().is_empty());

	// The default millisecond timestamp scale applies
	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"resumed");
	assert_eq!(packet.start_time, 5_000_000_000);

	assert!(demuxer.read_packet().unwrap().is_none());
}

#[test_log::test]
fn mid_stream_construction_inside_cluster() {
	// Resuming even deeper: at a Timestamp child of some long-lost Cluster
	let file = [
		element(0xE7, &uint(7000)),
		simple_block(1, 0, 0x80, b"deep"),
	]
	.concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"deep");
	assert_eq!(packet.start_time, 7_000_000_000);
}

#[test_log::test]
fn block_group_duration_and_keyframe() {
	let block_payload = [&size_vint(1)[..], &0i16.to_be_bytes(), &[0x00], b"gop"].concat();
	let block_group = element(
		0xA0,
		&[element(0xA1, &block_payload), element(0x9B, &uint(40))].concat(),
	);

	let file = [
		ebml_header("matroska"),
		segment(
			&[
				info_with_title("T"),
				tracks(&track_entry(1, 1, "V_TEST")),
				cluster(100, &block_group),
			]
			.concat(),
		),
	]
	.concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.start_time, 100_000_000);
	// BlockDuration is in timestamp-scale units
	assert_eq!(packet.end_time - packet.start_time, 40_000_000);
	// BlockGroup packets count as keyframes by default
	assert!(packet.is_keyframe());
}

#[test_log::test]
fn block_group_reference_block_in_strict_mode() {
	let block_payload = [&size_vint(1)[..], &0i16.to_be_bytes(), &[0x00], b"p"].concat();
	let block_group = element(
		0xA0,
		&[element(0xA1, &block_payload), element(0xFB, &[0x81])].concat(),
	);

	let file = [
		ebml_header("matroska"),
		segment(
			&[
				info_with_title("T"),
				tracks(&track_entry(1, 1, "V_TEST")),
				cluster(0, &block_group),
			]
			.concat(),
		),
	]
	.concat();

	// Default mode: still a keyframe
	let mut demuxer =
		MatroskaDemuxer::new(Cursor::new(file.clone()), ParseOptions::new()).unwrap();
	assert!(demuxer.read_packet().unwrap().unwrap().is_keyframe());

	// Strict mode consults the ReferenceBlock
	let mut demuxer = MatroskaDemuxer::new(
		Cursor::new(file),
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.unwrap();
	assert!(!demuxer.read_packet().unwrap().unwrap().is_keyframe());
}

#[test_log::test]
fn empty_metadata_containers() {
	let file = [
		ebml_header("matroska"),
		segment(
			&[
				element(0x1254_C367, &[]), // Tags
				element(0x1043_A770, &[]), // Chapters
				element(0x1941_A469, &[]), // Attachments
				element(0x1C53_BB6B, &[]), // Cues
			]
			.concat(),
		),
	]
	.concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	assert!(demuxer.tags().is_empty());
	assert!(demuxer.chapters().is_empty());
	assert!(demuxer.attachments().is_empty());
	assert!(demuxer.cues().is_empty());
	assert!(demuxer.read_packet().unwrap().is_none());
}

#[test_log::test]
fn unknown_size_segment_reads_to_clean_eof() {
	let file = [
		ebml_header("matroska"),
		element_unknown_size(
			0x1853_8067,
			&[
				info_with_title("T"),
				tracks(&track_entry(1, 1, "V_TEST")),
				cluster(0, &simple_block(1, 0, 0x80, b"only")),
			]
			.concat(),
		),
	]
	.concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	assert!(demuxer.segment_top_position().is_none());

	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"only");

	// EOF after the last cluster is a clean termination, not an error
	assert!(demuxer.read_packet().unwrap().is_none());
}

#[test_log::test]
fn truncated_segment_is_an_error() {
	// A Segment that promises 50 bytes more than the source holds
	let children = [info_with_title("T"), tracks(&track_entry(1, 1, "V_TEST"))].concat();
	let file = [
		ebml_header("matroska"),
		id_bytes(0x1853_8067),
		size_vint(children.len() as u64 + 50),
		children,
	]
	.concat();

	let err = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::TruncatedSegment));
}

#[test_log::test]
fn selective_parsing_skips_deselected_sections() {
	let file = minimal_matroska();

	let mut demuxer = MatroskaDemuxer::new(
		Cursor::new(file.clone()),
		ParseOptions::new().read_tracks(false),
	)
	.unwrap();
	assert_eq!(demuxer.num_tracks(), 0);
	// Media still flows
	assert!(demuxer.read_packet().unwrap().is_some());

	let demuxer = MatroskaDemuxer::new(
		Cursor::new(file),
		ParseOptions::new().read_info(false),
	)
	.unwrap();
	assert!(demuxer.file_info().is_none());
}

#[test_log::test]
fn unknown_elements_are_skipped() {
	// Unrecognized elements at the top level and inside Info
	let info = element(
		0x1549_A966,
		&[
			element(0x2AD7_B1, &uint(1_000_000)),
			element(0x6699, b"junk"),
			element(0x7BA9, b"Still Here"),
		]
		.concat(),
	);

	let file = [
		ebml_header("matroska"),
		segment(
			&[
				element(0x6699, b"more junk"),
				info,
				tracks(&track_entry(1, 1, "V_TEST")),
				cluster(0, &simple_block(1, 0, 0x80, b"data")),
			]
			.concat(),
		),
	]
	.concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	assert_eq!(demuxer.file_info().unwrap().title(), Some("Still Here"));
	assert_eq!(demuxer.read_packet().unwrap().unwrap().data, b"data");
}

#[test_log::test]
fn trailing_cues_are_rescanned() {
	// The Cues element sits *after* the clusters, where the metadata walk never goes
	let children = [
		info_with_title("T"),
		tracks(&track_entry(1, 1, "V_TEST")),
		cluster(1000, &simple_block(1, 0, 0x80, b"media")),
		element(0x1C53_BB6B, &cue_point(1000, 1, 0)),
	]
	.concat();

	let file = [ebml_header("matroska"), segment(&children)].concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	assert_eq!(demuxer.cues().len(), 1);
	assert_eq!(demuxer.cues()[0].time(), 1_000_000_000);

	// The rescan must not disturb the packet engine's position
	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"media");
}

#[test_log::test]
fn tracks_are_sorted_by_number() {
	// Track 2 is stored before track 1
	let file = [
		ebml_header("matroska"),
		segment(
			&[
				info_with_title("T"),
				tracks(&[track_entry(2, 2, "A_TEST"), track_entry(1, 1, "V_TEST")].concat()),
			]
			.concat(),
		),
	]
	.concat();

	let demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	assert_eq!(demuxer.num_tracks(), 2);
	assert_eq!(demuxer.track_info(0).unwrap().number(), 1);
	assert_eq!(demuxer.track_info(1).unwrap().number(), 2);
	assert!(demuxer.track_info(2).is_none());
}

#[test_log::test]
fn streaming_source_without_seek() {
	// The same file, but behind a reader that can only be drained forwards
	let file = minimal_matroska();
	let source = ReadOnlySource::new(&file[..]);

	let mut demuxer =
		MatroskaDemuxer::new(source, ParseOptions::new().streaming(true)).unwrap();

	assert_eq!(demuxer.num_tracks(), 1);

	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"frame");
	assert!(demuxer.read_packet().unwrap().is_none());
}

#[test_log::test]
fn accessors_are_idempotent() {
	let demuxer =
		MatroskaDemuxer::new(Cursor::new(minimal_matroska()), ParseOptions::new()).unwrap();

	assert_eq!(demuxer.tracks(), demuxer.tracks());
	assert_eq!(demuxer.cues(), demuxer.cues());
	assert_eq!(demuxer.file_info(), demuxer.file_info());
}

#[test_log::test]
fn skip_to_keyframe_requeues_the_keyframe() {
	let file = [
		ebml_header("matroska"),
		segment(
			&[
				info_with_title("T"),
				tracks(&track_entry(1, 1, "V_TEST")),
				cluster(
					0,
					&[
						simple_block(1, 0, 0x00, b"delta0"),
						simple_block(1, 10, 0x00, b"delta1"),
						simple_block(1, 20, 0x80, b"key"),
						simple_block(1, 30, 0x00, b"delta2"),
					]
					.concat(),
				),
			]
			.concat(),
		),
	]
	.concat();

	let mut demuxer = MatroskaDemuxer::new(Cursor::new(file), ParseOptions::new()).unwrap();

	demuxer.skip_to_keyframe().unwrap();

	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"key");
	assert!(packet.is_keyframe());

	// File order continues from there
	let packet = demuxer.read_packet().unwrap().unwrap();
	assert_eq!(packet.data, b"delta2");
}

#[test_log::test]
fn packet_times_never_regress_within_a_block() {
	let mut demuxer =
		MatroskaDemuxer::new(Cursor::new(file_with_cues()), ParseOptions::new()).unwrap();

	let mut packets: Vec<Packet> = Vec::new();
	while let Some(packet) = demuxer.read_packet().unwrap() {
		assert!(packet.end_time >= packet.start_time);
		packets.push(packet);
	}

	assert_eq!(packets.len(), 2);
	assert!(packets[0].start_time <= packets[1].start_time);
}

#[test_log::test]
fn close_returns_the_byte_source() {
	let demuxer =
		MatroskaDemuxer::new(Cursor::new(minimal_matroska()), ParseOptions::new()).unwrap();

	let cursor = demuxer.close();
	assert!(cursor.position() > 0);
}
