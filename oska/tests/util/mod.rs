//! A minimal EBML writer, enough to assemble test files from literal values

/// Encode an element ID as stored: its marker-carrying bytes, minimal length
pub(crate) fn id_bytes(id: u64) -> Vec<u8> {
	assert_ne!(id, 0);

	let bytes = id.to_be_bytes();
	let first = bytes.iter().position(|b| *b != 0).unwrap();
	bytes[first..].to_vec()
}

/// Encode a size (or any value-mode VInt) with the smallest usable octet length
pub(crate) fn size_vint(value: u64) -> Vec<u8> {
	let mut length = 1u32;
	while u128::from(value) >= (1u128 << (7 * length)) - 1 {
		length += 1;
	}

	let mut out = vec![0u8; length as usize];
	let mut v = value;
	for slot in out.iter_mut().rev() {
		*slot = (v & 0xFF) as u8;
		v >>= 8;
	}

	out[0] |= 1 << (8 - length);
	out
}

/// A full element: ID, size, payload
pub(crate) fn element(id: u64, payload: &[u8]) -> Vec<u8> {
	[id_bytes(id), size_vint(payload.len() as u64), payload.to_vec()].concat()
}

/// An element with the 1-octet unknown-size marker instead of a real size
pub(crate) fn element_unknown_size(id: u64, payload: &[u8]) -> Vec<u8> {
	[id_bytes(id), vec![0xFF], payload.to_vec()].concat()
}

/// An unsigned integer payload, minimal length (one octet for zero)
pub(crate) fn uint(value: u64) -> Vec<u8> {
	let bytes = value.to_be_bytes();
	let first = bytes.iter().position(|b| *b != 0).unwrap_or(7);
	bytes[first..].to_vec()
}

/// A Void element occupying exactly `total` bytes
pub(crate) fn void(total: usize) -> Vec<u8> {
	assert!((2..=128).contains(&total), "1-octet-size Void only");
	element(0xEC, &vec![0u8; total - 2])
}

/// An EBML header declaring the given DocType
pub(crate) fn ebml_header(doc_type: &str) -> Vec<u8> {
	element(
		0x1A45_DFA3,
		&[
			element(0x4286, &uint(1)),
			element(0x42F7, &uint(1)),
			element(0x42F2, &uint(4)),
			element(0x42F3, &uint(8)),
			element(0x4282, doc_type.as_bytes()),
			element(0x4287, &uint(4)),
			element(0x4285, &uint(2)),
		]
		.concat(),
	)
}

/// A Segment with a declared size
pub(crate) fn segment(children: &[u8]) -> Vec<u8> {
	element(0x1853_8067, children)
}

/// An Info element with a millisecond timestamp scale and the given title
pub(crate) fn info_with_title(title: &str) -> Vec<u8> {
	element(
		0x1549_A966,
		&[
			element(0x2AD7_B1, &uint(1_000_000)),
			element(0x7BA9, title.as_bytes()),
		]
		.concat(),
	)
}

/// A TrackEntry of the given number/type/codec
pub(crate) fn track_entry(number: u64, track_type: u64, codec_id: &str) -> Vec<u8> {
	element(
		0xAE,
		&[
			element(0xD7, &uint(number)),
			element(0x83, &uint(track_type)),
			element(0x86, codec_id.as_bytes()),
		]
		.concat(),
	)
}

/// A Tracks element
pub(crate) fn tracks(entries: &[u8]) -> Vec<u8> {
	element(0x1654_AE6B, entries)
}

/// A SimpleBlock: track VInt, relative timestamp, flags, payload
pub(crate) fn simple_block(track: u64, rel: i16, flags: u8, payload: &[u8]) -> Vec<u8> {
	element(
		0xA3,
		&[
			size_vint(track),
			rel.to_be_bytes().to_vec(),
			vec![flags],
			payload.to_vec(),
		]
		.concat(),
	)
}

/// A Cluster with the given base timestamp and children
pub(crate) fn cluster(timestamp: u64, children: &[u8]) -> Vec<u8> {
	element(
		0x1F43_B675,
		&[element(0xE7, &uint(timestamp)), children.to_vec()].concat(),
	)
}

/// A CuePoint with one CueTrackPositions
pub(crate) fn cue_point(time: u64, track: u64, cluster_position: u64) -> Vec<u8> {
	element(
		0xBB,
		&[
			element(0xB3, &uint(time)),
			element(
				0xB7,
				&[
					element(0xF7, &uint(track)),
					element(0xF1, &uint(cluster_position)),
				]
				.concat(),
			),
		]
		.concat(),
	)
}
