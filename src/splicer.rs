//! Byte-exact removal of located blocks.
//!
//! Every range is first widened on the source (indent before the block, one line
//! terminator after it), then all widened intervals are dropped in a single
//! forward copy. Bytes outside the widened intervals are copied untouched.

use crate::BlockRange;

/// Removes every `ranges` entry from `src`, together with the spaces/tabs that
/// indent it and at most one line terminator (`\n` or `\r\n`) right after it.
///
/// `ranges` must be non-overlapping. With no ranges the output equals `src`.
pub fn splice(src: &[u8], ranges: &[BlockRange]) -> Vec<u8> {
	if ranges.is_empty() {
		return src.to_vec();
	}

	let mut cuts: Vec<BlockRange> = ranges.iter().map(|range| widen(src, *range)).collect();
	cuts.sort_unstable();

	let removed: usize = cuts.iter().map(BlockRange::len).sum();
	let mut out = Vec::with_capacity(src.len().saturating_sub(removed));
	let mut cursor = 0;

	for cut in cuts {
		// Widening can make neighbors touch; never copy backwards.
		let start = cut.start.max(cursor);
		out.extend_from_slice(&src[cursor..start]);
		cursor = cursor.max(cut.end);
	}
	out.extend_from_slice(&src[cursor..]);

	out
}

/// Extends a block range over its same-line indent and one trailing terminator.
pub fn widen(src: &[u8], range: BlockRange) -> BlockRange {
	let mut start = range.start.min(src.len());
	let mut end = range.end.min(src.len());

	while start > 0 && matches!(src[start - 1], b' ' | b'\t') {
		start -= 1;
	}

	if src[end..].starts_with(b"\r\n") {
		end += 2;
	} else if src[end..].starts_with(b"\n") {
		end += 1;
	}

	BlockRange::new(start, end)
}

// region:    --- Tests


// endregion: --- Tests
