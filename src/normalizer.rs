use once_cell::sync::Lazy;
use regex::bytes::Regex;

static RE_CRLF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n").unwrap());
static RE_BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapses every run of blank lines to a single blank line and ends the content
/// with exactly one line terminator.
///
/// Works on LF internally. If `content` holds any CRLF, the whole output uses CRLF.
pub fn normalize_blank_lines(content: &[u8]) -> Vec<u8> {
	let crlf = RE_CRLF.is_match(content);

	let lf = RE_CRLF.replace_all(content, &b"\n"[..]);
	let collapsed = RE_BLANK_RUN.replace_all(&lf, &b"\n\n"[..]);

	let kept = collapsed.iter().rposition(|b| *b != b'\n').map_or(0, |idx| idx + 1);
	let mut out = collapsed[..kept].to_vec();
	out.push(b'\n');

	if crlf { to_crlf(&out) } else { out }
}

// region:    --- Support

fn to_crlf(lf: &[u8]) -> Vec<u8> {
	let newlines = lf.iter().filter(|b| **b == b'\n').count();
	let mut out = Vec::with_capacity(lf.len() + newlines);
	for b in lf {
		if *b == b'\n' {
			out.push(b'\r');
		}
		out.push(*b);
	}
	out
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
