//! Canonical layout for HCL sources, in the style of `terraform fmt`.
//!
//! The source is tokenized, split into lines, and every line is rebuilt from its
//! tokens: indentation from bracket nesting, canonical spacing between tokens,
//! then alignment of `=` and trailing comments across consecutive lines.
//! Token bytes are never changed, so the result is stable under reformatting.

use crate::lexer::{Token, TokenKind, UTF8_BOM, lex};

const INDENT_WIDTH: usize = 2;

/// Reformats `src` into canonical layout. Input that cannot be tokenized is
/// returned unchanged.
pub fn format_hcl(src: &[u8]) -> Vec<u8> {
	let Ok(tokens) = lex(src) else {
		return src.to_vec();
	};

	let mut lines = split_lines(src, &tokens);
	apply_indents(&mut lines);
	align_assignments(&mut lines);
	align_comments(&mut lines);

	let mut out = Vec::with_capacity(src.len());
	if src.starts_with(UTF8_BOM) {
		out.extend_from_slice(UTF8_BOM);
	}
	for line in &lines {
		for cell in line.cells() {
			for tok in cell {
				out.resize(out.len() + tok.spaces_before, b' ');
				out.extend_from_slice(tok.bytes);
			}
		}
		out.extend_from_slice(line.newline);
	}
	out
}

// region:    --- Lines

#[derive(Debug)]
struct FmtToken<'a> {
	kind: TokenKind,
	bytes: &'a [u8],
	spaces_before: usize,
}

/// One physical line, split into the cells used for alignment.
#[derive(Debug, Default)]
struct Line<'a> {
	lead: Vec<FmtToken<'a>>,
	/// `=` and the value of a single-line assignment.
	assign: Vec<FmtToken<'a>>,
	/// Trailing comment.
	comment: Vec<FmtToken<'a>>,
	newline: &'a [u8],
}

impl<'a> Line<'a> {
	fn cells(&self) -> [&Vec<FmtToken<'a>>; 3] {
		[&self.lead, &self.assign, &self.comment]
	}

	fn is_blank(&self) -> bool {
		self.lead.is_empty()
	}
}

fn split_lines<'a>(src: &'a [u8], tokens: &[Token]) -> Vec<Line<'a>> {
	let mut lines = Vec::new();
	let mut current: Vec<FmtToken<'a>> = Vec::new();

	for tok in tokens {
		if tok.kind == TokenKind::Newline {
			lines.push(build_line(std::mem::take(&mut current), tok.bytes(src)));
		} else {
			current.push(FmtToken {
				kind: tok.kind,
				bytes: tok.bytes(src),
				spaces_before: 0,
			});
		}
	}
	if !current.is_empty() {
		lines.push(build_line(current, b""));
	}

	lines
}

fn build_line<'a>(mut tokens: Vec<FmtToken<'a>>, newline: &'a [u8]) -> Line<'a> {
	for i in 1..tokens.len() {
		let before = if i >= 2 { Some(tokens[i - 2].kind) } else { None };
		if space_between(before, tokens[i - 1].kind, tokens[i].kind, tokens[i - 1].bytes) {
			tokens[i].spaces_before = 1;
		}
	}

	let mut line = Line {
		newline,
		..Default::default()
	};

	if tokens.len() > 1 && tokens.last().is_some_and(|tok| tok.kind == TokenKind::Comment) {
		line.comment = tokens.split_off(tokens.len() - 1);
	}

	// Only a value that closes all of its brackets on this line can be aligned.
	// A heredoc counts as an opener, its body runs past the line.
	if let Some(eq_idx) = tokens.iter().skip(1).position(|tok| tok.kind == TokenKind::Equal).map(|i| i + 1) {
		let net: isize = tokens[eq_idx..]
			.iter()
			.map(|tok| match tok.kind {
				TokenKind::Heredoc => 1,
				kind => kind.bracket_change(),
			})
			.sum();
		if net == 0 {
			line.assign = tokens.split_off(eq_idx);
		}
	}

	line.lead = tokens;
	line
}

/// Whether a single space goes between `subject` and the following `after` token.
/// `before` is the token preceding `subject`, used to spot unary minus.
fn space_between(before: Option<TokenKind>, subject: TokenKind, after: TokenKind, subject_bytes: &[u8]) -> bool {
	use TokenKind::*;

	match (subject, after) {
		(Dot | DoubleColon, _) | (_, Dot | DoubleColon | Comma | Ellipsis) => false,
		(Ident, OParen | OBrack) => subject_bytes == b"in",
		(CBrack | CParen | Str, OBrack) => false,
		(OBrack | OParen, _) | (_, CBrack | CParen) => false,
		(OBrace, CBrace) => false,
		(Comma, _) => true,
		(Bang, _) => false,
		(Minus, _) => !is_unary_position(before),
		_ => true,
	}
}

fn is_unary_position(before: Option<TokenKind>) -> bool {
	use TokenKind::*;

	match before {
		None => true,
		Some(kind) => matches!(
			kind,
			Op | Minus | Bang | Equal | Comma | Colon | Question | FatArrow | OParen | OBrack | OBrace
		),
	}
}

// endregion: --- Lines

// region:    --- Layout

fn apply_indents(lines: &mut [Line<'_>]) {
	// Each entry is the net bracket count opened by one indenting line.
	let mut indents: Vec<isize> = Vec::new();

	for line in lines.iter_mut() {
		if line.is_blank() {
			continue;
		}

		let net: isize = line
			.lead
			.iter()
			.chain(line.assign.iter())
			.map(|tok| tok.kind.bracket_change())
			.sum();

		// Closers at the start of the line (`}, {`) dedent the line itself.
		let leading_closers = line.lead.iter().take_while(|tok| tok.kind.bracket_change() < 0).count();
		let dedented = (leading_closers > 0).then(|| level_after_closing(&indents, leading_closers));

		if net > 0 {
			line.lead[0].spaces_before = INDENT_WIDTH * dedented.unwrap_or(indents.len());
			indents.push(net);
			continue;
		}

		let mut closed = -net;
		while closed > 0 {
			let Some(last) = indents.last_mut() else {
				break;
			};
			if closed >= *last {
				closed -= *last;
				indents.pop();
			} else {
				*last -= closed;
				closed = 0;
			}
		}
		line.lead[0].spaces_before = INDENT_WIDTH * dedented.unwrap_or(indents.len());
	}
}

/// Indent level once `closers` brackets are closed. Closing part of an
/// indenting line's openers already leaves its level.
fn level_after_closing(indents: &[isize], closers: usize) -> usize {
	let mut level = indents.len();
	let mut closed = closers as isize;
	while closed > 0 && level > 0 {
		closed -= indents[level - 1];
		level -= 1;
	}
	level
}

fn align_assignments(lines: &mut [Line<'_>]) {
	let mut chain_start: Option<usize> = None;

	for i in 0..=lines.len() {
		let in_chain = lines.get(i).is_some_and(|line| !line.assign.is_empty());
		match (in_chain, chain_start) {
			(true, None) => chain_start = Some(i),
			(false, Some(start)) => {
				let chain = &mut lines[start..i];
				let max = chain.iter().map(|line| columns(&line.lead)).max().unwrap_or(0);
				for line in chain {
					let pad = max - columns(&line.lead) + 1;
					line.assign[0].spaces_before = pad;
				}
				chain_start = None;
			}
			_ => {}
		}
	}
}

fn align_comments(lines: &mut [Line<'_>]) {
	let mut chain_start: Option<usize> = None;

	for i in 0..=lines.len() {
		let in_chain = lines.get(i).is_some_and(|line| !line.comment.is_empty());
		match (in_chain, chain_start) {
			(true, None) => chain_start = Some(i),
			(false, Some(start)) => {
				let chain = &mut lines[start..i];
				let width = |line: &Line<'_>| columns(&line.lead) + columns(&line.assign);
				let max = chain.iter().map(width).max().unwrap_or(0);
				for line in chain {
					let pad = max - width(&*line) + 1;
					line.comment[0].spaces_before = pad;
				}
				chain_start = None;
			}
			_ => {}
		}
	}
}

/// Display width of a cell, counting UTF-8 characters rather than bytes.
fn columns(cell: &[FmtToken<'_>]) -> usize {
	cell.iter()
		.map(|tok| tok.spaces_before + tok.bytes.iter().filter(|b| (**b & 0xC0) != 0x80).count())
		.sum()
}

// endregion: --- Layout

// region:    --- Tests


// endregion: --- Tests
