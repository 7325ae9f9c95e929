//! Tokenizer for the HCL native syntax used by Terraform `.tf` files.
//!
//! Works on raw bytes so that offsets line up with the source buffer. Whitespace
//! (spaces and tabs) is dropped, newlines are kept as tokens, and composite
//! constructs (template strings, heredocs, comments) come out as single tokens
//! whose bytes are copied verbatim by the formatter.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	Ident,
	Number,
	/// Quoted template string, including its quotes and interpolations.
	Str,
	/// Heredoc from the `<<` introducer through the closing marker (newline excluded).
	Heredoc,
	Comment,
	/// `\n` or `\r\n`.
	Newline,

	OBrace,
	CBrace,
	OBrack,
	CBrack,
	OParen,
	CParen,

	Equal,
	Comma,
	Dot,
	Ellipsis,
	Colon,
	/// `::` in provider function names (`provider::aws::arn_parse`).
	DoubleColon,
	Question,
	FatArrow,
	Bang,
	Minus,
	/// Any other binary operator (`+ * / % == != < > <= >= && ||`).
	Op,
}

impl TokenKind {
	/// +1 for an opening bracket, -1 for a closing one, 0 otherwise.
	pub fn bracket_change(self) -> isize {
		match self {
			TokenKind::OBrace | TokenKind::OBrack | TokenKind::OParen => 1,
			TokenKind::CBrace | TokenKind::CBrack | TokenKind::CParen => -1,
			_ => 0,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
	pub kind: TokenKind,
	pub start: usize,
	pub end: usize,
}

impl Token {
	pub fn bytes<'a>(&self, src: &'a [u8]) -> &'a [u8] {
		&src[self.start..self.end]
	}
}

/// A located syntax problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub line: usize,
	pub column: usize,
	pub message: String,
}

impl Diagnostic {
	pub fn at(src: &[u8], offset: usize, message: impl Into<String>) -> Self {
		let offset = offset.min(src.len());
		let before = &src[..offset];
		let line = before.iter().filter(|b| **b == b'\n').count() + 1;
		let line_start = before.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
		Self {
			line,
			column: offset - line_start + 1,
			message: message.into(),
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}: {}", self.line, self.column, self.message)
	}
}

impl std::error::Error for Diagnostic {}

pub type LexResult<T> = core::result::Result<T, Diagnostic>;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Splits `src` into tokens. Fails on the first byte that cannot start a token
/// or on an unterminated string, heredoc, or block comment.
///
/// A leading byte order mark is skipped and never part of a token.
pub fn lex(src: &[u8]) -> LexResult<Vec<Token>> {
	let mut tokens = Vec::new();
	let mut i = if src.starts_with(UTF8_BOM) { UTF8_BOM.len() } else { 0 };

	while i < src.len() {
		let start = i;
		let next = src.get(i + 1).copied();

		let kind = match src[i] {
			b' ' | b'\t' => {
				i += 1;
				continue;
			}
			b'\n' => {
				i += 1;
				TokenKind::Newline
			}
			b'\r' if next == Some(b'\n') => {
				i += 2;
				TokenKind::Newline
			}
			b'#' => {
				i = line_comment_end(src, i);
				TokenKind::Comment
			}
			b'/' if next == Some(b'/') => {
				i = line_comment_end(src, i);
				TokenKind::Comment
			}
			b'/' if next == Some(b'*') => {
				i = block_comment_end(src, i)?;
				TokenKind::Comment
			}
			b'"' => {
				i = scan_quoted(src, i)?;
				TokenKind::Str
			}
			b'<' if next == Some(b'<') => {
				i = scan_heredoc(src, i)?;
				TokenKind::Heredoc
			}
			b'0'..=b'9' => {
				i = scan_number(src, i);
				TokenKind::Number
			}
			b if is_ident_start(b) => {
				i += 1;
				while i < src.len() && is_ident_continue(src[i]) {
					i += 1;
				}
				TokenKind::Ident
			}
			b'{' => single(&mut i, TokenKind::OBrace),
			b'}' => single(&mut i, TokenKind::CBrace),
			b'[' => single(&mut i, TokenKind::OBrack),
			b']' => single(&mut i, TokenKind::CBrack),
			b'(' => single(&mut i, TokenKind::OParen),
			b')' => single(&mut i, TokenKind::CParen),
			b',' => single(&mut i, TokenKind::Comma),
			b':' if next == Some(b':') => double(&mut i, TokenKind::DoubleColon),
			b':' => single(&mut i, TokenKind::Colon),
			b'?' => single(&mut i, TokenKind::Question),
			b'-' => single(&mut i, TokenKind::Minus),
			b'.' if src[i..].starts_with(b"...") => {
				i += 3;
				TokenKind::Ellipsis
			}
			b'.' => single(&mut i, TokenKind::Dot),
			b'=' if next == Some(b'=') => double(&mut i, TokenKind::Op),
			b'=' if next == Some(b'>') => double(&mut i, TokenKind::FatArrow),
			b'=' => single(&mut i, TokenKind::Equal),
			b'!' if next == Some(b'=') => double(&mut i, TokenKind::Op),
			b'!' => single(&mut i, TokenKind::Bang),
			b'<' | b'>' if next == Some(b'=') => double(&mut i, TokenKind::Op),
			b'<' | b'>' => single(&mut i, TokenKind::Op),
			b'&' if next == Some(b'&') => double(&mut i, TokenKind::Op),
			b'|' if next == Some(b'|') => double(&mut i, TokenKind::Op),
			b'+' | b'*' | b'/' | b'%' => single(&mut i, TokenKind::Op),
			_ => return Err(Diagnostic::at(src, i, "Invalid character")),
		};

		tokens.push(Token { kind, start, end: i });
	}

	Ok(tokens)
}

// region:    --- Support

fn single(i: &mut usize, kind: TokenKind) -> TokenKind {
	*i += 1;
	kind
}

fn double(i: &mut usize, kind: TokenKind) -> TokenKind {
	*i += 2;
	kind
}

fn is_ident_start(b: u8) -> bool {
	b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b >= 0x80
}

/// End of a `#` or `//` comment, excluding the line terminator and trailing blanks.
fn line_comment_end(src: &[u8], start: usize) -> usize {
	let mut end = start;
	while end < src.len() && src[end] != b'\n' {
		end += 1;
	}
	while end > start && matches!(src[end - 1], b' ' | b'\t' | b'\r') {
		end -= 1;
	}
	end
}

fn block_comment_end(src: &[u8], start: usize) -> LexResult<usize> {
	src[start + 2..]
		.windows(2)
		.position(|w| w == b"*/")
		.map(|pos| start + 2 + pos + 2)
		.ok_or_else(|| Diagnostic::at(src, start, "Unterminated comment"))
}

fn scan_number(src: &[u8], start: usize) -> usize {
	let digits = |mut i: usize| {
		while i < src.len() && src[i].is_ascii_digit() {
			i += 1;
		}
		i
	};

	let mut i = digits(start);
	if i + 1 < src.len() && src[i] == b'.' && src[i + 1].is_ascii_digit() {
		i = digits(i + 1);
	}
	if i < src.len() && matches!(src[i], b'e' | b'E') {
		let mut j = i + 1;
		if j < src.len() && matches!(src[j], b'+' | b'-') {
			j += 1;
		}
		if j < src.len() && src[j].is_ascii_digit() {
			i = digits(j);
		}
	}
	i
}

/// Returns the offset right after the closing quote of the string starting at `start`.
fn scan_quoted(src: &[u8], start: usize) -> LexResult<usize> {
	let mut i = start + 1;
	loop {
		match src.get(i) {
			None | Some(b'\n') => return Err(Diagnostic::at(src, start, "Unterminated template string")),
			Some(b'\\') => i += 2,
			Some(b'"') => return Ok(i + 1),
			Some(b'$') if src[i..].starts_with(b"$${") => i += 3,
			Some(b'%') if src[i..].starts_with(b"%%{") => i += 3,
			Some(b'$' | b'%') if src.get(i + 1) == Some(&b'{') => i = scan_interpolation(src, i + 2)?,
			Some(_) => i += 1,
		}
	}
}

/// Scans a `${ ... }` body starting right after the opening brace.
fn scan_interpolation(src: &[u8], start: usize) -> LexResult<usize> {
	let mut depth = 1;
	let mut i = start;
	while let Some(b) = src.get(i) {
		match b {
			b'"' => {
				i = scan_quoted(src, i)?;
				continue;
			}
			b'{' => depth += 1,
			b'}' => {
				depth -= 1;
				if depth == 0 {
					return Ok(i + 1);
				}
			}
			_ => {}
		}
		i += 1;
	}
	Err(Diagnostic::at(src, start, "Unterminated template interpolation"))
}

/// Scans `<<ID` or `<<-ID` through the line holding the closing `ID`.
fn scan_heredoc(src: &[u8], start: usize) -> LexResult<usize> {
	let mut i = start + 2;
	if src.get(i) == Some(&b'-') {
		i += 1;
	}

	let marker_start = i;
	while i < src.len() && is_ident_continue(src[i]) {
		i += 1;
	}
	let marker = &src[marker_start..i];
	if marker.is_empty() || !is_ident_start(marker[0]) {
		return Err(Diagnostic::at(src, start, "Invalid heredoc introducer"));
	}

	if src[i..].starts_with(b"\r\n") {
		i += 2;
	} else if src.get(i) == Some(&b'\n') {
		i += 1;
	} else {
		return Err(Diagnostic::at(src, i, "Missing newline after heredoc introducer"));
	}

	while i < src.len() {
		let line_end = src[i..].iter().position(|b| *b == b'\n').map_or(src.len(), |p| i + p);
		let mut content_end = line_end;
		if content_end > i && src[content_end - 1] == b'\r' {
			content_end -= 1;
		}
		if src[i..content_end].trim_ascii() == marker {
			return Ok(content_end);
		}
		i = line_end + 1;
	}

	Err(Diagnostic::at(src, start, "Unterminated heredoc"))
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
