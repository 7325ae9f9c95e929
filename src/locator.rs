use crate::lexer::{Diagnostic, LexResult, Token, TokenKind, lex};
use crate::{Error, Result};
use std::ops::Range;

/// Byte extent of one located block: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockRange {
	pub start: usize,
	pub end: usize,
}

impl BlockRange {
	pub fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}

	pub fn len(&self) -> usize {
		self.end - self.start
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	pub fn as_range(&self) -> Range<usize> {
		self.start..self.end
	}
}

/// A top-level block as seen by the structural parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HclBlock {
	pub block_type: String,
	pub range: BlockRange,
}

/// Returns the ranges of every top-level block of type `block_type`, in source order.
///
/// A range starts at the block type keyword, so comments sitting above the block
/// (even directly above it) are never part of it.
pub fn locate_blocks(file_label: &str, src: &[u8], block_type: &str) -> Result<Vec<BlockRange>> {
	let blocks = parse_top_level_blocks(src).map_err(|diag| Error::parse(file_label, diag))?;

	Ok(blocks
		.into_iter()
		.filter(|block| block.block_type == block_type)
		.map(|block| block.range)
		.collect())
}

/// Validates the whole file structure and returns its top-level blocks.
pub fn parse_top_level_blocks(src: &[u8]) -> LexResult<Vec<HclBlock>> {
	let tokens = lex(src)?
		.into_iter()
		.filter(|tok| tok.kind != TokenKind::Comment)
		.collect();

	let mut parser = Parser {
		src,
		tokens,
		pos: 0,
		blocks: Vec::new(),
	};
	parser.parse_body(0)?;

	Ok(parser.blocks)
}

// region:    --- Parser

struct Parser<'a> {
	src: &'a [u8],
	tokens: Vec<Token>,
	pos: usize,
	blocks: Vec<HclBlock>,
}

impl Parser<'_> {
	fn parse_body(&mut self, depth: usize) -> LexResult<()> {
		loop {
			self.skip_newlines();
			let Some(tok) = self.peek() else {
				if depth > 0 {
					return Err(self.error_at_end("Unclosed configuration block; missing '}'"));
				}
				return Ok(());
			};

			match tok.kind {
				TokenKind::CBrace if depth > 0 => return Ok(()),
				TokenKind::Ident => {
					self.bump();
					if self.peek_kind() == Some(TokenKind::Equal) {
						self.bump();
						self.parse_expression(false)?;
						self.expect_line_end("Missing newline after argument")?;
					} else {
						self.parse_block(tok, depth)?;
					}
				}
				_ => return Err(self.error_at(tok, "Argument or block definition required")),
			}
		}
	}

	fn parse_block(&mut self, type_tok: Token, depth: usize) -> LexResult<()> {
		loop {
			match self.peek() {
				Some(tok) if matches!(tok.kind, TokenKind::Str | TokenKind::Ident) => self.bump(),
				Some(tok) if tok.kind == TokenKind::OBrace => {
					self.bump();
					break;
				}
				Some(tok) => {
					return Err(self.error_at(tok, "Invalid block definition; expected '{' to open the block body"));
				}
				None => return Err(self.error_at_end("Invalid block definition; expected '{' to open the block body")),
			}
		}

		match self.peek() {
			Some(tok) if tok.kind == TokenKind::Newline => self.parse_body(depth + 1)?,
			Some(tok) if tok.kind == TokenKind::CBrace => {}
			Some(tok) if tok.kind == TokenKind::Ident => {
				// Single-line block: at most one attribute.
				self.bump();
				if self.peek_kind() != Some(TokenKind::Equal) {
					return Err(self.error_at(tok, "Invalid single-argument block definition"));
				}
				self.bump();
				self.parse_expression(true)?;
			}
			Some(tok) => return Err(self.error_at(tok, "Argument or block definition required")),
			None => return Err(self.error_at_end("Unclosed configuration block; missing '}'")),
		}

		let close = match self.peek() {
			Some(tok) if tok.kind == TokenKind::CBrace => tok,
			Some(tok) => return Err(self.error_at(tok, "Unclosed configuration block; missing '}'")),
			None => return Err(self.error_at_end("Unclosed configuration block; missing '}'")),
		};
		self.bump();

		if depth == 0 {
			self.blocks.push(HclBlock {
				block_type: self.text(type_tok),
				range: BlockRange::new(type_tok.start, close.end),
			});
		}

		self.expect_line_end("Missing newline after block definition")
	}

	/// Consumes an expression up to the end of line (or the closing brace of a
	/// single-line block). Newlines inside brackets belong to the expression.
	///
	/// Checks that operands and operators alternate, not the full expression grammar.
	fn parse_expression(&mut self, in_single_line_block: bool) -> LexResult<()> {
		let start = self.pos;
		let mut open: Vec<TokenKind> = Vec::new();
		let mut state = ExprState::Operand { can_close: false };
		let mut prev: Option<TokenKind> = None;

		while let Some(tok) = self.peek() {
			let at_end = tok.kind == TokenKind::Newline || (in_single_line_block && tok.kind == TokenKind::CBrace);
			if open.is_empty() && at_end {
				break;
			}
			state = self.next_expr_state(tok, state, prev, &mut open)?;
			if tok.kind != TokenKind::Newline {
				prev = Some(tok.kind);
			}
			self.bump();
		}

		if !open.is_empty() {
			return Err(self.error_at_end("Missing closing bracket"));
		}
		if state != ExprState::Operator {
			let message = if self.pos == start {
				"Missing expression"
			} else {
				"Invalid expression; missing operand"
			};
			return match self.peek() {
				Some(tok) => Err(self.error_at(tok, message)),
				None => Err(self.error_at_end(message)),
			};
		}

		Ok(())
	}

	fn next_expr_state(
		&self,
		tok: Token,
		state: ExprState,
		prev: Option<TokenKind>,
		open: &mut Vec<TokenKind>,
	) -> LexResult<ExprState> {
		use ExprState::{Member, Operand, Operator};
		use TokenKind as K;

		let text = tok.bytes(self.src);
		let in_brace = open.last() == Some(&K::OBrace);

		let next = match (tok.kind, state) {
			// Object items are separated by newlines, lists and calls ignore them.
			(K::Newline, Operator) if in_brace => Some(Operand { can_close: true }),
			(K::Newline, Member) => None,
			(K::Newline, state) => Some(state),

			// Traversal: `a.b`, `a.0`, `a.*`, `provider::ns::fn`.
			(K::Ident | K::Number, Member) => Some(Operator),
			(K::Op, Member) if text == b"*" => Some(Operator),
			(_, Member) => None,
			(K::Dot | K::DoubleColon, Operator) => Some(Member),

			(K::Ident, Operand { .. }) if text == b"for" && matches!(prev, Some(K::OBrack | K::OBrace)) => {
				Some(Operand { can_close: false })
			}
			(K::Ident | K::Number | K::Str | K::Heredoc, Operand { .. }) => Some(Operator),
			(K::Ident, Operator) if text == b"in" || text == b"if" => Some(Operand { can_close: false }),

			(K::OBrace | K::OBrack | K::OParen, Operand { .. }) | (K::OBrack, Operator) => {
				open.push(tok.kind);
				Some(Operand { can_close: true })
			}
			(K::OParen, Operator) if prev == Some(K::Ident) => {
				open.push(tok.kind);
				Some(Operand { can_close: true })
			}
			// Splat index `[*]`.
			(K::Op, Operand { .. }) if text == b"*" && prev == Some(K::OBrack) => Some(Operator),

			(K::CBrace | K::CBrack | K::CParen, Operator | Operand { can_close: true }) => {
				if open.pop() != Some(opening_for(tok.kind)) {
					return Err(self.error_at(tok, "Unbalanced closing bracket"));
				}
				Some(Operator)
			}

			(K::Minus | K::Bang, Operand { .. }) => Some(Operand { can_close: false }),
			(K::Comma, Operator) if !open.is_empty() => Some(Operand { can_close: true }),
			(K::Op | K::Minus | K::Question | K::Colon | K::FatArrow, Operator) => Some(Operand { can_close: false }),
			(K::Equal, Operator) if in_brace => Some(Operand { can_close: false }),
			(K::Ellipsis, Operator) => Some(Operator),
			_ => None,
		};

		next.ok_or_else(|| self.error_at(tok, "Invalid expression"))
	}

	fn expect_line_end(&mut self, message: &str) -> LexResult<()> {
		match self.peek() {
			None => Ok(()),
			Some(tok) if tok.kind == TokenKind::Newline => {
				self.bump();
				Ok(())
			}
			Some(tok) => Err(self.error_at(tok, message)),
		}
	}
}

/// What the expression parser accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprState {
	/// An operand, or a closing bracket when `can_close` (empty brackets, trailing comma).
	Operand { can_close: bool },
	/// An operator, a closing bracket, or the end of the expression.
	Operator,
	/// The name after `.` or `::`.
	Member,
}

// endregion: --- Parser

// region:    --- Support

impl Parser<'_> {
	fn peek(&self) -> Option<Token> {
		self.tokens.get(self.pos).copied()
	}

	fn peek_kind(&self) -> Option<TokenKind> {
		self.peek().map(|tok| tok.kind)
	}

	fn bump(&mut self) {
		self.pos += 1;
	}

	fn skip_newlines(&mut self) {
		while self.peek_kind() == Some(TokenKind::Newline) {
			self.bump();
		}
	}

	fn text(&self, tok: Token) -> String {
		String::from_utf8_lossy(tok.bytes(self.src)).into_owned()
	}

	fn error_at(&self, tok: Token, message: &str) -> Diagnostic {
		Diagnostic::at(self.src, tok.start, message)
	}

	fn error_at_end(&self, message: &str) -> Diagnostic {
		Diagnostic::at(self.src, self.src.len(), message)
	}
}

fn opening_for(kind: TokenKind) -> TokenKind {
	match kind {
		TokenKind::CBrace => TokenKind::OBrace,
		TokenKind::CBrack => TokenKind::OBrack,
		_ => TokenKind::OParen,
	}
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
