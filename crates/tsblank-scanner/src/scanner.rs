//! The tokenizer.
//!
//! Positions are byte offsets into the UTF-8 source. For ASCII (the vast
//! majority of real sources) byte position equals character position; the
//! few multi-byte cases advance by whole characters.
//!
//! The scanner is a plain state machine: `scan()` advances to the next
//! token, accessors expose its kind/extent, and a handful of `re_scan_*`
//! entry points re-interpret the current token in context-sensitive spots
//! (`>` sequences, regular expressions, template continuations).

use crate::char_codes::{
    is_binary_digit, is_digit, is_hex_digit, is_identifier_part, is_identifier_start, is_line_break,
    is_octal_digit, is_white_space_single_line, CharCodes,
};
use crate::interner::{Atom, Interner};
use crate::{text_to_keyword, SyntaxKind};
use std::sync::Arc;

/// Token flags for properties the parser cares about.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenFlags {
    None = 0,
    PrecedingLineBreak = 1,
    Unterminated = 2,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start_pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_flags: u32,
    token_atom: Atom,
}

pub struct ScannerState {
    source: Arc<str>,
    /// Current byte position (end of the current token).
    pos: usize,
    /// Scan window end.
    end: usize,
    /// Start of the current token including leading trivia.
    full_start_pos: usize,
    /// Start of the current token excluding trivia.
    token_start: usize,
    token: SyntaxKind,
    token_flags: u32,
    skip_trivia: bool,
    /// Interned atom of the current identifier/keyword token.
    token_atom: Atom,
    pub interner: Interner,
}

impl ScannerState {
    pub fn new(text: &str, skip_trivia: bool) -> ScannerState {
        let end = text.len();
        ScannerState {
            source: Arc::from(text),
            pos: 0,
            end,
            full_start_pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_flags: 0,
            skip_trivia,
            token_atom: Atom::NONE,
            interner: Interner::new(),
        }
    }

    /// Replace the source and constrain scanning to `[start, start + length)`.
    pub fn set_text(&mut self, text: &str, start: Option<usize>, length: Option<usize>) {
        let start = start.unwrap_or(0);
        let len = length.unwrap_or(text.len().saturating_sub(start));
        self.source = Arc::from(text);
        self.pos = start;
        self.end = (start + len).min(self.source.len());
        self.full_start_pos = start;
        self.token_start = start;
        self.token = SyntaxKind::Unknown;
        self.token_flags = 0;
        self.token_atom = Atom::NONE;
    }

    /// Narrow the scan window within the current source.
    pub fn set_range(&mut self, start: usize, end: usize) {
        self.pos = start;
        self.end = end.min(self.source.len());
        self.full_start_pos = start;
        self.token_start = start;
        self.token = SyntaxKind::Unknown;
        self.token_flags = 0;
        self.token_atom = Atom::NONE;
    }

    /// Rewind token state to an arbitrary position (window end unchanged).
    pub fn reset_token_state(&mut self, new_pos: usize) {
        self.pos = new_pos;
        self.full_start_pos = new_pos;
        self.token_start = new_pos;
        self.token = SyntaxKind::Unknown;
        self.token_flags = 0;
        self.token_atom = Atom::NONE;
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_full_start(&self) -> usize {
        self.full_start_pos
    }

    pub fn get_token_start(&self) -> usize {
        self.token_start
    }

    pub fn get_token_end(&self) -> usize {
        self.pos
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        &self.source[self.token_start..self.pos]
    }

    pub fn get_token_atom(&self) -> Atom {
        self.token_atom
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags & TokenFlags::PrecedingLineBreak as u32 != 0
    }

    pub fn is_unterminated(&self) -> bool {
        self.token_flags & TokenFlags::Unterminated as u32 != 0
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start_pos: self.full_start_pos,
            token_start: self.token_start,
            token: self.token,
            token_flags: self.token_flags,
            token_atom: self.token_atom,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start_pos = snapshot.full_start_pos;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_flags = snapshot.token_flags;
        self.token_atom = snapshot.token_atom;
    }

    #[inline(always)]
    fn char_code_unchecked(&self, index: usize) -> u32 {
        let bytes = self.source.as_bytes();
        if index < bytes.len() {
            let b = bytes[index];
            if b < 128 {
                b as u32
            } else {
                self.source[index..]
                    .chars()
                    .next()
                    .map(|c| c as u32)
                    .unwrap_or(0)
            }
        } else {
            0
        }
    }

    #[inline]
    fn char_code_at(&self, index: usize) -> Option<u32> {
        if index < self.source.len() {
            Some(self.char_code_unchecked(index))
        } else {
            None
        }
    }

    #[inline(always)]
    fn char_len_at(&self, index: usize) -> usize {
        let bytes = self.source.as_bytes();
        if index >= bytes.len() {
            return 0;
        }
        let b = bytes[index];
        if b < 0x80 {
            1
        } else if b < 0xE0 {
            2
        } else if b < 0xF0 {
            3
        } else {
            4
        }
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start_pos = self.pos;
        self.token_flags = 0;
        self.token_atom = Atom::NONE;

        loop {
            self.token_start = self.pos;

            if self.pos >= self.end {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            }

            let ch = self.char_code_unchecked(self.pos);

            // Shebang line counts as trivia.
            if self.pos == 0
                && ch == CharCodes::HASH
                && self.char_code_at(1) == Some(CharCodes::EXCLAMATION)
            {
                while self.pos < self.end && !is_line_break(self.char_code_unchecked(self.pos)) {
                    self.pos += self.char_len_at(self.pos);
                }
                if self.skip_trivia {
                    continue;
                }
                self.token = SyntaxKind::SingleLineCommentTrivia;
                return self.token;
            }

            match ch {
                CharCodes::LINE_FEED | CharCodes::CARRIAGE_RETURN => {
                    self.token_flags |= TokenFlags::PrecedingLineBreak as u32;
                    if ch == CharCodes::CARRIAGE_RETURN
                        && self.char_code_at(self.pos + 1) == Some(CharCodes::LINE_FEED)
                    {
                        self.pos += 2;
                    } else {
                        self.pos += 1;
                    }
                    if self.skip_trivia {
                        continue;
                    }
                    self.token = SyntaxKind::NewLineTrivia;
                    return self.token;
                }

                CharCodes::LINE_SEPARATOR | CharCodes::PARAGRAPH_SEPARATOR => {
                    self.token_flags |= TokenFlags::PrecedingLineBreak as u32;
                    self.pos += self.char_len_at(self.pos);
                    if self.skip_trivia {
                        continue;
                    }
                    self.token = SyntaxKind::NewLineTrivia;
                    return self.token;
                }

                _ if is_white_space_single_line(ch) => {
                    self.pos += self.char_len_at(self.pos);
                    while self.pos < self.end
                        && is_white_space_single_line(self.char_code_unchecked(self.pos))
                    {
                        self.pos += self.char_len_at(self.pos);
                    }
                    if self.skip_trivia {
                        continue;
                    }
                    self.token = SyntaxKind::WhitespaceTrivia;
                    return self.token;
                }

                CharCodes::OPEN_BRACE => return self.single(SyntaxKind::OpenBraceToken),
                CharCodes::CLOSE_BRACE => return self.single(SyntaxKind::CloseBraceToken),
                CharCodes::OPEN_PAREN => return self.single(SyntaxKind::OpenParenToken),
                CharCodes::CLOSE_PAREN => return self.single(SyntaxKind::CloseParenToken),
                CharCodes::OPEN_BRACKET => return self.single(SyntaxKind::OpenBracketToken),
                CharCodes::CLOSE_BRACKET => return self.single(SyntaxKind::CloseBracketToken),
                CharCodes::SEMICOLON => return self.single(SyntaxKind::SemicolonToken),
                CharCodes::COMMA => return self.single(SyntaxKind::CommaToken),
                CharCodes::COLON => return self.single(SyntaxKind::ColonToken),
                CharCodes::AT => return self.single(SyntaxKind::AtToken),
                CharCodes::TILDE => return self.single(SyntaxKind::TildeToken),

                CharCodes::DOT => {
                    if self
                        .char_code_at(self.pos + 1)
                        .is_some_and(is_digit)
                    {
                        return self.scan_number();
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::DOT)
                        && self.char_code_at(self.pos + 2) == Some(CharCodes::DOT)
                    {
                        self.pos += 3;
                        self.token = SyntaxKind::DotDotDotToken;
                        return self.token;
                    }
                    return self.single(SyntaxKind::DotToken);
                }

                CharCodes::EXCLAMATION => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        if self.char_code_at(self.pos + 2) == Some(CharCodes::EQUALS) {
                            return self.multi(3, SyntaxKind::ExclamationEqualsEqualsToken);
                        }
                        return self.multi(2, SyntaxKind::ExclamationEqualsToken);
                    }
                    return self.single(SyntaxKind::ExclamationToken);
                }

                CharCodes::EQUALS => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        if self.char_code_at(self.pos + 2) == Some(CharCodes::EQUALS) {
                            return self.multi(3, SyntaxKind::EqualsEqualsEqualsToken);
                        }
                        return self.multi(2, SyntaxKind::EqualsEqualsToken);
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::GREATER_THAN) {
                        return self.multi(2, SyntaxKind::EqualsGreaterThanToken);
                    }
                    return self.single(SyntaxKind::EqualsToken);
                }

                CharCodes::PLUS => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::PLUS) {
                        return self.multi(2, SyntaxKind::PlusPlusToken);
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::PlusEqualsToken);
                    }
                    return self.single(SyntaxKind::PlusToken);
                }

                CharCodes::MINUS => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::MINUS) {
                        return self.multi(2, SyntaxKind::MinusMinusToken);
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::MinusEqualsToken);
                    }
                    return self.single(SyntaxKind::MinusToken);
                }

                CharCodes::ASTERISK => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::ASTERISK) {
                        if self.char_code_at(self.pos + 2) == Some(CharCodes::EQUALS) {
                            return self.multi(3, SyntaxKind::AsteriskAsteriskEqualsToken);
                        }
                        return self.multi(2, SyntaxKind::AsteriskAsteriskToken);
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::AsteriskEqualsToken);
                    }
                    return self.single(SyntaxKind::AsteriskToken);
                }

                CharCodes::PERCENT => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::PercentEqualsToken);
                    }
                    return self.single(SyntaxKind::PercentToken);
                }

                CharCodes::AMPERSAND => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::AMPERSAND) {
                        if self.char_code_at(self.pos + 2) == Some(CharCodes::EQUALS) {
                            return self.multi(3, SyntaxKind::AmpersandAmpersandEqualsToken);
                        }
                        return self.multi(2, SyntaxKind::AmpersandAmpersandToken);
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::AmpersandEqualsToken);
                    }
                    return self.single(SyntaxKind::AmpersandToken);
                }

                CharCodes::BAR => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::BAR) {
                        if self.char_code_at(self.pos + 2) == Some(CharCodes::EQUALS) {
                            return self.multi(3, SyntaxKind::BarBarEqualsToken);
                        }
                        return self.multi(2, SyntaxKind::BarBarToken);
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::BarEqualsToken);
                    }
                    return self.single(SyntaxKind::BarToken);
                }

                CharCodes::CARET => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::CaretEqualsToken);
                    }
                    return self.single(SyntaxKind::CaretToken);
                }

                CharCodes::QUESTION => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::DOT)
                        && !self.char_code_at(self.pos + 2).is_some_and(is_digit)
                    {
                        return self.multi(2, SyntaxKind::QuestionDotToken);
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::QUESTION) {
                        if self.char_code_at(self.pos + 2) == Some(CharCodes::EQUALS) {
                            return self.multi(3, SyntaxKind::QuestionQuestionEqualsToken);
                        }
                        return self.multi(2, SyntaxKind::QuestionQuestionToken);
                    }
                    return self.single(SyntaxKind::QuestionToken);
                }

                CharCodes::LESS_THAN => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::LESS_THAN) {
                        if self.char_code_at(self.pos + 2) == Some(CharCodes::EQUALS) {
                            return self.multi(3, SyntaxKind::LessThanLessThanEqualsToken);
                        }
                        return self.multi(2, SyntaxKind::LessThanLessThanToken);
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::LessThanEqualsToken);
                    }
                    return self.single(SyntaxKind::LessThanToken);
                }

                // `>` is always scanned alone; the parser re-scans for the
                // compound forms when it is in an operator position.
                CharCodes::GREATER_THAN => return self.single(SyntaxKind::GreaterThanToken),

                CharCodes::SLASH => {
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::SLASH) {
                        self.pos += 2;
                        while self.pos < self.end
                            && !is_line_break(self.char_code_unchecked(self.pos))
                        {
                            self.pos += self.char_len_at(self.pos);
                        }
                        if self.skip_trivia {
                            continue;
                        }
                        self.token = SyntaxKind::SingleLineCommentTrivia;
                        return self.token;
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::ASTERISK) {
                        self.pos += 2;
                        let mut closed = false;
                        while self.pos < self.end {
                            let c = self.char_code_unchecked(self.pos);
                            if c == CharCodes::ASTERISK
                                && self.char_code_at(self.pos + 1) == Some(CharCodes::SLASH)
                            {
                                self.pos += 2;
                                closed = true;
                                break;
                            }
                            if is_line_break(c) {
                                self.token_flags |= TokenFlags::PrecedingLineBreak as u32;
                            }
                            self.pos += self.char_len_at(self.pos);
                        }
                        if !closed {
                            self.token_flags |= TokenFlags::Unterminated as u32;
                        }
                        if self.skip_trivia {
                            continue;
                        }
                        self.token = SyntaxKind::MultiLineCommentTrivia;
                        return self.token;
                    }
                    if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                        return self.multi(2, SyntaxKind::SlashEqualsToken);
                    }
                    return self.single(SyntaxKind::SlashToken);
                }

                CharCodes::DOUBLE_QUOTE | CharCodes::SINGLE_QUOTE => {
                    return self.scan_string(ch);
                }

                CharCodes::BACKTICK => {
                    return self.scan_template(self.pos + 1);
                }

                CharCodes::HASH => {
                    self.pos += 1;
                    if self.pos < self.end
                        && is_identifier_start(self.char_code_unchecked(self.pos))
                    {
                        while self.pos < self.end
                            && is_identifier_part(self.char_code_unchecked(self.pos))
                        {
                            self.pos += self.char_len_at(self.pos);
                        }
                        self.token = SyntaxKind::PrivateIdentifier;
                    } else {
                        self.token = SyntaxKind::HashToken;
                    }
                    return self.token;
                }

                _ if is_digit(ch) => return self.scan_number(),

                _ => {
                    if is_identifier_start(ch) {
                        return self.scan_identifier();
                    }
                    self.pos += self.char_len_at(self.pos).max(1);
                    self.token = SyntaxKind::Unknown;
                    return self.token;
                }
            }
        }
    }

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        self.token = kind;
        kind
    }

    #[inline]
    fn multi(&mut self, width: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += width;
        self.token = kind;
        kind
    }

    fn scan_string(&mut self, quote: u32) -> SyntaxKind {
        self.pos += 1;
        while self.pos < self.end {
            let ch = self.char_code_unchecked(self.pos);
            if ch == quote {
                self.pos += 1;
                self.token = SyntaxKind::StringLiteral;
                return self.token;
            }
            if ch == CharCodes::BACKSLASH {
                self.pos += 1;
                if self.pos < self.end {
                    // CRLF line continuation consumes both bytes.
                    if self.char_code_unchecked(self.pos) == CharCodes::CARRIAGE_RETURN
                        && self.char_code_at(self.pos + 1) == Some(CharCodes::LINE_FEED)
                    {
                        self.pos += 2;
                    } else {
                        self.pos += self.char_len_at(self.pos);
                    }
                }
                continue;
            }
            if is_line_break(ch) {
                break;
            }
            self.pos += self.char_len_at(self.pos);
        }
        self.token_flags |= TokenFlags::Unterminated as u32;
        self.token = SyntaxKind::StringLiteral;
        self.token
    }

    /// Scan template text starting at `start` (just past `` ` `` or `}`).
    /// Returns head/tail pairs depending on whether the opener was a
    /// backtick (`is_head`) inferred from the byte before `start`.
    fn scan_template(&mut self, start: usize) -> SyntaxKind {
        let is_head = self.source.as_bytes()[start - 1] == b'`';
        self.pos = start;
        while self.pos < self.end {
            let ch = self.char_code_unchecked(self.pos);
            if ch == CharCodes::BACKTICK {
                self.pos += 1;
                self.token = if is_head {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
                return self.token;
            }
            if ch == CharCodes::DOLLAR
                && self.char_code_at(self.pos + 1) == Some(CharCodes::OPEN_BRACE)
            {
                self.pos += 2;
                self.token = if is_head {
                    SyntaxKind::TemplateHead
                } else {
                    SyntaxKind::TemplateMiddle
                };
                return self.token;
            }
            if ch == CharCodes::BACKSLASH {
                self.pos += 1;
                if self.pos < self.end {
                    self.pos += self.char_len_at(self.pos);
                }
                continue;
            }
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PrecedingLineBreak as u32;
            }
            self.pos += self.char_len_at(self.pos);
        }
        self.token_flags |= TokenFlags::Unterminated as u32;
        self.token = if is_head {
            SyntaxKind::NoSubstitutionTemplateLiteral
        } else {
            SyntaxKind::TemplateTail
        };
        self.token
    }

    fn scan_number(&mut self) -> SyntaxKind {
        if self.char_code_unchecked(self.pos) == CharCodes::DIGIT_0 {
            let next = self.char_code_at(self.pos + 1).unwrap_or(0);
            let radix_digits: Option<fn(u32) -> bool> = match next {
                CharCodes::LOWER_X | CharCodes::UPPER_X => Some(is_hex_digit),
                CharCodes::LOWER_B | CharCodes::UPPER_B => Some(is_binary_digit),
                CharCodes::LOWER_O | CharCodes::UPPER_O => Some(is_octal_digit),
                _ => None,
            };
            if let Some(is_valid) = radix_digits {
                self.pos += 2;
                self.scan_digits(is_valid);
                return self.finish_number();
            }
        }

        self.scan_digits(is_digit);
        if self.char_code_at(self.pos) == Some(CharCodes::DOT) {
            self.pos += 1;
            self.scan_digits(is_digit);
        }
        if matches!(
            self.char_code_at(self.pos),
            Some(CharCodes::LOWER_E) | Some(CharCodes::UPPER_E)
        ) {
            let sign_pos = self.pos + 1;
            let after_sign = match self.char_code_at(sign_pos) {
                Some(CharCodes::PLUS) | Some(CharCodes::MINUS) => sign_pos + 1,
                _ => sign_pos,
            };
            if self.char_code_at(after_sign).is_some_and(is_digit) {
                self.pos = after_sign;
                self.scan_digits(is_digit);
            }
        }
        self.finish_number()
    }

    fn finish_number(&mut self) -> SyntaxKind {
        if self.char_code_at(self.pos) == Some(CharCodes::LOWER_N) {
            self.pos += 1;
            self.token = SyntaxKind::BigIntLiteral;
        } else {
            self.token = SyntaxKind::NumericLiteral;
        }
        self.token
    }

    fn scan_digits(&mut self, is_valid: fn(u32) -> bool) {
        while self.pos < self.end {
            let ch = self.char_code_unchecked(self.pos);
            if is_valid(ch) || ch == CharCodes::UNDERSCORE {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += self.char_len_at(self.pos);
        while self.pos < self.end && is_identifier_part(self.char_code_unchecked(self.pos)) {
            self.pos += self.char_len_at(self.pos);
        }
        let text = &self.source[start..self.pos];
        self.token = text_to_keyword(text).unwrap_or(SyntaxKind::Identifier);
        let interned = self.interner.intern(text);
        self.token_atom = interned;
        self.token
    }

    // =========================================================================
    // Contextual rescans
    // =========================================================================

    /// Re-interpret the current `>` as `>=`, `>>`, `>>>`, `>>=`, or `>>>=`.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        if self.char_code_at(self.pos) == Some(CharCodes::GREATER_THAN) {
            if self.char_code_at(self.pos + 1) == Some(CharCodes::GREATER_THAN) {
                if self.char_code_at(self.pos + 2) == Some(CharCodes::EQUALS) {
                    self.pos += 3;
                    self.token = SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken;
                } else {
                    self.pos += 2;
                    self.token = SyntaxKind::GreaterThanGreaterThanGreaterThanToken;
                }
            } else if self.char_code_at(self.pos + 1) == Some(CharCodes::EQUALS) {
                self.pos += 2;
                self.token = SyntaxKind::GreaterThanGreaterThanEqualsToken;
            } else {
                self.pos += 1;
                self.token = SyntaxKind::GreaterThanGreaterThanToken;
            }
        } else if self.char_code_at(self.pos) == Some(CharCodes::EQUALS) {
            self.pos += 1;
            self.token = SyntaxKind::GreaterThanEqualsToken;
        }
        self.token
    }

    /// Split a `<<` back into `<` when a type argument list follows.
    pub fn re_scan_less_than_token(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::LessThanLessThanToken {
            self.pos = self.token_start + 1;
            self.token = SyntaxKind::LessThanToken;
        }
        self.token
    }

    /// Re-interpret the current `/` or `/=` as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::SlashToken && self.token != SyntaxKind::SlashEqualsToken {
            return self.token;
        }
        let mut p = self.token_start + 1;
        let mut in_escape = false;
        let mut in_class = false;
        loop {
            if p >= self.end {
                self.token_flags |= TokenFlags::Unterminated as u32;
                break;
            }
            let ch = self.char_code_unchecked(p);
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::Unterminated as u32;
                break;
            }
            if in_escape {
                in_escape = false;
            } else if ch == CharCodes::SLASH && !in_class {
                p += 1;
                break;
            } else if ch == CharCodes::OPEN_BRACKET {
                in_class = true;
            } else if ch == CharCodes::BACKSLASH {
                in_escape = true;
            } else if ch == CharCodes::CLOSE_BRACKET {
                in_class = false;
            }
            p += self.char_len_at(p);
        }
        while p < self.end && is_identifier_part(self.char_code_unchecked(p)) {
            p += self.char_len_at(p);
        }
        self.pos = p;
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// At a `}` that closes a template substitution, continue scanning the
    /// template and produce the middle/tail part.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        debug_assert_eq!(self.token, SyntaxKind::CloseBraceToken);
        self.scan_template(self.token_start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let mut scanner = ScannerState::new(source, true);
        let mut out = Vec::new();
        loop {
            let t = scanner.scan();
            if t == SyntaxKind::EndOfFileToken {
                break;
            }
            out.push(t);
        }
        out
    }

    #[test]
    fn scans_declaration_with_annotation() {
        assert_eq!(
            kinds("let x: number = 1;"),
            vec![
                SyntaxKind::LetKeyword,
                SyntaxKind::Identifier,
                SyntaxKind::ColonToken,
                SyntaxKind::Identifier,
                SyntaxKind::EqualsToken,
                SyntaxKind::NumericLiteral,
                SyntaxKind::SemicolonToken,
            ]
        );
    }

    #[test]
    fn greater_than_is_never_merged_by_plain_scan() {
        assert_eq!(
            kinds("a >> b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::GreaterThanToken,
                SyntaxKind::GreaterThanToken,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn re_scan_greater_token_merges_compound_operators() {
        let mut scanner = ScannerState::new("x >>>= y", true);
        let _ = scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(
            scanner.re_scan_greater_token(),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
        );
        assert_eq!(scanner.get_token_end(), 6);
    }

    #[test]
    fn re_scan_slash_token_produces_regex_with_flags() {
        let mut scanner = ScannerState::new("/ab[/]c/gi;", true);
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.get_token_text(), "/ab[/]c/gi");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
    }

    #[test]
    fn template_head_middle_tail_round_trip() {
        let mut scanner = ScannerState::new("`a${x}b${y}c`", true);
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateTail);
    }

    #[test]
    fn set_text_rebinds_the_scanner_to_a_new_buffer() {
        let mut scanner = ScannerState::new("old", true);
        let _ = scanner.scan();
        scanner.set_text("x = 99 + 1", Some(4), Some(2));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.get_token_text(), "99");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn window_scanning_respects_range_bounds() {
        let mut scanner = ScannerState::new("foo(bar, baz)", true);
        scanner.set_range(4, 7);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.get_token_text(), "bar");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn snapshot_restore_rewinds_speculation() {
        let mut scanner = ScannerState::new("a < b", true);
        let _ = scanner.scan();
        let snap = scanner.save_state();
        assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        scanner.restore_state(snap);
        assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);
    }

    #[test]
    fn preceding_line_break_flag_tracks_newlines() {
        let mut scanner = ScannerState::new("a\nb", true);
        let _ = scanner.scan();
        assert!(!scanner.has_preceding_line_break());
        let _ = scanner.scan();
        assert!(scanner.has_preceding_line_break());
    }

    #[test]
    fn shebang_is_skipped_as_trivia() {
        let mut scanner = ScannerState::new("#!/usr/bin/env node\nlet x", true);
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    }

    #[test]
    fn numeric_variants_scan_to_correct_extents() {
        assert_eq!(
            kinds("0xFFn 1_000 .5 1e-3 0b01"),
            vec![
                SyntaxKind::BigIntLiteral,
                SyntaxKind::NumericLiteral,
                SyntaxKind::NumericLiteral,
                SyntaxKind::NumericLiteral,
                SyntaxKind::NumericLiteral,
            ]
        );
    }

    #[test]
    fn identifiers_are_interned_through_the_scanner() {
        let mut scanner = ScannerState::new("foo bar foo", true);
        let _ = scanner.scan();
        let first = scanner.get_token_atom();
        let _ = scanner.scan();
        let second = scanner.get_token_atom();
        let _ = scanner.scan();
        let third = scanner.get_token_atom();
        assert_eq!(first, third);
        assert_ne!(first, second);
        assert_eq!(scanner.interner.resolve(first), "foo");
    }
}
