//! Raw-token scanning over source ranges.
//!
//! The parse tree does not record every token the eraser needs (the `>`
//! closing a type-argument list, the `)` closing a parameter list, a comma
//! trailing an erased element), so a fresh scanner is bound per transform
//! call and pointed at small windows of the source.

use tsblank_scanner::{ScannerState, SyntaxKind};

pub(crate) struct TokenScanner {
    scanner: ScannerState,
    len: usize,
}

impl TokenScanner {
    pub fn new(source: &str) -> TokenScanner {
        TokenScanner {
            scanner: ScannerState::new(source, true),
            len: source.len(),
        }
    }

    /// End offset of the first `kind` token in `[start, end)`, or `start`
    /// when no such token occurs in the range.
    pub fn scan_for_token(&mut self, start: usize, end: usize, kind: SyntaxKind) -> usize {
        self.scanner.set_range(start, end.min(self.len));
        loop {
            let token = self.scanner.scan();
            if token == kind {
                return self.scanner.get_token_end();
            }
            if token == SyntaxKind::EndOfFileToken {
                return start;
            }
        }
    }

    /// Kind and end offset of the first token at or after `offset`.
    pub fn peek_token_at(&mut self, offset: usize) -> (SyntaxKind, usize) {
        self.scanner.set_range(offset, self.len);
        let kind = self.scanner.scan();
        (kind, self.scanner.get_token_end())
    }

    /// Extend `end` over a directly trailing comma, if any.
    pub fn end_with_trailing_comma(&mut self, end: usize) -> usize {
        let (kind, token_end) = self.peek_token_at(end);
        if kind == SyntaxKind::CommaToken {
            token_end
        } else {
            end
        }
    }
}

/// Does `[start, end)` contain a line break?
pub(crate) fn spans_lines(source: &str, start: usize, end: usize) -> bool {
    source.as_bytes()[start..end.min(source.len())]
        .iter()
        .any(|&b| b == b'\n' || b == b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_closing_greater_than_past_nested_arguments() {
        let source = "foo<Bar<Baz>>(x)";
        let mut scanner = TokenScanner::new(source);
        // Scan from the end of the outer list's last argument.
        let inner_end = source.find(">>").unwrap() + 1;
        let end = scanner.scan_for_token(inner_end, source.len(), SyntaxKind::GreaterThanToken);
        assert_eq!(end, inner_end + 1);
    }

    #[test]
    fn missing_token_returns_scan_start() {
        let mut scanner = TokenScanner::new("abc def");
        assert_eq!(scanner.scan_for_token(0, 7, SyntaxKind::CommaToken), 0);
    }

    #[test]
    fn trailing_comma_extends_past_comments() {
        let source = "f(this /* t */ , x)";
        let mut scanner = TokenScanner::new(source);
        let this_end = 6;
        assert_eq!(scanner.end_with_trailing_comma(this_end), source.find(',').unwrap() + 1);
        assert_eq!(scanner.end_with_trailing_comma(source.find('x').unwrap() + 1), source.find('x').unwrap() + 1);
    }

    #[test]
    fn span_detection_sees_both_newline_flavors() {
        assert!(spans_lines("a\nb", 0, 3));
        assert!(spans_lines("a\rb", 0, 3));
        assert!(!spans_lines("a b", 0, 3));
        assert!(!spans_lines("a\nb", 2, 3));
    }
}
