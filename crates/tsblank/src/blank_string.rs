//! The mutable output buffer.
//!
//! `BlankString` starts as a copy of the input and only ever overwrites
//! byte ranges with spaces, preserving newlines so that every surviving
//! byte keeps its original offset, line, and column.

/// Output buffer with range-blanking operations.
///
/// Invariants, maintained by construction:
/// - the buffer length always equals the input length;
/// - a `\n` or `\r` in the input is never overwritten;
/// - a blanked position holds `' '`, `';'`, or `')'`.
pub struct BlankString {
    bytes: Vec<u8>,
}

impl BlankString {
    pub fn new(source: &str) -> BlankString {
        BlankString {
            bytes: source.as_bytes().to_vec(),
        }
    }

    /// Overwrite `[start, end)` with spaces, keeping line breaks.
    pub fn blank(&mut self, start: usize, end: usize) {
        for byte in &mut self.bytes[start..end] {
            if *byte != b'\n' && *byte != b'\r' {
                *byte = b' ';
            }
        }
    }

    /// As [`blank`], but the first byte becomes `;`. The caller ensures
    /// the range is non-empty and does not start on a line break.
    ///
    /// [`blank`]: BlankString::blank
    pub fn blank_but_start_with_semi(&mut self, start: usize, end: usize) {
        debug_assert!(start < end);
        debug_assert!(self.bytes[start] != b'\n' && self.bytes[start] != b'\r');
        self.blank(start, end);
        self.bytes[start] = b';';
    }

    /// As [`blank`], but the last byte becomes `)`. The caller ensures the
    /// range is non-empty and does not end on a line break.
    ///
    /// [`blank`]: BlankString::blank
    pub fn blank_but_end_with_close_paren(&mut self, start: usize, end: usize) {
        debug_assert!(start < end);
        debug_assert!(self.bytes[end - 1] != b'\n' && self.bytes[end - 1] != b'\r');
        self.blank(start, end);
        self.bytes[end - 1] = b')';
    }

    pub fn byte_at(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    /// Snapshot the buffer. Erase ranges are token-aligned, so they start
    /// and end on character boundaries and the buffer stays valid UTF-8.
    pub fn into_string(self) -> String {
        String::from_utf8(self.bytes).expect("blanked ranges are character-aligned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_preserves_newlines_and_length() {
        let mut out = BlankString::new("ab\ncd\r\nef");
        out.blank(0, 9);
        assert_eq!(out.into_string(), "  \n  \r\n  ");
    }

    #[test]
    fn semi_first_form_replaces_first_byte() {
        let mut out = BlankString::new("type T = 1;x");
        out.blank_but_start_with_semi(0, 11);
        assert_eq!(out.into_string(), ";          x");
    }

    #[test]
    fn close_paren_last_form_replaces_last_byte() {
        let mut out = BlankString::new("(a: T)\n : R x");
        out.blank_but_end_with_close_paren(5, 12);
        assert_eq!(out.into_string(), "(a: T \n    )x");
    }

    #[test]
    fn special_forms_are_idempotent_over_blanked_space() {
        let mut out = BlankString::new("abcdef");
        out.blank(1, 5);
        out.blank_but_start_with_semi(1, 5);
        out.blank_but_start_with_semi(1, 5);
        assert_eq!(out.into_string(), "a;   f");
    }

    #[test]
    fn multi_byte_characters_blank_to_one_space_per_byte() {
        let source = "µµ";
        let mut out = BlankString::new(source);
        out.blank(0, source.len());
        let blanked = out.into_string();
        assert_eq!(blanked.len(), source.len());
        assert!(blanked.bytes().all(|b| b == b' '));
    }
}
