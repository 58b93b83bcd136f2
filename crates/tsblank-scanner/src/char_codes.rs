//! Character-code constants for the scan loop.

pub struct CharCodes;

impl CharCodes {
    // Line terminators
    pub const LINE_FEED: u32 = 0x0A;
    pub const CARRIAGE_RETURN: u32 = 0x0D;
    pub const LINE_SEPARATOR: u32 = 0x2028;
    pub const PARAGRAPH_SEPARATOR: u32 = 0x2029;

    // Whitespace
    pub const TAB: u32 = 0x09;
    pub const VERTICAL_TAB: u32 = 0x0B;
    pub const FORM_FEED: u32 = 0x0C;
    pub const SPACE: u32 = 0x20;
    pub const NON_BREAKING_SPACE: u32 = 0xA0;
    pub const BYTE_ORDER_MARK: u32 = 0xFEFF;

    // Digit bounds
    pub const DIGIT_0: u32 = 0x30;
    pub const DIGIT_9: u32 = 0x39;

    // Letters referenced individually by the scanner
    pub const UPPER_B: u32 = 0x42;
    pub const UPPER_E: u32 = 0x45;
    pub const UPPER_O: u32 = 0x4F;
    pub const UPPER_X: u32 = 0x58;
    pub const LOWER_B: u32 = 0x62;
    pub const LOWER_E: u32 = 0x65;
    pub const LOWER_N: u32 = 0x6E;
    pub const LOWER_O: u32 = 0x6F;
    pub const LOWER_U: u32 = 0x75;
    pub const LOWER_X: u32 = 0x78;

    // Punctuation
    pub const EXCLAMATION: u32 = 0x21;
    pub const DOUBLE_QUOTE: u32 = 0x22;
    pub const HASH: u32 = 0x23;
    pub const DOLLAR: u32 = 0x24;
    pub const PERCENT: u32 = 0x25;
    pub const AMPERSAND: u32 = 0x26;
    pub const SINGLE_QUOTE: u32 = 0x27;
    pub const OPEN_PAREN: u32 = 0x28;
    pub const CLOSE_PAREN: u32 = 0x29;
    pub const ASTERISK: u32 = 0x2A;
    pub const PLUS: u32 = 0x2B;
    pub const COMMA: u32 = 0x2C;
    pub const MINUS: u32 = 0x2D;
    pub const DOT: u32 = 0x2E;
    pub const SLASH: u32 = 0x2F;
    pub const COLON: u32 = 0x3A;
    pub const SEMICOLON: u32 = 0x3B;
    pub const LESS_THAN: u32 = 0x3C;
    pub const EQUALS: u32 = 0x3D;
    pub const GREATER_THAN: u32 = 0x3E;
    pub const QUESTION: u32 = 0x3F;
    pub const AT: u32 = 0x40;
    pub const OPEN_BRACKET: u32 = 0x5B;
    pub const BACKSLASH: u32 = 0x5C;
    pub const CLOSE_BRACKET: u32 = 0x5D;
    pub const CARET: u32 = 0x5E;
    pub const UNDERSCORE: u32 = 0x5F;
    pub const BACKTICK: u32 = 0x60;
    pub const OPEN_BRACE: u32 = 0x7B;
    pub const BAR: u32 = 0x7C;
    pub const CLOSE_BRACE: u32 = 0x7D;
    pub const TILDE: u32 = 0x7E;
}

/// Single-line whitespace (no line terminators).
pub fn is_white_space_single_line(ch: u32) -> bool {
    matches!(
        ch,
        CharCodes::SPACE
            | CharCodes::TAB
            | CharCodes::VERTICAL_TAB
            | CharCodes::FORM_FEED
            | CharCodes::NON_BREAKING_SPACE
            | CharCodes::BYTE_ORDER_MARK
    ) || (0x2000..=0x200B).contains(&ch)
        || ch == 0x202F
        || ch == 0x205F
        || ch == 0x3000
        || ch == 0x1680
}

pub fn is_line_break(ch: u32) -> bool {
    matches!(
        ch,
        CharCodes::LINE_FEED
            | CharCodes::CARRIAGE_RETURN
            | CharCodes::LINE_SEPARATOR
            | CharCodes::PARAGRAPH_SEPARATOR
    )
}

pub fn is_digit(ch: u32) -> bool {
    (CharCodes::DIGIT_0..=CharCodes::DIGIT_9).contains(&ch)
}

pub fn is_hex_digit(ch: u32) -> bool {
    is_digit(ch) || (0x41..=0x46).contains(&ch) || (0x61..=0x66).contains(&ch)
}

pub fn is_octal_digit(ch: u32) -> bool {
    (0x30..=0x37).contains(&ch)
}

pub fn is_binary_digit(ch: u32) -> bool {
    ch == 0x30 || ch == 0x31
}

/// ASCII fast path; non-ASCII falls back to Unicode alphabetics, which is
/// close enough to ID_Start for real-world sources.
pub fn is_identifier_start(ch: u32) -> bool {
    (0x41..=0x5A).contains(&ch)
        || (0x61..=0x7A).contains(&ch)
        || ch == CharCodes::DOLLAR
        || ch == CharCodes::UNDERSCORE
        || (ch > 0x7F && char::from_u32(ch).is_some_and(char::is_alphabetic))
}

pub fn is_identifier_part(ch: u32) -> bool {
    is_identifier_start(ch) || is_digit(ch) || ch == 0x200C || ch == 0x200D
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_classification_covers_ascii_and_unicode() {
        assert!(is_identifier_start('a' as u32));
        assert!(is_identifier_start('$' as u32));
        assert!(is_identifier_start('µ' as u32));
        assert!(!is_identifier_start('1' as u32));
        assert!(is_identifier_part('1' as u32));
        assert!(!is_identifier_part('-' as u32));
    }

    #[test]
    fn line_breaks_include_unicode_separators() {
        assert!(is_line_break(0x0A));
        assert!(is_line_break(0x2028));
        assert!(!is_line_break(0x20));
    }
}
