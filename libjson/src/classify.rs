//! Character classification used by the lexer.

/// Coarse class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Insignificant whitespace between tokens.
    Whitespace,
    /// ASCII decimal digit.
    Digit,
    /// Anything else.
    Other,
}

/// Classify a character.
pub fn classify(c: char) -> CharClass {
    match c {
        ' ' | '\n' | '\r' | '\t' => CharClass::Whitespace,
        '0'..='9' => CharClass::Digit,
        _ => CharClass::Other,
    }
}

pub fn is_whitespace(c: char) -> bool {
    classify(c) == CharClass::Whitespace
}

pub fn is_digit(c: char) -> bool {
    classify(c) == CharClass::Digit
}
