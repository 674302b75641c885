//! Morse codec
//!
//! Maps uppercase Latin letters, digits, and the space character to
//! dot/dash notation. Letters are separated by a single space and a word
//! break is written as `/`. Characters outside the table are dropped
//! silently in both directions.

/// Letter/digit table. Space maps to the word separator token.
const MORSE_TABLE: [(char, &str); 37] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    (' ', WORD_SEPARATOR),
];

/// Token standing in for a space between words
pub const WORD_SEPARATOR: &str = "/";

/// One glyph of the canonical notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorseSymbol {
    /// `.`
    Dot,
    /// `-`
    Dash,
    /// ` ` between letters
    LetterSpace,
    /// `/` between words
    WordSpace,
}

impl MorseSymbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(MorseSymbol::Dot),
            '-' => Some(MorseSymbol::Dash),
            ' ' => Some(MorseSymbol::LetterSpace),
            '/' => Some(MorseSymbol::WordSpace),
            _ => None,
        }
    }

    /// Whether this symbol keys a tone
    pub fn is_tone(&self) -> bool {
        matches!(self, MorseSymbol::Dot | MorseSymbol::Dash)
    }
}

/// Code for a single (already uppercased) character
pub fn char_to_code(c: char) -> Option<&'static str> {
    MORSE_TABLE
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, code)| *code)
}

/// Character for a single code token
pub fn code_to_char(code: &str) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(ch, _)| *ch)
}

/// Encode text as Morse notation.
///
/// Unknown characters still take a slot in the output, so `"A?B"` becomes
/// `".-  -..."` with two separators around the empty code.
pub fn encode(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|c| char_to_code(c).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode Morse notation split on single spaces. Unknown tokens vanish.
pub fn decode(morse: &str) -> String {
    morse.split(' ').filter_map(code_to_char).collect()
}

/// Iterate the recognised symbols of a Morse string, skipping anything else
pub fn symbols(morse: &str) -> impl Iterator<Item = MorseSymbol> + '_ {
    morse.chars().filter_map(MorseSymbol::from_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_sos() {
        assert_eq!(encode("SOS"), "... --- ...");
        assert_eq!(encode("sos"), "... --- ...");
    }

    #[test]
    fn test_decode_sos() {
        assert_eq!(decode("... --- ..."), "SOS");
    }

    #[test]
    fn test_encode_word_break() {
        assert_eq!(encode("HI 73"), ".... .. / --... ...--");
        assert_eq!(decode(".... .. / --... ...--"), "HI 73");
    }

    #[test]
    fn test_supported_alphabet_survives_encode_decode() {
        let inputs = [
            "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG",
            "0123456789",
            "cq cq de ja1abc",
            "E",
        ];
        for input in inputs {
            let upper = input.to_uppercase();
            assert_eq!(decode(&encode(&upper)), upper, "input {input:?}");
        }
    }

    #[test]
    fn test_unknown_characters_dropped() {
        // Empty code still gets its separators
        assert_eq!(encode("A?B"), ".-  -...");
        assert_eq!(decode(".-  -..."), "AB");
        assert_eq!(encode("É"), "");
        assert_eq!(decode("........ .-"), "A");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode(""), "");
        assert_eq!(decode(""), "");
    }

    #[test]
    fn test_symbols_skip_unknown_glyphs() {
        let parsed: Vec<_> = symbols(".x- /").collect();
        assert_eq!(
            parsed,
            vec![
                MorseSymbol::Dot,
                MorseSymbol::Dash,
                MorseSymbol::LetterSpace,
                MorseSymbol::WordSpace
            ]
        );
        assert!(MorseSymbol::Dash.is_tone());
        assert!(!MorseSymbol::WordSpace.is_tone());
    }

    proptest! {
        #[test]
        fn test_uppercase_text_survives_encode_decode(text in "[A-Z0-9 ]{0,40}") {
            prop_assert_eq!(decode(&encode(&text)), text);
        }

        #[test]
        fn test_mixed_case_text_decodes_uppercased(text in "[A-Za-z0-9 ]{0,40}") {
            prop_assert_eq!(decode(&encode(&text)), text.to_uppercase());
        }
    }
}
