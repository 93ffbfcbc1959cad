/// Pronunciation used when a character is spelled out.
///
/// Covers `A`-`Z` and `0`-`9`; lookups are done on the upper-cased character.
pub fn pronounce(ch: char) -> Option<&'static str> {
    let word = match ch.to_ascii_uppercase() {
        'A' => "AAY",
        'B' => "Bee",
        'C' => "See",
        'D' => "Dee",
        'E' => "Eee",
        'F' => "Eff",
        'G' => "Gee",
        'H' => "Aitch",
        'I' => "Eye",
        'J' => "Jay",
        'K' => "Kay",
        'L' => "Ell",
        'M' => "Em",
        'N' => "En",
        'O' => "Oh",
        'P' => "Pee",
        'Q' => "Cue",
        'R' => "Ar",
        'S' => "Ess",
        'T' => "Tee",
        'U' => "You",
        'V' => "Vee",
        'W' => "Double-you",
        'X' => "Ex",
        'Y' => "Why",
        'Z' => "Zee",
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        _ => return None,
    };
    Some(word)
}

/// Spell `text` out one character at a time.
///
/// Letters and digits become their pronunciation; anything else (spaces,
/// punctuation) is kept as its own token. Tokens are never merged.
pub fn spell(text: &str) -> Vec<String> {
    text.chars()
        .map(|ch| match pronounce(ch) {
            Some(word) => word.to_string(),
            None => ch.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{pronounce, spell};

    #[test]
    fn covers_every_letter_and_digit() {
        let covered = ('A'..='Z')
            .chain('0'..='9')
            .filter(|&ch| pronounce(ch).is_some())
            .count();
        assert_eq!(covered, 36);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(pronounce('w'), Some("Double-you"));
        assert_eq!(pronounce('W'), Some("Double-you"));
    }

    #[test]
    fn passes_through_unknown_characters() {
        assert_eq!(pronounce('-'), None);
        assert_eq!(pronounce('é'), None);
        assert_eq!(
            spell("A-1 b"),
            vec!["AAY", "-", "one", " ", "Bee"]
        );
    }

    #[test]
    fn spelling_empty_text_yields_nothing() {
        assert!(spell("").is_empty());
    }
}
