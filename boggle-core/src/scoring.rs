use crate::{Board, WordValidator};

/// Shortest word that can earn points.
pub const MIN_WORD_LENGTH: usize = 3;

/// Score assigned to a word that is too short, not on the board, or not a word.
pub const INVALID_WORD_PENALTY: i32 = -1;

/// Result of evaluating one word play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordScore {
    /// Already played by this player in this game; worth 0 and not recorded again.
    Duplicate,
    /// Too short, untraceable, or unknown; recorded with the penalty.
    Invalid,
    /// Valid word; recorded with its length-based value.
    Valid(i32),
}

impl WordScore {
    pub fn points(&self) -> i32 {
        match self {
            WordScore::Duplicate => 0,
            WordScore::Invalid => INVALID_WORD_PENALTY,
            WordScore::Valid(points) => *points,
        }
    }

    /// Whether a word-play row should be written for this result.
    pub fn is_recorded(&self) -> bool {
        !matches!(self, WordScore::Duplicate)
    }
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Score `word` for a player who has already played `previous_words` in
    /// this game. `word` is expected to be normalized with [`normalize_word`].
    ///
    /// [`normalize_word`]: crate::normalize_word
    pub fn score_word<S: AsRef<str>>(
        word: &str,
        board: &Board,
        dictionary: &WordValidator,
        previous_words: &[S],
    ) -> WordScore {
        if previous_words.iter().any(|played| played.as_ref() == word) {
            return WordScore::Duplicate;
        }

        let length = word.chars().count();
        if length < MIN_WORD_LENGTH || !board.can_be_formed(word) || !dictionary.is_valid_word(word)
        {
            return WordScore::Invalid;
        }

        WordScore::Valid(Self::points_for_length(length))
    }

    /// Points awarded for a valid word of `length` characters.
    pub fn points_for_length(length: usize) -> i32 {
        match length {
            0..=2 => 0,
            3 | 4 => 1,
            5 => 2,
            6 => 3,
            7 => 5,
            _ => 11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // C A T S
    // X O Q E
    // D G N R
    // A B E L
    fn board() -> Board {
        "CATSXOQEDGNRABEL".parse().unwrap()
    }

    fn dictionary() -> WordValidator {
        WordValidator::from_word_list("cat\ncats\ncog\ndog\nat\nzebra\nbel")
    }

    const NONE: [&str; 0] = [];

    #[test]
    fn test_points_for_length() {
        assert_eq!(ScoringEngine::points_for_length(3), 1);
        assert_eq!(ScoringEngine::points_for_length(4), 1);
        assert_eq!(ScoringEngine::points_for_length(5), 2);
        assert_eq!(ScoringEngine::points_for_length(6), 3);
        assert_eq!(ScoringEngine::points_for_length(7), 5);
        assert_eq!(ScoringEngine::points_for_length(8), 11);
        assert_eq!(ScoringEngine::points_for_length(16), 11);
    }

    #[test]
    fn test_valid_words_score_by_length() {
        let (board, dict) = (board(), dictionary());
        assert_eq!(
            ScoringEngine::score_word("CAT", &board, &dict, &NONE),
            WordScore::Valid(1)
        );
        assert_eq!(
            ScoringEngine::score_word("CATS", &board, &dict, &NONE),
            WordScore::Valid(1)
        );
        assert_eq!(ScoringEngine::score_word("DOG", &board, &dict, &NONE).points(), 1);
    }

    #[test]
    fn test_invalid_words_are_penalized() {
        let (board, dict) = (board(), dictionary());

        // Too short, even though it is on the board and in the dictionary
        let short = ScoringEngine::score_word("AT", &board, &dict, &NONE);
        assert_eq!(short, WordScore::Invalid);
        assert_eq!(short.points(), -1);
        assert!(short.is_recorded());

        // In the dictionary but not on the board
        assert_eq!(
            ScoringEngine::score_word("ZEBRA", &board, &dict, &NONE),
            WordScore::Invalid
        );

        // On the board but not in the dictionary
        assert_eq!(
            ScoringEngine::score_word("TAC", &board, &dict, &NONE),
            WordScore::Invalid
        );
    }

    #[test]
    fn test_duplicates_score_zero_and_are_not_recorded() {
        let (board, dict) = (board(), dictionary());
        let played = vec!["CAT".to_string(), "XYZ".to_string()];

        let repeat = ScoringEngine::score_word("CAT", &board, &dict, &played);
        assert_eq!(repeat, WordScore::Duplicate);
        assert_eq!(repeat.points(), 0);
        assert!(!repeat.is_recorded());

        // Repeating a penalized word is also just a duplicate
        assert_eq!(
            ScoringEngine::score_word("XYZ", &board, &dict, &played),
            WordScore::Duplicate
        );

        // Other words are unaffected
        assert_eq!(
            ScoringEngine::score_word("COG", &board, &dict, &played),
            WordScore::Valid(1)
        );
    }

    #[test]
    fn test_long_words() {
        // S T R A
        // D E N I
        let board: Board = "STRADENIXXXXXXXX".parse().unwrap();
        let dict = WordValidator::from_word_list("strained\nstrain\nstraine\ntrained");

        assert_eq!(ScoringEngine::score_word("STRAIN", &board, &dict, &NONE).points(), 3);
        assert_eq!(ScoringEngine::score_word("STRAINE", &board, &dict, &NONE).points(), 5);
        assert_eq!(ScoringEngine::score_word("TRAINED", &board, &dict, &NONE).points(), 5);
        assert_eq!(ScoringEngine::score_word("STRAINED", &board, &dict, &NONE).points(), 11);
    }
}
