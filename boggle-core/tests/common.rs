use boggle_core::{Board, WordValidator};

/// Creates a test WordValidator with a known set of words
pub fn create_test_validator() -> WordValidator {
    let word_list = "cat\ncats\ncog\ndog\nbel\nabel\nnet\nten\ntens\nrent\nqueen\nquest";
    WordValidator::from_word_list(word_list)
}

/// C A T S
/// X O Q E
/// D G N R
/// A B E L
pub fn create_standard_board() -> Board {
    "CATSXOQEDGNRABEL".parse().expect("standard board parses")
}

/// Concatenated tile text along a path of cell indices
pub fn spell(board: &Board, path: &[usize]) -> String {
    path.iter().map(|&i| board.tiles()[i].text()).collect()
}
