use anyhow::{Result, anyhow, bail};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BOARD_SIZE: usize = 4;

/// The sixteen classic dice. Boards larger than 4x4 reuse them in order.
const DICE: [&str; 16] = [
    "LRYTTE", "VTHRWE", "EGHWNE", "SEOTIS", "ANAEEG", "IDSYTT", "OATTOW", "MTOICU", "AFPKFS",
    "XLDERI", "HCPOAS", "ENSIEU", "YLDEVR", "ZNRNHL", "NMIHUQ", "OBBAOJ",
];

/// One cell of the grid. `Q` stands for the two-letter `QU` tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(char);

impl Tile {
    pub fn from_char(symbol: char) -> Result<Self> {
        if !symbol.is_ascii_alphabetic() {
            bail!("invalid tile symbol {:?}", symbol);
        }
        Ok(Self(symbol.to_ascii_uppercase()))
    }

    /// Single-character symbol used in the serialized board.
    pub fn symbol(&self) -> char {
        self.0
    }

    /// Letters this tile contributes to a word.
    pub fn text(&self) -> &'static str {
        const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        match self.0 {
            'Q' => "QU",
            c => {
                let i = (c as u8 - b'A') as usize;
                &LETTERS[i..i + 1]
            }
        }
    }

    /// Number of bytes of `word` consumed when it starts with this tile's text.
    fn match_prefix(&self, word: &[u8]) -> Option<usize> {
        let text = self.text().as_bytes();
        word.starts_with(text).then_some(text.len())
    }
}

/// An immutable N×N letter grid with 8-neighbour adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Roll a fresh board using the thread-local RNG.
    pub fn random(size: usize) -> Self {
        Self::random_with(size, &mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut dice: Vec<&str> = (0..size * size).map(|i| DICE[i % DICE.len()]).collect();
        dice.shuffle(rng);

        let tiles = dice
            .into_iter()
            .map(|die| {
                let faces = die.as_bytes();
                Tile(faces[rng.gen_range(0..faces.len())] as char)
            })
            .collect();

        Self { size, tiles }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.tiles.get(row * self.size + col).copied()
    }

    /// Row-major indices of the cells touching `index`, diagonals included.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> {
        let n = self.size as isize;
        let row = (index / self.size) as isize;
        let col = (index % self.size) as isize;

        (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dr, dc)| {
                let (r, c) = (row + dr, col + dc);
                (r >= 0 && r < n && c >= 0 && c < n).then_some((r * n + c) as usize)
            })
    }

    /// Whether `word` can be traced through adjacent, distinct cells.
    pub fn can_be_formed(&self, word: &str) -> bool {
        self.find_path(word).is_some()
    }

    /// Row-major cell indices spelling `word`, compared case-insensitively.
    pub fn find_path(&self, word: &str) -> Option<Vec<usize>> {
        let word = word.trim().to_uppercase();
        if word.is_empty() {
            return None;
        }

        let mut visited = vec![false; self.tiles.len()];
        let mut path = Vec::with_capacity(word.len());

        (0..self.tiles.len())
            .any(|start| self.search(start, word.as_bytes(), &mut visited, &mut path))
            .then_some(path)
    }

    fn search(
        &self,
        index: usize,
        remaining: &[u8],
        visited: &mut [bool],
        path: &mut Vec<usize>,
    ) -> bool {
        let Some(consumed) = self.tiles[index].match_prefix(remaining) else {
            return false;
        };

        visited[index] = true;
        path.push(index);

        let rest = &remaining[consumed..];
        if rest.is_empty() {
            return true;
        }

        for next in self.neighbors(index) {
            if !visited[next] && self.search(next, rest, visited, path) {
                return true;
            }
        }

        // Dead end: release the cell for other paths
        visited[index] = false;
        path.pop();
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in &self.tiles {
            write!(f, "{}", tile.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let tiles = s
            .trim()
            .chars()
            .map(Tile::from_char)
            .collect::<Result<Vec<_>>>()?;

        let size = (tiles.len() as f64).sqrt() as usize;
        if tiles.is_empty() || size * size != tiles.len() {
            return Err(anyhow!(
                "board must hold a square number of tiles, got {}",
                tiles.len()
            ));
        }

        Ok(Self { size, tiles })
    }
}
