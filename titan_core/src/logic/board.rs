use serde::Serialize;
use std::fmt;

/// Every piece on the board. `A`..`H` are the lesser titans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Piece {
    Titan,
    Pantheon,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

pub const PIECE_COUNT: usize = 10;

impl Piece {
    pub const ALL: [Self; PIECE_COUNT] = [
        Self::Titan,
        Self::Pantheon,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    pub const LESSER: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    /// Pieces of the minimizing side, in move generation order.
    pub const ENEMIES: [Self; 9] = [
        Self::Pantheon,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Titan => 'T',
            Self::Pantheon => 'P',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.letter() == letter.to_ascii_uppercase())
    }

    #[must_use]
    pub const fn is_lesser(self) -> bool {
        !matches!(self, Self::Titan | Self::Pantheon)
    }

    /// The emblem that softens combat against this lesser titan.
    #[must_use]
    pub const fn weakness(self) -> Option<Self> {
        match self {
            Self::A => Some(Self::H),
            Self::B => Some(Self::A),
            Self::C => Some(Self::B),
            Self::D => Some(Self::C),
            Self::E => Some(Self::D),
            Self::F => Some(Self::E),
            Self::G => Some(Self::F),
            Self::H => Some(Self::G),
            Self::Titan | Self::Pantheon => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The square `(dr, dc)` away, if it stays on a `dim`-sized board.
    #[must_use]
    pub fn offset(self, dr: i32, dc: i32, dim: u8) -> Option<Self> {
        let row = i32::from(self.row) + dr;
        let col = i32::from(self.col) + dc;
        let in_range = |v: i32| (0..i32::from(dim)).contains(&v);
        if in_range(row) && in_range(col) {
            Some(Self::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        (self.row.abs_diff(other.row) as u32) + (self.col.abs_diff(other.col) as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    TitanWon,
    PantheonWon,
}

/// Full position of a Titan Clash game.
///
/// Small and `Copy`, so successors are built by value and the state doubles as
/// its own canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TitanState {
    pub dim: u8,
    squares: [Option<Square>; PIECE_COUNT],
    emblems: u16,
    pub life: i32,
    pub titan_to_move: bool,
    pub moves_made: u32,
    pub outcome: Option<Outcome>,
}

impl TitanState {
    /// Opening layout: Titan at the bottom, Pantheon at the top, lesser titans in front of it.
    #[must_use]
    pub fn new(dim: u8, life: i32) -> Self {
        let mut state = Self::empty(dim, life);
        state.place(Piece::Titan, Square::new(7, 3));
        state.place(Piece::Pantheon, Square::new(0, 3));
        for (col, piece) in (0_u8..).zip(Piece::LESSER) {
            state.place(piece, Square::new(1, col));
        }
        state
    }

    /// A board with no pieces, Titan to move.
    #[must_use]
    pub const fn empty(dim: u8, life: i32) -> Self {
        Self {
            dim,
            squares: [None; PIECE_COUNT],
            emblems: 0,
            life,
            titan_to_move: true,
            moves_made: 0,
            outcome: None,
        }
    }

    #[must_use]
    pub const fn square_of(&self, piece: Piece) -> Option<Square> {
        self.squares[piece.index()]
    }

    pub fn place(&mut self, piece: Piece, square: Square) {
        self.squares[piece.index()] = Some(square);
    }

    pub fn remove(&mut self, piece: Piece) {
        self.squares[piece.index()] = None;
    }

    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|p| self.square_of(*p) == Some(square))
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Piece::ALL
            .into_iter()
            .filter_map(|p| self.square_of(p).map(|sq| (p, sq)))
    }

    #[must_use]
    pub fn lesser_remaining(&self) -> usize {
        Piece::LESSER
            .into_iter()
            .filter(|p| self.square_of(*p).is_some())
            .count()
    }

    #[must_use]
    pub const fn has_emblem(&self, piece: Piece) -> bool {
        self.emblems & (1 << piece.index()) != 0
    }

    pub fn add_emblem(&mut self, piece: Piece) {
        self.emblems |= 1 << piece.index();
    }

    #[must_use]
    pub const fn emblem_count(&self) -> u32 {
        self.emblems.count_ones()
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Compact text form, handy for logs and for comparing positions by eye.
    #[must_use]
    pub fn key_string(&self) -> String {
        let mut pieces: Vec<(Piece, Square)> = self.pieces().collect();
        pieces.sort_by_key(|(p, _)| p.letter());
        let pieces = pieces
            .iter()
            .map(|(p, sq)| format!("{}:{}-{}", p.letter(), sq.row, sq.col))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "T{}|{}|{}|Mvs:{}",
            self.life,
            if self.titan_to_move { 'M' } else { 'E' },
            pieces,
            self.moves_made
        )
    }
}

impl fmt::Display for TitanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let turn = if self.titan_to_move {
            "Titan Hero"
        } else {
            "The Pantheon"
        };
        writeln!(f, "Current turn: {turn}")?;
        writeln!(f, "Titan Hero Health: {}", self.life)?;
        writeln!(f, "Board:")?;
        for row in 0..self.dim {
            let line = (0..self.dim)
                .map(|col| {
                    self.piece_at(Square::new(row, col))
                        .map_or('.', Piece::letter)
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
