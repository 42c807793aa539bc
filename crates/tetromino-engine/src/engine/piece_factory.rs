use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    ParsePieceSeedError,
    core::{Piece, Position, TetrominoType},
};

/// Produces new pieces at the spawn position.
///
/// Random pieces are drawn uniformly and independently from the seven
/// types: there is no bag and no repeat suppression, so droughts and streaks
/// are possible.
///
/// # Example
///
/// ```
/// use tetromino_engine::{PieceFactory, Position, TetrominoType};
///
/// let mut factory = PieceFactory::new(Position::new(5, 0));
///
/// let piece = factory.create_random();
/// assert_eq!(piece.position(), Position::new(5, 0));
/// assert_eq!(piece.rotation(), 0);
///
/// let o = factory.create_specific(TetrominoType::O);
/// assert_eq!(o.kind(), TetrominoType::O);
/// ```
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: Pcg32,
    spawn_position: Position,
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the factory's random number generator. The same seed
/// always produces the same sequence of pieces, which makes games
/// reproducible for tests and simulations.
///
/// Seeds are written and parsed as 32 hexadecimal digits:
///
/// ```
/// use tetromino_engine::PieceSeed;
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
/// assert!("xyz".parse::<PieceSeed>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParsePieceSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceFactory {
    /// Creates a factory seeded from the thread-local generator.
    #[must_use]
    pub fn new(spawn_position: Position) -> Self {
        Self::with_seed(spawn_position, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic pieces.
    #[must_use]
    pub fn with_seed(spawn_position: Position, seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            spawn_position,
        }
    }

    #[must_use]
    pub fn spawn_position(&self) -> Position {
        self.spawn_position
    }

    /// Creates a piece of a uniformly random type in spawn orientation.
    pub fn create_random(&mut self) -> Piece {
        let kind: TetrominoType = self.rng.random();
        self.create_specific(kind)
    }

    /// Creates a piece of the given type in spawn orientation.
    #[must_use]
    pub fn create_specific(&self, kind: TetrominoType) -> Piece {
        Piece::new(kind, self.spawn_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_spawn_position_and_rotation() {
        let mut factory = PieceFactory::with_seed(Position::new(6, 0), SEED);
        for _ in 0..20 {
            let piece = factory.create_random();
            assert_eq!(piece.position(), Position::new(6, 0));
            assert_eq!(piece.rotation(), 0);
        }
        for kind in TetrominoType::ALL {
            assert_eq!(factory.create_specific(kind).kind(), kind);
        }
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let mut factory1 = PieceFactory::with_seed(Position::new(5, 0), SEED);
        let mut factory2 = PieceFactory::with_seed(Position::new(5, 0), SEED);
        for _ in 0..50 {
            assert_eq!(factory1.create_random(), factory2.create_random());
        }
    }

    #[test]
    fn test_repeats_are_possible() {
        // Uniform draws without a bag must eventually repeat a type back to back.
        let mut factory = PieceFactory::with_seed(Position::new(5, 0), SEED);
        let kinds: Vec<_> = (0..200).map(|_| factory.create_random().kind()).collect();
        assert!(kinds.windows(2).any(|w| w[0] == w[1]));
        for kind in TetrominoType::ALL {
            assert!(kinds.contains(&kind), "{kind:?} never drawn");
        }
    }

    mod piece_seed_format {
        use super::*;

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = PieceSeed([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, seed);
        }

        #[test]
        fn test_leading_zeros_are_kept() {
            let seed = PieceSeed::from_bytes([0; 16]);
            assert_eq!(seed.to_string(), "0".repeat(32));
        }

        #[test]
        fn test_uppercase_hex_is_accepted() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_invalid_strings() {
            for s in [
                "",
                "0123456789abcdef0123456789abcde",
                "0123456789abcdef0123456789abcdef0",
                "ghijklmnopqrstuvwxyzghijklmnopqr",
                "+123456789abcdef0123456789abcdef",
            ] {
                assert_eq!(s.parse::<PieceSeed>(), Err(ParsePieceSeedError), "{s:?}");
            }
            let err = serde_json::from_str::<PieceSeed>("\"zz\"").unwrap_err();
            assert!(err.to_string().contains("invalid piece seed"));
        }

        #[test]
        fn test_random_seed_round_trip_preserves_sequence() {
            let seed: PieceSeed = rand::rng().random();
            let parsed: PieceSeed = seed.to_string().parse().unwrap();
            let mut factory1 = PieceFactory::with_seed(Position::new(5, 0), seed);
            let mut factory2 = PieceFactory::with_seed(Position::new(5, 0), parsed);
            for _ in 0..20 {
                assert_eq!(factory1.create_random(), factory2.create_random());
            }
        }
    }
}
