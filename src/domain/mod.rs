pub mod card;
pub mod review;

pub use card::{Algorithm, CardDifficulty, Flashcard, FsrsCard, FsrsState, Schedule, Sm2Card};
pub use review::{QualityLevel, Rating, ReviewLog};
