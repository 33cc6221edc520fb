//! Quiz Engine
//!
//! Round logic for the multiple-choice, typed-answer, comparison and
//! matching games. Every random draw takes the caller's RNG so a seeded
//! generator replays the same session.
//!
//! | Game | Round type |
//! |------|-----------|
//! | Capital Quiz | [`ChoiceRound::capital`] |
//! | Native Name Quiz | [`ChoiceRound::native_name`] |
//! | Flag Quiz | [`ChoiceRound::flag`] |
//! | Capital Spelling | [`SpellingRound`] |
//! | Which is Bigger? | [`MagnitudeRound`] |
//! | Map the City | [`CityMatchRound`] |

use thiserror::Error;

pub mod city_match;
pub mod choice;
pub mod magnitude;
pub mod matching;
pub mod options;
pub mod session;
pub mod spelling;

pub use city_match::{CityMatchRound, CITIES_PER_ROUND};
pub use choice::{ChoiceKind, ChoiceResult, ChoiceRound};
pub use magnitude::{MagnitudeRound, Metric, Side};
pub use matching::{is_capital_match, is_native_name_match};
pub use options::{build_options, sample, shuffle, Attribute, OPTION_COUNT};
pub use session::{GameKind, SessionScore};
pub use spelling::SpellingRound;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuizError {
    #[error("Not enough countries to build this question")]
    InsufficientData,
    #[error("This round has already been answered")]
    AlreadyAnswered,
    #[error("Answer is empty")]
    EmptyAnswer,
    #[error("{0:?} is not one of the options")]
    UnknownOption(String),
    #[error("{0} is not on the board")]
    UnknownCountry(String),
    #[error("Every capital must be placed before checking")]
    NotAllPlaced,
}

pub type Result<T> = std::result::Result<T, QuizError>;
