//! Input validation failures.

/// Why a requested list size was rejected. The `Display` text is the prompt
/// shown back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// A count was entered before choosing an algorithm.
    NoAlgorithm,
    /// Zero or negative count.
    NotNatural,
    /// Not parseable as an integer.
    NotInteger,
    /// Larger than the configured maximum.
    TooLarge { max: usize },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAlgorithm => write!(f, "Choose the sorting algorithm!"),
            Self::NotNatural => write!(f, "You have to input a natural number!"),
            Self::NotInteger => write!(f, "You have to input an integer!"),
            Self::TooLarge { max } => write!(f, "Pick at most {max} numbers!"),
        }
    }
}

impl std::error::Error for InputError {}
