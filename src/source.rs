//! Number source categories and their endpoint table

/// The pre-registered upstream source categories, each bound to a fixed
/// endpoint path on the number-generator service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    Primes,
    Fibonacci,
    Even,
    Random,
}

impl SourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceCategory::Primes => "primes",
            SourceCategory::Fibonacci => "fibonacci",
            SourceCategory::Even => "even",
            SourceCategory::Random => "random",
        }
    }

    /// Path segment on the number-generator service.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            SourceCategory::Primes => "primes",
            SourceCategory::Fibonacci => "fibo",
            SourceCategory::Even => "even",
            SourceCategory::Random => "rand",
        }
    }

    /// Accepts both the full names and the one-letter codes (`p`, `f`, `e`,
    /// `r`) the service is commonly driven with.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "p" | "primes" => Some(SourceCategory::Primes),
            "f" | "fibonacci" | "fibo" => Some(SourceCategory::Fibonacci),
            "e" | "even" => Some(SourceCategory::Even),
            "r" | "random" | "rand" => Some(SourceCategory::Random),
            _ => None,
        }
    }

    pub fn all() -> [SourceCategory; 4] {
        [
            SourceCategory::Primes,
            SourceCategory::Fibonacci,
            SourceCategory::Even,
            SourceCategory::Random,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_table() {
        assert_eq!(SourceCategory::Primes.endpoint_path(), "primes");
        assert_eq!(SourceCategory::Fibonacci.endpoint_path(), "fibo");
        assert_eq!(SourceCategory::Even.endpoint_path(), "even");
        assert_eq!(SourceCategory::Random.endpoint_path(), "rand");
    }

    #[test]
    fn test_from_str_accepts_short_codes() {
        for category in SourceCategory::all() {
            assert_eq!(SourceCategory::from_str(category.as_str()), Some(category));
        }
        assert_eq!(SourceCategory::from_str("p"), Some(SourceCategory::Primes));
        assert_eq!(SourceCategory::from_str("f"), Some(SourceCategory::Fibonacci));
        assert_eq!(SourceCategory::from_str("e"), Some(SourceCategory::Even));
        assert_eq!(SourceCategory::from_str("r"), Some(SourceCategory::Random));
        assert_eq!(SourceCategory::from_str("odd"), None);
    }
}
