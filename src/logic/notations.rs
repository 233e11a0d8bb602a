//! Operator notation families and the symbols they type.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OperatorNotations {
    #[default]
    BookNotations,
    CommonMathNotations,
    ComputerScienceNotations,
}

impl OperatorNotations {
    pub const ALL: [Self; 3] = [
        Self::BookNotations,
        Self::CommonMathNotations,
        Self::ComputerScienceNotations,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::BookNotations => "BookNotations",
            Self::CommonMathNotations => "CommonMathNotations",
            Self::ComputerScienceNotations => "ComputerScienceNotations",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.name() == name)
    }

    /// URL value first, then the stored preference. The first one present is
    /// used even when it names no notation, in which case the default applies.
    pub fn resolve(from_url: Option<&str>, from_storage: Option<&str>) -> Self {
        from_url
            .or(from_storage)
            .and_then(Self::from_name)
            .unwrap_or_default()
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|n| *n == self).unwrap_or(0)
    }

    /// Symbols offered by the on-screen keyboard: negation, conjunction,
    /// disjunction, implication, bi-implication.
    pub const fn operator_symbols(self) -> [&'static str; 5] {
        match self {
            Self::BookNotations => ["¬", "∧", "∨", "⊃", "≡"],
            Self::CommonMathNotations => ["¬", "∧", "∨", "→", "↔"],
            Self::ComputerScienceNotations => ["!", "&", "|", "→", "≡"],
        }
    }
}

impl fmt::Display for OperatorNotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
