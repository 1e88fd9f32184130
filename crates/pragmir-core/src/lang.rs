use serde::{Deserialize, Serialize};
use std::fmt;

/// Directive dialect a pragma belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Dialect {
    OpenMp = 0,
    OpenAcc = 1,
}

impl Dialect {
    /// The sentinel word after `#pragma` (and inside Fortran sentinels).
    pub const fn sentinel(self) -> &'static str {
        match self {
            Dialect::OpenMp => "omp",
            Dialect::OpenAcc => "acc",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::OpenMp => write!(f, "openmp"),
            Dialect::OpenAcc => write!(f, "openacc"),
        }
    }
}

/// Host language the directive is embedded in.
///
/// The two Fortran forms differ in sentinel placement and continuation
/// rules; everything downstream of the token source treats them alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Language {
    C = 0,
    Cxx = 1,
    FortranFree = 2,
    FortranFixed = 3,
}

impl Language {
    pub const fn is_fortran(self) -> bool {
        matches!(self, Language::FortranFree | Language::FortranFixed)
    }

    /// Canonical pragma prefix for this language and dialect, including the
    /// trailing space.
    pub const fn prefix(self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (Language::C | Language::Cxx, Dialect::OpenMp) => "#pragma omp ",
            (Language::C | Language::Cxx, Dialect::OpenAcc) => "#pragma acc ",
            (Language::FortranFree, Dialect::OpenMp) => "!$omp ",
            (Language::FortranFree, Dialect::OpenAcc) => "!$acc ",
            (Language::FortranFixed, Dialect::OpenMp) => "c$omp ",
            (Language::FortranFixed, Dialect::OpenAcc) => "c$acc ",
        }
    }

    pub const fn from_repr(value: u32) -> Option<Language> {
        match value {
            0 => Some(Language::C),
            1 => Some(Language::Cxx),
            2 => Some(Language::FortranFree),
            3 => Some(Language::FortranFixed),
            _ => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::C
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::C => write!(f, "c"),
            Language::Cxx => write!(f, "c++"),
            Language::FortranFree => write!(f, "fortran-free"),
            Language::FortranFixed => write!(f, "fortran-fixed"),
        }
    }
}
