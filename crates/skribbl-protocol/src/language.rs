//! Room languages.
//!
//! The position of a language in [`LANGUAGES`] is its wire id. The list is
//! taken from the official client; reordering it is a protocol break.

use std::fmt;

/// A room language, or an id this client does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    German,
    Bulgarian,
    Czech,
    Danish,
    Dutch,
    Finnish,
    French,
    Estonian,
    Greek,
    Hebrew,
    Hungarian,
    Italian,
    Japanese,
    Korean,
    Latvian,
    Macedonian,
    Norwegian,
    Portuguese,
    Polish,
    Romanian,
    Russian,
    Serbian,
    Slovakian,
    Spanish,
    Swedish,
    Tagalog,
    Turkish,
    /// A wire id outside [`LANGUAGES`], kept verbatim.
    Unknown(i64),
}

/// Every known language, in wire order.
pub const LANGUAGES: [Language; 28] = [
    Language::English,
    Language::German,
    Language::Bulgarian,
    Language::Czech,
    Language::Danish,
    Language::Dutch,
    Language::Finnish,
    Language::French,
    Language::Estonian,
    Language::Greek,
    Language::Hebrew,
    Language::Hungarian,
    Language::Italian,
    Language::Japanese,
    Language::Korean,
    Language::Latvian,
    Language::Macedonian,
    Language::Norwegian,
    Language::Portuguese,
    Language::Polish,
    Language::Romanian,
    Language::Russian,
    Language::Serbian,
    Language::Slovakian,
    Language::Spanish,
    Language::Swedish,
    Language::Tagalog,
    Language::Turkish,
];

impl Language {
    /// Resolves a wire id. Ids past the end of the list become `Unknown`.
    pub fn from_id(id: i64) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|index| LANGUAGES.get(index).copied())
            .unwrap_or(Self::Unknown(id))
    }

    /// The wire id.
    pub fn id(self) -> i64 {
        match self {
            Self::Unknown(id) => id,
            known => LANGUAGES
                .iter()
                .position(|candidate| *candidate == known)
                .map_or(-1, |index| index as i64),
        }
    }

    /// Lowercase name as the official client spells it.
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::German => "german",
            Self::Bulgarian => "bulgarian",
            Self::Czech => "czech",
            Self::Danish => "danish",
            Self::Dutch => "dutch",
            Self::Finnish => "finnish",
            Self::French => "french",
            Self::Estonian => "estonian",
            Self::Greek => "greek",
            Self::Hebrew => "hebrew",
            Self::Hungarian => "hungarian",
            Self::Italian => "italian",
            Self::Japanese => "japanese",
            Self::Korean => "korean",
            Self::Latvian => "latvian",
            Self::Macedonian => "macedonian",
            Self::Norwegian => "norwegian",
            Self::Portuguese => "portuguese",
            Self::Polish => "polish",
            Self::Romanian => "romanian",
            Self::Russian => "russian",
            Self::Serbian => "serbian",
            Self::Slovakian => "slovakian",
            Self::Spanish => "spanish",
            Self::Swedish => "swedish",
            Self::Tagalog => "tagalog",
            Self::Turkish => "turkish",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "unknown({id})"),
            known => f.write_str(known.name()),
        }
    }
}
