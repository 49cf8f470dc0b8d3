use clap::{ValueEnum, builder::PossibleValue};
use claudrock_core::{Claude4Client, ClaudeClient, ModelCatalog};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Which client a command talks through
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Claude3,
    #[default]
    Claude4,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Family::Claude3 => "claude3",
            Family::Claude4 => "claude4",
        };
        write!(f, "{name}")
    }
}

impl ValueEnum for Family {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Claude3, Self::Claude4]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = match self {
            Self::Claude3 => PossibleValue::new("claude3")
                .alias("3")
                .help("Claude 3 Haiku and 3.5 Sonnet"),
            Self::Claude4 => PossibleValue::new("claude4")
                .alias("4")
                .help("Claude 4 plus every Claude 3.x model"),
        };
        Some(value)
    }
}

impl Family {
    pub fn catalog(&self) -> ModelCatalog {
        match self {
            Family::Claude3 => ModelCatalog::claude3(),
            Family::Claude4 => ModelCatalog::claude4(),
        }
    }

    /// Chat model used when neither the flag nor the config names one
    pub fn builtin_chat_model(&self) -> &'static str {
        match self {
            Family::Claude3 => ClaudeClient::DEFAULT_CHAT_MODEL,
            Family::Claude4 => Claude4Client::DEFAULT_CHAT_MODEL,
        }
    }

    /// Family whose catalog knows `short_name`, preferring the smaller one
    pub fn owning(short_name: &str) -> Option<Family> {
        Family::iter().find(|family| family.catalog().contains(short_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_names_round_trip_through_clap() {
        for family in Family::iter() {
            let parsed = Family::from_str(&family.to_string(), true).unwrap();
            assert_eq!(parsed, family);
        }
        assert_eq!(Family::from_str("3", false).unwrap(), Family::Claude3);
    }

    #[test]
    fn test_builtin_models_are_in_catalog() {
        for family in Family::iter() {
            assert!(family.catalog().contains(family.builtin_chat_model()));
        }
    }

    #[test]
    fn test_owning_family() {
        assert_eq!(Family::owning("sonnet_v2"), Some(Family::Claude3));
        assert_eq!(Family::owning("opus4.1"), Some(Family::Claude4));
        assert_eq!(Family::owning("gpt-4o"), None);
    }
}
