//! Logic universe: which logics exist, how they group into categories, and
//! which notation their operators are typed in.

pub mod notations;
mod selector;

use serde::{Deserialize, Serialize};

pub use notations::OperatorNotations;
pub use selector::{LogicChoice, LogicSelector};

use crate::error::{Error, Result};

pub const PROPOSITIONAL_LOGIC_CATEGORY: &str = "PropositionalLogic";
pub const FIRST_ORDER_LOGIC_PREFIX: &str = "FirstOrderLogic";

/// Logic names exactly as the engine spells them.
const BUILTIN_LOGICS: &[&str] = &[
    "KModalLogic",
    "TModalLogic",
    "BModalLogic",
    "S4ModalLogic",
    "S5ModalLogic",
    "NModalLogic",
    "S2ModalLogic",
    "S3ModalLogic",
    "S3.5ModalLogic",
    "KTemporalModalLogic",
    "KTemporalExtModalLogic",
    "ConditionalModalLogic",
    "ConditionalExtModalLogic",
    "IntuitionisticLogic",
    "MinimalFirstDegreeEntailmentLogic",
    "LP+KModalLogic",
    "Kleene+KModalLogic",
    "RMingle3+KModalLogic",
    "Lukasiewicz+KModalLogic",
    "K4ModalLogicWithGapsAndGluts",
    "N4ModalLogicWithGapsAndGluts",
    "I3LogicOfConstructibleNegation",
    "I4LogicOfConstructibleNegation",
    "WLogicOfConstructibleNegation",
    "LukasiewiczFuzzyLogic",
];

const FIRST_ORDER_DOMAINS: &[&str] = &[
    "ConstantDomain",
    "VariableDomain",
    "VariableDomainWithIncreasingConstraint",
];

const FIRST_ORDER_IDENTITIES: &[&str] = &["NecessaryIdentity", "ContingentIdentity"];

/// The logics the engine understands and their two-level grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicUniverse {
    pub logics: Vec<String>,
    pub categories: Vec<String>,
    /// Category omitted from composed identifiers.
    pub default_category: String,
}

impl Default for LogicUniverse {
    fn default() -> Self {
        let mut categories = vec![PROPOSITIONAL_LOGIC_CATEGORY.to_string()];
        for domain in FIRST_ORDER_DOMAINS {
            for identity in FIRST_ORDER_IDENTITIES {
                categories.push(format!("{FIRST_ORDER_LOGIC_PREFIX}+{domain}+{identity}"));
            }
        }

        Self {
            logics: BUILTIN_LOGICS.iter().map(ToString::to_string).collect(),
            categories,
            default_category: PROPOSITIONAL_LOGIC_CATEGORY.to_string(),
        }
    }
}

impl LogicUniverse {
    pub fn validate(&self) -> Result<()> {
        if !self.categories.contains(&self.default_category) {
            return Err(Error::Config(format!(
                "default category `{}` is not one of the categories",
                self.default_category
            )));
        }
        if LogicSelector::new(self).logics().is_empty() {
            return Err(Error::Config(
                "every logic is shadowed by a category name".to_string(),
            ));
        }
        Ok(())
    }
}

/// Whether the logic is evaluated over possible worlds.
pub fn is_modal_logic(logic: &str) -> bool {
    logic.contains("ModalLogic") || logic.ends_with("IntuitionisticLogic")
}

/// World ids mean nothing for logics without possible worlds.
pub fn should_suppress_world_labels(logic: &str) -> bool {
    !is_modal_logic(logic)
}
