//! Two-level logic choice: a category plus a specific logic.

use super::LogicUniverse;
use crate::error::SelectorError;

/// Indices into [`LogicSelector::categories`] and [`LogicSelector::logics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicChoice {
    pub category: usize,
    pub logic: usize,
}

/// Maps between a composed logic identifier and a two-level selection.
///
/// Logics whose name starts with a category name are left out of the flat
/// list: they are only reachable as `<category>+<logic>`.
#[derive(Debug, Clone)]
pub struct LogicSelector {
    categories: Vec<String>,
    logics: Vec<String>,
    default_category: String,
}

impl LogicSelector {
    pub fn new(universe: &LogicUniverse) -> Self {
        let logics = universe
            .logics
            .iter()
            .filter(|logic| {
                !universe
                    .categories
                    .iter()
                    .any(|category| logic.starts_with(category.as_str()))
            })
            .cloned()
            .collect();

        Self {
            categories: universe.categories.clone(),
            logics,
            default_category: universe.default_category.clone(),
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn logics(&self) -> &[String] {
        &self.logics
    }

    pub fn default_choice(&self) -> LogicChoice {
        LogicChoice {
            category: self.default_category_index(),
            logic: 0,
        }
    }

    fn default_category_index(&self) -> usize {
        self.categories
            .iter()
            .position(|c| *c == self.default_category)
            .unwrap_or(0)
    }

    pub fn compose(&self, choice: LogicChoice) -> Result<String, SelectorError> {
        let category = self
            .categories
            .get(choice.category)
            .ok_or(SelectorError::IndexOutOfRange {
                kind: "category",
                index: choice.category,
                len: self.categories.len(),
            })?;
        let logic = self
            .logics
            .get(choice.logic)
            .ok_or(SelectorError::IndexOutOfRange {
                kind: "logic",
                index: choice.logic,
                len: self.logics.len(),
            })?;

        if *category == self.default_category {
            Ok(logic.clone())
        } else {
            Ok(format!("{category}+{logic}"))
        }
    }

    /// First category whose `name+` prefixes the identifier wins; without a
    /// match the whole identifier is a logic of the default category.
    pub fn decompose(&self, identifier: &str) -> Result<LogicChoice, SelectorError> {
        let matched = self.categories.iter().enumerate().find_map(|(index, category)| {
            identifier
                .strip_prefix(category.as_str())
                .and_then(|rest| rest.strip_prefix('+'))
                .map(|logic| (index, logic))
        });

        let (category, logic) = matched.unwrap_or((self.default_category_index(), identifier));
        let logic = self
            .logics
            .iter()
            .position(|l| l == logic)
            .ok_or_else(|| SelectorError::UnknownLogic(identifier.to_string()))?;

        Ok(LogicChoice { category, logic })
    }

    /// Every identifier the selector can produce.
    pub fn identifiers(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.categories.len()).flat_map(move |category| {
            (0..self.logics.len()).filter_map(move |logic| {
                self.compose(LogicChoice { category, logic }).ok()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> LogicSelector {
        LogicSelector::new(&LogicUniverse::default())
    }

    #[test]
    fn test_default_category_is_omitted() {
        let selector = selector();
        let logic = selector.compose(selector.default_choice()).unwrap();
        assert_eq!(logic, "KModalLogic");
    }

    #[test]
    fn test_category_prefix_is_composed() {
        let selector = selector();
        let category = selector
            .categories()
            .iter()
            .position(|c| c == "FirstOrderLogic+VariableDomain+ContingentIdentity")
            .unwrap();
        let logic = selector.logics().iter().position(|l| l == "S5ModalLogic").unwrap();

        let composed = selector.compose(LogicChoice { category, logic }).unwrap();
        assert_eq!(composed, "FirstOrderLogic+VariableDomain+ContingentIdentity+S5ModalLogic");
        assert_eq!(selector.decompose(&composed).unwrap(), LogicChoice { category, logic });
    }

    #[test]
    fn test_logics_shadowed_by_categories_are_excluded() {
        let universe = LogicUniverse {
            logics: vec!["PropositionalLogic".into(), "KModalLogic".into()],
            ..LogicUniverse::default()
        };
        let selector = LogicSelector::new(&universe);
        assert_eq!(selector.logics(), ["KModalLogic"]);
    }

    #[test]
    fn test_plus_inside_logic_name_stays_in_default_category() {
        let selector = selector();
        let choice = selector.decompose("LP+KModalLogic").unwrap();
        assert_eq!(choice.category, 0);
        assert_eq!(selector.logics()[choice.logic], "LP+KModalLogic");
    }

    #[test]
    fn test_unknown_logic_and_bad_indices() {
        let selector = selector();
        assert_eq!(
            selector.decompose("NoSuchLogic"),
            Err(SelectorError::UnknownLogic("NoSuchLogic".into()))
        );
        assert!(selector.compose(LogicChoice { category: 99, logic: 0 }).is_err());
        assert!(selector.compose(LogicChoice { category: 0, logic: 999 }).is_err());
    }

    #[test]
    fn test_every_identifier_round_trips() {
        let selector = selector();
        let identifiers: Vec<String> = selector.identifiers().collect();
        assert_eq!(identifiers.len(), selector.categories().len() * selector.logics().len());

        for identifier in identifiers {
            let choice = selector.decompose(&identifier).unwrap();
            assert_eq!(selector.compose(choice).unwrap(), identifier);
        }
    }
}
