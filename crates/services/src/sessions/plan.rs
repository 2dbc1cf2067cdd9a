use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{SeedableRng, seq::index};
use serde::Serialize;

use quiz_core::model::{ItemId, OptionOrder, QuizItem, QuizSettings};

/// One selectable answer on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub id: ItemId,
    pub label: String,
}

impl AnswerOption {
    fn from_item(item: &QuizItem) -> Self {
        Self {
            id: item.id().clone(),
            label: item.display_name().to_string(),
        }
    }
}

/// Options for every question of a session, fixed when the session starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionPlan {
    questions: Vec<Vec<AnswerOption>>,
}

impl OptionPlan {
    /// Options of question `index`; empty when out of range.
    #[must_use]
    pub fn for_question(&self, index: usize) -> &[AnswerOption] {
        self.questions.get(index).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds answer option lists: the item itself plus distractors drawn from
/// the other items of the same set.
pub struct OptionPlanner {
    order: OptionOrder,
    max_options: Option<usize>,
    rng: StdRng,
}

impl OptionPlanner {
    #[must_use]
    pub fn new(settings: &QuizSettings) -> Self {
        let rng = settings
            .seed()
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            order: settings.option_order(),
            max_options: settings.max_options(),
            rng,
        }
    }

    /// Plan options for every item, in item order.
    pub fn plan(&mut self, items: &[QuizItem]) -> OptionPlan {
        let questions = (0..items.len())
            .map(|index| self.options_for(items, index))
            .collect();
        OptionPlan { questions }
    }

    fn options_for(&mut self, items: &[QuizItem], answer: usize) -> Vec<AnswerOption> {
        let others: Vec<usize> = (0..items.len()).filter(|&i| i != answer).collect();
        let wanted = self
            .max_options
            .map_or(others.len(), |max| max.saturating_sub(1).min(others.len()));

        let mut picked: Vec<usize> = if wanted == others.len() {
            others
        } else {
            index::sample(&mut self.rng, others.len(), wanted)
                .into_iter()
                .map(|i| others[i])
                .collect()
        };
        picked.push(answer);
        picked.sort_unstable();

        if self.order == OptionOrder::Shuffled {
            picked.shuffle(&mut self.rng);
        }

        picked
            .into_iter()
            .map(|i| AnswerOption::from_item(&items[i]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::catalog;
    use quiz_core::model::{QuizSettingsDraft, Section};
    use std::collections::HashSet;

    fn settings(order: OptionOrder, max_options: Option<usize>, seed: u64) -> QuizSettings {
        QuizSettingsDraft {
            option_order: Some(order),
            max_options,
            seed: Some(seed),
            ..QuizSettingsDraft::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn catalog_order_offers_every_item() {
        let items = catalog::items(Section::Neurocranium).unwrap();
        let plan = OptionPlanner::new(&settings(OptionOrder::Catalog, None, 1)).plan(&items);

        assert_eq!(plan.len(), 6);
        for index in 0..items.len() {
            let labels: Vec<_> = plan
                .for_question(index)
                .iter()
                .map(|o| o.label.as_str())
                .collect();
            let expected: Vec<_> = items.iter().map(QuizItem::display_name).collect();
            assert_eq!(labels, expected);
        }
    }

    #[test]
    fn capped_plans_keep_the_answer() {
        let items = catalog::items(Section::Neurocranium).unwrap();
        let plan = OptionPlanner::new(&settings(OptionOrder::Shuffled, Some(3), 7)).plan(&items);

        for (index, item) in items.iter().enumerate() {
            let options = plan.for_question(index);
            assert_eq!(options.len(), 3);
            let correct = options.iter().filter(|o| &o.id == item.id()).count();
            assert_eq!(correct, 1);
            let ids: HashSet<_> = options.iter().map(|o| &o.id).collect();
            assert_eq!(ids.len(), 3);
        }
    }

    #[test]
    fn cap_above_set_size_offers_all() {
        let items = catalog::items(Section::Sutures).unwrap();
        let plan = OptionPlanner::new(&settings(OptionOrder::Catalog, Some(10), 3)).plan(&items);
        assert_eq!(plan.for_question(2).len(), 3);
    }

    #[test]
    fn seeded_plans_repeat() {
        let items = catalog::items(Section::Viscerocranium).unwrap();
        let s = settings(OptionOrder::Shuffled, Some(3), 42);
        let first = OptionPlanner::new(&s).plan(&items);
        let second = OptionPlanner::new(&s).plan(&items);
        assert_eq!(first, second);
    }

    #[test]
    fn single_item_set_has_only_the_answer() {
        let items = catalog::items(Section::Sutures).unwrap();
        let plan = OptionPlanner::new(&settings(OptionOrder::Shuffled, None, 5)).plan(&items[..1]);
        assert_eq!(plan.for_question(0).len(), 1);
        assert!(plan.for_question(1).is_empty());
    }
}
