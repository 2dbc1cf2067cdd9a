use quiz_core::assets::AssetResolver;
use quiz_core::engine::Phase;
use quiz_core::model::{ItemId, QuizItem};
use services::QuizSession;

use super::image_vm::{ImageVm, map_image};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    Correct,
    Incorrect,
    Disabled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub id: ItemId,
    pub label: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub headline: String,
    pub explanation: String,
    pub fun_fact: Option<String>,
    pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub progress_percent: u32,
    pub instruction: Option<String>,
    pub prompt: String,
    pub image: Option<ImageVm>,
    pub options: Vec<OptionVm>,
    pub can_submit: bool,
    pub feedback: Option<FeedbackVm>,
    pub next_label: Option<String>,
    pub score_label: String,
}

/// Question screen for `session`; `None` once the quiz is in review.
#[must_use]
pub fn map_question(session: &QuizSession, assets: &dyn AssetResolver) -> Option<QuestionVm> {
    let engine = session.engine();
    let phase = engine.phase();
    if phase.is_reviewing() {
        return None;
    }

    let item = engine.current_item();
    let progress = session.progress();
    let noun = engine
        .section()
        .map_or("structure", |section| section.item_noun())
        .to_lowercase();

    let instruction = (!item.has_custom_prompt())
        .then(|| format!("Identify the {noun} with the following description:"));

    let selected = engine.selected_answer();
    let options = session
        .options()
        .iter()
        .map(|option| OptionVm {
            id: option.id.clone(),
            label: option.label.clone(),
            state: option_state(&phase, item.id(), selected, &option.id),
        })
        .collect();

    let (feedback, next_label) = match &phase {
        Phase::Answered { correct, .. } => {
            let next = if engine.is_last_question() {
                "Review Answers"
            } else {
                "Next Question"
            };
            (Some(map_feedback(item, *correct)), Some(next.to_string()))
        }
        _ => (None, None),
    };

    Some(QuestionVm {
        progress_label: format!(
            "Question {} of {}",
            progress.question_number, progress.total
        ),
        progress_percent: progress.percent(),
        instruction,
        prompt: item.prompt().to_string(),
        image: map_image(item, assets),
        options,
        can_submit: phase.is_presenting() && selected.is_some(),
        feedback,
        next_label,
        score_label: format!("Current Score: {} / {}", progress.score, progress.total),
    })
}

fn option_state(
    phase: &Phase,
    answer: &ItemId,
    selected: Option<&ItemId>,
    option: &ItemId,
) -> OptionState {
    match phase {
        Phase::Answered { choice, .. } => {
            if option == answer {
                OptionState::Correct
            } else if option == choice {
                OptionState::Incorrect
            } else {
                OptionState::Disabled
            }
        }
        _ if selected == Some(option) => OptionState::Selected,
        _ => OptionState::Idle,
    }
}

fn map_feedback(item: &QuizItem, correct: bool) -> FeedbackVm {
    let headline = if correct {
        "Correct! Well done!".to_string()
    } else {
        format!("Incorrect. The correct answer is {}", item.display_name())
    };
    FeedbackVm {
        correct,
        headline,
        explanation: item
            .explanation()
            .unwrap_or_else(|| item.description())
            .to_string(),
        fun_fact: item.fun_fact().map(str::to_string),
        location: item.location().map(str::to_string),
    }
}
