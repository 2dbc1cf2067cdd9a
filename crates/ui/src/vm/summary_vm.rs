use quiz_core::model::SessionSummary;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub headline: String,
    pub score_label: String,
    pub perfect: bool,
    pub completed_label: String,
}

#[must_use]
pub fn map_summary(summary: &SessionSummary) -> SummaryVm {
    let headline = match summary.section() {
        Some(section) => format!("{} quiz complete", section.title()),
        None => "Quiz complete".to_string(),
    };
    SummaryVm {
        headline,
        score_label: format!(
            "You scored {} / {} ({}%)",
            summary.score(),
            summary.total(),
            summary.percent()
        ),
        perfect: summary.is_perfect(),
        completed_label: summary
            .completed_at()
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::model::{Section, SessionId};
    use quiz_core::time::fixed_now;

    use super::*;

    #[test]
    fn labels_score_and_percent() {
        let summary = SessionSummary::new(
            SessionId::new_v4(),
            Some(Section::Neurocranium),
            6,
            5,
            fixed_now(),
            fixed_now(),
        )
        .expect("summary");

        let vm = map_summary(&summary);
        assert_eq!(vm.headline, "Neurocranium quiz complete");
        assert_eq!(vm.score_label, "You scored 5 / 6 (83%)");
        assert!(!vm.perfect);
    }
}
