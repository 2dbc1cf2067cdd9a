use quiz_core::assets::AssetResolver;
use quiz_core::engine::QuizEngine;

use super::image_vm::{ImageVm, map_image};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub title: String,
    pub position_label: String,
    pub description: String,
    pub location: Option<String>,
    pub fun_fact: Option<String>,
    pub image: Option<ImageVm>,
    pub previous_label: String,
    pub previous_enabled: bool,
    pub next_label: String,
    pub next_enabled: bool,
    pub restart_label: String,
}

/// Review screen for the item under the cursor; `None` outside review.
#[must_use]
pub fn map_review(engine: &QuizEngine, assets: &dyn AssetResolver) -> Option<ReviewVm> {
    let item = engine.review_item()?;
    let index = engine.phase().index();
    let total = engine.total();
    let noun = engine
        .section()
        .map_or("Item", |section| section.item_noun());

    Some(ReviewVm {
        title: format!("Review Mode - {}", item.display_name()),
        position_label: format!("{} of {}", index + 1, total),
        description: item.description().to_string(),
        location: item.location().map(str::to_string),
        fun_fact: item.fun_fact().map(str::to_string),
        image: map_image(item, assets),
        previous_label: format!("Previous {noun}"),
        previous_enabled: index > 0,
        next_label: format!("Next {noun}"),
        next_enabled: index + 1 < total,
        restart_label: "Start New Quiz".to_string(),
    })
}
