use quiz_core::assets::AssetResolver;
use quiz_core::model::Section;
use services::LearningBrowser;

use super::image_vm::{ImageVm, map_image};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionTabVm {
    pub section: Section,
    pub title: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearningVm {
    pub tabs: Vec<SectionTabVm>,
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub fun_fact: Option<String>,
    pub image: Option<ImageVm>,
    pub position_label: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

#[must_use]
pub fn map_learning(browser: &LearningBrowser, assets: &dyn AssetResolver) -> Option<LearningVm> {
    let item = browser.current()?;
    let (position, total) = browser.position();
    let tabs = Section::ALL
        .into_iter()
        .map(|section| SectionTabVm {
            section,
            title: section.title().to_string(),
            active: section == browser.section(),
        })
        .collect();

    Some(LearningVm {
        tabs,
        name: item.display_name().to_string(),
        description: item.description().to_string(),
        location: item.location().map(str::to_string),
        fun_fact: item.fun_fact().map(str::to_string),
        image: map_image(item, assets),
        position_label: format!("{position} / {total}"),
        previous_enabled: browser.has_previous(),
        next_enabled: browser.has_next(),
    })
}
