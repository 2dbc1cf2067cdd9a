use quiz_core::catalog;
use quiz_core::model::Section;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuCardVm {
    pub section: Section,
    pub title: String,
    pub description: String,
    pub count_label: String,
}

/// One card per section, in menu order.
#[must_use]
pub fn map_menu() -> Vec<MenuCardVm> {
    Section::ALL
        .into_iter()
        .map(|section| {
            let count = catalog::drafts(section).len();
            let noun = section.item_noun().to_lowercase();
            let plural = if count == 1 { "" } else { "s" };
            MenuCardVm {
                section,
                title: section.title().to_string(),
                description: section.description().to_string(),
                count_label: format!("{count} {noun}{plural}"),
            }
        })
        .collect()
}
