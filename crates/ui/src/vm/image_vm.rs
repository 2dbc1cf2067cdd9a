use quiz_core::assets::AssetResolver;
use quiz_core::model::QuizItem;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageVm {
    pub source: String,
    pub alt: String,
    pub caption: String,
}

/// Picture for `item`, or `None` when the resolver does not know it.
#[must_use]
pub fn map_image(item: &QuizItem, assets: &dyn AssetResolver) -> Option<ImageVm> {
    assets.resolve(item.image_ref()).map(|image| ImageVm {
        source: image.uri.to_string(),
        alt: image.alt.clone(),
        caption: image.description.clone(),
    })
}
