//! Image lookup for quiz items.
//!
//! A miss is never an error: resolvers return `None` and callers render the
//! item without a picture.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::model::{ImageRef, ItemId, MediaUri, QuizItem, Section};

/// Default directory of the bundled images, relative to the working directory.
pub const DEFAULT_ASSET_ROOT: &str = "assets/images_organized";

/// A renderable anatomy picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnatomyImage {
    pub image_ref: ImageRef,
    pub section: Section,
    pub uri: MediaUri,
    pub alt: String,
    pub description: String,
}

/// Resolves an item's [`ImageRef`] to an image.
pub trait AssetResolver {
    /// Returns `None` when the reference is unknown.
    fn resolve(&self, image_ref: &ImageRef) -> Option<&AnatomyImage>;
}

/// Result of checking a table against item lists and the file system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetReport {
    /// Items whose image reference has no table entry.
    pub unresolved_items: Vec<ItemId>,
    /// Table entries pointing at files that do not exist.
    pub missing_files: Vec<PathBuf>,
}

impl AssetReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unresolved_items.is_empty() && self.missing_files.is_empty()
    }
}

/// In-memory image table keyed by [`ImageRef`].
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    images: BTreeMap<ImageRef, AnatomyImage>,
}

impl AssetTable {
    /// A table that resolves nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled images, laid out as `<root>/<section>/<image>.png`.
    #[must_use]
    pub fn builtin(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let mut table = Self::empty();
        for (section, image, alt, description) in BUILTIN_IMAGES {
            let path = root.join(section.slug()).join(format!("{image}.png"));
            table.insert(AnatomyImage {
                image_ref: ImageRef::new(*image),
                section: *section,
                uri: MediaUri::FilePath(path),
                alt: (*alt).to_string(),
                description: (*description).to_string(),
            });
        }
        table
    }

    /// Add or replace an image; returns the replaced entry.
    pub fn insert(&mut self, image: AnatomyImage) -> Option<AnatomyImage> {
        self.images.insert(image.image_ref.clone(), image)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnatomyImage> {
        self.images.values()
    }

    /// Check which items cannot be pictured and which files are absent.
    ///
    /// URL entries are not fetched and always count as present.
    #[must_use]
    pub fn check<'a>(&self, items: impl IntoIterator<Item = &'a QuizItem>) -> AssetReport {
        let unresolved_items = items
            .into_iter()
            .filter(|item| !self.images.contains_key(item.image_ref()))
            .map(|item| item.id().clone())
            .collect();

        let missing_files = self
            .images
            .values()
            .filter_map(|image| image.uri.as_path())
            .filter(|path| !path.is_file())
            .map(Path::to_path_buf)
            .collect();

        AssetReport {
            unresolved_items,
            missing_files,
        }
    }
}

impl AssetResolver for AssetTable {
    fn resolve(&self, image_ref: &ImageRef) -> Option<&AnatomyImage> {
        let found = self.images.get(image_ref);
        if found.is_none() {
            tracing::debug!(image = %image_ref, "image not found, rendering without it");
        }
        found
    }
}

const BUILTIN_IMAGES: &[(Section, &str, &str, &str)] = &[
    (
        Section::Neurocranium,
        "frontal",
        "Frontal bone anatomy",
        "The frontal bone forms the forehead and anterior cranial fossa. Features include the glabella, supraorbital margins, and frontal sinuses. Critical for protecting frontal lobes and forming eye sockets.",
    ),
    (
        Section::Neurocranium,
        "parietal",
        "Parietal bone anatomy",
        "The paired parietal bones form the roof and sides of the cranium. Features temporal lines for muscle attachment and protects the parietal lobes. Key for spatial awareness.",
    ),
    (
        Section::Neurocranium,
        "temporal",
        "Temporal bone anatomy",
        "Houses the organs of hearing and balance. Contains the external acoustic meatus, mastoid process, and styloid process. Forms the temporomandibular joint.",
    ),
    (
        Section::Neurocranium,
        "occipital",
        "Occipital bone anatomy",
        "Forms the posterior cranial base, featuring the foramen magnum for spinal cord passage. Contains external occipital protuberance and nuchal lines for muscle attachment.",
    ),
    (
        Section::Neurocranium,
        "sphenoid",
        "Sphenoid bone anatomy",
        "The butterfly-shaped sphenoid forms part of the cranial base. Features the sella turcica housing the pituitary gland, and greater/lesser wings protecting vital structures.",
    ),
    (
        Section::Neurocranium,
        "ethmoid",
        "Ethmoid bone anatomy",
        "Located between the orbits, contains the cribriform plate for olfactory nerves. Forms part of the nasal cavity and orbital walls with its perpendicular and orbital plates.",
    ),
    (
        Section::Viscerocranium,
        "maxilla",
        "Maxilla bone anatomy",
        "Forms the upper jaw and contains maxillary teeth. Features include maxillary sinus, infraorbital foramen, and contributes to hard palate and nasal cavity floor.",
    ),
    (
        Section::Viscerocranium,
        "nasal",
        "Nasal bone anatomy",
        "Paired bones forming the bridge of the nose. Articulates with frontal bone superiorly and supports upper lateral nasal cartilages. Essential for nasal cavity structure.",
    ),
    (
        Section::Viscerocranium,
        "zygomatic",
        "Zygomatic bone anatomy",
        "Forms the prominence of the cheek and lateral orbital wall. Features zygomaticofacial foramina and temporal process. Important for facial expression and mastication.",
    ),
    (
        Section::Viscerocranium,
        "mandible",
        "Mandible bone anatomy",
        "The U-shaped lower jaw bone with mandibular condyle and coronoid process. Contains lower teeth and mental foramen. Essential for chewing and speech.",
    ),
    (
        Section::Sutures,
        "coronal",
        "Coronal suture anatomy",
        "Joins the frontal and parietal bones. This serrated joint allows slight movement during birth and early development. Important growth site that later fuses.",
    ),
    (
        Section::Sutures,
        "sagittal",
        "Sagittal suture anatomy",
        "Midline suture between parietal bones. Features interlocking edges for structural strength. Critical for skull growth and brain development.",
    ),
    (
        Section::Sutures,
        "lambdoid",
        "Lambdoid suture anatomy",
        "Connects occipital bone with parietal bones. Named for lambda-shaped appearance. Important for posterior cranial development and growth.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::QuizItemDraft;

    #[test]
    fn builtin_table_covers_the_catalog() {
        let table = AssetTable::builtin(DEFAULT_ASSET_ROOT);
        assert_eq!(table.len(), 13);
        let all = catalog::all_items().unwrap();
        let report = table.check(all.iter().map(|(_, item)| item));
        assert!(report.unresolved_items.is_empty());
    }

    #[test]
    fn builtin_paths_follow_section_layout() {
        let table = AssetTable::builtin("/srv/img");
        let image = table.resolve(&ImageRef::new("coronal")).unwrap();
        assert_eq!(image.section, Section::Sutures);
        assert_eq!(
            image.uri.as_path(),
            Some(Path::new("/srv/img/sutures/coronal.png"))
        );
    }

    #[test]
    fn unknown_reference_resolves_to_none() {
        let table = AssetTable::builtin(DEFAULT_ASSET_ROOT);
        assert!(table.resolve(&ImageRef::new("hyoid")).is_none());
        assert!(AssetTable::empty().resolve(&ImageRef::new("frontal")).is_none());
    }

    #[test]
    fn check_reports_missing_files_and_unresolved_items() {
        let dir = tempfile::tempdir().unwrap();
        let sutures = dir.path().join("sutures");
        std::fs::create_dir_all(&sutures).unwrap();
        std::fs::write(sutures.join("coronal.png"), b"png").unwrap();

        let table = AssetTable::builtin(dir.path());
        let hyoid = QuizItemDraft::new("hyoid", "Hyoid Bone", "Floats in the neck")
            .validate()
            .unwrap();
        let report = table.check([&hyoid]);

        assert_eq!(report.unresolved_items, vec![ItemId::new("hyoid")]);
        assert_eq!(report.missing_files.len(), 12);
        assert!(!report.missing_files.contains(&sutures.join("coronal.png")));
        assert!(!report.is_clean());
    }

    #[test]
    fn url_entries_count_as_present() {
        let mut table = AssetTable::empty();
        table.insert(AnatomyImage {
            image_ref: ImageRef::new("frontal"),
            section: Section::Neurocranium,
            uri: MediaUri::from_url("https://example.org/frontal.png").unwrap(),
            alt: "Frontal bone anatomy".into(),
            description: "Forehead".into(),
        });
        let items = catalog::items(Section::Neurocranium).unwrap();
        let report = table.check(items.iter().take(1));
        assert!(report.is_clean());
    }
}
