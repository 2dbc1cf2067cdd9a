//! Built-in anatomy content, one ordered item list per [`Section`].
//!
//! List order is presentation order: the quiz asks the items in exactly
//! this sequence.

use crate::model::{QuizItem, QuizItemDraft, QuizItemError, Section};

/// Validated items of a section, in question order.
///
/// # Errors
///
/// Returns `QuizItemError` if a built-in entry fails validation.
pub fn items(section: Section) -> Result<Vec<QuizItem>, QuizItemError> {
    drafts(section)
        .into_iter()
        .map(QuizItemDraft::validate)
        .collect()
}

/// Every section's items in menu order.
///
/// # Errors
///
/// Returns `QuizItemError` if a built-in entry fails validation.
pub fn all_items() -> Result<Vec<(Section, QuizItem)>, QuizItemError> {
    let mut out = Vec::new();
    for section in Section::ALL {
        out.extend(items(section)?.into_iter().map(|item| (section, item)));
    }
    Ok(out)
}

/// Raw entries of a section, before validation.
#[must_use]
pub fn drafts(section: Section) -> Vec<QuizItemDraft> {
    match section {
        Section::Neurocranium => neurocranium(),
        Section::Viscerocranium => viscerocranium(),
        Section::Sutures => sutures(),
    }
}

fn neurocranium() -> Vec<QuizItemDraft> {
    vec![
        QuizItemDraft::new(
            "frontal",
            "Frontal Bone",
            "Forms the forehead and the anterior portion of the cranial roof. Contains the frontal sinuses and supraorbital margins.",
        )
        .with_fun_fact("The frontal bone protects the frontal lobes of your brain, which are responsible for personality and decision-making!")
        .with_location("Located at the front of the skull, forming your forehead and the roof of your eye sockets")
        .with_prompt("This bone forms the forehead and contains important features like the glabella and supraorbital margins. It protects the frontal lobes and forms the roof of the eye sockets. Which bone is this?")
        .with_explanation("The frontal bone is crucial for protecting the frontal lobes and forming the anterior cranial fossa. It features the glabella (smooth elevation between eyebrows), supraorbital margins (upper eye socket rim), and contains the frontal sinuses."),
        QuizItemDraft::new(
            "parietal",
            "Parietal Bone (×2)",
            "Forms the superior and lateral walls of the cranium. Features temporal lines for muscle attachment.",
        )
        .with_fun_fact("The parietal bones are like the roof of your skull house, protecting the parts of your brain that process touch and spatial awareness!")
        .with_location("Found on the top and sides of your skull")
        .with_prompt("These paired bones form the roof and sides of the cranium, featuring temporal lines for muscle attachment. They protect important parts of the brain involved in spatial awareness. Identify these bones:")
        .with_explanation("The parietal bones protect the parietal lobes and feature temporal lines where muscles attach. They join with the frontal bone at the coronal suture and with each other at the sagittal suture."),
        QuizItemDraft::new(
            "temporal",
            "Temporal Bone (×2)",
            "Houses the organs of hearing and contains the styloid process",
        )
        .with_fun_fact("Your temporal bones are like your skull's headphone jacks - they contain your inner ear structures!")
        .with_location("On the sides of your head, near your ears")
        .with_prompt("This bone houses the organs of hearing and balance, contains the external acoustic meatus, and forms an important joint with the mandible. Which bone is this?")
        .with_explanation("The temporal bone contains the external acoustic meatus for hearing, the mastoid process for muscle attachment, and forms the temporomandibular joint (TMJ) with the mandible. It's crucial for hearing, balance, and jaw movement."),
        QuizItemDraft::new(
            "occipital",
            "Occipital Bone",
            "Forms the posterior and inferior portions of the cranium, contains the foramen magnum",
        )
        .with_fun_fact("The foramen magnum in the occipital bone is like a gateway where your brain connects to your spinal cord!")
        .with_location("At the back and base of your skull")
        .with_prompt("This bone forms the posterior cranial base and contains the foramen magnum, which allows passage of the spinal cord. It features attachment points for neck muscles. Identify this bone:")
        .with_explanation("The occipital bone features the foramen magnum for spinal cord passage, the external occipital protuberance, and nuchal lines for muscle attachment. It joins the parietal bones at the lambdoid suture."),
        QuizItemDraft::new(
            "sphenoid",
            "Sphenoid Bone",
            "Forms part of the anterior cranial fossa and contains the sella turcica",
        )
        .with_fun_fact("The sphenoid looks like a butterfly and has a special seat (sella turcica) for your pituitary gland!")
        .with_location("Deep in the middle of your skull")
        .with_prompt("This butterfly-shaped bone forms part of the cranial base and contains the sella turcica, which houses an important endocrine gland. Which bone is this?")
        .with_explanation("The sphenoid bone features the sella turcica housing the pituitary gland, and its greater and lesser wings protect vital structures. The sphenomandibular ligament originates from its spine."),
        QuizItemDraft::new(
            "ethmoid",
            "Ethmoid Bone",
            "Located between the orbital cavities, forms part of the nasal cavity roof",
        )
        .with_fun_fact("The ethmoid is like a sieve with many small holes, helping with your sense of smell!")
        .with_location("Between your eyes, behind your nose")
        .with_prompt("Located between the orbits, this bone contains the cribriform plate for olfactory nerve passage and forms part of the nasal cavity. Identify this bone:")
        .with_explanation("The ethmoid bone contains the cribriform plate for olfactory nerves and forms part of the nasal cavity with its perpendicular and orbital plates. It's essential for the sense of smell and nasal cavity structure."),
    ]
}

fn viscerocranium() -> Vec<QuizItemDraft> {
    vec![
        QuizItemDraft::new(
            "maxilla",
            "Maxilla",
            "Forms the upper jaw and contributes to the formation of the orbit, nasal cavity, and hard palate",
        )
        .with_fun_fact("The maxilla contains air-filled spaces called maxillary sinuses, which help make your skull lighter!")
        .with_location("Forms the upper jaw and central part of the facial skeleton"),
        QuizItemDraft::new(
            "nasal",
            "Nasal Bones",
            "Form the bridge of the nose and provide attachment for the nasal cartilages",
        )
        .with_fun_fact("These small, paired bones help protect your nasal cavity and give your nose its unique shape!")
        .with_location("At the bridge of your nose, between your eyes"),
        QuizItemDraft::new(
            "zygomatic",
            "Zygomatic Bones",
            "Form the prominence of the cheeks and part of the lateral orbital wall",
        )
        .with_fun_fact("Also called cheekbones, these bones help protect your eyes and give your face its characteristic shape!")
        .with_location("Form your cheekbones and part of your eye sockets"),
        QuizItemDraft::new(
            "mandible",
            "Mandible",
            "Forms the lower jaw and is the only movable bone of the skull",
        )
        .with_fun_fact("The mandible is the strongest bone in your face and helps you talk, chew, and make expressions!")
        .with_location("Forms your lower jaw"),
    ]
}

fn sutures() -> Vec<QuizItemDraft> {
    vec![
        QuizItemDraft::new(
            "coronal",
            "Coronal Suture",
            "Joins the frontal bone with the parietal bones",
        )
        .with_fun_fact("This suture got its name because it's located where a crown would sit on your head!")
        .with_location("Runs across the top of your skull from ear to ear"),
        QuizItemDraft::new(
            "sagittal",
            "Sagittal Suture",
            "Joins the two parietal bones along the midline of the skull",
        )
        .with_fun_fact("Named after the Latin word \"sagitta\" meaning arrow, as it runs straight like an arrow!")
        .with_location("Runs along the top of your skull from front to back"),
        QuizItemDraft::new(
            "lambdoid",
            "Lambdoid Suture",
            "Joins the occipital bone with the parietal bones",
        )
        .with_fun_fact("Named after the Greek letter lambda (λ) because it looks similar in shape!")
        .with_location("At the back of your skull, forming a λ shape"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_section_validates() {
        assert_eq!(items(Section::Neurocranium).unwrap().len(), 6);
        assert_eq!(items(Section::Viscerocranium).unwrap().len(), 4);
        assert_eq!(items(Section::Sutures).unwrap().len(), 3);
        assert_eq!(all_items().unwrap().len(), 13);
    }

    #[test]
    fn ids_are_unique_across_sections() {
        let all = all_items().unwrap();
        let ids: HashSet<_> = all.iter().map(|(_, item)| item.id().clone()).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn neurocranium_is_asked_in_question_order() {
        let ids: Vec<_> = items(Section::Neurocranium)
            .unwrap()
            .iter()
            .map(|item| item.id().to_string())
            .collect();
        assert_eq!(
            ids,
            ["frontal", "parietal", "temporal", "occipital", "sphenoid", "ethmoid"]
        );
    }

    #[test]
    fn every_item_has_fun_fact_and_location() {
        for (_, item) in all_items().unwrap() {
            assert!(item.fun_fact().is_some(), "{} lacks a fun fact", item.id());
            assert!(item.location().is_some(), "{} lacks a location", item.id());
        }
    }
}
