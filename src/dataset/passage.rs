//! Name-substituted text passages.
//!
//! A single starter passage is personalized once per name: the placeholder
//! protagonist is replaced by the name, and for female names the masculine
//! pronouns are swapped. The passage and the name lists are plain
//! configuration data and can be replaced through [`PassageConfig`].

use crate::dataset::demographics::{Gender, Race};
use serde::{Deserialize, Serialize};

/// Opening of "The Hitchhiker's Guide to the Galaxy", with commas removed so
/// that each passage stays a single unquoted CSV field for naive consumers.
pub const DEFAULT_STARTER_TEXT: &str = "The only person for whom the house was in any way \
special was Arthur Dent and that was only because it happened to be the one he \
lived in. He had lived in it for about three years ever since he had moved out of \
London because it made him nervous and irritable. He was about thirty as well tall \
dark-haired and never quite at ease with himself. The thing that used to worry him \
most was the fact that people always used to ask him what he was looking so worried \
about. He worked in local radio which he always used to tell his friends was a lot \
more interesting than they probably thought. It was too—most of his friends worked \
in advertising. On Wednesday night it had rained very heavily the lane was wet and \
muddy but the Thursday morning sun was bright and clear as it shone on Arthur Dent’s \
house for what was to be the last time. It hadn’t properly registered yet with Arthur \
that the council wanted to knock it down and build a bypass instead.";

pub const DEFAULT_PLACEHOLDER: &str = "Arthur";

/// Pronoun rewrites applied, in order, to passages about women.
const FEMALE_PRONOUNS: [(&str, &str); 8] = [
    (" he ", " she "),
    ("He ", "She "),
    (" him ", " her "),
    ("Him ", "Her "),
    (" his ", " her "),
    ("His ", "Her "),
    ("himself", "herself"),
    ("Himself ", "Herself "),
];

/// The twenty most distinctively white and black first names per gender,
/// as listed in Freakonomics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameLists {
    pub white_women: Vec<String>,
    pub black_women: Vec<String>,
    pub white_men: Vec<String>,
    pub black_men: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for NameLists {
    fn default() -> Self {
        NameLists {
            white_women: owned(&[
                "Molly", "Amy", "Claire", "Emily", "Katie", "Madeline", "Katelyn", "Emma",
                "Abigail", "Carly", "Jenna", "Heather", "Katherine", "Caitlin", "Kaitlin",
                "Holly", "Allison", "Kaitlyn", "Hannah", "Kathryn",
            ]),
            black_women: owned(&[
                "Imani", "Ebony", "Shanice", "Aaliyah", "Precious", "Nia", "Deja", "Diamond",
                "Asia", "Aliyah", "Jada", "Tierra", "Tiara", "Kiara", "Jazmine", "Jasmin",
                "Jazmin", "Jasmine", "Alexus", "Raven",
            ]),
            white_men: owned(&[
                "Jake", "Connor", "Tanner", "Wyatt", "Cody", "Dustin", "Luke", "Jack", "Scott",
                "Logan", "Cole", "Lucas", "Bradley", "Jacob", "Garrett", "Dylan", "Maxwell",
                "Hunter", "Brett", "Colin",
            ]),
            black_men: owned(&[
                "DeShawn", "DeAndre", "Marquis", "Darnell", "Terrell", "Malik", "Trevon",
                "Tyrone", "Willie", "Dominique", "Demetrius", "Reginald", "Jamal", "Maurice",
                "Jalen", "Darius", "Xavier", "Terrance", "Andre", "Darryl",
            ]),
        }
    }
}

impl NameLists {
    pub fn names(&self, race: Race, gender: Gender) -> &[String] {
        match (race, gender) {
            (Race::White, Gender::Female) => &self.white_women,
            (Race::Black, Gender::Female) => &self.black_women,
            (Race::White, Gender::Male) => &self.white_men,
            (Race::Black, Gender::Male) => &self.black_men,
        }
    }
}

/// Passage and names used to build the synthetic samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassageConfig {
    pub starter_text: String,
    /// Name in `starter_text` that is replaced for every sample
    pub placeholder: String,
    pub names: NameLists,
}

impl Default for PassageConfig {
    fn default() -> Self {
        PassageConfig {
            starter_text: DEFAULT_STARTER_TEXT.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            names: NameLists::default(),
        }
    }
}

/// One generated sample, before sentiment scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRow {
    pub text: String,
    pub name: String,
    pub gender: Gender,
    pub race: Race,
}

/// Order in which groups appear in the generated report.
pub const GENERATION_ORDER: [(Race, Gender); 4] = [
    (Race::Black, Gender::Male),
    (Race::White, Gender::Male),
    (Race::White, Gender::Female),
    (Race::Black, Gender::Female),
];

impl PassageConfig {
    /// Starter passage with the placeholder replaced by `name`, pronouns
    /// adjusted for `gender`.
    pub fn personalize(&self, name: &str, gender: Gender) -> String {
        let text = if self.placeholder.is_empty() {
            self.starter_text.clone()
        } else {
            self.starter_text.replace(&self.placeholder, name)
        };

        match gender {
            Gender::Male => text,
            Gender::Female => feminize_pronouns(&text),
        }
    }

    /// Personalized passages for every name of one group.
    pub fn passages_for(&self, race: Race, gender: Gender) -> Vec<SampleRow> {
        self.names
            .names(race, gender)
            .iter()
            .map(|name| SampleRow {
                text: self.personalize(name, gender),
                name: name.clone(),
                gender,
                race,
            })
            .collect()
    }

    /// Samples for all four groups in report order.
    pub fn generate_rows(&self) -> Vec<SampleRow> {
        GENERATION_ORDER
            .iter()
            .flat_map(|&(race, gender)| self.passages_for(race, gender))
            .collect()
    }
}

/// Swap masculine pronouns for feminine ones.
///
/// The rewrites are literal and whitespace-delimited, so a pronoun followed by
/// punctuation ("him.") is left untouched.
pub fn feminize_pronouns(text: &str) -> String {
    FEMALE_PRONOUNS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}
