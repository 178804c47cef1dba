//! Location to campaign language resolution.
//!
//! Locations in prospect exports are free text ("Casablanca, Morocco",
//! "Greater Paris Metropolitan Region", ...). Resolution is a case-insensitive
//! substring match against three ordered tables:
//!
//! 1. [`COUNTRY_LANGUAGES`], in declaration order (english, arabic, french
//!    blocks). The first entry contained in the location wins, so a longer
//!    name must precede any shorter name it contains ("Nigeria" before
//!    "Niger", "Equatorial Guinea" before "Guinea").
//! 2. [`ARABIC_INDICATORS`], city and region names for arabic speaking areas.
//! 3. [`FRENCH_INDICATORS`], city and region names for french speaking areas.
//!
//! Anything unmatched resolves to english.

use crate::models::Language;

pub const COUNTRY_LANGUAGES: &[(&str, Language)] = &[
    // English
    ("United States", Language::English),
    ("United Kingdom", Language::English),
    ("Canada", Language::English),
    ("Australia", Language::English),
    ("New Zealand", Language::English),
    ("Ireland", Language::English),
    ("South Africa", Language::English),
    ("India", Language::English),
    ("Singapore", Language::English),
    ("Malaysia", Language::English),
    ("Philippines", Language::English),
    ("Nigeria", Language::English),
    ("Kenya", Language::English),
    ("Ghana", Language::English),
    ("Zimbabwe", Language::English),
    ("Botswana", Language::English),
    ("Malta", Language::English),
    // Arabic
    ("Saudi Arabia", Language::Arabic),
    ("United Arab Emirates", Language::Arabic),
    ("Egypt", Language::Arabic),
    ("Morocco", Language::Arabic),
    ("Algeria", Language::Arabic),
    ("Tunisia", Language::Arabic),
    ("Libya", Language::Arabic),
    ("Sudan", Language::Arabic),
    ("Jordan", Language::Arabic),
    ("Lebanon", Language::Arabic),
    ("Syria", Language::Arabic),
    ("Iraq", Language::Arabic),
    ("Kuwait", Language::Arabic),
    ("Qatar", Language::Arabic),
    ("Bahrain", Language::Arabic),
    ("Oman", Language::Arabic),
    ("Yemen", Language::Arabic),
    ("Palestine", Language::Arabic),
    // French
    ("France", Language::French),
    ("Belgium", Language::French),
    ("Switzerland", Language::French),
    ("Luxembourg", Language::French),
    ("Monaco", Language::French),
    ("Senegal", Language::French),
    ("Mali", Language::French),
    ("Burkina Faso", Language::French),
    ("Niger", Language::French),
    ("Chad", Language::French),
    ("Central African Republic", Language::French),
    ("Cameroon", Language::French),
    ("Equatorial Guinea", Language::French),
    ("Gabon", Language::French),
    ("Republic of the Congo", Language::French),
    ("Democratic Republic of the Congo", Language::French),
    ("Madagascar", Language::French),
    ("Comoros", Language::French),
    ("Djibouti", Language::French),
    ("Ivory Coast", Language::French),
    ("Côte d'Ivoire", Language::French),
    ("Guinea", Language::French),
    ("Togo", Language::French),
    ("Benin", Language::French),
    ("Rwanda", Language::French),
    ("Burundi", Language::French),
    ("Vanuatu", Language::French),
    ("French Polynesia", Language::French),
    ("New Caledonia", Language::French),
    ("Haiti", Language::French),
    ("Seychelles", Language::French),
];

pub const ARABIC_INDICATORS: &[&str] = &[
    "الرياض",
    "دبي",
    "الإمارات",
    "السعودية",
    "مصر",
    "الاسكندرية",
    "riyadh",
    "dubai",
    "abu dhabi",
    "doha",
    "kuwait",
    "cairo",
    "casablanca",
    "rabat",
    "tunis",
    "algiers",
    "baghdad",
    "amman",
];

pub const FRENCH_INDICATORS: &[&str] = &[
    "paris",
    "lyon",
    "marseille",
    "toulouse",
    "nice",
    "nantes",
    "strasbourg",
    "montpellier",
    "bordeaux",
    "lille",
    "rennes",
    "brussels",
    "geneva",
    "lausanne",
    "dakar",
    "abidjan",
    "kinshasa",
    "brazzaville",
    "yaoundé",
    "bamako",
    "ouagadougou",
];

/// Resolve the campaign language for a free-text location.
///
/// Total: empty or unknown locations resolve to [`Language::English`].
pub fn resolve(location: &str) -> Language {
    let location = location.trim().to_lowercase();
    if location.is_empty() {
        return Language::English;
    }

    if let Some((_, language)) = COUNTRY_LANGUAGES
        .iter()
        .find(|(country, _)| location.contains(&country.to_lowercase()))
    {
        return *language;
    }

    if ARABIC_INDICATORS
        .iter()
        .any(|indicator| location.contains(indicator))
    {
        return Language::Arabic;
    }

    if FRENCH_INDICATORS
        .iter()
        .any(|indicator| location.contains(indicator))
    {
        return Language::French;
    }

    Language::English
}
