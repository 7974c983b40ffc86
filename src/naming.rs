//! Shape key derivation
//!
//! Section display names become data keys: "Core Business Rules" ->
//! `coreBusinessRules`, "High-Level Design" -> `highLevelDesign`. Any
//! non-alphanumeric character separates words; words are lower-cased and
//! re-capitalized so acronyms collapse ("API Endpoints" -> `apiEndpoints`).

/// Convert a display name to a camelCase key
pub fn to_camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());

    for (i, word) in words(name).enumerate() {
        if i == 0 {
            result.push_str(&word.to_lowercase());
        } else {
            result.push_str(&capitalize(word));
        }
    }

    result
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
    }
}
