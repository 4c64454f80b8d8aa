//! Naming policy shared by every emitter

use once_cell::sync::Lazy;
use regex::Regex;

static SNAKE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("snake word pattern is valid"));
static SNAKE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("snake boundary pattern is valid"));

/// Title-case every run of letters: first letter upper, the rest lower.
/// Digits and underscores start a new run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;

    for c in s.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }

    out
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `user_profile` -> `UserProfile`
pub fn class_name(entity_name: &str) -> String {
    title_case(entity_name).replace('_', "")
}

/// `first_name` -> `firstName`
pub fn field_name(column_name: &str) -> String {
    lower_first(&class_name(column_name))
}

/// Accessor suffix used by getters and setters: `first_name` -> `FirstName`
pub fn accessor_name(column_name: &str) -> String {
    class_name(column_name)
}

/// Instance name for a class: `UserProfile` -> `userProfile`
pub fn instance_name(class_name: &str) -> String {
    lower_first(class_name)
}

/// Lowercased entity name with `s` appended, or `es` when it already ends in `s`
pub fn table_name(entity_name: &str) -> String {
    let lower = entity_name.to_lowercase();
    if lower.ends_with('s') {
        format!("{}es", lower)
    } else {
        format!("{}s", lower)
    }
}

/// `UserProfile` -> `user_profile`
pub fn snake_case(class_name: &str) -> String {
    let words = SNAKE_WORD.replace_all(class_name, "${1}_${2}");
    SNAKE_BOUNDARY
        .replace_all(&words, "${1}_${2}")
        .to_lowercase()
}
