//! Singular forms for collection slot names.
//!
//! `renders_many("articles", ..)` also accepts assignments through
//! `"article"`. This covers regular English plurals plus a short list of
//! irregular and uncountable words. Anything else can be named explicitly
//! with `renders_many_as`.

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("women", "woman"),
    ("men", "man"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("movies", "movie"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
];

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
    "data",
];

/// Reduce a plural slot name to its singular form.
///
/// Words without a known singular come back unchanged.
///
/// ```
/// use spark_slots::singularize;
///
/// assert_eq!(singularize("cars"), "car");
/// assert_eq!(singularize("stories"), "story");
/// assert_eq!(singularize("boxes"), "box");
/// assert_eq!(singularize("people"), "person");
/// ```
pub fn singularize(word: &str) -> String {
    if UNCOUNTABLE.iter().any(|uncountable| word.ends_with(uncountable)) {
        return word.to_string();
    }

    for (plural, singular) in IRREGULAR {
        if let Some(stem) = word.strip_suffix(plural) {
            return format!("{stem}{singular}");
        }
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = word.strip_suffix("lves") {
        if !stem.ends_with("va") {
            return format!("{stem}lf");
        }
    }

    for suffix in ["sses", "uses", "xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(singularize("cars"), "car");
        assert_eq!(singularize("articles"), "article");
        assert_eq!(singularize("items"), "item");
        assert_eq!(singularize("tabs"), "tab");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(singularize("stories"), "story");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("classes"), "class");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("dishes"), "dish");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("wolves"), "wolf");
        assert_eq!(singularize("shelves"), "shelf");
        assert_eq!(singularize("valves"), "valve");
        assert_eq!(singularize("directives"), "directive");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("salespeople"), "salesperson");
        assert_eq!(singularize("children"), "child");
        assert_eq!(singularize("knives"), "knife");
        assert_eq!(singularize("fish"), "fish");
        assert_eq!(singularize("news"), "news");
    }

    #[test]
    fn test_already_singular() {
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("s"), "s");
        assert_eq!(singularize(""), "");
    }
}
