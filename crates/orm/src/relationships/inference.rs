//! Naming inference helpers
//!
//! English-centric pluralization used to derive default foreign-key
//! names from table names, and offered as a convenience for writing
//! table-name declarations. Table names themselves are always declared
//! explicitly on the model; nothing here runs implicitly at query time.

/// Simple pluralization (English-centric)
pub fn pluralize(name: &str) -> String {
    if name.ends_with('y') && !ends_with_vowel_y(name) {
        format!("{}ies", &name[..name.len() - 1])
    } else if name.ends_with('s')
        || name.ends_with("sh")
        || name.ends_with("ch")
        || name.ends_with('x')
        || name.ends_with('z')
    {
        format!("{}es", name)
    } else {
        format!("{}s", name)
    }
}

/// Simple singularization (English-centric)
pub fn singularize(name: &str) -> String {
    if name.ends_with("ies") {
        format!("{}y", &name[..name.len() - 3])
    } else if name.ends_with("ses")
        || name.ends_with("ches")
        || name.ends_with("shes")
        || name.ends_with("xes")
        || name.ends_with("zes")
    {
        name[..name.len() - 2].to_string()
    } else if name.ends_with('s') && name.len() > 1 {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}

fn ends_with_vowel_y(name: &str) -> bool {
    ["ay", "ey", "iy", "oy", "uy"]
        .iter()
        .any(|suffix| name.ends_with(suffix))
}
