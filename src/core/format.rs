//! Display helpers shared by the recommendation flows.
//!
//! Prediction labels arrive in whatever casing the upstream models were
//! trained with (snake_case class names, camelCase keys, PlantVillage's
//! triple-underscore disease labels), so presentation-ready strings are
//! produced here rather than in each caller.

/// Base URL for crop market price lookups
const MARKET_BASE_URL: &str = "https://www.commodityonline.com/mandiprices";

/// Marketplace used for fertilizer purchase links
const STORE_SEARCH_URL: &str = "https://www.amazon.in/s?k=";

/// Plant and disease halves of a detector class name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseLabel {
    pub plant: String,
    pub disease: String,
}

/// Turn a raw model label into a human-friendly name
///
/// Underscores and hyphens become spaces, camelCase runs are split into
/// words, and each word is capitalized: "plant_village" -> "Plant Village",
/// "kidneyBeans" -> "Kidney Beans".
pub fn format_label(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in raw.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a detector class name like "Peach___Bacterial_spot" into its plant
/// and disease parts
///
/// Labels that don't follow the two-part convention keep the whole name as
/// the disease with an unknown plant.
pub fn split_disease_label(raw: &str) -> DiseaseLabel {
    let parts: Vec<&str> = raw.split("___").collect();

    if parts.len() == 2 {
        DiseaseLabel {
            plant: parts[0].replace('_', " "),
            disease: parts[1].replace('_', " "),
        }
    } else {
        DiseaseLabel {
            plant: "Unknown".to_string(),
            disease: raw.replace('_', " "),
        }
    }
}

/// N-P-K components of a hyphenated fertilizer grade ("10-26-26")
pub fn npk_parts(name: &str) -> Option<(String, String, String)> {
    let mut parts = name.split('-');
    let n = parts.next()?.trim();
    let p = parts.next()?.trim();
    let k = parts.next()?.trim();

    if n.is_empty() || p.is_empty() || k.is_empty() {
        return None;
    }

    Some((n.to_string(), p.to_string(), k.to_string()))
}

/// Market price lookup URL for a crop
pub fn market_link(crop: &str) -> String {
    let slug = crop.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}/{}", MARKET_BASE_URL, slug)
}

/// Marketplace search URL for buying a recommended fertilizer
pub fn buy_link(fertilizer: &str) -> String {
    let query = format!("{} fertilizer buy online", fertilizer);
    format!("{}{}", STORE_SEARCH_URL, urlencoding::encode(&query))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_label_snake_case() {
        assert_eq!(format_label("plant_village"), "Plant Village");
    }

    #[test]
    fn test_format_label_kebab_and_camel() {
        assert_eq!(format_label("kidney-beans"), "Kidney Beans");
        assert_eq!(format_label("kidneyBeans"), "Kidney Beans");
    }

    #[test]
    fn test_format_label_already_clean() {
        assert_eq!(format_label("rice"), "Rice");
        assert_eq!(format_label(""), "");
    }

    #[test]
    fn test_split_disease_label_two_parts() {
        let label = split_disease_label("Peach___Bacterial_spot");
        assert_eq!(label.plant, "Peach");
        assert_eq!(label.disease, "Bacterial spot");
    }

    #[test]
    fn test_split_disease_label_fallback() {
        let label = split_disease_label("healthy_leaf");
        assert_eq!(label.plant, "Unknown");
        assert_eq!(label.disease, "healthy leaf");
    }

    #[test]
    fn test_npk_parts() {
        assert_eq!(
            npk_parts("14-35-14"),
            Some(("14".to_string(), "35".to_string(), "14".to_string()))
        );
        assert_eq!(npk_parts("Urea"), None);
        assert_eq!(npk_parts("17-17"), None);
    }

    #[test]
    fn test_market_link_slug() {
        assert_eq!(
            market_link("Kidney Beans"),
            "https://www.commodityonline.com/mandiprices/kidney-beans"
        );
    }

    #[test]
    fn test_buy_link_is_encoded() {
        let link = buy_link("DAP");
        assert!(link.starts_with("https://www.amazon.in/s?k="));
        assert!(link.contains("DAP%20fertilizer%20buy%20online"));
    }
}
