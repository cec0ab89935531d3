//! Translation between the model's technical category names and the simpler labels
//! users pick from when correcting a forecast.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Technical category → perceived label. Several technical categories share a label;
/// the inverse table keeps the last one listed.
const PERCEPTIONS: [(&str, &str); 23] = [
    ("Frío", "Frío"),
    ("Templado", "Templado"),
    ("Cálido", "Cálido"),
    ("Muy Nublado", "Nublado"),
    ("Parcialmente Nublado", "Parc. Nublado"),
    ("Llovizna", "Llovizna"),
    ("Lluvia Fuerte", "Lluvia"),
    ("Normal", "Soleado"),
    ("Frío + Muy Nublado", "Frío y Nublado"),
    ("Templado + Muy Nublado", "Nublado"),
    ("Templado + Parcialmente Nublado", "Parc. Nublado"),
    ("Cálido + Muy Nublado", "Cálido y Nublado"),
    ("Cálido + Parcialmente Nublado", "Cálido y Despejado"),
    ("Frío + Llovizna", "Frío con Lluvia"),
    ("Templado + Llovizna", "Lluvia Ligera"),
    ("Cálido + Muy Húmedo", "Cálido y Húmedo"),
    ("Viento Frío", "Ventoso y Frío"),
    ("Alta Radiación", "Muy Soleado"),
    ("Muy Húmedo", "Húmedo"),
    ("Húmedo", "Húmedo"),
    ("Frío + Alta Radiación", "Frío y Soleado"),
    ("Templado + Alta Radiación", "Soleado"),
    ("Cálido + Alta Radiación", "Muy Soleado"),
];

/// Labels offered in a cell's selector, in display order.
pub const SELECTOR_OPTIONS: [&str; 15] = [
    "Soleado",
    "Muy Soleado",
    "Parc. Nublado",
    "Nublado",
    "Frío",
    "Templado",
    "Cálido",
    "Lluvia",
    "Llovizna",
    "Frío y Nublado",
    "Cálido y Nublado",
    "Ventoso y Frío",
    "Cálido y Despejado",
    "Frío con Lluvia",
    "Lluvia Ligera",
];

static TO_PERCEPTION: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PERCEPTIONS.iter().copied().collect());

static TO_TECHNICAL: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PERCEPTIONS.iter().map(|(t, p)| (*p, *t)).collect());

/// Label shown to the user for a technical category. Unknown categories show as-is.
///
/// # Examples
///
/// ```
/// use microclima::perception_for;
///
/// assert_eq!(perception_for("Lluvia Fuerte"), "Lluvia");
/// assert_eq!(perception_for("Granizo"), "Granizo");
/// ```
pub fn perception_for(technical: &str) -> &str {
    TO_PERCEPTION.get(technical).copied().unwrap_or(technical)
}

/// Technical category a selected label stands for. Unknown labels pass through.
pub fn technical_for(perception: &str) -> &str {
    TO_TECHNICAL.get(perception).copied().unwrap_or(perception)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perception_roundtrip_is_stable() {
        for (_, perception) in PERCEPTIONS {
            let technical = technical_for(perception);
            assert_eq!(perception_for(technical), perception);
            assert_eq!(technical_for(perception_for(technical)), technical);
        }
    }

    #[test]
    fn test_shared_labels_map_back_to_last_entry() {
        assert_eq!(technical_for("Nublado"), "Templado + Muy Nublado");
        assert_eq!(technical_for("Soleado"), "Templado + Alta Radiación");
        assert_eq!(technical_for("Muy Soleado"), "Cálido + Alta Radiación");
        assert_eq!(technical_for("Parc. Nublado"), "Templado + Parcialmente Nublado");
        assert_eq!(technical_for("Frío"), "Frío");
    }

    #[test]
    fn test_canonical_entries_roundtrip_exactly() {
        for technical in ["Frío", "Cálido", "Llovizna", "Lluvia Fuerte", "Viento Frío"] {
            assert_eq!(technical_for(perception_for(technical)), technical);
        }
    }

    #[test]
    fn test_unknown_values_pass_through() {
        assert_eq!(perception_for("Niebla"), "Niebla");
        assert_eq!(technical_for("Niebla"), "Niebla");
    }

    #[test]
    fn test_every_selector_option_maps_to_a_category() {
        for option in SELECTOR_OPTIONS {
            assert_eq!(perception_for(technical_for(option)), option);
        }
    }
}
