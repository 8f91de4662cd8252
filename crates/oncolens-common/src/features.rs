//! The ten scorable cell-nucleus measurements.
//!
//! Two families of five: `mean*` (average over the nuclei in the sample) and
//! `worst*` (mean of the three largest values). The enumeration order here is
//! the canonical order used for scoring, tie-breaking and error reporting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of required numeric fields per record.
pub const FEATURE_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    MeanRadius,
    MeanTexture,
    MeanPerimeter,
    MeanArea,
    MeanSmoothness,
    WorstRadius,
    WorstTexture,
    WorstPerimeter,
    WorstArea,
    WorstSmoothness,
}

impl Feature {
    /// All features in canonical order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::MeanRadius,
        Feature::MeanTexture,
        Feature::MeanPerimeter,
        Feature::MeanArea,
        Feature::MeanSmoothness,
        Feature::WorstRadius,
        Feature::WorstTexture,
        Feature::WorstPerimeter,
        Feature::WorstArea,
        Feature::WorstSmoothness,
    ];

    /// Camel-case identifier, also the batch column name.
    pub fn ident(self) -> &'static str {
        match self {
            Feature::MeanRadius => "meanRadius",
            Feature::MeanTexture => "meanTexture",
            Feature::MeanPerimeter => "meanPerimeter",
            Feature::MeanArea => "meanArea",
            Feature::MeanSmoothness => "meanSmoothness",
            Feature::WorstRadius => "worstRadius",
            Feature::WorstTexture => "worstTexture",
            Feature::WorstPerimeter => "worstPerimeter",
            Feature::WorstArea => "worstArea",
            Feature::WorstSmoothness => "worstSmoothness",
        }
    }

    /// Position in canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_ident(ident: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.ident() == ident)
    }

    /// Human-readable name, e.g. "Mean Radius".
    pub fn display_name(self) -> String {
        display_name(self.ident())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

/// Convert a camel-case identifier into space-separated capitalised words.
///
/// `meanRadius` → `Mean Radius`, `worstSmoothness` → `Worst Smoothness`.
/// Downstream reports key off this exact form.
pub fn display_name(ident: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in ident.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(display_name("meanRadius"), "Mean Radius");
        assert_eq!(display_name("worstSmoothness"), "Worst Smoothness");
        assert_eq!(Feature::MeanPerimeter.display_name(), "Mean Perimeter");
        assert_eq!(Feature::WorstArea.display_name(), "Worst Area");
    }

    #[test]
    fn test_display_name_single_word() {
        assert_eq!(display_name("radius"), "Radius");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
            assert_eq!(Feature::from_ident(f.ident()), Some(*f));
        }
        assert_eq!(Feature::from_ident("meanradius"), None);
    }
}
