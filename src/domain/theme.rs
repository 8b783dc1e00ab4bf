//! Color Themes
//!
//! Theme identifiers and their named color tokens. Rendering is left to a
//! [`ThemeApplier`] supplied by the embedding UI.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::entity::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    WildRose,
    HoneyBlonde,
    SweetEspresso,
    SageGarden,
    #[default]
    CreamEspresso,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::WildRose => "wild-rose",
            ThemeName::HoneyBlonde => "honey-blonde",
            ThemeName::SweetEspresso => "sweet-espresso",
            ThemeName::SageGarden => "sage-garden",
            ThemeName::CreamEspresso => "cream-espresso",
        }
    }

}

impl FromStr for ThemeName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wild-rose" => Ok(ThemeName::WildRose),
            "honey-blonde" => Ok(ThemeName::HoneyBlonde),
            "sweet-espresso" => Ok(ThemeName::SweetEspresso),
            "sage-garden" => Ok(ThemeName::SageGarden),
            "cream-espresso" => Ok(ThemeName::CreamEspresso),
            other => Err(DomainError::InvalidInput(format!("Unknown theme: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub cream: String,
    pub warm_white: String,
    pub parchment: String,
    pub primary: String,
    pub primary_light: String,
    pub primary_dark: String,
    pub secondary: String,
    pub secondary_light: String,
    pub secondary_dark: String,
    pub accent: String,
    pub accent_light: String,
    pub accent_dark: String,
    pub warm_gray: String,
    pub warm_gray_light: String,
    pub warm_gray_dark: String,
    pub charcoal: String,
    pub ink: String,
    pub amber: String,
    pub amber_light: String,
    pub rose: String,
    pub lavender: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTheme {
    pub name: ThemeName,
    pub display_name: String,
    pub colors: ThemeColors,
}

impl ColorTheme {
    /// Palette for `name`, if one ships
    pub fn get(name: ThemeName) -> Option<ColorTheme> {
        match name {
            ThemeName::CreamEspresso => Some(cream_espresso()),
            _ => None,
        }
    }

    /// All themes with a palette
    pub fn catalog() -> Vec<ColorTheme> {
        vec![cream_espresso()]
    }

    /// CSS custom properties in application order
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let c = &self.colors;
        vec![
            ("--color-cream", c.cream.clone()),
            ("--color-warm-white", c.warm_white.clone()),
            ("--color-parchment", c.parchment.clone()),
            ("--color-sage", c.primary.clone()),
            ("--color-sage-light", c.primary_light.clone()),
            ("--color-sage-dark", c.primary_dark.clone()),
            ("--color-terracotta", c.secondary.clone()),
            ("--color-terracotta-light", c.secondary_light.clone()),
            ("--color-terracotta-dark", c.secondary_dark.clone()),
            ("--color-dusty-blue", c.accent.clone()),
            ("--color-dusty-blue-light", c.accent_light.clone()),
            ("--color-dusty-blue-dark", c.accent_dark.clone()),
            ("--color-warm-gray", c.warm_gray.clone()),
            ("--color-warm-gray-light", c.warm_gray_light.clone()),
            ("--color-warm-gray-dark", c.warm_gray_dark.clone()),
            ("--color-charcoal", c.charcoal.clone()),
            ("--color-ink", c.ink.clone()),
            ("--color-amber", c.amber.clone()),
            ("--color-amber-light", c.amber_light.clone()),
            ("--color-rose", c.rose.clone()),
            ("--color-lavender", c.lavender.clone()),
            (
                "--theme-gradient-primary",
                format!(
                    "linear-gradient(145deg, {} 0%, {} 35%, {} 70%, {} 100%)",
                    c.primary, c.secondary, c.primary_light, c.amber
                ),
            ),
            (
                "--theme-gradient-secondary",
                format!(
                    "linear-gradient(125deg, {} 0%, {} 60%, {} 100%)",
                    c.secondary, c.secondary_light, c.primary
                ),
            ),
        ]
    }
}

/// Receives the selected theme (e.g. writes CSS variables)
pub trait ThemeApplier {
    fn apply(&mut self, theme: &ColorTheme);
}

fn cream_espresso() -> ColorTheme {
    let hex = |s: &str| s.to_string();
    ColorTheme {
        name: ThemeName::CreamEspresso,
        display_name: "Cream & Espresso".to_string(),
        colors: ThemeColors {
            cream: hex("#faf8f5"),
            warm_white: hex("#ffffff"),
            parchment: hex("#f5f2ed"),
            primary: hex("#2d4a2b"),
            primary_light: hex("#4a6b47"),
            primary_dark: hex("#1a2e19"),
            secondary: hex("#4a3429"),
            secondary_light: hex("#6b4d3d"),
            secondary_dark: hex("#2e1f17"),
            accent: hex("#2d4a2b"),
            accent_light: hex("#4a6b47"),
            accent_dark: hex("#1a2e19"),
            warm_gray: hex("#8b7d73"),
            warm_gray_light: hex("#a69990"),
            warm_gray_dark: hex("#6b5d53"),
            charcoal: hex("#2e1f17"),
            ink: hex("#1a1a1a"),
            amber: hex("#d4b896"),
            amber_light: hex("#e6d1b3"),
            rose: hex("#c4a8a8"),
            lavender: hex("#b8b8c4"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_name_round_trip() {
        assert_eq!("sage-garden".parse::<ThemeName>(), Ok(ThemeName::SageGarden));
        assert!(matches!("neon".parse::<ThemeName>(), Err(DomainError::InvalidInput(_))));
        assert_eq!(
            serde_json::to_string(&ThemeName::CreamEspresso).unwrap(),
            "\"cream-espresso\""
        );
    }

    #[test]
    fn test_default_theme_has_palette() {
        let theme = ColorTheme::get(ThemeName::default()).unwrap();
        assert_eq!(theme.display_name, "Cream & Espresso");
        assert!(ColorTheme::get(ThemeName::WildRose).is_none());
    }

    #[test]
    fn test_catalog_lists_themes_with_palettes() {
        let catalog = ColorTheme::catalog();
        let names: Vec<ThemeName> = catalog.iter().map(|t| t.name).collect();
        assert_eq!(names, vec![ThemeName::CreamEspresso]);
        assert!(catalog.iter().all(|t| ColorTheme::get(t.name).as_ref() == Some(t)));
    }

    #[test]
    fn test_css_variables_map_primary_to_sage() {
        let theme = ColorTheme::get(ThemeName::CreamEspresso).unwrap();
        let vars = theme.css_variables();
        let sage = vars.iter().find(|(name, _)| *name == "--color-sage").unwrap();
        assert_eq!(sage.1, "#2d4a2b");
        assert_eq!(vars.len(), 23);
    }
}
