//! Light and dark design tokens, exposed to pages as CSS custom properties

use super::ColorMode;

type TokenTable = &'static [(&'static str, &'static str)];

pub static LIGHT_COLORS: TokenTable = &[
    ("--color-text", "hsl(0deg 0% 5%)"),
    ("--color-primary-100", "hsl(9, 100%, 90%)"),
    ("--color-primary-300", "hsl(9, 100%, 70%)"),
    ("--color-primary-500", "hsl(9, 100%, 46%)"),
    ("--color-primary-700", "hsl(9, 100%, 33%)"),
    ("--color-primary-900", "hsl(9, 100%, 20%)"),
    ("--color-primary-contrast", "white"),
    ("--color-secondary-500", "hsl(328, 100%, 50%)"),
    ("--color-decorative-100", "hsl(36, 97%, 94%)"),
    ("--color-decorative-200", "hsl(36, 97%, 90%)"),
    ("--color-decorative-300", "hsl(36, 97%, 84%)"),
    ("--color-decorative-500", "hsl(36, 97%, 70%)"),
    ("--color-decorative-600", "hsl(36, 97%, 60%)"),
    ("--color-decorative-700", "hsl(36, 97%, 50%)"),
    ("--color-decorative-800", "hsl(36, 97%, 33%)"),
    ("--color-decorative-900", "hsl(9, 100%, 46%)"),
    ("--color-gray-0", "white"),
    ("--color-gray-100", "hsl(50deg 20% 90%)"),
    ("--color-gray-200", "hsl(50deg 15% 85%)"),
    ("--color-gray-300", "hsl(50deg 10% 70%)"),
    ("--color-gray-500", "hsl(50deg 4% 50%)"),
    ("--color-gray-700", "hsl(50deg 10% 25%)"),
    ("--color-gray-900", "hsl(50deg 20% 10%)"),
    ("--color-gray-1000", "black"),
    // Semantic aliases
    ("--color-primary", "hsl(9, 100%, 46%)"),
    ("--color-secondary", "hsl(328, 100%, 50%)"),
    ("--color-inline-code-bg", "hsl(45deg 74% 85%)"),
    ("--color-selection-text", "black"),
    ("--color-selection-background", "hsl(36, 97%, 50%)"),
    ("--color-backdrop", "hsl(36, 97%, 70%)"),
    ("--color-backdrop-highlight", "hsl(36, 97%, 84%)"),
    ("--color-page-background", "hsl(36, 97%, 94%)"),
    ("--color-page-border", "transparent"),
    ("--color-card-background", "white"),
    ("--color-card-border", "transparent"),
];

pub static DARK_COLORS: TokenTable = &[
    ("--color-text", "hsl(0deg 0% 100%)"),
    ("--color-primary-100", "hsl(182, 47%, 90%)"),
    ("--color-primary-300", "hsl(182, 47%, 70%)"),
    ("--color-primary-500", "hsl(15, 100%, 40%)"),
    ("--color-primary-700", "hsl(182, 47%, 35%)"),
    ("--color-primary-900", "hsl(182, 47%, 25%)"),
    ("--color-primary-contrast", "black"),
    ("--color-secondary-500", "hsl(328, 100%, 50%)"),
    ("--color-decorative-100", "hsl(228, 71%, 3%)"),
    ("--color-decorative-200", "hsl(198, 50%, 10%)"),
    ("--color-decorative-300", "hsl(198, 60%, 15%)"),
    ("--color-decorative-500", "hsl(216, 3%, 35%)"),
    ("--color-decorative-600", "hsl(198, 70%, 40%)"),
    ("--color-decorative-700", "hsl(198, 70%, 50%)"),
    ("--color-decorative-800", "hsl(198, 75%, 65%)"),
    ("--color-decorative-900", "hsl(196, 100%, 50%)"),
    ("--color-gray-0", "black"),
    ("--color-gray-100", "hsl(256deg 20% 10%)"),
    ("--color-gray-200", "hsl(256deg 15% 15%)"),
    ("--color-gray-300", "hsl(256deg 10% 30%)"),
    ("--color-gray-500", "hsl(256deg 4% 50%)"),
    ("--color-gray-700", "hsl(256deg 10% 75%)"),
    ("--color-gray-900", "hsl(256deg 20% 90%)"),
    ("--color-gray-1000", "white"),
    // Semantic aliases
    ("--color-primary", "hsl(15, 100%, 40%)"),
    ("--color-secondary", "hsl(328, 100%, 50%)"),
    ("--color-inline-code-bg", "hsl(256deg 30% 22%)"),
    ("--color-selection-text", "white"),
    ("--color-selection-background", "hsl(256deg 100% 30%)"),
    ("--color-backdrop", "hsl(228, 71%, 3%)"),
    ("--color-backdrop-highlight", "hsl(216, 3%, 35%)"),
    ("--color-page-background", "transparent"),
    ("--color-page-border", "hsl(256deg 30% 50% / 0.2)"),
    ("--color-card-background", "hsl(228, 71%, 3%)"),
    ("--color-card-border", "hsl(256deg 30% 50% / 0.2)"),
];

pub static LIGHT_SHADOWS: TokenTable = &[
    (
        "--shadow-page",
        "0px 1px 2px hsl(50deg 60% 50% / 0.25), \
         0px 3px 6px hsl(50deg 60% 50% / 0.25), \
         0px 9px 18px hsl(50deg 60% 50% / 0.25), \
         0px 18px 36px hsl(50deg 60% 50% / 0.25), \
         0px 54px 108px hsl(50deg 60% 50% / 0.25)",
    ),
    (
        "--shadow-card",
        "0px 1px 2px hsl(50deg 20% 50% / 0.2), \
         0px 2px 4px hsl(50deg 20% 50% / 0.2), \
         0px 4px 8px hsl(50deg 20% 50% / 0.2), \
         0px 8px 16px hsl(50deg 20% 50% / 0.2)",
    ),
];

pub static DARK_SHADOWS: TokenTable = &[("--shadow-page", "none"), ("--shadow-card", "none")];

/// The full token set for one colour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    mode: ColorMode,
    colors: TokenTable,
    shadows: TokenTable,
}

impl ThemeTokens {
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => Self {
                mode,
                colors: LIGHT_COLORS,
                shadows: LIGHT_SHADOWS,
            },
            ColorMode::Dark => Self {
                mode,
                colors: DARK_COLORS,
                shadows: DARK_SHADOWS,
            },
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Colours first, then shadows
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        let (colors, shadows) = (self.colors, self.shadows);
        colors.iter().chain(shadows.iter()).copied()
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// `name: value;` pairs, suitable for an inline `style` attribute
    pub fn css_declarations(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A `:root { ... }` rule, one declaration per line
    pub fn css_rule(&self) -> String {
        let mut css = String::from(":root {\n");
        for (k, v) in self.iter() {
            css.push_str(&format!("  {}: {};\n", k, v));
        }
        css.push('}');
        css
    }
}
