//! Fixed design catalog: color schemes, font pairings, layouts and animations.
//!
//! Lookups never fail. Unknown theme or font names resolve to the defaults.

use serde::Serialize;

pub const DEFAULT_THEME: &str = "Modern Gradient";
pub const DEFAULT_FONT_PAIR: &str = "Poppins & Roboto";
pub const DEFAULT_LAYOUT: &str = "Single Page Scroll";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    /// CSS background value; usually a gradient.
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub colors: ColorScheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontPair {
    pub name: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
    /// Google Fonts stylesheet covering both families.
    pub url: &'static str,
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: "Modern Gradient",
        colors: ColorScheme {
            primary: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
            secondary: "#667eea",
            accent: "#764ba2",
        },
    },
    Theme {
        name: "Minimalist",
        colors: ColorScheme {
            primary: "linear-gradient(135deg, #2d3748 0%, #1a202c 100%)",
            secondary: "#4a5568",
            accent: "#718096",
        },
    },
    Theme {
        name: "Creative Bold",
        colors: ColorScheme {
            primary: "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
            secondary: "#f093fb",
            accent: "#f5576c",
        },
    },
    Theme {
        name: "Professional Dark",
        colors: ColorScheme {
            primary: "linear-gradient(135deg, #0f2027 0%, #203a43 50%, #2c5364 100%)",
            secondary: "#203a43",
            accent: "#2c5364",
        },
    },
    Theme {
        name: "Elegant Light",
        colors: ColorScheme {
            primary: "linear-gradient(135deg, #ffecd2 0%, #fcb69f 100%)",
            secondary: "#fcb69f",
            accent: "#ffecd2",
        },
    },
    Theme {
        name: "Cyberpunk Neon",
        colors: ColorScheme {
            primary: "linear-gradient(135deg, #00f5ff 0%, #ff00ff 100%)",
            secondary: "#00f5ff",
            accent: "#ff00ff",
        },
    },
    Theme {
        name: "Nature Green",
        colors: ColorScheme {
            primary: "linear-gradient(135deg, #11998e 0%, #38ef7d 100%)",
            secondary: "#11998e",
            accent: "#38ef7d",
        },
    },
    Theme {
        name: "Sunset Orange",
        colors: ColorScheme {
            primary: "linear-gradient(135deg, #ff6e7f 0%, #bfe9ff 100%)",
            secondary: "#ff6e7f",
            accent: "#bfe9ff",
        },
    },
];

pub const FONT_PAIRS: &[FontPair] = &[
    FontPair {
        name: "Poppins & Roboto",
        heading: "Poppins",
        body: "Roboto",
        url: "https://fonts.googleapis.com/css2?family=Poppins:wght@300;400;500;600;700&family=Roboto:wght@300;400;500&display=swap",
    },
    FontPair {
        name: "Montserrat & Open Sans",
        heading: "Montserrat",
        body: "Open Sans",
        url: "https://fonts.googleapis.com/css2?family=Montserrat:wght@300;400;500;600;700&family=Open+Sans:wght@300;400;500&display=swap",
    },
    FontPair {
        name: "Playfair & Source Sans",
        heading: "Playfair Display",
        body: "Source Sans Pro",
        url: "https://fonts.googleapis.com/css2?family=Playfair+Display:wght@400;500;600;700&family=Source+Sans+Pro:wght@300;400;500&display=swap",
    },
    FontPair {
        name: "Inter & Lora",
        heading: "Inter",
        body: "Lora",
        url: "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&family=Lora:wght@400;500&display=swap",
    },
    FontPair {
        name: "Space Grotesk & DM Sans",
        heading: "Space Grotesk",
        body: "DM Sans",
        url: "https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@300;400;500;600;700&family=DM+Sans:wght@400;500&display=swap",
    },
];

pub const LAYOUT_STYLES: &[&str] = &[
    "Single Page Scroll",
    "Multi-Section with Tabs",
    "Grid Layout",
    "Side Navigation",
];

pub const ANIMATIONS: &[&str] = &[
    "Fade In",
    "Slide In",
    "Parallax Scrolling",
    "Hover Effects",
    "Typing Animation",
    "Particle Background",
];

pub const DEFAULT_ANIMATIONS: &[&str] = &["Fade In", "Hover Effects"];

/// Resolves a theme name to its color scheme, falling back to the default theme.
pub fn color_scheme_for(theme: &str) -> ColorScheme {
    THEMES
        .iter()
        .find(|t| t.name == theme)
        .unwrap_or(&THEMES[0])
        .colors
}

/// Resolves a font-pair name, falling back to the default pairing.
pub fn font_pair_for(name: &str) -> FontPair {
    *FONT_PAIRS
        .iter()
        .find(|f| f.name == name)
        .unwrap_or(&FONT_PAIRS[0])
}
