/// A historical lettering style offered for study
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalligraphyStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub era: &'static str,
}

pub static CALLIGRAPHY_STYLES: [CalligraphyStyle; 5] = [
    CalligraphyStyle {
        id: "copperplate",
        name: "Copperplate",
        description: "Elegant, flowing script with contrast between thick and thin strokes.",
        era: "18th Century",
    },
    CalligraphyStyle {
        id: "gothic",
        name: "Blackletter (Gothic)",
        description: "Dense, dark texture with dramatic angular strokes.",
        era: "12th Century",
    },
    CalligraphyStyle {
        id: "italic",
        name: "Italic Hand",
        description: "Slanted, fluid handwriting style popular in the Renaissance.",
        era: "15th Century",
    },
    CalligraphyStyle {
        id: "uncial",
        name: "Uncial",
        description: "Rounded, majuscule script used by Latin and Greek scribes.",
        era: "4th Century",
    },
    CalligraphyStyle {
        id: "brush",
        name: "Modern Brush",
        description: "Expressive, free-flowing style mimicking brush pens.",
        era: "Modern",
    },
];

/// Look up a style by id
pub fn find_style(id: &str) -> Option<&'static CalligraphyStyle> {
    CALLIGRAPHY_STYLES.iter().find(|style| style.id == id)
}

/// The style selected when nothing else is known
pub fn default_style() -> &'static CalligraphyStyle {
    &CALLIGRAPHY_STYLES[0]
}
