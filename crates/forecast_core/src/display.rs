//! Static display attributes for Météo-Concept weather codes.
//!
//! Three independent total lookups (icon, label, color theme), each
//! with a fixed fallback for codes the tables do not know.

/// Color pair applied to the rendered panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: &'static str,
    pub shadow: &'static str,
}

/// Font Awesome icon class for a weather code.
pub fn weather_icon(code: u16) -> &'static str {
    match code {
        0 => "fa-sun",
        1 | 2 => "fa-cloud-sun",
        3..=5 => "fa-cloud",
        6 | 7 => "fa-smog",
        10..=16 => "fa-cloud-rain",
        20..=22 | 60..=68 | 220..=222 => "fa-snowflake",
        30..=32 | 70..=78 | 230..=232 => "fa-cloud-meatball",
        40..=48 | 210..=212 => "fa-cloud-showers-heavy",
        100..=142 => "fa-bolt",
        235 => "fa-cloud-showers-heavy",
        _ => "fa-question",
    }
}

/// Human-readable label for a weather code.
pub fn weather_text(code: u16) -> &'static str {
    match code {
        0 => "Soleil",
        1 => "Peu nuageux",
        2 => "Ciel voilé",
        3 => "Nuageux",
        4 => "Très nuageux",
        5 => "Couvert",
        6 => "Brouillard",
        7 => "Brouillard givrant",
        10 => "Pluie faible",
        11 => "Pluie modérée",
        12 => "Pluie forte",
        13..=15 => "Pluie verglaçante",
        16 => "Bruine",
        20 => "Neige faible",
        21 => "Neige modérée",
        22 => "Neige forte",
        30..=32 => "Pluie et neige mêlées",
        40..=48 => "Averses de pluie",
        60..=68 => "Averses de neige",
        70..=78 => "Averses de pluie et neige",
        100..=108 => "Orages",
        120..=138 => "Orages de neige",
        140..=142 => "Pluies orageuses",
        210..=212 => "Pluie intermittente",
        220..=222 => "Neige intermittente",
        230..=232 => "Pluie et neige mêlées",
        235 => "Averses de grêle",
        // Same fallback key as the icon table.
        _ => "fa-question",
    }
}

/// Panel color theme for a weather code.
pub fn weather_theme(code: u16) -> Theme {
    match code {
        0 => Theme {
            color: "#f6d32d",
            shadow: "0 0 12px #f9f06b",
        },
        1 | 2 => Theme {
            color: "#f8e45c",
            shadow: "0 0 10px #f9f06b",
        },
        3..=5 => Theme {
            color: "#deddda",
            shadow: "0 0 8px #9a9996",
        },
        6 | 7 => Theme {
            color: "#c0bfbc",
            shadow: "0 0 8px #77767b",
        },
        10..=16 | 40..=48 | 210..=212 => Theme {
            color: "#62a0ea",
            shadow: "0 0 10px #1c71d8",
        },
        20..=22 | 60..=68 | 220..=222 => Theme {
            color: "#ffffff",
            shadow: "0 0 12px #99c1f1",
        },
        30..=32 | 70..=78 | 230..=232 => Theme {
            color: "#99c1f1",
            shadow: "0 0 10px #62a0ea",
        },
        100..=142 => Theme {
            color: "#ffbe6f",
            shadow: "0 0 14px #e66100",
        },
        235 => Theme {
            color: "#99c1f1",
            shadow: "0 0 14px #1c71d8",
        },
        _ => Theme {
            color: "#ffffff",
            shadow: "none",
        },
    }
}
