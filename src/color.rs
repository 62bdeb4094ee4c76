use eframe::egui::Color32;

use olympics_dashboard::data::model::{Medal, Season};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Bar colour for a medal type.
pub fn medal_color(medal: Medal) -> Color32 {
    match medal {
        Medal::Gold => Color32::from_rgb(255, 215, 0),
        Medal::Silver => Color32::from_rgb(192, 192, 192),
        // peru
        Medal::Bronze => Color32::from_rgb(205, 133, 63),
    }
}

/// Line colour for a season series.
pub fn season_color(season: Season) -> Color32 {
    match season {
        Season::Summer => Color32::from_rgb(239, 85, 59),
        Season::Winter => Color32::from_rgb(99, 110, 250),
    }
}
