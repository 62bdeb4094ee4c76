use eframe::egui::{self, Color32, RichText, Ui};

use olympics_dashboard::data::aggregate::QueryError;
use olympics_dashboard::data::model::{Medal, Season};

use crate::state::{AppState, CountrySummary, View};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, view switcher and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.view, View::Medals, "🏅 Medals");
        ui.selectable_value(&mut state.view, View::Country, "🌍 Country");

        ui.separator();

        ui.label(format!(
            "{} results loaded from {}",
            state.dataset.len(),
            state.data_path.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(format!("🚨 {msg}")).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the selectors for the active view.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    match state.view {
        View::Medals => medals_selectors(ui, state),
        View::Country => country_selectors(ui, state),
    }
}

fn medals_selectors(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut season = state.medals.season;
    option_combo(ui, "Season:", "season", &mut season, &Season::ALL);
    if season != state.medals.season {
        state.set_season(season);
    }

    let mut year = state.medals.year;
    let years = state.available_years();
    option_combo(ui, "Year:", "year", &mut year, &years);
    if year != state.medals.year {
        state.set_year(year);
    }

    let mut medal = state.medals.medal;
    option_combo(ui, "Medal Type:", "medal", &mut medal, &Medal::ALL);
    if medal != state.medals.medal {
        state.set_medal(medal);
    }

    ui.add_space(8.0);
    let mut count = state.medals.country_count;
    ui.label("Number of Countries:");
    ui.add(egui::Slider::new(&mut count, 1..=state.config.max_country_count));
    if count != state.medals.country_count {
        state.set_country_count(count);
    }
}

/// Combo box over `choices` with a leading "All" entry mapped to `None`.
fn option_combo<T>(ui: &mut Ui, label: &str, id: &str, value: &mut Option<T>, choices: &[T])
where
    T: Copy + PartialEq + ToString,
{
    ui.strong(label);
    let selected_text = value.map_or_else(|| "All".to_string(), |v| v.to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut *value, None, "All");
            for &choice in choices {
                ui.selectable_value(&mut *value, Some(choice), choice.to_string());
            }
        });
    ui.add_space(4.0);
}

fn country_selectors(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Country");
    ui.separator();

    let Some((first, last)) = state.dataset.year_bounds() else {
        ui.label("No dataset loaded.");
        return;
    };

    let current = state.country.team.clone().unwrap_or_default();
    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("team")
        .selected_text(&current)
        .height(400.0)
        .show_ui(ui, |ui: &mut Ui| {
            for team in state.dataset.teams() {
                if ui.selectable_label(current == *team, team).clicked() {
                    picked = Some(team.clone());
                }
            }
        });
    if let Some(team) = picked {
        state.select_team(team);
    }

    ui.add_space(8.0);
    ui.strong("Years:");
    let mut start = state.country.start_year;
    let mut end = state.country.end_year;
    ui.horizontal(|ui: &mut Ui| {
        ui.add(egui::DragValue::new(&mut start).range(first..=last));
        ui.label("to");
        ui.add(egui::DragValue::new(&mut end).range(first..=last));
    });
    if (start, end) != (state.country.start_year, state.country.end_year) {
        state.set_year_range(start, end);
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the chart / summary for the active view.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    match state.view {
        View::Medals => {
            ui.heading("Overall Medal Counts");
            plot::standings_chart(ui, state);
        }
        View::Country => {
            ui.heading("Country Medal Counts");
            match &state.country_summary {
                None => {
                    ui.label("Open a file to view medal counts  (File → Open…)");
                }
                Some(Err(e)) => {
                    ui.label(RichText::new(no_data_message(e)).color(Color32::GRAY));
                }
                Some(Ok(summary)) => country_summary(ui, summary),
            }
        }
    }
}

fn no_data_message(err: &QueryError) -> String {
    match err {
        QueryError::TeamNotFound { team, range } => {
            format!("No data for {team} between {} and {}.", range.start(), range.end())
        }
        QueryError::InvalidRange { .. } => format!("{err}. Pick a start year before the end year."),
    }
}

fn country_summary(ui: &mut Ui, summary: &CountrySummary) {
    ui.label(format!("{}, {}", summary.team, summary.range));
    ui.add_space(4.0);

    ui.columns(3, |cols| {
        cols[0].label("Total medals");
        cols[0].label(RichText::new(summary.total.to_string()).size(28.0).strong());

        cols[1].label("Medal rank");
        cols[1].label(RichText::new(format!("#{}", summary.rank)).size(28.0).strong());

        cols[2].label("Top sports");
        if summary.top_sports.is_empty() {
            cols[2].label("No medals in this period");
        }
        for (i, sport) in summary.top_sports.iter().enumerate() {
            cols[2].label(format!("{}. {} ({})", i + 1, sport.sport, sport.medals));
        }
    });

    ui.separator();
    plot::medals_over_time_plot(ui, &summary.over_time);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Olympic results")
        .add_filter("Results tables", &["csv", "tsv", "tab"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_path(&path);
    }
}

#[cfg(test)]
mod tests {
    use olympics_dashboard::data::aggregate::YearRange;

    use super::*;

    #[test]
    fn missing_team_message_names_the_range() {
        let err = QueryError::TeamNotFound {
            team: "Tonga".to_string(),
            range: YearRange::new(1996, 2000).unwrap(),
        };
        assert_eq!(no_data_message(&err), "No data for Tonga between 1996 and 2000.");
    }
}
