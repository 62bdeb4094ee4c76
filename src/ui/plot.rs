use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use olympics_dashboard::data::aggregate::SeasonCounts;
use olympics_dashboard::data::model::{Medal, Season};

use crate::color::{medal_color, season_color};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Overall medal counts (stacked bars)
// ---------------------------------------------------------------------------

/// Stacked gold / silver / bronze bars for the current standings, with the
/// total printed above each bar.
pub fn standings_chart(ui: &mut Ui, state: &AppState) {
    if state.standings.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No medals for this selection");
        });
        return;
    }

    let teams: Vec<String> = state.standings.iter().map(|s| s.team.clone()).collect();

    let charts: Vec<BarChart> = Medal::ALL
        .iter()
        .map(|&medal| {
            let bars = state
                .standings
                .iter()
                .enumerate()
                .map(|(i, s)| Bar::new(i as f64, s.count(medal) as f64).name(&s.team))
                .collect();
            BarChart::new(bars)
                .name(medal.as_str())
                .color(medal_color(medal))
                .width(0.7)
        })
        .collect();

    // Gold at the bottom, bronze on top.
    let mut stacked: Vec<BarChart> = Vec::with_capacity(charts.len());
    for chart in charts {
        let below: Vec<&BarChart> = stacked.iter().collect();
        let chart = chart.stack_on(&below);
        stacked.push(chart);
    }

    Plot::new("standings_plot")
        .legend(Legend::default())
        .x_axis_label("Team")
        .y_axis_label("Total Medals")
        .x_axis_formatter(move |mark: GridMark, _range| team_label(&teams, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in stacked {
                plot_ui.bar_chart(chart);
            }
            for (i, s) in state.standings.iter().enumerate() {
                let total = s.total();
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, total as f64),
                        RichText::new(total.to_string()).strong(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

/// Axis label for an integer bar position; blank between bars.
fn team_label(teams: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    teams.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Medals over time (one line per season)
// ---------------------------------------------------------------------------

/// Winter and summer series for the selected country.
pub fn medals_over_time_plot(ui: &mut Ui, series: &[SeasonCounts]) {
    Plot::new("medals_over_time_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Entries")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for season in Season::ALL {
                let points: Vec<[f64; 2]> = series
                    .iter()
                    .map(|c| {
                        let count = match season {
                            Season::Summer => c.summer,
                            Season::Winter => c.winter,
                        };
                        [c.year as f64, count as f64]
                    })
                    .collect();

                let color = season_color(season);
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(season.as_str())
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(season.as_str())
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_labels_only_on_bar_positions() {
        let teams = vec!["USA".to_string(), "GBR".to_string()];
        assert_eq!(team_label(&teams, 1.0), "GBR");
        assert_eq!(team_label(&teams, 0.5), "");
        assert_eq!(team_label(&teams, -1.0), "");
        assert_eq!(team_label(&teams, 7.0), "");
    }
}
