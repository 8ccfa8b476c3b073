//! Terminal rendering of a forecast report.
//!
//! Pure formatting over the normalized report and its display
//! attributes; nothing here touches the network or the cache.

use common::ForecastReport;
use forecast_core::display;

/// Render one report as a small multi-line panel.
pub fn panel(report: &ForecastReport) -> String {
    let icon = display::weather_icon(report.weather_code);
    let text = display::weather_text(report.weather_code);
    let theme = display::weather_theme(report.weather_code);

    let mut out = String::new();
    out.push_str(&format!(
        "── {} ({}) ──────────────────────\n",
        report.city_label(),
        report.insee
    ));
    out.push_str(&format!("   {}  [{}, {}]\n", text, icon, theme.color));
    out.push_str(&format!(
        "   min {:.1}°C / max {:.1}°C\n",
        report.tmin, report.tmax
    ));
    if let Some(prob) = report.probarain {
        out.push_str(&format!("   pluie {}%\n", prob));
    }
    if let Some(update) = &report.update {
        out.push_str(&format!("   maj {}\n", update));
    }
    out.push_str(&format!("   source: {}\n", report.source.as_str()));
    out
}
