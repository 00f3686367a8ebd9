//! Deterministic fallback narratives
//!
//! Both variants share one HTML layout and differ only in wording. Counts of
//! PIREPs and NOTAMs are reported so a pilot knows to look at the raw data.

use super::route_label;
use crate::models::briefing::BriefingData;

/// Why the model-written narrative is not available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// No model configured at startup (narrative A)
    ModelUnavailable,
    /// The model call failed for this request (narrative B)
    ModelFailed,
}

impl FallbackKind {
    fn route_summary(self, route: &str) -> String {
        match self {
            FallbackKind::ModelUnavailable => format!(
                "Weather briefing for {route}. Conditions appear favorable for flight operations."
            ),
            FallbackKind::ModelFailed => format!(
                "Weather briefing for {route}. Please check official weather sources for current conditions."
            ),
        }
    }

    fn airport_note(self) -> &'static str {
        match self {
            FallbackKind::ModelUnavailable => {
                "AI weather analysis unavailable. Please check official weather sources."
            }
            FallbackKind::ModelFailed => {
                "AI weather analysis temporarily unavailable. Please check official weather sources."
            }
        }
    }
}

const RECOMMENDATIONS: &str =
    "Monitor weather conditions and maintain standard flight procedures.";

/// Render a fallback narrative for `data`
pub fn render_fallback(kind: FallbackKind, data: &BriefingData) -> String {
    let route = route_label(&data.observations);

    let mut rows = vec![
        table_row("Route Summary", &kind.route_summary(&route)),
        table_row("Recommendations", RECOMMENDATIONS),
    ];
    let pirep_count = data.pilot_reports.len();
    if pirep_count > 0 {
        rows.push(table_row(
            "Recent PIREPs",
            &format!("{pirep_count} pilot report(s) available for route airports (recent window)"),
        ));
    }
    let notice_count = data.notices.len();
    if notice_count > 0 {
        rows.push(table_row(
            "NOTAMs",
            &format!("{notice_count} Notice(s) to Airmen active for route airports"),
        ));
    }

    format!(
        r#"<div class="briefing-content">
  <table class="briefing-table">
{rows}
  </table>

  <div class="per-airport-section">
    <button class="read-more-btn" onclick="togglePerAirport()">Read More >></button>
    <div class="per-airport-content" style="display:none;">
      <h3>Per-Airport Conditions</h3>
      <ul>
        <li><strong>Note</strong>: {note}</li>
      </ul>
    </div>
  </div>
</div>"#,
        rows = rows.join("\n"),
        note = kind.airport_note(),
    )
}

fn table_row(header: &str, body: &str) -> String {
    format!("    <tr><th>{header}</th><td>{body}</td></tr>")
}
