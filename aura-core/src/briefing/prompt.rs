//! Prompt construction for the summarization model
//!
//! The prompt is an ordered list of labelled sections. Optional sources
//! (PIREPs, NOTAMs) add both a table row to the requested HTML layout and a
//! data section, and only when they hold at least one record.

use super::{format_notice_line, format_pirep_line, route_label};
use crate::models::airport::AirportIdentifier;
use crate::models::briefing::BriefingData;

const PIREP_ROW: &str =
    "    <tr><th>Recent PIREPs</th><td>Highlight significant pilot reports from the recent window</td></tr>";
const NOTAM_ROW: &str =
    "    <tr><th>NOTAMs</th><td>Critical operational restrictions and closures</td></tr>";

/// Request-level inputs that are not report data
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub pilot_profile: &'a str,
    /// Airports the caller asked about, in request order
    pub airports: &'a [AirportIdentifier],
    pub pirep_window_hours: u32,
}

#[derive(Debug, Clone)]
struct PromptSection {
    heading: Option<String>,
    body: String,
}

impl PromptSection {
    fn render(&self) -> String {
        match &self.heading {
            Some(heading) => format!("{heading}:\n{}", self.body),
            None => self.body.clone(),
        }
    }
}

/// Ordered prompt sections, joined by blank lines
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unlabelled block
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.sections.push(PromptSection {
            heading: None,
            body: body.into(),
        });
        self
    }

    /// Append a labelled block
    #[must_use]
    pub fn section(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        self.sections.push(PromptSection {
            heading: Some(heading.into()),
            body: body.into(),
        });
        self
    }

    /// Append a labelled block built from `lines`, skipped when there are none
    #[must_use]
    pub fn section_lines(self, heading: impl Into<String>, lines: Vec<String>) -> Self {
        if lines.is_empty() {
            self
        } else {
            self.section(heading, lines.join("\n"))
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn build(self) -> String {
        self.sections
            .iter()
            .map(PromptSection::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Build the complete summarization prompt for one briefing
pub fn build_prompt(data: &BriefingData, ctx: &PromptContext<'_>) -> String {
    let has_pireps = !data.pilot_reports.is_empty();
    let has_notices = !data.notices.is_empty();

    PromptBuilder::new()
        .text(instructions(ctx, has_pireps, has_notices))
        .section("HTML OUTPUT STRUCTURE", output_structure(has_pireps, has_notices))
        .section("AIRPORT DIRECTORY", route_label(&data.observations))
        .section("RAW WEATHER DATA", data.weather_block().render())
        .section_lines(
            format!("RECENT PIREPs (Last {} Hours)", ctx.pirep_window_hours),
            data.pilot_reports.iter().map(format_pirep_line).collect(),
        )
        .section_lines(
            "ACTIVE NOTAMs",
            data.notices.iter().map(format_notice_line).collect(),
        )
        .text("END OF BRIEFING DATA")
        .build()
}

fn instructions(ctx: &PromptContext<'_>, has_pireps: bool, has_notices: bool) -> String {
    let mut lines = vec![
        format!(
            "You are an expert aviation weather briefer. Audience pilot profile: '{}'.",
            ctx.pilot_profile
        ),
        String::new(),
        "Task:".to_string(),
        "- Produce a very concise flight weather briefing (HTML format).".to_string(),
        "- Route summary: Max 2-3 lines, clear & safety-focused.".to_string(),
        "- Recommendations: speed, altitude, or diversion advice.".to_string(),
        "- Per-airport summary: at most 1 line per ICAO, filled in only if conditions are extreme \
         (low vis, strong winds, storms, icing, turbulence, etc.)."
            .to_string(),
    ];
    if !ctx.airports.is_empty() {
        lines.push(format!(
            "- The per-airport section must mention every requested ICAO code: {}.",
            AirportIdentifier::join(ctx.airports).replace(',', ", ")
        ));
    }
    if has_pireps {
        lines.push(
            "- PIREP Integration: add a \"Recent PIREPs\" row to the table and mention significant \
             pilot reports in your analysis."
                .to_string(),
        );
    }
    if has_notices {
        lines.push(
            "- NOTAMs Integration: add a \"NOTAMs\" row to the table and highlight critical \
             operational restrictions."
                .to_string(),
        );
    }
    lines.push("- Keep plain language, avoid unnecessary details.".to_string());
    lines.join("\n")
}

fn output_structure(has_pireps: bool, has_notices: bool) -> String {
    let mut rows = vec![
        "    <tr><th>Route Summary</th><td>Brief overall conditions for the route</td></tr>",
        "    <tr><th>Recommendations</th><td>Speed, altitude, or diversion advice</td></tr>",
    ];
    if has_pireps {
        rows.push(PIREP_ROW);
    }
    if has_notices {
        rows.push(NOTAM_ROW);
    }

    format!(
        r#"<div class="briefing-content">
  <table class="briefing-table">
{}
  </table>

  <div class="per-airport-section">
    <button class="read-more-btn" onclick="togglePerAirport()">Read More >></button>
    <div class="per-airport-content" style="display:none;">
      <h3>Per-Airport Conditions</h3>
      <ul>
        <li><strong>ICAO</strong>: 1-line summary (mention all given icao codes)</li>
      </ul>
    </div>
  </div>
</div>"#,
        rows.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reports::{ForecastReport, Notice, ObservationReport, PilotReport};

    fn sample_data() -> BriefingData {
        BriefingData {
            observations: vec![
                ObservationReport::new("KSFO", "KSFO 161756Z 29012KT 10SM FEW008 17/12 A3001"),
                ObservationReport::new("KOAK", "KOAK 161753Z 30010KT 10SM CLR 18/11 A3000"),
            ],
            forecasts: vec![ForecastReport::new(
                "KSFO",
                "TAF KSFO 161720Z 1618/1724 29015G25KT P6SM FEW010",
            )],
            ..BriefingData::default()
        }
    }

    fn context(airports: &[AirportIdentifier]) -> PromptContext<'_> {
        PromptContext {
            pilot_profile: "General aviation VFR pilot",
            airports,
            pirep_window_hours: 6,
        }
    }

    #[test]
    fn test_builder_joins_sections_in_order() {
        let prompt = PromptBuilder::new()
            .text("intro")
            .section("FIRST", "one")
            .section_lines("EMPTY", Vec::new())
            .section_lines("LINES", vec!["a".to_string(), "b".to_string()])
            .build();
        assert_eq!(prompt, "intro\n\nFIRST:\none\n\nLINES:\na\nb");
    }

    #[test]
    fn test_builder_skips_empty_line_sections() {
        let builder = PromptBuilder::new().section_lines("EMPTY", Vec::new());
        assert!(builder.is_empty());
        assert_eq!(builder.len(), 0);
    }

    #[test]
    fn test_prompt_without_optional_sources() {
        let airports = vec![AirportIdentifier::new("KSFO"), AirportIdentifier::new("KOAK")];
        let prompt = build_prompt(&sample_data(), &context(&airports));

        assert!(prompt.contains("Audience pilot profile: 'General aviation VFR pilot'"));
        assert!(prompt.contains("AIRPORT DIRECTORY:\nKSFO → KOAK"));
        assert!(prompt.contains("METARs:\nKSFO 161756Z"));
        assert!(prompt.contains("TAFs:\nTAF KSFO 161720Z"));
        assert!(prompt.contains("<th>Route Summary</th>"));
        assert!(prompt.contains("<th>Recommendations</th>"));
        assert!(prompt.contains("every requested ICAO code: KSFO, KOAK"));
        assert!(!prompt.contains("RECENT PIREPs"));
        assert!(!prompt.contains("ACTIVE NOTAMs"));
        assert!(!prompt.contains("<th>Recent PIREPs</th>"));
        assert!(!prompt.contains("<th>NOTAMs</th>"));
    }

    #[test]
    fn test_prompt_with_pireps_and_notices() {
        let mut data = sample_data();
        data.pilot_reports.push(PilotReport {
            time_utc: "2026-10-16T15:20:00Z".to_string(),
            icao: "KSFO".to_string(),
            pirep: "UA /OV KSFO/TM 1520/FL040/TB MOD".to_string(),
            aircraft_name: Some("PA28".to_string()),
        });
        data.notices.push(Notice {
            icao_code: "KOAK".to_string(),
            notam_type: "TWY".to_string(),
            description: "TWY C CLSD".to_string(),
            start_time: Some("2026-10-16T00:00:00Z".to_string()),
            end_time: Some("2026-10-18T00:00:00Z".to_string()),
        });

        let prompt = build_prompt(&data, &context(&[]));

        assert!(prompt.contains(
            "RECENT PIREPs (Last 6 Hours):\n[15:20 UTC] KSFO: UA /OV KSFO/TM 1520/FL040/TB MOD (Aircraft: PA28)"
        ));
        assert!(prompt.contains(
            "ACTIVE NOTAMs:\nKOAK - TWY: TWY C CLSD (Active: 2026-10-16 00:00 UTC to 2026-10-18 00:00 UTC)"
        ));
        assert!(prompt.contains("<th>Recent PIREPs</th>"));
        assert!(prompt.contains("<th>NOTAMs</th>"));

        let weather = prompt.find("RAW WEATHER DATA").expect("weather section");
        let pireps = prompt.find("RECENT PIREPs").expect("pirep section");
        let notams = prompt.find("ACTIVE NOTAMs:").expect("notam section");
        assert!(weather < pireps && pireps < notams);
    }
}
