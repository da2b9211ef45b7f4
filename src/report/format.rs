//! Plain-text run summary printed after the calendar is written.
//!
//! Formatting lives here so the pipeline stays free of presentation code.

use crate::app::pipeline::RunOutput;
use crate::domain::{CalendarEvent, EventTiming, Institution};

/// Summary of data sources, COPOM decisions and written files.
pub fn format_run_summary(output: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== juros - Calendário de decisões de juros ===\n");
    out.push_str(&format_sources(output));

    let copom: Vec<&CalendarEvent> = output
        .events
        .iter()
        .filter(|e| e.institution == Institution::Copom)
        .collect();
    let fomc = output.events.len() - copom.len();
    out.push_str(&format!("Eventos: COPOM {} | FED {}\n", copom.len(), fomc));

    if !copom.is_empty() {
        out.push_str("\nCOPOM:\n");
        out.push_str(&format!(
            "{:<10}  {:<14}  {:<14}  {}\n",
            "data", "taxa", "média 12", "expectativa"
        ));
        for event in copom {
            let date = match &event.timing {
                EventTiming::AllDay { start, .. } => start.to_string(),
                EventTiming::Timed { start, .. } => start.date().to_string(),
            };
            out.push_str(&format!(
                "{:<10}  {:<14}  {:<14}  {}\n",
                date, event.description.rate, event.description.average, event.description.expectation
            ));
        }
    }

    out.push('\n');
    for calendar in &output.calendars {
        out.push_str(&format!(
            "OK: gerado {} ({} eventos)\n",
            calendar.path.display(),
            calendar.event_count
        ));
    }
    out.trim_end().to_string()
}

fn format_sources(output: &RunOutput) -> String {
    if output.data.offline {
        return "Fontes: offline (sem consulta ao BCB)\n".to_string();
    }

    let mut out = String::new();
    match output.data.series.last() {
        Some(last) => out.push_str(&format!(
            "Meta Selic: {} observações (última {} = {:.2}% a.a.)\n",
            output.data.series.len(),
            last.date,
            last.value
        )),
        None => out.push_str("Meta Selic: sem observações no período\n"),
    }
    match (output.data.expectation.median, output.data.expectation.date) {
        (Some(m), Some(d)) => out.push_str(&format!("Expectativa: mediana {m:.2}% a.a. ({d})\n")),
        (Some(m), None) => out.push_str(&format!("Expectativa: mediana {m:.2}% a.a.\n")),
        _ => out.push_str("Expectativa: sem dados\n"),
    }
    out
}
