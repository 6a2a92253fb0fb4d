use serde::Serialize;

use crate::command::Command;
use crate::synth::Synthesis;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub scopes: usize,
    pub definitions: usize,
    pub options: usize,
    pub reservations: usize,
    pub warnings: usize,
}

pub fn summarize(synthesis: &Synthesis) -> ConversionSummary {
    let mut summary = ConversionSummary {
        warnings: synthesis.notes.len(),
        ..ConversionSummary::default()
    };
    for command in &synthesis.commands {
        match command {
            Command::CreateScope { .. } => summary.scopes += 1,
            Command::DefineOption { .. } => summary.definitions += 1,
            Command::SetOptionValue { .. } => summary.options += 1,
            Command::CreateReservation { .. } => summary.reservations += 1,
        }
    }
    summary
}

pub fn render(summary: ConversionSummary) -> String {
    format!(
        "convert_summary scopes={} definitions={} options={} reservations={} warnings={}",
        summary.scopes,
        summary.definitions,
        summary.options,
        summary.reservations,
        summary.warnings
    )
}
