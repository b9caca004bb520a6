//! System instruction synthesis.

use crate::models::TrainingRecord;

/// Fixed task description sent ahead of any stored examples.
pub const INSPECTION_PREAMBLE: &str = "You are an expert visual quality inspector. \
Examine the provided image and classify it as GOOD or BAD. \
Describe every defect you can see, where it is located, and how confident you are in the verdict. \
When labelled examples from earlier inspections are listed below, apply the same standards to this image.";

/// Build the instruction for one analysis request.
///
/// `examples` are expected newest first. Records lacking either a
/// classification or notes are skipped.
pub fn build_system_instruction(examples: &[TrainingRecord]) -> String {
    let mut instruction = String::from(INSPECTION_PREAMBLE);

    for record in examples.iter().filter(|r| is_usable_example(r)) {
        instruction.push('\n');
        instruction.push_str(&example_line(record));
    }

    instruction
}

fn is_usable_example(record: &TrainingRecord) -> bool {
    !record.classification.trim().is_empty() && !record.notes.trim().is_empty()
}

fn example_line(record: &TrainingRecord) -> String {
    let mut line = format!(
        "- {}: {}",
        record.classification.trim().to_uppercase(),
        record.notes.trim()
    );

    match record.annotations.len() {
        0 => {}
        1 => line.push_str(" (1 annotation marked)"),
        n => line.push_str(&format!(" ({} annotations marked)", n)),
    }

    line
}
