//! Assembles the combined chunk summaries into the fixed three-section
//! report.
//!
//! The section windows are character offsets into the combined summary with
//! no semantic grounding; the three-section shape is the contract, the exact
//! offsets are a cosmetic heuristic. Windows past the end of a short summary
//! are empty and render as empty sections.

/// End of the Introduction window, in characters.
pub const INTRO_END: usize = 300;
/// End of the Key Findings window.
pub const FINDINGS_END: usize = 800;
/// End of the Recommendations window.
pub const RECOMMENDATIONS_END: usize = 1200;
/// Cap on bullet/numbered items per list section.
pub const MAX_ITEMS: usize = 5;

const FRAGMENT_SEPARATOR: &str = ". ";

const BANNER: &str = "--- Medical Report ---";

const INTRO_TITLE: &str = "Introduction";
const INTRO_BLURB: &str =
    "This section provides an overview of the report findings in simple language.";
const FINDINGS_TITLE: &str = "Key Findings";
const FINDINGS_BLURB: &str = "Highlights the main medical observations and details.";
const RECOMMENDATIONS_TITLE: &str = "Recommendations";
const RECOMMENDATIONS_BLURB: &str =
    "Suggestions and next steps for understanding and managing the condition.";

/// Render the combined summary as the three-section report.
///
/// Always emits the Introduction, Key Findings, and Recommendations headers
/// in that order, whatever the input length.
#[must_use]
pub fn format_report(summary: &str) -> String {
    let chars: Vec<char> = summary.chars().collect();

    let mut report = String::with_capacity(summary.len() + 512);
    report.push_str(BANNER);
    report.push_str("\n\n");

    push_header(&mut report, INTRO_TITLE, INTRO_BLURB);
    report.push_str(&window(&chars, 0, INTRO_END));
    report.push_str("...\n\n");

    push_header(&mut report, FINDINGS_TITLE, FINDINGS_BLURB);
    for item in fragments(&window(&chars, INTRO_END, FINDINGS_END)) {
        report.push_str("- ");
        report.push_str(&item);
        report.push('\n');
    }
    report.push('\n');

    push_header(&mut report, RECOMMENDATIONS_TITLE, RECOMMENDATIONS_BLURB);
    for (i, item) in fragments(&window(&chars, FINDINGS_END, RECOMMENDATIONS_END))
        .iter()
        .enumerate()
    {
        report.push_str(&format!("{}. {item}\n", i + 1));
    }

    report
}

fn push_header(report: &mut String, title: &str, blurb: &str) {
    report.push_str("## ");
    report.push_str(title);
    report.push('\n');
    report.push_str(blurb);
    report.push_str("\n\n");
}

/// Character window `[start, end)`, clamped to the input; out-of-range
/// windows are empty.
fn window(chars: &[char], start: usize, end: usize) -> String {
    if start >= chars.len() {
        return String::new();
    }
    chars[start..end.min(chars.len())].iter().collect()
}

/// Split on `". "`, keeping the first [`MAX_ITEMS`] non-blank fragments,
/// each terminated with a single period.
fn fragments(text: &str) -> Vec<String> {
    text.split(FRAGMENT_SEPARATOR)
        .map(|f| f.trim().trim_end_matches('.').trim_end())
        .filter(|f| !f.is_empty())
        .take(MAX_ITEMS)
        .map(|f| format!("{f}."))
        .collect()
}
