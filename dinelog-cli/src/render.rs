//! Terminal rendering of visits

use dinelog_common::VisitRecord;

/// Star glyphs for a rating, one per whole point
pub fn stars(rating: f64) -> String {
    let count = if rating.is_finite() && rating > 0.0 {
        rating.floor() as usize
    } else {
        0
    };
    "★".repeat(count)
}

/// Multi-line card for one visit
pub fn visit_card(visit: &VisitRecord) -> String {
    format!(
        "{}\n  {}\n  Ordered: {}\n  {}\n  {}",
        visit.name,
        visit.location,
        visit.dish,
        stars(visit.rating),
        visit.date.format("%b %-d, %Y")
    )
}

/// All visits separated by blank lines
pub fn visit_list(visits: &[VisitRecord]) -> String {
    if visits.is_empty() {
        return "No visits recorded yet.".to_string();
    }

    visits
        .iter()
        .map(visit_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}
