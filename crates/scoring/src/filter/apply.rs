use tracing::{debug, warn};

use super::HandicapFilter;
use super::parser::parse;
use crate::dto::grouped::{ClassGroup, GroupedResults, HandicapGroup};
use crate::models::ONE_DESIGN_LABEL;

/// Narrows grouped results to the classes a filter selects.
///
/// Only handicap groups tagged like the filter survive. Inside them a class
/// survives when its name equals the filter's class name and its rating
/// satisfies the comparison. Classes without a rating (one-design or
/// unresolved) survive only when the filter names no class or names the
/// one-design label. Handicap groups left without classes are dropped.
pub fn apply_filter(grouped: GroupedResults, filter: &HandicapFilter) -> GroupedResults {
    let groups = grouped
        .groups
        .into_iter()
        .filter(|g| g.handicap_system.tag() == Some(filter.tag))
        .filter_map(|group| {
            let classes: Vec<ClassGroup> = group
                .classes
                .into_iter()
                .filter(|class| class_matches(class, filter))
                .collect();
            (!classes.is_empty()).then(|| HandicapGroup {
                handicap_system: group.handicap_system,
                classes,
            })
        })
        .collect();

    GroupedResults { groups }
}

fn class_matches(class: &ClassGroup, filter: &HandicapFilter) -> bool {
    match class.rating {
        Some(rating) => class.class_name == filter.class_name && filter.comparison.matches(rating),
        None => {
            filter.class_name.is_empty() || filter.class_name.eq_ignore_ascii_case(ONE_DESIGN_LABEL)
        }
    }
}

/// Applies `filter_text` when it parses; otherwise returns `grouped`
/// untouched. A bad filter never hides results or fails the view.
pub fn refine(grouped: GroupedResults, filter_text: Option<&str>) -> GroupedResults {
    let Some(text) = filter_text.map(str::trim).filter(|t| !t.is_empty()) else {
        return grouped;
    };

    match parse(text) {
        Ok(filter) => {
            let before = grouped.result_count();
            let filtered = apply_filter(grouped, &filter);
            debug!(
                "Filter '{}' kept {} of {} result(s)",
                text,
                filtered.result_count(),
                before
            );
            filtered
        }
        Err(e) => {
            warn!("Ignoring filter: {}", e);
            grouped
        }
    }
}
