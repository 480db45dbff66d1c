use crate::dto::grouped::{ClassGroup, GroupedResults, HandicapGroup};
use crate::models::{Event, ONE_DESIGN_LABEL, Race, RaceResult, UNKNOWN_CLASS_LABEL};

/// Display name for `class_id` within `race`.
pub fn class_label(race: &Race, class_id: &str) -> String {
    if class_id.is_empty() {
        return ONE_DESIGN_LABEL.to_string();
    }
    race.class_by_id(class_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN_CLASS_LABEL.to_string())
}

/// Groups the results belonging to `event` by their race's handicap system,
/// then by class id. Groups appear in the order they are first met; results
/// inside a class are ordered by position.
///
/// A class is resolved against the race of the first result seen for it.
pub fn group_results(event: &Event, results: &[RaceResult]) -> GroupedResults {
    let mut grouped = GroupedResults::default();

    for result in results {
        let Some(race) = event.race(&result.race_id) else {
            continue;
        };

        let group_idx = match grouped
            .groups
            .iter()
            .position(|g| g.handicap_system == race.handicap_system)
        {
            Some(idx) => idx,
            None => {
                grouped.groups.push(HandicapGroup {
                    handicap_system: race.handicap_system.clone(),
                    classes: Vec::new(),
                });
                grouped.groups.len() - 1
            }
        };
        let classes = &mut grouped.groups[group_idx].classes;

        let class_idx = match classes.iter().position(|c| c.class_id == result.class_id) {
            Some(idx) => idx,
            None => {
                classes.push(ClassGroup {
                    class_id: result.class_id.clone(),
                    class_name: class_label(race, &result.class_id),
                    rating: race.class_by_id(&result.class_id).map(|c| c.rating),
                    results: Vec::new(),
                });
                classes.len() - 1
            }
        };
        classes[class_idx].results.push(result.clone());
    }

    for class in grouped.groups.iter_mut().flat_map(|g| g.classes.iter_mut()) {
        class.results.sort_by_key(|r| r.position);
    }

    grouped
}
