//! Manual ordering of lectures and documents within a course.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Order value for a newly created item: one past the current maximum.
pub fn next_sort_order(current_max: Option<i32>) -> i32 {
    current_max.map_or(1, |max| max + 1)
}

/// Assigns `position + 1` to every requested id.
///
/// Items of the course missing from `requested` are left out of the plan and
/// keep their current order. Ids that are unknown to the course or repeated
/// are rejected.
pub fn plan_reorder(course_items: &[Uuid], requested: &[Uuid]) -> AppResult<Vec<(Uuid, i32)>> {
    let known: HashSet<&Uuid> = course_items.iter().collect();
    let mut seen = HashSet::with_capacity(requested.len());

    for id in requested {
        if !known.contains(id) {
            return Err(AppError::Validation(format!(
                "Item {id} does not belong to this course"
            )));
        }
        if !seen.insert(id) {
            return Err(AppError::Validation(format!(
                "Item {id} appears more than once"
            )));
        }
    }

    Ok(requested
        .iter()
        .enumerate()
        .map(|(position, id)| (*id, position as i32 + 1))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_sort_order() {
        assert_eq!(next_sort_order(None), 1);
        assert_eq!(next_sort_order(Some(4)), 5);
    }

    #[test]
    fn test_full_reorder() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let plan = plan_reorder(&[a, b, c], &[c, a, b]).unwrap();
        assert_eq!(plan, vec![(c, 1), (a, 2), (b, 3)]);
    }

    #[test]
    fn test_partial_reorder_leaves_rest_out() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let plan = plan_reorder(&[a, b, c], &[b]).unwrap();
        assert_eq!(plan, vec![(b, 1)]);
    }

    #[test]
    fn test_foreign_and_duplicate_ids_rejected() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(plan_reorder(&[a], &[b]).is_err());
        assert!(plan_reorder(&[a, b], &[a, a]).is_err());
    }
}
