use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

use fundlink_types::api::ProjectDraft;
use fundlink_types::models::{StartupProject, UserId};

use crate::seed::{OTHER_CATEGORY, STARTUP_CATEGORIES};

/// Per-field validation failures of a project draft, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid project: {}", .fields.values().copied().collect::<Vec<_>>().join("; "))]
pub struct ProjectErrors {
    pub fields: BTreeMap<&'static str, &'static str>,
}

/// Check every field of the draft and build the project owned by `user_id`.
pub fn create_project(
    draft: ProjectDraft,
    user_id: &UserId,
) -> Result<StartupProject, ProjectErrors> {
    let mut fields = BTreeMap::new();

    let required = [
        ("name", &draft.name, "Project name is required"),
        ("idea", &draft.idea, "Project idea is required"),
        (
            "implementation",
            &draft.implementation,
            "Implementation details are required",
        ),
        ("target_audience", &draft.target_audience, "Target audience is required"),
        (
            "problem_solution",
            &draft.problem_solution,
            "Problem solution is required",
        ),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            fields.insert(field, message);
        }
    }

    let category = draft.category.trim();
    if category.is_empty() {
        fields.insert("category", "Category selection is required");
    } else if category != OTHER_CATEGORY && !STARTUP_CATEGORIES.contains(&category) {
        fields.insert("category", "Unknown category");
    }

    if !fields.is_empty() {
        return Err(ProjectErrors { fields });
    }

    Ok(StartupProject {
        id: Uuid::new_v4().to_string(),
        name: draft.name.trim().to_string(),
        idea: draft.idea.trim().to_string(),
        implementation: draft.implementation.trim().to_string(),
        target_audience: draft.target_audience.trim().to_string(),
        problem_solution: draft.problem_solution.trim().to_string(),
        category: category.to_string(),
        user_id: user_id.clone(),
    })
}
