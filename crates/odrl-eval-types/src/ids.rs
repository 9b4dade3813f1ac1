//! Stable identifiers for abort codes and report schemas.
//!
//! Abort codes are short snake_case discriminators; they appear in reports and in `expect`
//! entries of case files (`aborted:<code>`).

// Abort codes
pub const ABORT_CONSTRAINTS_NOT_SATISFIED: &str = "constraints_not_satisfied";
pub const ABORT_TARGET_REFINEMENT_NOT_SATISFIED: &str = "target_refinement_not_satisfied";
pub const ABORT_ASSIGNEE_REFINEMENT_NOT_SATISFIED: &str = "assignee_refinement_not_satisfied";
pub const ABORT_ACTION_REFINEMENT_NOT_SATISFIED: &str = "action_refinement_not_satisfied";
pub const ABORT_MISSING_ACTION: &str = "missing_action";
pub const ABORT_ACTION_NOT_EXISTING: &str = "action_not_existing";

// Case file schema
pub const SCHEMA_CASES_V1: &str = "odrl-eval.cases.v1";
