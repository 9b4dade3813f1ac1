//! Explain registry for verdict labels and abort codes.
//!
//! Maps identifiers that show up in reports to a short description of how the engine
//! reaches them and what to look at in the policy or the case presets.

use crate::ids;

#[derive(Debug, Clone)]
pub struct Explanation {
    pub title: &'static str,
    /// How the engine reaches this result.
    pub description: &'static str,
    /// What to check in the policy or the case file.
    pub guidance: &'static str,
}

/// Look up an explanation by verdict label (case-insensitive) or abort code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    let id = identifier.trim().to_ascii_lowercase();
    let id = id.strip_prefix("aborted:").unwrap_or(&id);
    match id {
        "allowed" => Some(Explanation {
            title: "Permission allowed",
            description: "All gates of the permission passed and its duties were fulfilled, or it has no duties.",
            guidance: "Nothing to do; the permission may be exercised.",
        }),
        "not-allowed" => Some(Explanation {
            title: "Permission not allowed",
            description: "All gates passed but at least one duty of the permission was not fulfilled.",
            guidance: "Inspect the first `Not-Fulfilled` duty in the trace; in round 2 check its consequences.",
        }),
        "not-violated" => Some(Explanation {
            title: "Prohibition not violated",
            description: "The prohibited action was not exercised, or it was exercised and the remedies were fulfilled.",
            guidance: "Nothing to do.",
        }),
        "violated" => Some(Explanation {
            title: "Prohibition violated",
            description: "The prohibited action was exercised and at least one remedy was not fulfilled.",
            guidance: "Inspect the remedy entries of the trace; a remedy without consequences is not fulfilled when its action was not exercised.",
        }),
        "fulfilled" => Some(Explanation {
            title: "Duty fulfilled",
            description: "The duty's action was exercised, or (round 2) at least one consequence was fulfilled and none failed.",
            guidance: "Nothing to do.",
        }),
        "not-fulfilled" => Some(Explanation {
            title: "Duty not fulfilled",
            description: "The duty's action was not exercised and no consequence rescued it.",
            guidance: "Round 1 never evaluates consequences; run round 2 to include them.",
        }),
        "not-existing" => Some(Explanation {
            title: "Not existing",
            description: "The node is semantically absent: no constraints were found, a duty's constraints or party refinements were not satisfied, or all consequences were not existing.",
            guidance: "Check the constraint and refinement presets of the node named in the trace.",
        }),
        "error" => Some(Explanation {
            title: "Evaluation error",
            description: "A sub-evaluation failed: missing policy graph, missing `action` relation inside a duty, no oracle preset for a leaf, or a logical constraint listed among its own operands.",
            guidance: "Look for the `ERROR:` line in the trace; usually an instance or category preset is missing from the case file.",
        }),
        ids::ABORT_CONSTRAINTS_NOT_SATISFIED => Some(Explanation {
            title: "Rule constraints not satisfied",
            description: "The rule's own constraints evaluated to Not-Satisfied, so the rule does not apply.",
            guidance: "Check the presets for the rule's `constraint` nodes.",
        }),
        ids::ABORT_TARGET_REFINEMENT_NOT_SATISFIED => Some(Explanation {
            title: "Target refinement not satisfied",
            description: "A refinement on the rule's target asset collection evaluated to Not-Satisfied.",
            guidance: "Check the `refinement` presets of the target.",
        }),
        ids::ABORT_ASSIGNEE_REFINEMENT_NOT_SATISFIED => Some(Explanation {
            title: "Assignee refinement not satisfied",
            description: "A refinement on the rule's assignee party collection evaluated to Not-Satisfied.",
            guidance: "Check the `refinement` presets of the assignee.",
        }),
        ids::ABORT_ACTION_REFINEMENT_NOT_SATISFIED => Some(Explanation {
            title: "Action refinement not satisfied",
            description: "A refinement on the permission's action evaluated to Not-Satisfied.",
            guidance: "Check the `refinement` presets of the action node.",
        }),
        ids::ABORT_MISSING_ACTION => Some(Explanation {
            title: "Missing action",
            description: "The rule has no `action` relation; the policy is invalid.",
            guidance: "Add an `odrl:action` to the rule.",
        }),
        ids::ABORT_ACTION_NOT_EXISTING => Some(Explanation {
            title: "Action not existing",
            description: "The prohibited action's refinements were not satisfied, so the action as described does not exist.",
            guidance: "Check the `refinement` presets of the prohibited action.",
        }),
        _ => None,
    }
}

/// All verdict labels known to the registry.
pub fn all_labels() -> &'static [&'static str] {
    &[
        "Allowed",
        "Not-Allowed",
        "Not-Violated",
        "Violated",
        "Fulfilled",
        "Not-Fulfilled",
        "Not-Existing",
        "Error",
    ]
}

/// All abort codes known to the registry.
pub fn all_abort_codes() -> &'static [&'static str] {
    &[
        ids::ABORT_CONSTRAINTS_NOT_SATISFIED,
        ids::ABORT_TARGET_REFINEMENT_NOT_SATISFIED,
        ids::ABORT_ASSIGNEE_REFINEMENT_NOT_SATISFIED,
        ids::ABORT_ACTION_REFINEMENT_NOT_SATISFIED,
        ids::ABORT_MISSING_ACTION,
        ids::ABORT_ACTION_NOT_EXISTING,
    ]
}
