use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `odrl-eval.toml` schema v1.
///
/// Values are kept as strings here and validated during resolution, so error messages can
/// name the case and key that is wrong.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvalCasesConfigV1 {
    /// Optional schema string for tooling (`odrl-eval.cases.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Oracle profile: `blank` (default), `permissive`, or `restrictive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Default obligation round for every case: `"1"` (default) or `"2"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,

    /// Category -> outcome label, applied on top of the profile.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, String>,

    /// Map of case name -> case.
    #[serde(default)]
    pub cases: BTreeMap<String, CaseConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CaseConfig {
    /// Policy graph file (N-Triples or N-Quads), relative to the case file.
    pub policy: String,

    /// IRI of the rule to evaluate.
    pub rule: String,

    /// `permission`, `prohibition`, or `obligation`. Inferred from the graph when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,

    /// Expected verdict label (`Allowed`, `Violated`, ...) or `aborted[:code]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub presets: PresetsConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PresetsConfig {
    /// Category -> outcome label, for this case only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, String>,

    /// Node IRI -> outcome label. Beats every category default.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub instances: BTreeMap<String, String>,
}
