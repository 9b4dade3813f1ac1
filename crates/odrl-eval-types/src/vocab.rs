//! ODRL and RDF vocabulary IRIs read by the engine.

pub const ODRL_NS: &str = "http://www.w3.org/ns/odrl/2/";

pub const PERMISSION: &str = "http://www.w3.org/ns/odrl/2/permission";
pub const PROHIBITION: &str = "http://www.w3.org/ns/odrl/2/prohibition";
pub const OBLIGATION: &str = "http://www.w3.org/ns/odrl/2/obligation";
pub const DUTY: &str = "http://www.w3.org/ns/odrl/2/duty";
pub const REMEDY: &str = "http://www.w3.org/ns/odrl/2/remedy";
pub const CONSEQUENCE: &str = "http://www.w3.org/ns/odrl/2/consequence";

pub const ACTION: &str = "http://www.w3.org/ns/odrl/2/action";
pub const TARGET: &str = "http://www.w3.org/ns/odrl/2/target";
pub const ASSIGNEE: &str = "http://www.w3.org/ns/odrl/2/assignee";

pub const CONSTRAINT: &str = "http://www.w3.org/ns/odrl/2/constraint";
pub const REFINEMENT: &str = "http://www.w3.org/ns/odrl/2/refinement";

pub const OR: &str = "http://www.w3.org/ns/odrl/2/or";
pub const AND: &str = "http://www.w3.org/ns/odrl/2/and";
pub const XONE: &str = "http://www.w3.org/ns/odrl/2/xone";
pub const AND_SEQUENCE: &str = "http://www.w3.org/ns/odrl/2/andSequence";

// Rule classes, used when a rule is not referenced from a policy.
pub const CLASS_PERMISSION: &str = "http://www.w3.org/ns/odrl/2/Permission";
pub const CLASS_PROHIBITION: &str = "http://www.w3.org/ns/odrl/2/Prohibition";
pub const CLASS_DUTY: &str = "http://www.w3.org/ns/odrl/2/Duty";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

/// Shortens an IRI in the ODRL namespace to `odrl:<local>` for trace lines.
pub fn compact(iri: &str) -> String {
    match iri.strip_prefix(ODRL_NS) {
        Some(local) => format!("odrl:{local}"),
        None => iri.to_string(),
    }
}
