use crate::PolicyFormat;
use odrl_eval_domain::{InMemoryGraph, Triple};
use oxrdfio::RdfParser;
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0} parsing is not available")]
    Unsupported(PolicyFormat),
    #[error("{format} syntax error: {message}")]
    Syntax {
        format: PolicyFormat,
        message: String,
    },
}

/// Parses policy text into a graph. Graph names of quads are dropped and duplicate
/// statements collapse.
///
/// Terms are stored the way the engine addresses nodes: IRIs without angle brackets,
/// blank nodes as `_:label`, literals in N-Triples form including quotes and any
/// `@lang` or `^^<type>`.
pub fn parse_policy_graph(text: &str, format: PolicyFormat) -> Result<InMemoryGraph, ParseError> {
    let rdf_format = format.rdf_format().ok_or(ParseError::Unsupported(format))?;
    let mut nodes = NodeIds::new(format.renames_blank_nodes());
    let mut graph = InMemoryGraph::new();

    for quad in RdfParser::from_format(rdf_format).for_reader(text.as_bytes()) {
        let quad = quad.map_err(|err| ParseError::Syntax {
            format,
            message: err.to_string(),
        })?;
        graph.insert(Triple::new(
            nodes.id(&quad.subject),
            nodes.id(&quad.predicate),
            nodes.id(&quad.object),
        ));
    }
    Ok(graph)
}

/// Maps parsed terms to engine node ids.
struct NodeIds {
    rename_blanks: bool,
    blanks: HashMap<String, String>,
}

impl NodeIds {
    fn new(rename_blanks: bool) -> Self {
        Self {
            rename_blanks,
            blanks: HashMap::new(),
        }
    }

    fn id(&mut self, term: &impl Display) -> String {
        let text = term.to_string();
        if let Some(iri) = text.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return iri.to_string();
        }
        if !self.rename_blanks || !text.starts_with("_:") {
            return text;
        }
        let next = self.blanks.len();
        self.blanks
            .entry(text)
            .or_insert_with(|| format!("_:b{next}"))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odrl_eval_domain::PolicyGraph;

    fn triples(graph: &InMemoryGraph) -> Vec<(String, String, String)> {
        graph
            .iter()
            .map(|t| (t.subject.clone(), t.predicate.clone(), t.object.clone()))
            .collect()
    }

    #[test]
    fn iris_blank_nodes_and_literals_become_node_ids() {
        let text = r#"
# comment line
<urn:s> <urn:p> _:b1 .
_:b1 <urn:label> "hello"@en .
_:b1 <urn:count> "3"^^<http://www.w3.org/2001/XMLSchema#integer> .
"#;
        let graph = parse_policy_graph(text, PolicyFormat::NTriples).expect("parse");
        assert_eq!(graph.objects("urn:s", "urn:p"), vec!["_:b1"]);
        assert_eq!(graph.objects("_:b1", "urn:label"), vec![r#""hello"@en"#]);
        assert_eq!(
            graph.objects("_:b1", "urn:count"),
            vec![r#""3"^^<http://www.w3.org/2001/XMLSchema#integer>"#]
        );
    }

    #[test]
    fn nquads_graph_names_are_dropped_and_duplicates_collapse() {
        let text = "<urn:s> <urn:p> <urn:o> .\n<urn:s> <urn:p> <urn:o> <urn:g> .\n";
        let graph = parse_policy_graph(text, PolicyFormat::NQuads).expect("parse");
        assert_eq!(triples(&graph), vec![("urn:s".into(), "urn:p".into(), "urn:o".into())]);
    }

    #[test]
    fn turtle_prefixes_and_collections_expand() {
        let text = r#"
@prefix odrl: <http://www.w3.org/ns/odrl/2/> .
<urn:c> odrl:and ( <urn:c1> <urn:c2> ) .
"#;
        let graph = parse_policy_graph(text, PolicyFormat::Turtle).expect("parse");
        assert_eq!(
            graph.members("urn:c", "http://www.w3.org/ns/odrl/2/and"),
            vec!["urn:c1", "urn:c2"]
        );
    }

    #[test]
    fn jsonld_blank_nodes_are_numbered_in_order_of_appearance() {
        let text = r#"{
  "@context": { "odrl": "http://www.w3.org/ns/odrl/2/" },
  "@id": "urn:policy",
  "odrl:permission": {
    "@id": "urn:perm",
    "odrl:action": {
      "odrl:refinement": { "@id": "urn:r1" }
    }
  }
}"#;
        let graph = parse_policy_graph(text, PolicyFormat::JsonLd).expect("parse");
        let action = graph.objects("urn:perm", "http://www.w3.org/ns/odrl/2/action");
        assert_eq!(action, vec!["_:b0"]);
        assert_eq!(
            graph.objects("_:b0", "http://www.w3.org/ns/odrl/2/refinement"),
            vec!["urn:r1"]
        );
    }

    #[test]
    fn syntax_errors_name_the_format() {
        let err = parse_policy_graph("<urn:s> <urn:p> \"open .\n", PolicyFormat::NTriples)
            .expect_err("unterminated literal");
        assert!(matches!(
            err,
            ParseError::Syntax {
                format: PolicyFormat::NTriples,
                ..
            }
        ));
        assert!(err.to_string().starts_with("N-Triples syntax error: "));

        assert!(parse_policy_graph("{ not json", PolicyFormat::JsonLd).is_err());
    }

    #[test]
    fn literals_in_subject_position_are_rejected() {
        assert!(parse_policy_graph("\"s\" <urn:p> <urn:o> .", PolicyFormat::NTriples).is_err());
    }
}
