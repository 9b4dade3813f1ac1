use camino::Utf8Path;
use oxrdfio::RdfFormat;
use std::fmt;

/// Policy file syntaxes, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolicyFormat {
    NTriples,
    NQuads,
    Turtle,
    JsonLd,
}

impl PolicyFormat {
    pub const ALL: [PolicyFormat; 4] = [
        PolicyFormat::NTriples,
        PolicyFormat::NQuads,
        PolicyFormat::Turtle,
        PolicyFormat::JsonLd,
    ];

    /// `.nt`, `.nq`, `.ttl`, `.jsonld` or `.json`, case-insensitive.
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        match path.extension()?.to_ascii_lowercase().as_str() {
            "nt" => Some(PolicyFormat::NTriples),
            "nq" => Some(PolicyFormat::NQuads),
            "ttl" => Some(PolicyFormat::Turtle),
            "jsonld" | "json" => Some(PolicyFormat::JsonLd),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PolicyFormat::NTriples => "N-Triples",
            PolicyFormat::NQuads => "N-Quads",
            PolicyFormat::Turtle => "Turtle",
            PolicyFormat::JsonLd => "JSON-LD",
        }
    }

    /// Turtle collections and `[ ]` nodes, and every JSON-LD node without an `@id`, get
    /// parser-generated blank node labels. Those are renumbered in order of appearance so
    /// traces stay stable between runs.
    pub const fn renames_blank_nodes(self) -> bool {
        matches!(self, PolicyFormat::Turtle | PolicyFormat::JsonLd)
    }

    pub(crate) fn rdf_format(self) -> Option<RdfFormat> {
        match self {
            PolicyFormat::NTriples => Some(RdfFormat::NTriples),
            PolicyFormat::NQuads => Some(RdfFormat::NQuads),
            PolicyFormat::Turtle => Some(RdfFormat::Turtle),
            PolicyFormat::JsonLd => RdfFormat::from_extension("jsonld"),
        }
    }
}

impl fmt::Display for PolicyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
