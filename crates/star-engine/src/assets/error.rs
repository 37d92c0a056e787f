/// The three sky documents the page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogDocument {
    /// Constellation stick figures.
    Lines,
    /// Constellation label anchors and names.
    Names,
    /// Star positions, magnitudes and color indices.
    Stars,
}

impl CatalogDocument {
    pub const ALL: [CatalogDocument; 3] = [
        CatalogDocument::Lines,
        CatalogDocument::Names,
        CatalogDocument::Stars,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CatalogDocument::Lines => "constellation lines",
            CatalogDocument::Names => "constellation names",
            CatalogDocument::Stars => "star catalog",
        }
    }
}

impl std::fmt::Display for CatalogDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog document could not be fetched or understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced a response.
    Network(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was not the expected GeoJSON shape.
    Parse(String),
    /// The request was cancelled because the view went away.
    Aborted,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Network(msg) => write!(f, "catalog request failed: {msg}"),
            CatalogError::Status(code) => write!(f, "catalog request returned HTTP {code}"),
            CatalogError::Parse(msg) => write!(f, "catalog document malformed: {msg}"),
            CatalogError::Aborted => write!(f, "catalog request aborted"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}
