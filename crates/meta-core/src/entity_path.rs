use std::fmt;

/// A fully-qualified entity name: `/namespace[/package]/name`.
///
/// Textual and structured forms round-trip: `parse(x.to_string()) == x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FullyQualifiedName {
    pub namespace: String,
    pub package: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    MissingNamespace,
    MissingName,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "entity path is empty"),
            ParseError::MissingNamespace => write!(f, "entity path is missing a namespace segment"),
            ParseError::MissingName => write!(f, "entity path is missing a name segment"),
        }
    }
}

impl std::error::Error for ParseError {}

impl FullyQualifiedName {
    pub fn new(namespace: impl Into<String>, package: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            package,
            name: name.into(),
        }
    }

    /// Parse `/namespace[/package]/name` (the leading slash is optional).
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.len() {
            0 => Err(ParseError::Empty),
            1 => Err(ParseError::MissingName),
            2 => {
                if segments[0].is_empty() {
                    return Err(ParseError::MissingNamespace);
                }
                Ok(Self::new(segments[0], None, segments[1]))
            }
            3 => {
                if segments[0].is_empty() {
                    return Err(ParseError::MissingNamespace);
                }
                Ok(Self::new(segments[0], Some(segments[1].to_string()), segments[2]))
            }
            _ => Err(ParseError::MissingName),
        }
    }
}

impl fmt::Display for FullyQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(pkg) => write!(f, "/{}/{}/{}", self.namespace, pkg, self.name),
            None => write!(f, "/{}/{}", self.namespace, self.name),
        }
    }
}
