//! Image name templates
//!
//! A template such as `{prefix}:{branch}-python{python_version}-ci` names one
//! image per (prefix, branch, version). `{{` and `}}` stand for literal braces.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// Placeholders a template may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Prefix,
    Branch,
    PythonVersion,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "prefix" => Some(Self::Prefix),
            "branch" => Some(Self::Branch),
            "python_version" => Some(Self::PythonVersion),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// Parsed image name template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NameTemplate {
    raw: String,
    #[serde(skip)]
    segments: Vec<Segment>,
}

impl NameTemplate {
    /// Parse a template, rejecting unknown placeholders and unbalanced braces
    pub fn parse(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        let malformed = |reason: &str| ConfigError::MalformedTemplate {
            template: raw.clone(),
            reason: reason.to_string(),
        };

        if raw.trim().is_empty() {
            return Err(malformed("template is empty"));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(malformed("unclosed '{'"));
                    }
                    let placeholder = Placeholder::from_name(&name).ok_or_else(|| {
                        malformed(&format!(
                            "unknown placeholder '{{{}}}' (expected prefix, branch or python_version)",
                            name
                        ))
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                }
                '}' => return Err(malformed("unmatched '}'")),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { raw, segments })
    }

    /// Substitute every placeholder
    pub fn render(&self, prefix: &str, branch: &str, python_version: &str) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Placeholder(Placeholder::Prefix) => prefix,
                Segment::Placeholder(Placeholder::Branch) => branch,
                Segment::Placeholder(Placeholder::PythonVersion) => python_version,
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl TryFrom<String> for NameTemplate {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<NameTemplate> for String {
    fn from(template: NameTemplate) -> Self {
        template.raw
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
