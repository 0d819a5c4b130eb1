//! Task Paths
//!
//! A path locates a node by walking from the project's root task list,
//! one id per level. The UI hands paths over as `kind:id/kind:id/...`.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

/// Characters escaped inside a segment id
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS.add(b'/').add(b':').add(b'%').add(b' ');

/// Node kind tag carried by a path segment
///
/// Informational only. Every level is a `Task`, so resolution walks ids and
/// never checks the kind; `deliverable:a/subtask:b` and `a/b` name the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Task,
    /// Top-level node of the legacy two-level model
    Deliverable,
    /// Second-level node of the legacy two-level model
    SubTask,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Task => "task",
            NodeKind::Deliverable => "deliverable",
            NodeKind::SubTask => "subtask",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "task" => Some(NodeKind::Task),
            "deliverable" => Some(NodeKind::Deliverable),
            "subtask" => Some(NodeKind::SubTask),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    pub kind: NodeKind,
    pub id: String,
}

impl PathSegment {
    pub fn task(id: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Task,
            id: id.into(),
        }
    }
}

impl FromStr for PathSegment {
    type Err = DomainError;

    fn from_str(raw: &str) -> DomainResult<Self> {
        let (kind, id) = match raw.split_once(':') {
            Some((kind, id)) => {
                let kind = NodeKind::parse(kind)
                    .ok_or_else(|| DomainError::InvalidInput(format!("Unknown path segment kind '{}'", kind)))?;
                (kind, id)
            }
            None => (NodeKind::Task, raw),
        };

        let id = percent_decode_str(id)
            .decode_utf8()
            .map_err(|e| DomainError::InvalidInput(format!("Bad path segment '{}': {}", raw, e)))?
            .to_string();
        if id.is_empty() {
            return Err(DomainError::InvalidInput(format!("Empty id in path segment '{}'", raw)));
        }

        Ok(Self { kind, id })
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), utf8_percent_encode(&self.id, SEGMENT_ENCODE_SET))
    }
}

/// Ordered node ids from the root; empty means the root task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskPath {
    segments: Vec<PathSegment>,
}

impl TaskPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Build a path of `task` segments
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: ids.into_iter().map(PathSegment::task).collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().map(|s| s.id.as_str())
    }

    pub fn last_id(&self) -> Option<&str> {
        self.segments.last().map(|s| s.id.as_str())
    }

    /// Path one level deeper
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Path of the parent list, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        self.segments.split_last().map(|(_, rest)| Self {
            segments: rest.to_vec(),
        })
    }
}

impl FromStr for TaskPath {
    type Err = DomainError;

    fn from_str(raw: &str) -> DomainResult<Self> {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(PathSegment::from_str)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { segments })
    }
}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
