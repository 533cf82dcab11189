use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Object-type tag for every data object GrowLog knows about.
///
/// Tags are the camel-case names used on the wire (`"well"`, `"channelSet"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectType {
    Well,
    Wellbore,
    Log,
    ChannelSet,
}

impl ObjectType {
    /// The wire tag for this object type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Well => "well",
            Self::Wellbore => "wellbore",
            Self::Log => "log",
            Self::ChannelSet => "channelSet",
        }
    }

    /// Returns `true` for object types whose content grows through appended rows.
    pub fn is_growing(&self) -> bool {
        matches!(self, Self::Log | Self::ChannelSet)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "well" => Ok(Self::Well),
            "wellbore" => Ok(Self::Wellbore),
            "log" => Ok(Self::Log),
            "channelSet" => Ok(Self::ChannelSet),
            other => Err(TypeError::UnknownObjectType(other.to_string())),
        }
    }
}

/// One `type(uid)` step of an [`ObjectUri`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UriSegment {
    pub object_type: ObjectType,
    pub uid: String,
}

/// Hierarchical identity of a data object.
///
/// A growing object lives under a wellbore, which lives under a well:
/// `eml://well(w1)/wellbore(b1)/log(l1)`. Equality is case-exact; stores that
/// resolve identities case-insensitively should key on [`ObjectUri::key`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectUri {
    segments: Vec<UriSegment>,
}

const SCHEME: &str = "eml://";

impl ObjectUri {
    /// Identity of a well.
    pub fn well(uid: &str) -> Self {
        Self {
            segments: vec![UriSegment {
                object_type: ObjectType::Well,
                uid: uid.to_string(),
            }],
        }
    }

    /// Identity of a wellbore under `uid_well`.
    pub fn wellbore(uid_well: &str, uid: &str) -> Self {
        Self::well(uid_well).child(ObjectType::Wellbore, uid)
    }

    /// Identity of a growing object (log or channel set) under a wellbore.
    pub fn growing(object_type: ObjectType, uid_well: &str, uid_wellbore: &str, uid: &str) -> Self {
        Self::wellbore(uid_well, uid_wellbore).child(object_type, uid)
    }

    /// Append a child segment.
    pub fn child(mut self, object_type: ObjectType, uid: &str) -> Self {
        self.segments.push(UriSegment {
            object_type,
            uid: uid.to_string(),
        });
        self
    }

    /// The identity one level up, or `None` for a top-level object.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The object type of the last segment.
    pub fn object_type(&self) -> ObjectType {
        self.last().object_type
    }

    /// The uid of the last segment.
    pub fn uid(&self) -> &str {
        &self.last().uid
    }

    /// All segments, outermost first.
    pub fn segments(&self) -> &[UriSegment] {
        &self.segments
    }

    /// Case-folded lookup key.
    pub fn key(&self) -> String {
        self.to_string().to_lowercase()
    }

    fn last(&self) -> &UriSegment {
        // Constructors never produce an empty segment list.
        &self.segments[self.segments.len() - 1]
    }
}

impl fmt::Debug for ObjectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectUri({self})")
    }
}

impl fmt::Display for ObjectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SCHEME)?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}({})", segment.object_type, segment.uid)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectUri {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(SCHEME)
            .ok_or_else(|| TypeError::InvalidUri(s.to_string()))?;
        let mut segments = Vec::new();
        for part in body.split('/') {
            let (tag, rest) = part
                .split_once('(')
                .ok_or_else(|| TypeError::InvalidUri(s.to_string()))?;
            let uid = rest
                .strip_suffix(')')
                .ok_or_else(|| TypeError::InvalidUri(s.to_string()))?;
            segments.push(UriSegment {
                object_type: tag.parse()?,
                uid: uid.to_string(),
            });
        }
        if segments.is_empty() {
            return Err(TypeError::InvalidUri(s.to_string()));
        }
        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_tags_roundtrip() {
        for ty in [
            ObjectType::Well,
            ObjectType::Wellbore,
            ObjectType::Log,
            ObjectType::ChannelSet,
        ] {
            assert_eq!(ty.as_str().parse::<ObjectType>().unwrap(), ty);
        }
    }

    #[test]
    fn unknown_object_type_rejected() {
        assert_eq!(
            "mudLog".parse::<ObjectType>(),
            Err(TypeError::UnknownObjectType("mudLog".into()))
        );
    }

    #[test]
    fn growing_types() {
        assert!(ObjectType::Log.is_growing());
        assert!(ObjectType::ChannelSet.is_growing());
        assert!(!ObjectType::Well.is_growing());
    }

    #[test]
    fn display_format() {
        let uri = ObjectUri::growing(ObjectType::Log, "w1", "b1", "l1");
        assert_eq!(uri.to_string(), "eml://well(w1)/wellbore(b1)/log(l1)");
    }

    #[test]
    fn parent_chain() {
        let uri = ObjectUri::growing(ObjectType::Log, "w1", "b1", "l1");
        let wellbore = uri.parent().unwrap();
        assert_eq!(wellbore, ObjectUri::wellbore("w1", "b1"));
        let well = wellbore.parent().unwrap();
        assert_eq!(well, ObjectUri::well("w1"));
        assert!(well.parent().is_none());
    }

    #[test]
    fn uid_and_type_of_last_segment() {
        let uri = ObjectUri::growing(ObjectType::ChannelSet, "w1", "b1", "cs1");
        assert_eq!(uri.uid(), "cs1");
        assert_eq!(uri.object_type(), ObjectType::ChannelSet);
    }

    #[test]
    fn key_folds_case() {
        let a = ObjectUri::wellbore("W1", "B1");
        let b = ObjectUri::wellbore("w1", "b1");
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn parse_roundtrip() {
        let uri = ObjectUri::growing(ObjectType::Log, "w1", "b1", "l1");
        let parsed: ObjectUri = uri.to_string().parse().unwrap();
        assert_eq!(parsed, uri);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("well(w1)".parse::<ObjectUri>().is_err());
        assert!("eml://well".parse::<ObjectUri>().is_err());
        assert!("eml://pump(p1)".parse::<ObjectUri>().is_err());
    }
}
