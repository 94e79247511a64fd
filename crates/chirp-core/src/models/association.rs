use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

/// Kind of entity an uploaded image is attached to (the `type` form field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssociationKind {
    Tweet,
    Comment,
    User,
}

impl AssociationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationKind::Tweet => "tweet",
            AssociationKind::Comment => "comment",
            AssociationKind::User => "user",
        }
    }

    /// Name of the form field that carries the owning identifier for this kind.
    pub fn id_field(&self) -> &'static str {
        match self {
            AssociationKind::Tweet => "tweet_id",
            AssociationKind::Comment => "comment_id",
            AssociationKind::User => "user_id",
        }
    }
}

impl FromStr for AssociationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tweet" => Ok(AssociationKind::Tweet),
            "comment" => Ok(AssociationKind::Comment),
            "user" => Ok(AssociationKind::User),
            _ => Err(anyhow::anyhow!("Invalid association type: {}", s)),
        }
    }
}

impl Display for AssociationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Resolved link between an image and exactly one owning entity.
///
/// Each variant carries the identifier of its own kind, so a tweet association can
/// never be built without a tweet id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Association {
    Tweet { tweet_id: i32 },
    Comment { comment_id: i32 },
    User { user_id: i32 },
}

impl Association {
    pub fn kind(&self) -> AssociationKind {
        match self {
            Association::Tweet { .. } => AssociationKind::Tweet,
            Association::Comment { .. } => AssociationKind::Comment,
            Association::User { .. } => AssociationKind::User,
        }
    }

    /// Identifier of the owning entity.
    pub fn target_id(&self) -> i32 {
        match *self {
            Association::Tweet { tweet_id } => tweet_id,
            Association::Comment { comment_id } => comment_id,
            Association::User { user_id } => user_id,
        }
    }

    pub fn tweet_id(&self) -> Option<i32> {
        match *self {
            Association::Tweet { tweet_id } => Some(tweet_id),
            _ => None,
        }
    }

    pub fn comment_id(&self) -> Option<i32> {
        match *self {
            Association::Comment { comment_id } => Some(comment_id),
            _ => None,
        }
    }
}
