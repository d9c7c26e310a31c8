//! Entity identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

fn validate(kind: &'static str, s: &str) -> Result<(), Error> {
    if s.is_empty() {
        return Err(InvalidInputError::Id {
            kind,
            value: s.to_string(),
            reason: "must not be empty".to_string(),
        }
        .into());
    }

    if s.chars().any(char::is_whitespace) {
        return Err(InvalidInputError::Id {
            kind,
            value: s.to_string(),
            reason: "must not contain whitespace".to_string(),
        }
        .into());
    }

    Ok(())
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new ", $kind, " id, rejecting empty or whitespace-bearing values.")]
            pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
                let s = s.as_ref();
                validate($kind, s)?;
                Ok(Self(s.to_string()))
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $name::new(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

entity_id!(
    /// Identifier of an organization.
    OrganizationId,
    "organization"
);

entity_id!(
    /// Identifier of a post.
    PostId,
    "post"
);

entity_id!(
    /// Identifier of a comment.
    CommentId,
    "comment"
);

entity_id!(
    /// Identifier of a user (post creators, up-voters).
    UserId,
    "user"
);
