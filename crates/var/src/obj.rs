// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::ReferenceParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Used throughout to refer to a missing object value.
pub const NOTHING: DbRef = DbRef::mk_id(-1);

/// A reference to an object: its database number.
/// Numbers are never reused while an object holding them is alive, but may be recycled after
/// destruction, which is why [`ObjectRef`] can also carry a creation timestamp.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DbRef(i32);

impl DbRef {
    pub const fn mk_id(id: i32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn to_literal(&self) -> String {
        format!("#{}", self.0)
    }

    pub fn is_nothing(&self) -> bool {
        self.0 == NOTHING.0
    }

    /// Negative numbers are sentinels and never name a real object.
    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl Display for DbRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("#{}", self.0))
    }
}

impl TryFrom<&str> for DbRef {
    type Error = ReferenceParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let Some(number) = value.strip_prefix('#') else {
            return Err(ReferenceParseError::MissingHash(value.to_string()));
        };
        number
            .parse::<i32>()
            .map(Self::mk_id)
            .map_err(|e| ReferenceParseError::BadNumber(format!("{number}: {e}")))
    }
}

/// A parsed absolute reference, `#<number>` or the object-id form `#<number>:<millis>`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub dbref: DbRef,
    /// Creation time in milliseconds, present only for the object-id form.
    pub created: Option<i64>,
}

impl ObjectRef {
    /// Whether an object with the given creation time is the one this reference names.
    pub fn matches_creation(&self, created: i64) -> bool {
        self.created.is_none_or(|c| c == created)
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.created {
            Some(created) => write!(f, "{}:{created}", self.dbref),
            None => write!(f, "{}", self.dbref),
        }
    }
}

impl TryFrom<&str> for ObjectRef {
    type Error = ReferenceParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        match value.split_once(':') {
            Some((number, created)) => {
                let dbref = DbRef::try_from(number)?;
                let created = created
                    .parse::<i64>()
                    .map_err(|e| ReferenceParseError::BadTimestamp(format!("{created}: {e}")))?;
                Ok(ObjectRef {
                    dbref,
                    created: Some(created),
                })
            }
            None => Ok(ObjectRef {
                dbref: DbRef::try_from(value)?,
                created: None,
            }),
        }
    }
}
