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

//! Name resolution: given a looker, an executor and a free-form name, find the one object
//! meant, or say precisely why there isn't one.

use locus_common::model::{AnyObject, WorldStateError};
use locus_var::DbRef;
use thiserror::Error;

mod english;
mod locator;
mod phases;
mod reducer;

pub use english::{EnglishParse, parse_english};
pub use locator::Locator;

/// The closed set of answers a locate call can give.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LocateOutcome {
    Found(AnyObject),
    /// Nothing matched, or what matched may not be perceived.
    NotFound,
    /// Two or more equally good candidates and no policy to pick one.
    Ambiguous,
    /// The search (or the hit) was not permitted for this looker/executor.
    PermissionDenied,
}

impl LocateOutcome {
    pub fn found(&self) -> Option<&AnyObject> {
        match self {
            LocateOutcome::Found(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LocateOutcome::Found(_))
    }

    /// What to tell the executor when the outcome is not a match.
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            LocateOutcome::Found(_) => None,
            LocateOutcome::NotFound => Some("I can't see that here."),
            LocateOutcome::Ambiguous => Some("I don't know which one you mean!"),
            LocateOutcome::PermissionDenied => Some("Permission denied."),
        }
    }

    /// The softcode return value: the dbref literal, or an error code.
    pub fn error_code(&self) -> String {
        match self {
            LocateOutcome::Found(o) => o.dbref().to_literal(),
            LocateOutcome::NotFound => "#-1 NO MATCH".to_string(),
            LocateOutcome::Ambiguous => "#-2 AMBIGUOUS MATCH".to_string(),
            LocateOutcome::PermissionDenied => "#-1 PERMISSION DENIED".to_string(),
        }
    }
}

/// Fatal conditions. These end a locate call and are never reported as "no match".
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LocateError {
    #[error("World state error during locate: {0}")]
    World(#[from] WorldStateError),
    #[error("Locate cancelled")]
    Cancelled,
    #[error("Containment loop while finding the room of {0}")]
    ContainmentLoop(DbRef),
}
