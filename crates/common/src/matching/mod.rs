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

use async_trait::async_trait;
use locus_var::DbRef;
use strum::Display;

use crate::model::{AnyObject, WorldStateError};

#[doc(hidden)]
pub mod mock_locate_env;

/// The kinds of interaction one object can attempt with another.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display)]
pub enum InteractKind {
    /// Perceiving the object well enough to name it.
    Match,
    See,
    Hear,
}

/// This is the interface that the locate engine needs to be able to call into the world
/// state and permission system. Separated out so it can be more easily mocked.
///
/// Apart from `notify`, every method is a read. Any method may fail, and such a
/// failure ends the locate call that issued it.
#[async_trait]
pub trait LocateEnvironment: Send + Sync {
    /// The contents of a container. Exits are the contents of the room they lead out of.
    /// Order is whatever the store yields and need not be stable across calls.
    async fn contents_of(&self, container: DbRef) -> Result<Vec<AnyObject>, WorldStateError>;

    async fn resolve_dbref(&self, dbref: DbRef) -> Result<Option<AnyObject>, WorldStateError>;

    /// Exact, case-insensitive lookup of a player by name.
    async fn find_player_by_name(&self, name: &str)
    -> Result<Option<AnyObject>, WorldStateError>;

    async fn can_interact(
        &self,
        subject: &AnyObject,
        object: &AnyObject,
        kind: InteractKind,
    ) -> Result<bool, WorldStateError>;

    async fn controls(&self, actor: &AnyObject, object: &AnyObject)
    -> Result<bool, WorldStateError>;

    async fn passes_lock(
        &self,
        actor: &AnyObject,
        object: &AnyObject,
        lock_name: &str,
    ) -> Result<bool, WorldStateError>;

    async fn can_examine(
        &self,
        examiner: &AnyObject,
        examinee: &AnyObject,
    ) -> Result<bool, WorldStateError>;

    /// Global visibility (the See_All power or privilege).
    async fn sees_all(&self, who: &AnyObject) -> Result<bool, WorldStateError>;

    /// Whether `who` may match objects that are not nearby.
    async fn has_long_fingers(&self, who: &AnyObject) -> Result<bool, WorldStateError>;

    /// Deliver a message to an object.
    async fn notify(&self, target: &AnyObject, message: &str) -> Result<(), WorldStateError>;
}
