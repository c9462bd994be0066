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

use locus_common::matching::{InteractKind, LocateEnvironment};
use locus_common::model::{AnyObject, LocateFlags, Scope, TypePreference, WorldStateError, nearby};
use locus_var::{ObjectKind, ObjectRef};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::config::LocateConfig;
use crate::locate::english::parse_english;
use crate::locate::phases::Search;
use crate::locate::reducer::MatchAccumulator;
use crate::locate::{LocateError, LocateOutcome};

/// Scopes that search relative to the looker, and so need permission to evaluate on it.
const LOOKER_RELATIVE: [Scope; 7] = [
    Scope::Inventory,
    Scope::LocationContents,
    Scope::Here,
    Scope::Container,
    Scope::ExitsInRoom,
    Scope::ExitsInLooker,
    Scope::RemoteContents,
];

/// Resolves names to objects against a world reachable through `E`.
///
/// A `Locator` holds no per-call state, so one instance can serve any number of concurrent
/// calls (share it behind an `Arc`).
pub struct Locator<E: LocateEnvironment> {
    env: E,
    config: LocateConfig,
}

impl<E: LocateEnvironment> Locator<E> {
    pub fn new(env: E, config: LocateConfig) -> Self {
        Self { env, config }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn config(&self) -> &LocateConfig {
        &self.config
    }

    /// Find the object `looker` means by `name`, with `executor`'s permissions deciding
    /// whether the search and its result are allowed.
    pub async fn locate(
        &self,
        looker: &AnyObject,
        executor: &AnyObject,
        name: &str,
        flags: LocateFlags,
    ) -> Result<LocateOutcome, LocateError> {
        self.locate_cancellable(looker, executor, name, flags, &CancellationToken::new())
            .await
    }

    /// As [`locate`](Self::locate), giving up with [`LocateError::Cancelled`] once `token`
    /// fires.
    pub async fn locate_cancellable(
        &self,
        looker: &AnyObject,
        executor: &AnyObject,
        name: &str,
        flags: LocateFlags,
        token: &CancellationToken,
    ) -> Result<LocateOutcome, LocateError> {
        let result = self.resolve(looker, executor, name, flags, token).await;
        match &result {
            Ok(outcome) => debug!(
                looker = %looker.dbref(),
                executor = %executor.dbref(),
                name,
                outcome = %outcome.error_code(),
                "locate"
            ),
            Err(e) => warn!(looker = %looker.dbref(), name, error = %e, "locate failed"),
        }
        result
    }

    /// Find a player by name, with or without a leading `*`, wherever they are. Nothing
    /// else is searched.
    pub async fn locate_player(
        &self,
        looker: &AnyObject,
        executor: &AnyObject,
        name: &str,
    ) -> Result<LocateOutcome, LocateError> {
        let flags = LocateFlags::new()
            .with_preference(TypePreference::Players)
            .with_preference(TypePreference::FailIfNotPreferred)
            .with_scope(Scope::English)
            .with_scope(Scope::PlayerWildcard)
            .with_scope(Scope::OptionalPlayerWildcard);
        self.locate(looker, executor, name, flags).await
    }

    /// Locate, and tell the executor why when nothing usable was found.
    pub async fn locate_and_notify(
        &self,
        looker: &AnyObject,
        executor: &AnyObject,
        name: &str,
        flags: LocateFlags,
    ) -> Result<LocateOutcome, LocateError> {
        let outcome = self.locate(looker, executor, name, flags).await?;
        if let Some(message) = outcome.failure_message() {
            self.env.notify(executor, message).await?;
        }
        Ok(outcome)
    }

    /// The outermost room holding `obj`. A room is its own room.
    pub async fn room_of(&self, obj: &AnyObject) -> Result<AnyObject, LocateError> {
        let mut current = obj.clone();
        let mut depth = 0;
        while !current.is_room() {
            if depth == self.config.max_containment_depth {
                return Err(LocateError::ContainmentLoop(obj.dbref()));
            }
            depth += 1;
            let next = current.where_is();
            current = self
                .env
                .resolve_dbref(next)
                .await?
                .ok_or(WorldStateError::ObjectNotFound(next))?;
        }
        Ok(current)
    }

    async fn resolve(
        &self,
        looker: &AnyObject,
        executor: &AnyObject,
        name: &str,
        flags: LocateFlags,
        token: &CancellationToken,
    ) -> Result<LocateOutcome, LocateError> {
        let flags = flags.with_default_scope();
        let name = name.trim();
        if name.is_empty() {
            return Ok(LocateOutcome::NotFound);
        }
        if token.is_cancelled() {
            return Err(LocateError::Cancelled);
        }

        if looker.dbref() != executor.dbref()
            && flags.scope.contains_any(LOOKER_RELATIVE.into_iter().collect())
            && !self.may_evaluate_on(executor, looker).await?
        {
            return Ok(LocateOutcome::PermissionDenied);
        }

        let location = self.location_of(looker).await?;

        let outcome = match self
            .shortcut(looker, location.as_ref(), name, &flags)
            .await?
        {
            Some(outcome) => outcome,
            None => {
                let (name, flags, ordinal) = if flags.has(Scope::English) {
                    let parsed = parse_english(name, flags);
                    (parsed.name, parsed.flags, parsed.ordinal)
                } else {
                    (name.to_string(), flags, 0)
                };
                let search = Search {
                    env: &self.env,
                    config: &self.config,
                    looker,
                    location: location.as_ref(),
                    flags,
                    name: &name,
                    abs: ObjectRef::try_from(name.as_str()).ok(),
                    token,
                };
                search
                    .run(MatchAccumulator::new(ordinal))
                    .await?
                    .verdict(&flags)
            }
        };

        match outcome {
            LocateOutcome::Found(result) => {
                if self.visible_to(executor, &result).await? {
                    Ok(LocateOutcome::Found(result))
                } else {
                    trace!(result = %result.dbref(), "match not visible to executor");
                    Ok(LocateOutcome::NotFound)
                }
            }
            other => Ok(other),
        }
    }

    async fn may_evaluate_on(
        &self,
        executor: &AnyObject,
        looker: &AnyObject,
    ) -> Result<bool, LocateError> {
        Ok(nearby(executor, looker)
            || self.env.sees_all(executor).await?
            || self.env.controls(executor, looker).await?)
    }

    /// Where the looker is standing. A room stands in itself.
    async fn location_of(&self, looker: &AnyObject) -> Result<Option<AnyObject>, LocateError> {
        if looker.is_room() {
            return Ok(Some(looker.clone()));
        }
        Ok(self.env.resolve_dbref(looker.where_is()).await?)
    }

    /// Player names, absolute references, "me" and "here" resolve without scanning.
    /// `None` means no shortcut applied and the scan should run.
    async fn shortcut(
        &self,
        looker: &AnyObject,
        location: Option<&AnyObject>,
        name: &str,
        flags: &LocateFlags,
    ) -> Result<Option<LocateOutcome>, LocateError> {
        if flags.admits_kind(ObjectKind::Player) {
            let wildcard =
                flags.has(Scope::PlayerWildcard) || flags.has(Scope::OptionalPlayerWildcard);
            let player_name = match name.strip_prefix('*') {
                Some(rest) if wildcard => Some(rest.trim_start()),
                None if flags.has(Scope::OptionalPlayerWildcard) => Some(name),
                _ => None,
            };
            if let Some(player_name) = player_name.filter(|n| !n.is_empty())
                && let Some(player) = self.env.find_player_by_name(player_name).await?
                && let Some(outcome) = self.shortcut_hit(looker, flags, player).await?
            {
                return Ok(Some(outcome));
            }
        }

        if flags.has(Scope::Absolute)
            && let Ok(reference) = ObjectRef::try_from(name)
            && let Some(object) = self.env.resolve_dbref(reference.dbref).await?
            && reference.matches_creation(object.created())
            && let Some(outcome) = self.shortcut_hit(looker, flags, object).await?
        {
            return Ok(Some(outcome));
        }

        if flags.has(Scope::InventoryOnly) {
            return Ok(None);
        }

        if flags.has(Scope::Me) && name.eq_ignore_ascii_case("me") {
            return self.shortcut_hit(looker, flags, looker.clone()).await;
        }

        if flags.has(Scope::Here)
            && name.eq_ignore_ascii_case("here")
            && let Some(location) = location
        {
            return self.shortcut_hit(looker, flags, location.clone()).await;
        }

        Ok(None)
    }

    /// Apply the reach and control rules to a shortcut hit. An unreachable hit is dropped so
    /// that scanning can still find something.
    async fn shortcut_hit(
        &self,
        looker: &AnyObject,
        flags: &LocateFlags,
        hit: AnyObject,
    ) -> Result<Option<LocateOutcome>, LocateError> {
        if flags.has(Scope::NearbyOnly)
            && !nearby(looker, &hit)
            && !self.env.has_long_fingers(looker).await?
            && !self.env.controls(looker, &hit).await?
        {
            trace!(hit = %hit.dbref(), "shortcut hit out of reach");
            return Ok(None);
        }
        if flags.has(Scope::OnlyControlled) && !self.env.controls(looker, &hit).await? {
            return Ok(Some(LocateOutcome::PermissionDenied));
        }
        Ok(Some(LocateOutcome::Found(hit)))
    }

    /// Whether the executor may learn about `result`: it controls it, may examine where it
    /// is, or can see it there in the light.
    async fn visible_to(
        &self,
        executor: &AnyObject,
        result: &AnyObject,
    ) -> Result<bool, LocateError> {
        if self.env.controls(executor, result).await? {
            return Ok(true);
        }
        let location = if result.is_room() {
            Some(result.clone())
        } else {
            self.env.resolve_dbref(result.where_is()).await?
        };
        if let Some(location) = &location
            && self.env.can_examine(executor, location).await?
        {
            return Ok(true);
        }
        let lit = !result.is_dark()
            || result.is_light()
            || location.as_ref().is_some_and(|l| l.is_light());
        Ok(lit && self.env.can_interact(executor, result, InteractKind::See).await?)
    }
}
