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

//! The candidate scans, run as an ordered list of phases. Each phase reads one candidate
//! set from the world and folds it into the accumulator; any candidate may end the search.

use locus_common::matching::LocateEnvironment;
use locus_common::model::{AnyObject, LocateFlags, Scope};
use locus_var::{DbRef, ObjectKind, ObjectRef};
use strum::{Display, EnumIter, IntoEnumIterator};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::config::LocateConfig;
use crate::locate::LocateError;
use crate::locate::reducer::{MatchAccumulator, Step, choose_thing, classify};

/// Scan phases, in the order they run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumIter)]
pub(crate) enum Phase {
    Inventory,
    LocationContents,
    ZoneExits,
    MasterRoomExits,
    RoomExits,
    Container,
    ExitsInLooker,
}

/// Where a phase's candidates come from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Source {
    /// Contents of a container, exits left out.
    Contents(DbRef),
    /// Exits out of a room.
    Exits(DbRef),
    /// Exits out of a zone, if the zone turns out to be a room.
    ZoneExits(DbRef),
    /// The location itself.
    Location,
}

pub(crate) struct Search<'a, E: LocateEnvironment + ?Sized> {
    pub env: &'a E,
    pub config: &'a LocateConfig,
    pub looker: &'a AnyObject,
    pub location: Option<&'a AnyObject>,
    pub flags: LocateFlags,
    pub name: &'a str,
    pub abs: Option<ObjectRef>,
    pub token: &'a CancellationToken,
}

impl<E: LocateEnvironment + ?Sized> Search<'_, E> {
    fn check_cancelled(&self) -> Result<(), LocateError> {
        if self.token.is_cancelled() {
            return Err(LocateError::Cancelled);
        }
        Ok(())
    }

    fn location_is_looker(&self) -> bool {
        self.location.is_some_and(|l| l.dbref() == self.looker.dbref())
    }

    /// The room exits may be scanned from, if exits are wanted at all.
    fn exit_room(&self) -> Option<&AnyObject> {
        if !self.flags.admits_kind(ObjectKind::Exit) {
            return None;
        }
        self.location.filter(|l| l.is_room())
    }

    fn global_exits(&self) -> bool {
        self.flags.has(Scope::GlobalExits) && !self.flags.has(Scope::InventoryOnly)
    }

    /// What a phase would scan, or `None` when the flags or the looker's situation rule
    /// it out.
    pub(crate) fn source(&self, phase: Phase) -> Option<Source> {
        let flags = &self.flags;
        match phase {
            Phase::Inventory => ((flags.has(Scope::Inventory) || flags.has(Scope::RemoteContents))
                && self.looker.is_container())
            .then(|| Source::Contents(self.looker.dbref())),
            Phase::LocationContents => {
                if !flags.has(Scope::LocationContents)
                    || flags.has(Scope::RemoteContents)
                    || flags.has(Scope::InventoryOnly)
                    || self.location_is_looker()
                {
                    return None;
                }
                self.location.map(|l| Source::Contents(l.dbref()))
            }
            Phase::ZoneExits => {
                if !self.global_exits() {
                    return None;
                }
                let room = self.exit_room()?;
                let zone = room.zone();
                // A zone that is the master room is scanned once, as the master room.
                (zone.is_valid() && zone != room.dbref() && Some(zone) != self.config.master_room)
                    .then_some(Source::ZoneExits(zone))
            }
            Phase::MasterRoomExits => {
                if !self.global_exits() {
                    return None;
                }
                let room = self.exit_room()?;
                let master = self.config.master_room?;
                (master != room.dbref()).then_some(Source::Exits(master))
            }
            Phase::RoomExits => {
                if !flags.has(Scope::ExitsInRoom) || flags.has(Scope::InventoryOnly) {
                    return None;
                }
                self.exit_room().map(|r| Source::Exits(r.dbref()))
            }
            Phase::Container => {
                if !flags.has(Scope::Container)
                    || flags.has(Scope::InventoryOnly)
                    || self.location_is_looker()
                {
                    return None;
                }
                self.location.map(|_| Source::Location)
            }
            Phase::ExitsInLooker => {
                if !flags.has(Scope::ExitsInLooker)
                    || !flags.admits_kind(ObjectKind::Exit)
                    || !self.looker.is_room()
                {
                    return None;
                }
                // Already covered when the looker is the room whose exits were scanned.
                if self.source(Phase::RoomExits) == Some(Source::Exits(self.looker.dbref())) {
                    return None;
                }
                Some(Source::Exits(self.looker.dbref()))
            }
        }
    }

    async fn candidates(&self, source: Source) -> Result<Vec<AnyObject>, LocateError> {
        self.check_cancelled()?;
        let candidates = match source {
            Source::Contents(container) => self
                .env
                .contents_of(container)
                .await?
                .into_iter()
                .filter(|o| o.kind() != ObjectKind::Exit)
                .collect(),
            Source::Exits(room) => self
                .env
                .contents_of(room)
                .await?
                .into_iter()
                .filter(|o| o.kind() == ObjectKind::Exit)
                .collect(),
            Source::ZoneExits(zone) => {
                let is_room = self
                    .env
                    .resolve_dbref(zone)
                    .await?
                    .is_some_and(|z| z.is_room());
                if !is_room {
                    return Ok(vec![]);
                }
                self.check_cancelled()?;
                self.env
                    .contents_of(zone)
                    .await?
                    .into_iter()
                    .filter(|o| o.kind() == ObjectKind::Exit)
                    .collect()
            }
            Source::Location => self.location.cloned().into_iter().collect(),
        };
        Ok(candidates)
    }

    /// Fold every enabled phase into `acc`, stopping early if a candidate ends the search.
    pub(crate) async fn run(
        &self,
        mut acc: MatchAccumulator,
    ) -> Result<MatchAccumulator, LocateError> {
        for phase in Phase::iter() {
            let Some(source) = self.source(phase) else {
                continue;
            };
            let candidates = self.candidates(source).await?;
            trace!(%phase, ?source, candidates = candidates.len(), "scanning");

            for cur in candidates {
                self.check_cancelled()?;
                let Some(hit) = classify(
                    self.env,
                    self.looker,
                    &self.flags,
                    self.name,
                    self.abs.as_ref(),
                    &cur,
                )
                .await?
                else {
                    continue;
                };
                let cur_wins = match acc.best() {
                    Some(best) if acc.needs_tie_break(hit) => {
                        choose_thing(
                            self.env,
                            self.looker,
                            &self.flags,
                            &self.config.lock_name,
                            best,
                            &cur,
                        )
                        .await?
                    }
                    _ => true,
                };
                trace!(%phase, candidate = %cur.dbref(), ?hit, cur_wins, "candidate matched");
                let (next, step) = acc.accept(cur, hit, cur_wins, &self.flags);
                acc = next;
                if step == Step::Stop {
                    return Ok(acc);
                }
            }
        }
        Ok(acc)
    }
}
