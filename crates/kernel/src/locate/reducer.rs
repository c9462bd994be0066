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

//! Per-candidate classification, the tie-breaker, and the accumulator the candidate
//! stream is folded into.

use locus_common::matching::{InteractKind, LocateEnvironment};
use locus_common::model::{AnyObject, LocateFlags, Scope, TypePreference, WorldStateError};
use locus_var::{ObjectKind, ObjectRef};

use crate::locate::LocateOutcome;

/// How a candidate matched the name.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Hit {
    Exact,
    Partial,
}

/// Whether scanning should go on after a candidate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Step {
    Continue,
    Stop,
}

/// Running state of one locate call. Consumed and rebuilt by [`MatchAccumulator::accept`].
#[derive(Debug, Clone, Default)]
pub(crate) struct MatchAccumulator {
    best: Option<AnyObject>,
    exact_count: usize,
    partial_count: usize,
    right_type_count: usize,
    /// An exact hit has been seen; partial hits no longer count.
    exact: bool,
    target_ordinal: usize,
    ordinal_seen: usize,
}

impl MatchAccumulator {
    pub(crate) fn new(target_ordinal: usize) -> Self {
        Self {
            target_ordinal,
            ..Default::default()
        }
    }

    fn ordinal_mode(&self) -> bool {
        self.target_ordinal > 0
    }

    /// A hit of this quality has to be weighed against the current best before `accept`.
    pub(crate) fn needs_tie_break(&self, hit: Hit) -> bool {
        !self.ordinal_mode() && self.best.is_some() && (hit == Hit::Exact) == self.exact
    }

    pub(crate) fn best(&self) -> Option<&AnyObject> {
        self.best.as_ref()
    }

    /// Fold one classified candidate in. `cur_wins` is the tie-breaker's answer, and only
    /// matters when [`needs_tie_break`](Self::needs_tie_break) said so.
    pub(crate) fn accept(
        mut self,
        cur: AnyObject,
        hit: Hit,
        cur_wins: bool,
        flags: &LocateFlags,
    ) -> (Self, Step) {
        if self.ordinal_mode() {
            self.ordinal_seen += 1;
            if self.ordinal_seen == self.target_ordinal {
                self.best = Some(cur);
                return (self, Step::Stop);
            }
            return (self, Step::Continue);
        }

        let preferred = usize::from(flags.is_preferred_kind(cur.kind()));
        match (hit, self.exact) {
            (Hit::Partial, true) => {}
            (Hit::Exact, false) => {
                self.exact = true;
                self.exact_count = 1;
                self.partial_count = 0;
                self.right_type_count = preferred;
                self.best = Some(cur);
            }
            _ => {
                if self.exact {
                    self.exact_count += 1;
                } else {
                    self.partial_count += 1;
                }
                self.right_type_count += preferred;
                if self.best.is_none() || cur_wins {
                    self.best = Some(cur);
                }
            }
        }
        (self, Step::Continue)
    }

    /// Collapse the accumulated hits into one outcome.
    pub(crate) fn verdict(self, flags: &LocateFlags) -> LocateOutcome {
        if self.ordinal_mode() {
            return self
                .best
                .map(LocateOutcome::Found)
                .unwrap_or(LocateOutcome::NotFound);
        }
        let count = if self.exact {
            self.exact_count
        } else {
            self.partial_count
        };
        match (count, self.best) {
            (0, _) | (_, None) => LocateOutcome::NotFound,
            (1, Some(best)) => LocateOutcome::Found(best),
            (_, Some(best))
                if self.right_type_count == 1
                    || flags.prefers(TypePreference::UseLastIfAmbiguous) =>
            {
                LocateOutcome::Found(best)
            }
            _ => LocateOutcome::Ambiguous,
        }
    }
}

/// Decide whether `cur` matches at all, and how well. `None` means the candidate is
/// invisible to the rest of the search and does not count toward anything.
pub(crate) async fn classify<E: LocateEnvironment + ?Sized>(
    env: &E,
    looker: &AnyObject,
    flags: &LocateFlags,
    name: &str,
    abs: Option<&ObjectRef>,
    cur: &AnyObject,
) -> Result<Option<Hit>, WorldStateError> {
    if flags.prefers(TypePreference::FailIfNotPreferred) && !flags.admits_kind(cur.kind()) {
        return Ok(None);
    }

    let hit = if abs.is_some_and(|r| r.dbref == cur.dbref() && r.matches_creation(cur.created()))
    {
        // A dbref named in a contents list needs no perception check.
        Some(Hit::Exact)
    } else if !env.can_interact(looker, cur, InteractKind::Match).await? {
        None
    } else if cur.name_is(name) || cur.alias_is(name) {
        Some(Hit::Exact)
    } else if !flags.has(Scope::NoPartial)
        && cur.kind() != ObjectKind::Exit
        && cur.name_starts_with(name)
    {
        Some(Hit::Partial)
    } else {
        None
    };

    if hit.is_some() && flags.has(Scope::OnlyControlled) && !env.controls(looker, cur).await? {
        return Ok(None);
    }
    Ok(hit)
}

/// The tie-breaker between two candidates of equal match quality. Returns true when `cur`
/// should replace `best`.
pub(crate) async fn choose_thing<E: LocateEnvironment + ?Sized>(
    env: &E,
    looker: &AnyObject,
    flags: &LocateFlags,
    lock_name: &str,
    best: &AnyObject,
    cur: &AnyObject,
) -> Result<bool, WorldStateError> {
    let best_preferred = flags.is_preferred_kind(best.kind());
    let cur_preferred = flags.is_preferred_kind(cur.kind());
    if best_preferred != cur_preferred {
        return Ok(cur_preferred);
    }

    if flags.prefers(TypePreference::PreferLockPass) {
        let best_passes = env.passes_lock(looker, best, lock_name).await?;
        let cur_passes = env.passes_lock(looker, cur, lock_name).await?;
        if best_passes != cur_passes {
            return Ok(cur_passes);
        }
    }

    Ok(true)
}
