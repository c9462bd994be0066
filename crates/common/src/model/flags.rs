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

//! Locate flags, kept as two disjoint groups: what kind of object to prefer, and where (and
//! how) to look.

use std::str::FromStr;

use enum_primitive_derive::Primitive;
use locus_var::ObjectKind;
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::util::BitEnum;

/// Type-preference bits, plus the policies that decide how preferences and ties resolve.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Primitive, EnumIter)]
pub enum TypePreference {
    Players = 0,
    Rooms = 1,
    Exits = 2,
    Things = 3,
    /// Candidates not of a preferred kind are skipped entirely.
    FailIfNotPreferred = 4,
    /// Resolve an ambiguous match to the last candidate the tie-breaker accepted.
    UseLastIfAmbiguous = 5,
    /// Among equal candidates, prefer the one whose lock the looker passes.
    PreferLockPass = 6,
}

impl TypePreference {
    /// The object kind this bit prefers, for the four kind bits.
    pub fn kind(&self) -> Option<ObjectKind> {
        match self {
            TypePreference::Players => Some(ObjectKind::Player),
            TypePreference::Rooms => Some(ObjectKind::Room),
            TypePreference::Exits => Some(ObjectKind::Exit),
            TypePreference::Things => Some(ObjectKind::Thing),
            _ => None,
        }
    }
}

/// Where to look, and restrictions on how a match may be made.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Primitive, EnumIter)]
pub enum Scope {
    /// `#<number>` resolves directly.
    Absolute = 0,
    /// The literal `me` is the looker.
    Me = 1,
    /// The literal `here` is the looker's location.
    Here = 2,
    /// The looker's own contents.
    Inventory = 3,
    /// The contents of the looker's location.
    LocationContents = 4,
    /// The looker's location itself, matched by name.
    Container = 5,
    /// Exits of the room the looker is in.
    ExitsInRoom = 6,
    /// Exits of the looker itself, when the looker is a room.
    ExitsInLooker = 7,
    /// Exits of the location's zone room and of the master room.
    GlobalExits = 8,
    /// `*name` looks a player up by name.
    PlayerWildcard = 9,
    /// A bare name is also looked up as a player name.
    OptionalPlayerWildcard = 10,
    /// Parse "my", "here", "toward" prefixes and ordinals like "2nd".
    English = 11,
    /// Match the looker's contents as if standing inside it, instead of its location's.
    RemoteContents = 12,
    /// Only the looker's inventory is scanned.
    InventoryOnly = 13,
    /// Absolute and player hits must be nearby the looker (unless it has long fingers).
    NearbyOnly = 14,
    /// Names must match exactly; no prefix matches.
    NoPartial = 15,
    /// Only objects the looker controls can match.
    OnlyControlled = 16,
}

impl Scope {
    /// Every place-to-look bit. This is the default when a caller names none of them.
    pub const SEARCH: [Scope; 11] = [
        Scope::Absolute,
        Scope::Me,
        Scope::Here,
        Scope::Inventory,
        Scope::LocationContents,
        Scope::Container,
        Scope::ExitsInRoom,
        Scope::ExitsInLooker,
        Scope::GlobalExits,
        Scope::PlayerWildcard,
        Scope::English,
    ];

    pub fn is_search(&self) -> bool {
        Self::SEARCH.contains(self) || *self == Scope::OptionalPlayerWildcard
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct LocateFlags {
    pub types: BitEnum<TypePreference>,
    pub scope: BitEnum<Scope>,
}

impl LocateFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every search scope, with no type preference.
    pub fn all() -> Self {
        Self {
            types: BitEnum::new(),
            scope: Scope::SEARCH.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_preference(mut self, preference: TypePreference) -> Self {
        self.types.set(preference);
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope.set(scope);
        self
    }

    #[must_use]
    pub fn without_scope(mut self, scope: Scope) -> Self {
        self.scope.clear(scope);
        self
    }

    pub fn prefers(&self, preference: TypePreference) -> bool {
        self.types.contains(preference)
    }

    pub fn has(&self, scope: Scope) -> bool {
        self.scope.contains(scope)
    }

    pub fn preferred_kinds(&self) -> impl Iterator<Item = ObjectKind> + '_ {
        TypePreference::iter()
            .filter(|p| self.types.contains(*p))
            .filter_map(|p| p.kind())
    }

    /// True when at least one object kind is preferred.
    pub fn has_type_preference(&self) -> bool {
        self.preferred_kinds().next().is_some()
    }

    pub fn is_preferred_kind(&self, kind: ObjectKind) -> bool {
        self.preferred_kinds().any(|k| k == kind)
    }

    /// Kind bits allow `kind` to be matched at all: either it is preferred, or nothing is.
    pub fn admits_kind(&self, kind: ObjectKind) -> bool {
        !self.has_type_preference() || self.is_preferred_kind(kind)
    }

    /// Fill in the full search scope when the caller named no place to look.
    #[must_use]
    pub fn with_default_scope(mut self) -> Self {
        if !Scope::iter().any(|s| s.is_search() && self.scope.contains(s)) {
            for s in Scope::SEARCH {
                self.scope.set(s);
            }
        }
        self
    }
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum FlagParseError {
    #[error("Unknown locate flag: {0}")]
    UnknownFlag(char),
}

/// Parses the flag letters used by softcode `locate()`. Uppercase letters are type
/// preferences, lowercase letters are places to look; the two are never conflated.
impl FromStr for LocateFlags {
    type Err = FlagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = LocateFlags::new();
        for c in s.chars() {
            match c {
                'E' => flags.types.set(TypePreference::Exits),
                'P' => flags.types.set(TypePreference::Players),
                'R' => flags.types.set(TypePreference::Rooms),
                'T' => flags.types.set(TypePreference::Things),
                'N' => {
                    for p in [
                        TypePreference::Exits,
                        TypePreference::Players,
                        TypePreference::Rooms,
                        TypePreference::Things,
                    ] {
                        flags.types.clear(p);
                    }
                }
                'L' => flags.types.set(TypePreference::PreferLockPass),
                'F' => flags.types.set(TypePreference::FailIfNotPreferred),
                'X' | 'x' => flags.types.set(TypePreference::UseLastIfAmbiguous),
                'a' => flags.scope.set(Scope::Absolute),
                'c' => flags.scope.set(Scope::ExitsInLooker),
                'e' => flags.scope.set(Scope::ExitsInRoom),
                'h' => flags.scope.set(Scope::Here),
                'i' => flags.scope.set(Scope::Inventory),
                'l' => flags.scope.set(Scope::Container),
                'm' => flags.scope.set(Scope::Me),
                'n' => flags.scope.set(Scope::LocationContents),
                'p' => flags.scope.set(Scope::PlayerWildcard),
                'y' => flags.scope.set(Scope::English),
                '*' => {
                    for s in Scope::SEARCH {
                        flags.scope.set(s);
                    }
                }
                c => return Err(FlagParseError::UnknownFlag(c)),
            }
        }
        Ok(flags)
    }
}
