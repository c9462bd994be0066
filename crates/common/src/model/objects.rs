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

use enum_primitive_derive::Primitive;
use locus_var::{DbRef, NOTHING, ObjectKind, ObjectRef};
use unicase::UniCase;

use crate::util::BitEnum;

#[derive(Debug, Ord, PartialOrd, Copy, Clone, Eq, PartialEq, Hash, Primitive)]
pub enum ObjFlag {
    Dark = 0,
    Light = 1,
    Wizard = 2,
    Royalty = 3,
}

/// The attributes every object carries regardless of its kind.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ObjectCore {
    pub dbref: DbRef,
    /// Creation time in milliseconds; paired with `dbref` it forms the object id.
    pub created: i64,
    pub name: String,
    pub owner: DbRef,
    /// Inheritance parent. Read by the world, never resolved by matching.
    pub parent: DbRef,
    pub zone: DbRef,
    pub flags: BitEnum<ObjFlag>,
}

impl ObjectCore {
    pub fn new(dbref: DbRef, name: &str) -> Self {
        Self {
            dbref,
            created: 0,
            name: name.to_string(),
            owner: dbref,
            parent: NOTHING,
            zone: NOTHING,
            flags: BitEnum::new(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Player {
    pub core: ObjectCore,
    pub aliases: Vec<String>,
    pub location: DbRef,
    pub home: DbRef,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Room {
    pub core: ObjectCore,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Exit {
    pub core: ObjectCore,
    pub aliases: Vec<String>,
    /// The room the exit leads out of. This is where the exit "is".
    pub source: DbRef,
    pub destination: DbRef,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Thing {
    pub core: ObjectCore,
    pub location: DbRef,
    pub home: DbRef,
}

impl Player {
    pub fn new(dbref: DbRef, name: &str, location: DbRef) -> Self {
        Self {
            core: ObjectCore::new(dbref, name),
            aliases: vec![],
            location,
            home: location,
        }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }
}

impl Room {
    pub fn new(dbref: DbRef, name: &str) -> Self {
        Self {
            core: ObjectCore::new(dbref, name),
        }
    }
}

impl Exit {
    pub fn new(dbref: DbRef, name: &str, source: DbRef, destination: DbRef) -> Self {
        Self {
            core: ObjectCore::new(dbref, name),
            aliases: vec![],
            source,
            destination,
        }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }
}

impl Thing {
    pub fn new(dbref: DbRef, name: &str, location: DbRef) -> Self {
        Self {
            core: ObjectCore::new(dbref, name),
            location,
            home: location,
        }
    }
}

/// Any object in the world. Matching over this is exhaustive over the four kinds.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AnyObject {
    Player(Player),
    Room(Room),
    Exit(Exit),
    Thing(Thing),
}

macro_rules! any_object_from {
    ($($kind:ident),*) => {
        $(impl From<$kind> for AnyObject {
            fn from(value: $kind) -> Self {
                AnyObject::$kind(value)
            }
        })*
    };
}

any_object_from!(Player, Room, Exit, Thing);

impl AnyObject {
    pub fn core(&self) -> &ObjectCore {
        match self {
            AnyObject::Player(p) => &p.core,
            AnyObject::Room(r) => &r.core,
            AnyObject::Exit(e) => &e.core,
            AnyObject::Thing(t) => &t.core,
        }
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        match self {
            AnyObject::Player(p) => &mut p.core,
            AnyObject::Room(r) => &mut r.core,
            AnyObject::Exit(e) => &mut e.core,
            AnyObject::Thing(t) => &mut t.core,
        }
    }

    pub fn dbref(&self) -> DbRef {
        self.core().dbref
    }

    /// Creation time in milliseconds, the second half of an object id.
    pub fn created(&self) -> i64 {
        self.core().created
    }

    pub fn object_id(&self) -> ObjectRef {
        ObjectRef {
            dbref: self.dbref(),
            created: Some(self.created()),
        }
    }

    pub fn name(&self) -> &str {
        &self.core().name
    }

    pub fn owner(&self) -> DbRef {
        self.core().owner
    }

    pub fn parent(&self) -> DbRef {
        self.core().parent
    }

    pub fn zone(&self) -> DbRef {
        self.core().zone
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            AnyObject::Player(_) => ObjectKind::Player,
            AnyObject::Room(_) => ObjectKind::Room,
            AnyObject::Exit(_) => ObjectKind::Exit,
            AnyObject::Thing(_) => ObjectKind::Thing,
        }
    }

    /// Alternate names. Only players and exits have them.
    pub fn aliases(&self) -> &[String] {
        match self {
            AnyObject::Player(p) => &p.aliases,
            AnyObject::Exit(e) => &e.aliases,
            AnyObject::Room(_) | AnyObject::Thing(_) => &[],
        }
    }

    /// Where the object currently is. Rooms are not anywhere; exits are in their source room.
    pub fn location(&self) -> Option<DbRef> {
        match self {
            AnyObject::Player(p) => Some(p.location),
            AnyObject::Room(_) => None,
            AnyObject::Exit(e) => Some(e.source),
            AnyObject::Thing(t) => Some(t.location),
        }
    }

    pub fn home(&self) -> Option<DbRef> {
        match self {
            AnyObject::Player(p) => Some(p.home),
            AnyObject::Thing(t) => Some(t.home),
            AnyObject::Room(_) | AnyObject::Exit(_) => None,
        }
    }

    /// The effective location used for relative matching: a room is its own location.
    pub fn where_is(&self) -> DbRef {
        self.location().unwrap_or_else(|| self.dbref())
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    pub fn is_room(&self) -> bool {
        matches!(self, AnyObject::Room(_))
    }

    pub fn has_flag(&self, flag: ObjFlag) -> bool {
        self.core().flags.contains(flag)
    }

    pub fn is_dark(&self) -> bool {
        self.has_flag(ObjFlag::Dark)
    }

    pub fn is_light(&self) -> bool {
        self.has_flag(ObjFlag::Light)
    }

    /// Case-insensitive comparison against the object's name.
    pub fn name_is(&self, name: &str) -> bool {
        UniCase::new(self.name()) == UniCase::new(name)
    }

    /// Case-insensitive comparison against each of the object's aliases.
    pub fn alias_is(&self, name: &str) -> bool {
        self.aliases()
            .iter()
            .any(|a| UniCase::new(a.as_str()) == UniCase::new(name))
    }

    /// Whether the object's name begins with `prefix`, ignoring case.
    pub fn name_starts_with(&self, prefix: &str) -> bool {
        self.name().to_lowercase().starts_with(&prefix.to_lowercase())
    }

    #[must_use]
    pub fn with_owner(mut self, owner: DbRef) -> Self {
        self.core_mut().owner = owner;
        self
    }

    #[must_use]
    pub fn with_zone(mut self, zone: DbRef) -> Self {
        self.core_mut().zone = zone;
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: i64) -> Self {
        self.core_mut().created = created;
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: ObjFlag) -> Self {
        self.core_mut().flags.set(flag);
        self
    }
}

/// Two objects are nearby when they share a location, or one is the other's location.
/// Two rooms are never nearby each other.
pub fn nearby(a: &AnyObject, b: &AnyObject) -> bool {
    if a.is_room() && b.is_room() {
        return false;
    }
    let loc_a = a.where_is();
    if loc_a == b.dbref() {
        return true;
    }
    let loc_b = b.where_is();
    loc_b == a.dbref() || loc_b == loc_a
}
