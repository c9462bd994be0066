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

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use locus_var::DbRef;
use unicase::UniCase;

use crate::matching::{InteractKind, LocateEnvironment};
use crate::model::{AnyObject, Exit, ObjFlag, Player, Room, Thing, WorldStateError};

pub const MOCK_MASTER_ROOM: DbRef = DbRef::mk_id(2);
pub const MOCK_ROOM1: DbRef = DbRef::mk_id(10);
pub const MOCK_ROOM2: DbRef = DbRef::mk_id(11);
pub const MOCK_PLAYER: DbRef = DbRef::mk_id(20);
pub const MOCK_OTHER_PLAYER: DbRef = DbRef::mk_id(21);
pub const MOCK_THING1: DbRef = DbRef::mk_id(30);
pub const MOCK_THING2: DbRef = DbRef::mk_id(31);
pub const MOCK_THING3: DbRef = DbRef::mk_id(32);
pub const MOCK_EXIT1: DbRef = DbRef::mk_id(40);

/// An in-memory world. Contents are yielded in insertion order.
#[derive(Default)]
pub struct MockWorld {
    objects: HashMap<DbRef, AnyObject>,
    order: Vec<DbRef>,
    imperceptible: HashSet<DbRef>,
    hidden: HashSet<DbRef>,
    control: HashSet<(DbRef, DbRef)>,
    locked: HashSet<DbRef>,
    see_all: HashSet<DbRef>,
    long_fingers: HashSet<DbRef>,
    failing: HashSet<DbRef>,
    read_hooks: HashMap<DbRef, Box<dyn Fn() + Send + Sync>>,
    notifications: Mutex<Vec<(DbRef, String)>>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an object. A replaced object keeps its place in contents order.
    pub fn insert(&mut self, object: impl Into<AnyObject>) {
        let object = object.into();
        let dbref = object.dbref();
        if self.objects.insert(dbref, object).is_none() {
            self.order.push(dbref);
        }
    }

    #[must_use]
    pub fn with(mut self, object: impl Into<AnyObject>) -> Self {
        self.insert(object);
        self
    }

    pub fn get(&self, dbref: DbRef) -> Option<&AnyObject> {
        self.objects.get(&dbref)
    }

    /// Nobody can perceive this object well enough to match it.
    pub fn make_imperceptible(&mut self, dbref: DbRef) {
        self.imperceptible.insert(dbref);
    }

    /// Nobody can see this object.
    pub fn make_hidden(&mut self, dbref: DbRef) {
        self.hidden.insert(dbref);
    }

    pub fn grant_control(&mut self, actor: DbRef, object: DbRef) {
        self.control.insert((actor, object));
    }

    /// Nobody passes this object's locks.
    pub fn lock(&mut self, dbref: DbRef) {
        self.locked.insert(dbref);
    }

    pub fn grant_see_all(&mut self, dbref: DbRef) {
        self.see_all.insert(dbref);
    }

    pub fn grant_long_fingers(&mut self, dbref: DbRef) {
        self.long_fingers.insert(dbref);
    }

    /// Reads of this container's contents fail as if storage were unavailable.
    pub fn fail_reads_of(&mut self, dbref: DbRef) {
        self.failing.insert(dbref);
    }

    /// Run `hook` every time this container's contents are read, before they are returned.
    pub fn on_contents_read(&mut self, dbref: DbRef, hook: impl Fn() + Send + Sync + 'static) {
        self.read_hooks.insert(dbref, Box::new(hook));
    }

    pub fn notifications(&self) -> Vec<(DbRef, String)> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    fn is_wizard(&self, who: &AnyObject) -> bool {
        who.has_flag(ObjFlag::Wizard)
    }

    fn contained_in(object: &AnyObject, container: DbRef) -> bool {
        match object {
            AnyObject::Room(_) => false,
            AnyObject::Exit(e) => e.source == container,
            AnyObject::Player(p) => p.location == container,
            AnyObject::Thing(t) => t.location == container,
        }
    }
}

#[async_trait]
impl LocateEnvironment for MockWorld {
    async fn contents_of(&self, container: DbRef) -> Result<Vec<AnyObject>, WorldStateError> {
        if self.failing.contains(&container) {
            return Err(WorldStateError::DatabaseError(format!(
                "contents of {container} unavailable"
            )));
        }
        if let Some(hook) = self.read_hooks.get(&container) {
            hook();
        }
        Ok(self
            .order
            .iter()
            .filter_map(|d| self.objects.get(d))
            .filter(|o| Self::contained_in(o, container))
            .cloned()
            .collect())
    }

    async fn resolve_dbref(&self, dbref: DbRef) -> Result<Option<AnyObject>, WorldStateError> {
        Ok(self.objects.get(&dbref).cloned())
    }

    async fn find_player_by_name(
        &self,
        name: &str,
    ) -> Result<Option<AnyObject>, WorldStateError> {
        let key = UniCase::new(name);
        Ok(self
            .order
            .iter()
            .filter_map(|d| self.objects.get(d))
            .find(|o| {
                matches!(o, AnyObject::Player(_))
                    && (UniCase::new(o.name()) == key || o.alias_is(name))
            })
            .cloned())
    }

    async fn can_interact(
        &self,
        _subject: &AnyObject,
        object: &AnyObject,
        kind: InteractKind,
    ) -> Result<bool, WorldStateError> {
        Ok(match kind {
            InteractKind::Match => !self.imperceptible.contains(&object.dbref()),
            InteractKind::See => !self.hidden.contains(&object.dbref()),
            InteractKind::Hear => true,
        })
    }

    async fn controls(
        &self,
        actor: &AnyObject,
        object: &AnyObject,
    ) -> Result<bool, WorldStateError> {
        Ok(actor.dbref() == object.dbref()
            || object.owner() == actor.dbref()
            || self.is_wizard(actor)
            || self.control.contains(&(actor.dbref(), object.dbref())))
    }

    async fn passes_lock(
        &self,
        _actor: &AnyObject,
        object: &AnyObject,
        _lock_name: &str,
    ) -> Result<bool, WorldStateError> {
        Ok(!self.locked.contains(&object.dbref()))
    }

    async fn can_examine(
        &self,
        examiner: &AnyObject,
        examinee: &AnyObject,
    ) -> Result<bool, WorldStateError> {
        Ok(self.controls(examiner, examinee).await? || self.sees_all(examiner).await?)
    }

    async fn sees_all(&self, who: &AnyObject) -> Result<bool, WorldStateError> {
        Ok(self.is_wizard(who)
            || who.has_flag(ObjFlag::Royalty)
            || self.see_all.contains(&who.dbref()))
    }

    async fn has_long_fingers(&self, who: &AnyObject) -> Result<bool, WorldStateError> {
        Ok(self.is_wizard(who) || self.long_fingers.contains(&who.dbref()))
    }

    async fn notify(&self, target: &AnyObject, message: &str) -> Result<(), WorldStateError> {
        self.notifications
            .lock()
            .map_err(|e| WorldStateError::DatabaseError(e.to_string()))?
            .push((target.dbref(), message.to_string()));
        Ok(())
    }
}

/// Two rooms joined by an exit, a master room, two players and a few things.
///
/// ```text
/// room1 (#10): porcupine (#20, carrying thing1 #30), thing2 #31, exit "north" (#40) -> room2
/// room2 (#11): hedgehog (#21), thing3 #32
/// ```
pub fn setup_mock_environment() -> MockWorld {
    let mut world = MockWorld::new();
    world.insert(Room::new(MOCK_MASTER_ROOM, "Master Room"));
    world.insert(Room::new(MOCK_ROOM1, "room1"));
    world.insert(Room::new(MOCK_ROOM2, "room2"));
    world.insert(Player::new(MOCK_PLAYER, "porcupine", MOCK_ROOM1).with_aliases(&["porc"]));
    world.insert(Player::new(MOCK_OTHER_PLAYER, "hedgehog", MOCK_ROOM2));
    world.insert(Thing::new(MOCK_THING1, "thing1", MOCK_PLAYER));
    world.insert(Thing::new(MOCK_THING2, "thing2", MOCK_ROOM1));
    world.insert(Thing::new(MOCK_THING3, "thing3", MOCK_ROOM2));
    world.insert(Exit::new(MOCK_EXIT1, "north", MOCK_ROOM1, MOCK_ROOM2).with_aliases(&["n"]));
    world
}
