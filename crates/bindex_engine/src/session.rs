//! Scoped walk resources: the client-handle table and the session.
//!
//! The engine calls back into this crate with an opaque client token. That
//! token is an explicit slot handle into a single owning table — never a
//! raw foreign pointer round-tripped through engine memory. The table maps
//! each handle to the index under construction; the binding between one
//! engine walk and one index is 1:1 and non-reentrant.

use std::fmt;

use bindex_foundation::{Error, Result};
use bindex_model::NativeIndex;

use crate::engine::{AstEngine, DeclEvent, DeclSink, UnitRef};
use crate::indexer;

/// Opaque client token threaded through engine callbacks.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ClientHandle(u32);

impl ClientHandle {
    /// Creates a handle from a raw slot value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw slot value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientHandle({})", self.0)
    }
}

/// Slot table owning the values engine callbacks refer to by handle.
///
/// Slots are reused after removal; a handle for a vacated slot resolves to
/// a stale-handle error rather than someone else's value being silently
/// touched through a dangling token.
#[derive(Debug, Default)]
pub struct HandleTable<T> {
    slots: Vec<Option<T>>,
}

impl<T> HandleTable<T> {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Inserts a value, returning its handle.
    ///
    /// # Panics
    ///
    /// Panics if the table exceeds `u32::MAX` live slots.
    pub fn insert(&mut self, value: T) -> ClientHandle {
        if let Some(free) = self.slots.iter().position(Option::is_none) {
            self.slots[free] = Some(value);
            return ClientHandle::new(u32::try_from(free).expect("table overflow"));
        }

        let raw = u32::try_from(self.slots.len()).expect("table overflow");
        self.slots.push(Some(value));
        ClientHandle::new(raw)
    }

    /// Resolves a handle to its value.
    ///
    /// # Errors
    ///
    /// Returns a stale-handle error for unknown or vacated slots.
    pub fn get_mut(&mut self, handle: ClientHandle) -> Result<&mut T> {
        self.slots
            .get_mut(handle.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| Error::stale_handle(handle.raw()))
    }

    /// Removes and returns the value behind a handle, vacating its slot.
    pub fn remove(&mut self, handle: ClientHandle) -> Option<T> {
        self.slots
            .get_mut(handle.raw() as usize)
            .and_then(Option::take)
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true if no slots are occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One indexing session: one engine walk producing one index.
///
/// The session owns every transient resource of the walk — the in-progress
/// index lives in the session's handle table and is released exactly once
/// on every exit path, success or failure. `run` consumes the session, so
/// no two walks can share one index.
pub struct Session<'e, E: AstEngine + ?Sized> {
    engine: &'e E,
}

impl<'e, E: AstEngine + ?Sized> Session<'e, E> {
    /// Opens a session against the given engine.
    #[must_use]
    pub fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    /// Drives the engine's walk over the translation unit and returns the
    /// finished index.
    ///
    /// # Errors
    ///
    /// Propagates the first indexing failure; the partially built index is
    /// discarded, never returned.
    pub fn run(self, unit: UnitRef) -> Result<NativeIndex> {
        let mut table = HandleTable::new();
        let handle = table.insert(NativeIndex::new());

        let walk = {
            let mut sink = IndexSink {
                engine: self.engine,
                table: &mut table,
            };
            self.engine.visit_declarations(unit, handle, &mut sink)
        };

        // Tear down the slot on every exit path before reporting.
        let index = table.remove(handle);
        walk?;
        index.ok_or_else(|| Error::stale_handle(handle.raw()))
    }
}

/// Bridges engine callbacks back to the in-progress index.
struct IndexSink<'a, E: AstEngine + ?Sized> {
    engine: &'a E,
    table: &'a mut HandleTable<NativeIndex>,
}

impl<E: AstEngine + ?Sized> DeclSink for IndexSink<'_, E> {
    fn declaration(&mut self, handle: ClientHandle, event: &DeclEvent) -> Result<()> {
        let index = self.table.get_mut(handle)?;
        indexer::apply_event(self.engine, index, event)
    }
}
