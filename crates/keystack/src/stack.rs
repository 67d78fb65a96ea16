//! # Keymaps and keymap stacks
//!
//! ## Overview
//!
//! A [Keymap] binds [Key] values to commands. Several keymaps are layered into a
//! [KeymapStack] for a single interaction context, and lookups scan the stack from the most
//! recently pushed keymap down to the first one. The first keymap that binds the key decides
//! which command runs, so a more specific keymap pushed later overrides the ones beneath it
//! without modifying them.
use std::collections::HashMap;
use std::sync::Arc;

use crate::key::Key;

/// A unit of behaviour that can be bound to a key.
pub trait Command<Ctx> {
    /// The error returned when the command fails.
    type Error;

    /// Run this command against the given context.
    fn execute(&self, ctx: &mut Ctx) -> Result<(), Self::Error>;
}

/// A command built from a closure.
pub type CommandFn<Ctx, E> = Arc<dyn Fn(&mut Ctx) -> Result<(), E>>;

impl<Ctx, E> Command<Ctx> for CommandFn<Ctx, E> {
    type Error = E;

    fn execute(&self, ctx: &mut Ctx) -> Result<(), E> {
        (self)(ctx)
    }
}

/// Wrap a closure as a [CommandFn].
pub fn command<Ctx, E, F>(f: F) -> CommandFn<Ctx, E>
where
    F: Fn(&mut Ctx) -> Result<(), E> + 'static,
{
    Arc::new(f)
}

/// A mapping from keys to commands.
#[derive(Clone, Debug)]
pub struct Keymap<C> {
    bindings: HashMap<Key, C>,
}

impl<C> Keymap<C> {
    /// Create an empty keymap.
    pub fn new() -> Self {
        Keymap { bindings: HashMap::new() }
    }

    /// Bind `key` to `cmd`, returning the command previously bound to it.
    ///
    /// The empty key can't be bound, and is ignored.
    pub fn bind(&mut self, key: Key, cmd: C) -> Option<C> {
        if key.is_empty() {
            tracing::warn!("ignoring attempt to bind the empty key");
            return None;
        }

        self.bindings.insert(key, cmd)
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: &Key) -> Option<C> {
        self.bindings.remove(key)
    }

    /// Get the command bound to `key`.
    pub fn get(&self, key: &Key) -> Option<&C> {
        if key.is_empty() {
            return None;
        }

        self.bindings.get(key)
    }

    /// Returns how many keys are bound.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Indicates whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over the bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &C)> {
        self.bindings.iter()
    }
}

impl<C> Default for Keymap<C> {
    fn default() -> Self {
        Keymap::new()
    }
}

impl<C> FromIterator<(Key, C)> for Keymap<C> {
    fn from_iter<I: IntoIterator<Item = (Key, C)>>(iter: I) -> Self {
        let mut keymap = Keymap::new();

        for (key, cmd) in iter {
            keymap.bind(key, cmd);
        }

        keymap
    }
}

/// Identifies a keymap pushed onto a [KeymapStack].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct KeymapId(u64);

/// What happened when a key was dispatched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dispatch {
    /// A command was found and ran successfully.
    Executed,

    /// No keymap binds the key, so nothing ran.
    Unmapped,
}

/// An ordered stack of keymaps for one interaction context.
#[derive(Clone, Debug)]
pub struct KeymapStack<C> {
    maps: Vec<(KeymapId, Keymap<C>)>,
    next_id: u64,
}

impl<C> KeymapStack<C> {
    /// Create an empty stack.
    pub fn new() -> Self {
        KeymapStack { maps: Vec::new(), next_id: 0 }
    }

    /// Push a keymap on top of the stack. It takes precedence over everything below it.
    pub fn push(&mut self, keymap: Keymap<C>) -> KeymapId {
        let id = KeymapId(self.next_id);
        self.next_id += 1;
        self.maps.push((id, keymap));

        return id;
    }

    /// Remove the topmost keymap.
    pub fn pop(&mut self) -> Option<Keymap<C>> {
        self.maps.pop().map(|(_, km)| km)
    }

    /// Remove the keymap with the given identifier, wherever it is in the stack.
    pub fn remove(&mut self, id: KeymapId) -> Option<Keymap<C>> {
        let idx = self.maps.iter().position(|(i, _)| *i == id)?;

        Some(self.maps.remove(idx).1)
    }

    /// Get mutable access to a previously pushed keymap.
    pub fn get_mut(&mut self, id: KeymapId) -> Option<&mut Keymap<C>> {
        self.maps.iter_mut().find(|(i, _)| *i == id).map(|(_, km)| km)
    }

    /// Returns how many keymaps are on the stack.
    pub fn depth(&self) -> usize {
        self.maps.len()
    }

    /// Find the command for `key`, searching from the top of the stack down.
    ///
    /// The first keymap that binds `key` wins; keymaps beneath it aren't consulted.
    pub fn lookup(&self, key: &Key) -> Option<&C> {
        if key.is_empty() {
            return None;
        }

        self.maps.iter().rev().find_map(|(_, km)| km.get(key))
    }

    /// Run the command bound to `key`, if any.
    ///
    /// An unbound or empty key is not an error. A failing command stops dispatch, and its error
    /// is returned to the caller.
    pub fn dispatch<Ctx>(&self, key: &Key, ctx: &mut Ctx) -> Result<Dispatch, C::Error>
    where
        C: Command<Ctx>,
    {
        match self.lookup(key) {
            Some(cmd) => {
                tracing::trace!(%key, "dispatching key");
                cmd.execute(ctx)?;

                Ok(Dispatch::Executed)
            },
            None => {
                if !key.is_empty() {
                    tracing::trace!(%key, "unmapped key");
                }

                Ok(Dispatch::Unmapped)
            },
        }
    }
}

impl<C> Default for KeymapStack<C> {
    fn default() -> Self {
        KeymapStack::new()
    }
}
