//! Composable callables.
//!
//! A [`Hook`] is a named extension point that several independent listeners can
//! attach behavior to without replacing each other. Every handler layered onto a
//! hook receives the behavior beneath it as a [`Next`] continuation and decides
//! whether and when to run it. A handler that never calls its `Next`
//! short-circuits everything layered below it.
//!
//! [`Surface`] applies the same idea to a bag of named members. Composing one
//! surface onto another layers hooks of the same name and keeps existing data.
//! [`Test`](crate::test::Test) and [`Module`](crate::module::Module) carry such a
//! surface, with their completion hook stored under [`DONE`].

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;

/// Name of the completion hook on test and module surfaces.
pub const DONE: &str = "done";

type Handler<A> = Box<dyn Fn(Next<'_, A>, &A)>;

/// A stack of layered handlers taking `&A`.
///
/// Calling the hook runs the most recently layered handler. Calling an empty
/// hook does nothing.
pub struct Hook<A> {
    handlers: Vec<Handler<A>>,
}

impl<A> Hook<A> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Layer `handler` on top of the current behavior.
    ///
    /// The handler gets the previous behavior as its first argument. To keep the
    /// previous behavior it has to call [`Next::call`] itself.
    pub fn layer<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Next<'_, A>, &A) + 'static,
    {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Consuming version of [`layer`](Self::layer).
    pub fn with_layer<F>(mut self, handler: F) -> Self
    where
        F: Fn(Next<'_, A>, &A) + 'static,
    {
        self.layer(handler);
        self
    }

    /// Layer a handler that runs after the previous behavior.
    ///
    /// This is the common case of a listener that only wants to observe.
    pub fn observe<F>(&mut self, observer: F) -> &mut Self
    where
        F: Fn(&A) + 'static,
    {
        self.layer(move |next, args| {
            next.call(args);
            observer(args);
        })
    }

    /// Layer every handler of `other` on top of `self`.
    ///
    /// The bottom handler of `other` receives the current top of `self` as its
    /// `Next`, so no intermediate behavior is lost, however often this is applied.
    pub fn compose(&mut self, other: Hook<A>) -> &mut Self {
        self.handlers.extend(other.handlers);
        self
    }

    pub fn call(&self, args: &A) {
        Next {
            below: &self.handlers,
        }
        .call(args)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<A> Default for Hook<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Hook<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// The behavior beneath a handler.
///
/// `Next` is `Copy`, a handler may run the previous behavior more than once or
/// with different arguments.
pub struct Next<'h, A> {
    below: &'h [Handler<A>],
}

impl<'h, A> Next<'h, A> {
    pub fn call(self, args: &A) {
        if let Some((top, rest)) = self.below.split_last() {
            top(Next { below: rest }, args);
        }
    }

    /// Whether nothing is layered beneath.
    pub fn is_end(&self) -> bool {
        self.below.is_empty()
    }
}

impl<A> Clone for Next<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Next<'_, A> {}

impl<A> fmt::Debug for Next<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("below", &self.below.len())
            .finish()
    }
}

/// A member of a [`Surface`].
#[derive(Debug)]
pub enum Member<V, A> {
    Data(V),
    Hook(Hook<A>),
}

/// An insertion ordered bag of named data and hook members.
#[derive(Debug)]
pub struct Surface<V, A> {
    members: IndexMap<Cow<'static, str>, Member<V, A>>,
}

impl<V, A> Surface<V, A> {
    pub fn new() -> Self {
        Self {
            members: IndexMap::new(),
        }
    }

    pub fn with_data(mut self, name: impl Into<Cow<'static, str>>, value: V) -> Self {
        self.insert_data(name, value);
        self
    }

    pub fn with_hook(mut self, name: impl Into<Cow<'static, str>>, hook: Hook<A>) -> Self {
        self.insert_hook(name, hook);
        self
    }

    /// Insert or replace a data member.
    pub fn insert_data(&mut self, name: impl Into<Cow<'static, str>>, value: V) -> &mut Self {
        self.members.insert(name.into(), Member::Data(value));
        self
    }

    /// Insert or replace a hook member.
    pub fn insert_hook(&mut self, name: impl Into<Cow<'static, str>>, hook: Hook<A>) -> &mut Self {
        self.members.insert(name.into(), Member::Hook(hook));
        self
    }

    /// Copy every member of `source` into `self`.
    ///
    /// - a name `self` does not have is copied as is
    /// - a hook meeting a hook of the same name is layered on top of it
    /// - anything meeting existing data, or data meeting an existing hook, is
    ///   dropped and the existing member stays
    pub fn compose(&mut self, source: Surface<V, A>) -> &mut Self {
        for (name, member) in source.members {
            let Some(existing) = self.members.get_mut(&name) else {
                self.members.insert(name, member);
                continue;
            };

            match (existing, member) {
                (Member::Hook(existing), Member::Hook(hook)) => {
                    existing.compose(hook);
                }
                _ => tracing::trace!(member = %name, "kept existing member while composing"),
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Member<V, A>> {
        self.members.get(name)
    }

    pub fn data(&self, name: &str) -> Option<&V> {
        match self.members.get(name)? {
            Member::Data(value) => Some(value),
            Member::Hook(_) => None,
        }
    }

    pub fn hook(&self, name: &str) -> Option<&Hook<A>> {
        match self.members.get(name)? {
            Member::Hook(hook) => Some(hook),
            Member::Data(_) => None,
        }
    }

    pub fn hook_mut(&mut self, name: &str) -> Option<&mut Hook<A>> {
        match self.members.get_mut(name)? {
            Member::Hook(hook) => Some(hook),
            Member::Data(_) => None,
        }
    }

    /// The hook named `name`, inserted empty when missing.
    ///
    /// A data member of that name is replaced by the new hook.
    pub fn hook_entry(&mut self, name: impl Into<Cow<'static, str>>) -> &mut Hook<A> {
        let member = self
            .members
            .entry(name.into())
            .or_insert_with(|| Member::Hook(Hook::new()));
        if let Member::Data(_) = member {
            *member = Member::Hook(Hook::new());
        }
        match member {
            Member::Hook(hook) => hook,
            Member::Data(_) => unreachable!("data member replaced above"),
        }
    }

    /// Call the hook `name` with `args`, returns whether such a hook exists.
    pub fn call(&self, name: &str, args: &A) -> bool {
        match self.hook(name) {
            Some(hook) => {
                hook.call(args);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.members.keys().map(|name| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<V, A> Default for Surface<V, A> {
    fn default() -> Self {
        Self::new()
    }
}
