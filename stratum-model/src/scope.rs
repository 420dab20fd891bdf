//! Visibility scopes for persisted state.
//!
//! Every field of a state model is tagged with exactly one scope. The scope
//! decides which backing store a value lands in and how long it lives:
//!
//! - [`Scope::Session`] lives for one conversation in the request-local cache
//! - [`Scope::User`] is durable per user, across that user's conversations
//! - [`Scope::Application`] is durable and shared across all users
//!
//! Scopes are ordered by breadth, `Application` being the broadest. A value
//! in a broad scope is visible from every narrower one, which is why the
//! session view of a model carries its user- and application-scoped fields
//! as well, while the application view carries only application-scoped ones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visibility and durability tier of a persisted field.
///
/// The derived ordering follows breadth: `Session < User < Application`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Visible for the duration of one conversation only.
    Session,
    /// Visible to one user across all of their conversations.
    User,
    /// Visible to every user of the application.
    Application,
}

impl Scope {
    /// True when `other` is the same scope or a narrower one.
    ///
    /// `Application` includes `User` and `Session`; `User` includes
    /// `Session` only; `Session` includes nothing but itself.
    pub fn includes(self, other: Scope) -> bool {
        self >= other
    }

    /// True when a field tagged with this scope belongs to the serialized
    /// view of `target`.
    ///
    /// A field is carried in its own scope's view and in every narrower
    /// one: application-scoped values show up in the session view, but
    /// session-scoped values never leave it.
    pub fn visible_in(self, target: Scope) -> bool {
        self.includes(target)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::Session => "session",
            Scope::User => "user",
            Scope::Application => "application",
        };
        write!(f, "{}", name)
    }
}
