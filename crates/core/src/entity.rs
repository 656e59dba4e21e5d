//! Records with a stable identity.

use core::fmt;
use core::hash::Hash;

/// A record identified by its id rather than its contents.
///
/// Two values refer to the same record when their ids match, even if a later
/// copy differs in other fields.
pub trait Entity {
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    fn id(&self) -> &Self::Id;

    fn same_record(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
