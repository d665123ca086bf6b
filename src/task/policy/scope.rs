//! Listing visibility.

use crate::identity::domain::{Identity, Role};
use crate::task::ports::TaskQuery;

/// Returns the base query bounding which tasks `actor` may see in listings,
/// calendar views, and stats.
///
/// Users see only tasks assigned to them. Tasks they created but assigned to
/// someone else stay readable by identifier but do not appear here.
#[must_use]
pub fn visibility_scope(actor: &Identity) -> TaskQuery {
    match actor.role() {
        Role::Admin => TaskQuery::all(),
        Role::Manager => manager_scope(actor),
        Role::User => TaskQuery::all().assigned_to(actor.id()),
    }
}

fn manager_scope(_actor: &Identity) -> TaskQuery {
    TaskQuery::all()
}
