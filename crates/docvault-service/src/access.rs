//! Access evaluator — pure read/write decisions over a principal and a node.
//!
//! Read visibility layers, in order of precedence: admin, then ownership,
//! then the optional per-node deny/allow override sets, then the clearance
//! comparison. Write access is ownership or admin only; clearance never
//! grants a write.
//!
//! The listing engine's SQL predicate
//! (`repositories::node::push_visibility_filter`) must stay equivalent to
//! [`can_view`]: listing and point reads answer the same question.

use docvault_entity::node::Node;

use crate::context::RequestContext;

/// Whether the principal may view the node.
pub fn can_view(ctx: &RequestContext, node: &Node) -> bool {
    if ctx.is_admin() || node.owner_id == ctx.user_id {
        return true;
    }
    if node.denies(ctx.user_id) {
        return false;
    }
    if node.allows(ctx.user_id) {
        return true;
    }
    node.clearance_level <= ctx.clearance_rank()
}

/// Whether the principal may rename, move, reclassify, or delete the node.
pub fn can_modify(ctx: &RequestContext, node: &Node) -> bool {
    ctx.is_admin() || node.owner_id == ctx.user_id
}
