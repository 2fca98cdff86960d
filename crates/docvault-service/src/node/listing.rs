//! Access-filtered listing and search over the node tree.

use std::sync::Arc;

use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_database::repositories::node::{ListScope, NodeRepository, ViewerFilter};
use docvault_entity::node::NodeListing;

use crate::context::RequestContext;

/// Parameters of a listing request.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    /// Folder whose children to list; `None` lists the root level.
    pub parent_id: Option<Uuid>,
    /// Substring search term. When present the listing ignores `parent_id`
    /// and searches the whole accessible tree.
    pub search: Option<String>,
    /// Page to return.
    pub page: PageRequest,
}

/// Produces paginated, access-filtered, folders-first views of the tree.
#[derive(Debug, Clone)]
pub struct ListingService {
    nodes: Arc<NodeRepository>,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(nodes: Arc<NodeRepository>) -> Self {
        Self { nodes }
    }

    /// List one page of nodes visible to the principal.
    ///
    /// Search and browse are mutually exclusive modes; a blank search term
    /// counts as absent. Every returned row satisfies the access
    /// evaluator's `can_view` for this principal, and the reported total is
    /// computed under the identical predicate.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        req: ListRequest,
    ) -> AppResult<PageResponse<NodeListing>> {
        let scope = match req.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => ListScope::Search(term.to_string()),
            _ => ListScope::Children(req.parent_id),
        };

        let viewer = ViewerFilter {
            is_admin: ctx.is_admin(),
            user_id: ctx.user_id,
            clearance: ctx.clearance_rank(),
        };

        self.nodes.list_page(&viewer, &scope, &req.page).await
    }
}
