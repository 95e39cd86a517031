//! Group controller: convention actions over the group service.

use std::sync::Arc;

use serde_json::json;

use crate::config::schema::PaginationConfig;
use crate::dispatch::{Action, ActionContext, Controller};
use crate::groups::GroupService;
use crate::http::response::{ApiError, ApiResponse};
use crate::paging::PageRequest;

pub struct GroupController {
    service: Arc<GroupService>,
    page_defaults: PaginationConfig,
}

impl GroupController {
    pub fn new(service: Arc<GroupService>, page_defaults: PaginationConfig) -> Self {
        Self {
            service,
            page_defaults,
        }
    }
}

impl Controller for GroupController {
    fn handle(&self, action: Action, ctx: ActionContext) -> Result<ApiResponse, ApiError> {
        match action {
            Action::Create => {
                let record = self.service.create(ctx.actor, ctx.payload()?)?;
                Ok(ApiResponse::created(json!(record)))
            }
            Action::Get => {
                let record = self.service.get(ctx.record_id()?)?;
                Ok(ApiResponse::ok(json!(record)))
            }
            Action::Search => {
                let page = PageRequest::from_query(&ctx.query, &self.page_defaults);
                let name = ctx.query.get("name").map(String::as_str);
                Ok(ApiResponse::ok(json!(self.service.search(name, page))))
            }
            Action::Update => {
                let record = self
                    .service
                    .update(ctx.actor, ctx.record_id()?, ctx.payload()?)?;
                Ok(ApiResponse::ok(json!(record)))
            }
            Action::Modify => {
                let record = self
                    .service
                    .modify(ctx.actor, ctx.record_id()?, ctx.payload()?)?;
                Ok(ApiResponse::ok(json!(record)))
            }
            Action::Delete => {
                self.service.delete(ctx.record_id()?)?;
                Ok(ApiResponse::empty())
            }
        }
    }
}
