//! TV show catalogue endpoints.

use rt_core::constants::{endpoints, DEFAULT_PAGE_LIMIT};
use rt_core::error::RtResult;
use rt_models::{Model, ShowList};

use crate::transport::{ApiCall, Transport};

/// TV show operations.
pub struct Show<'a> {
    transport: &'a Transport,
}

impl<'a> Show<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// One page of the show catalogue.
    pub fn list_show(&self, page: u32, limit: u32) -> RtResult<ShowList> {
        self.load(None, page, limit)
    }

    /// One page of shows matching `search`.
    pub fn search_show(&self, search: &str, page: u32, limit: u32) -> RtResult<ShowList> {
        self.load(Some(search), page, limit)
    }

    /// First page with the default page size.
    pub fn first_page(&self) -> RtResult<ShowList> {
        self.list_show(1, DEFAULT_PAGE_LIMIT)
    }

    fn load(&self, search: Option<&str>, page: u32, limit: u32) -> RtResult<ShowList> {
        let mut call = ApiCall::get(endpoints::METAINFO_TV);
        if let Some(search) = search {
            call = call.query("search", search);
        }
        let call = call.query("page", page).query("limit", limit);
        Ok(ShowList::from_value(self.transport.call(call)?))
    }
}
