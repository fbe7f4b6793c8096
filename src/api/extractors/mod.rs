//! Custom extractors for request handling.

mod form;
mod page_context;

pub use form::LenientForm;
pub use page_context::PageContext;
