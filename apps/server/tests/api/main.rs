//! API integration tests.
//!
//! The whole service runs in-process over in-memory backends; requests go
//! through the real router, middleware included.

mod support;
