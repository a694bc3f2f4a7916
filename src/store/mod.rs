//! Persistence module split across logical submodules. The library lives in a
//! single JSON array on disk that is re-read on every call and rewritten in
//! full after every mutation.

mod books;
mod error;
mod file;

pub use books::BookStore;
pub use error::{Result, StoreError};
