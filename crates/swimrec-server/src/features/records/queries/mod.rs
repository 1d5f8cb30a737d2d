pub mod get;
pub mod list;

pub use get::{GetRecordError, GetRecordQuery};
pub use list::{ListRecordsError, ListRecordsQuery, ListRecordsResponse, PageLinks};
