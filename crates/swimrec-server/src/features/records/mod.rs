pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateRecordCommand, CreateRecordError, DeleteRecordCommand, DeleteRecordError,
    PatchRecordCommand, PatchRecordError, ToggleFavoriteCommand, ToggleFavoriteError,
    UpdateRecordCommand, UpdateRecordError,
};

pub use queries::{
    GetRecordError, GetRecordQuery, ListRecordsError, ListRecordsQuery, ListRecordsResponse,
    PageLinks,
};

pub use routes::{records_routes, RecordsState};
pub use types::{RecordSummary, RecordView};
