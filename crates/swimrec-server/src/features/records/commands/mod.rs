pub mod create;
pub mod delete;
pub mod patch;
pub mod toggle_favorite;
pub mod update;

pub use create::{CreateRecordCommand, CreateRecordError};
pub use delete::{DeleteRecordCommand, DeleteRecordError};
pub use patch::{PatchRecordCommand, PatchRecordError};
pub use toggle_favorite::{ToggleFavoriteCommand, ToggleFavoriteError};
pub use update::{UpdateRecordCommand, UpdateRecordError};
