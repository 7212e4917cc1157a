//! Link management commands

mod create;
mod delete;
mod import_export;
mod list;

pub use create::create_link;
pub use delete::delete_link;
pub use import_export::{export_links, import_links};
pub use list::{format_link_line, list_links};
