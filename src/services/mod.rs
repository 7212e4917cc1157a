pub mod landing;
pub mod link_service;

pub use landing::render_landing_page;
pub use link_service::{
    CreateLinkRequest, IdGenerator, ImportError, ImportMode, ImportResult, LinkService,
    RandomIdGenerator, TrackOutcome,
};
