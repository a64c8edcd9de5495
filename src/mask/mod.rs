pub mod download;
pub mod land_mask;
pub mod source;
