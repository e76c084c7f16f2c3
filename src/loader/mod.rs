pub mod album_index;
pub mod sample_loader;
