pub mod hearts;
pub mod image_slide;
pub mod media_grid;
pub mod text_slide;
pub mod video_slide;
