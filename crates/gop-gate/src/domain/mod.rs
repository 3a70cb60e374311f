pub mod gate;
pub mod landing;
