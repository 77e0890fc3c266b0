pub mod landing;
pub mod series;
pub mod temperature;
