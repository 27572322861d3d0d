pub mod camera;
pub mod error;
pub mod io;
pub mod marker;
pub mod pose;
pub mod processor;
pub mod video;
