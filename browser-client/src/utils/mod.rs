pub mod render;
pub mod sort;
