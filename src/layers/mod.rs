pub mod marker;
pub mod tile;
