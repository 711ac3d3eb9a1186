pub mod legality;
pub mod render;
