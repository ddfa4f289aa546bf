pub mod entity;
pub mod geom;
pub mod maze;
