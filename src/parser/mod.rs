pub mod projection;
pub mod rows;
