pub mod colorapi;
pub mod conf;
pub mod keygroups;
pub mod palettes;
