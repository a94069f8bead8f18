pub mod arc_length_path;
pub mod disk_world;
