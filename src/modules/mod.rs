pub mod attendance;
pub mod class;
pub mod faculty;
pub mod responses;
pub mod student;
