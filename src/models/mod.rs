pub mod chapter;
pub mod course;

pub use chapter::Chapter;
pub use course::{Course, CourseKind};
