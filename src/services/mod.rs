pub mod auth;
pub mod courses;
pub mod events;
pub mod feedback;
pub mod profiles;
pub mod sentiment;
pub mod system;

pub use auth::AuthService;
pub use courses::CourseService;
pub use events::EventService;
pub use feedback::FeedbackService;
pub use profiles::ProfileService;
pub use system::SystemService;
