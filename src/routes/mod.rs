pub mod auth;

pub mod profiles;

pub mod courses;

pub mod events;

pub mod feedback;

pub mod submit;

pub mod system;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use events::configure_events_routes;
pub use feedback::configure_feedback_routes;
pub use frontend::configure_frontend_routes;
pub use profiles::configure_profiles_routes;
pub use submit::configure_submit_routes;
pub use system::configure_system_routes;
