mod services;
mod use_cases;

pub use services::Services;
pub use use_cases::UseCases;
