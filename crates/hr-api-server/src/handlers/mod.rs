pub mod audit;
pub mod auth;
pub mod business_units;
pub mod departments;
pub mod employees;
pub mod health;
pub mod job_titles;
pub mod onboarding;
pub mod roles;
pub mod tenants;
pub mod users;
