pub mod audit;
pub mod auth;
pub mod employees;
pub mod onboarding;
pub mod org;
pub mod roles;
pub mod tenants;
pub mod users;

pub use audit::{AuditEvent, AuditService};
pub use auth::AuthService;
pub use employees::EmployeeService;
pub use onboarding::OnboardingService;
pub use org::{BusinessUnitService, DepartmentService, JobTitleService};
pub use roles::RoleService;
pub use tenants::TenantService;
pub use users::UserService;
