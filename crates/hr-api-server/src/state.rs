use crate::auth::JwtManager;
use crate::config::Settings;
use crate::database::{DbPool, Repository};
use crate::services::{
    AuditService, AuthService, BusinessUnitService, DepartmentService, EmployeeService,
    JobTitleService, OnboardingService, RoleService, TenantService, UserService,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub settings: Arc<Settings>,
    pub jwt: Arc<JwtManager>,
    pub audit_service: Arc<AuditService>,
    pub auth_service: Arc<AuthService>,
    pub tenant_service: Arc<TenantService>,
    pub business_unit_service: Arc<BusinessUnitService>,
    pub department_service: Arc<DepartmentService>,
    pub job_title_service: Arc<JobTitleService>,
    pub employee_service: Arc<EmployeeService>,
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
    pub onboarding_service: Arc<OnboardingService>,
}

impl AppState {
    pub fn new(db_pool: DbPool, settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let repository = Arc::new(Repository::new(db_pool.clone()));
        let jwt = Arc::new(JwtManager::new(
            &settings.auth.jwt_secret,
            settings.auth.token_ttl_hours,
        ));

        let audit_service = Arc::new(AuditService::new(
            repository.clone(),
            settings.audit.queue_capacity,
        ));

        Self {
            db_pool,
            settings,
            jwt: jwt.clone(),
            auth_service: Arc::new(AuthService::new(repository.clone(), jwt)),
            tenant_service: Arc::new(TenantService::new(repository.clone())),
            business_unit_service: Arc::new(BusinessUnitService::new(
                repository.clone(),
                audit_service.clone(),
            )),
            department_service: Arc::new(DepartmentService::new(
                repository.clone(),
                audit_service.clone(),
            )),
            job_title_service: Arc::new(JobTitleService::new(
                repository.clone(),
                audit_service.clone(),
            )),
            employee_service: Arc::new(EmployeeService::new(
                repository.clone(),
                audit_service.clone(),
            )),
            user_service: Arc::new(UserService::new(repository.clone(), audit_service.clone())),
            role_service: Arc::new(RoleService::new(repository.clone(), audit_service.clone())),
            onboarding_service: Arc::new(OnboardingService::new(
                repository,
                audit_service.clone(),
            )),
            audit_service,
        }
    }
}
