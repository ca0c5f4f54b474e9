use super::models::{
    AuditLog, AuditLogFilter, BusinessUnit, CodeNameSummary, Department, Employee,
    EmployeeWithDetails, JobTitle, JobTitleSummary, ManagerSummary, NewEmployee, NewOnboarding,
    Role, Tenant, User,
};
use super::DbPool;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;

pub struct Repository {
    pub pool: DbPool,
}

impl Repository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(self.pool.get_pool()).await?;
        Ok(())
    }

    // ============ TENANTS ============

    pub async fn create_tenant(
        &self,
        id: Uuid,
        code: &str,
        name: &str,
    ) -> Result<Tenant, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            r#"INSERT INTO tenants (id, code, name)
               VALUES ($1, $2, $3)
               RETURNING id, code, name, created_at"#,
        )
        .bind(id)
        .bind(code)
        .bind(name)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, code, name, created_at FROM tenants ORDER BY code",
        )
        .fetch_all(self.pool.get_pool())
        .await
    }

    pub async fn get_tenant(&self, id: Uuid) -> Result<Tenant, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, code, name, created_at FROM tenants WHERE id = $1",
        )
        .bind(id)
        .fetch_one(self.pool.get_pool())
        .await
    }

    // ============ BUSINESS UNITS ============

    pub async fn create_business_unit(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        code: &str,
        name: &str,
    ) -> Result<BusinessUnit, sqlx::Error> {
        sqlx::query_as::<_, BusinessUnit>(
            r#"INSERT INTO business_units (id, tenant_id, code, name)
               VALUES ($1, $2, $3, $4)
               RETURNING id, tenant_id, code, name, created_at"#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(code)
        .bind(name)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn list_business_units(
        &self,
        tenant_id: Uuid,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BusinessUnit>, sqlx::Error> {
        sqlx::query_as::<_, BusinessUnit>(
            r#"SELECT id, tenant_id, code, name, created_at
               FROM business_units
               WHERE tenant_id = $1
                 AND ($2::text = '' OR code ILIKE '%' || $2 || '%' OR name ILIKE '%' || $2 || '%')
               ORDER BY code
               LIMIT $3 OFFSET $4"#,
        )
        .bind(tenant_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.get_pool())
        .await
    }

    pub async fn count_business_units(
        &self,
        tenant_id: Uuid,
        search: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM business_units
               WHERE tenant_id = $1
                 AND ($2::text = '' OR code ILIKE '%' || $2 || '%' OR name ILIKE '%' || $2 || '%')"#,
        )
        .bind(tenant_id)
        .bind(search)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn get_business_unit(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<BusinessUnit, sqlx::Error> {
        sqlx::query_as::<_, BusinessUnit>(
            r#"SELECT id, tenant_id, code, name, created_at
               FROM business_units WHERE tenant_id = $1 AND id = $2"#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_one(self.pool.get_pool())
        .await
    }

    // ============ DEPARTMENTS ============

    pub async fn create_department(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        parent_department_id: Option<Uuid>,
        code: Option<&str>,
        name: &str,
    ) -> Result<Department, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            r#"INSERT INTO departments (id, tenant_id, parent_department_id, code, name)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, tenant_id, parent_department_id, code, name, created_at"#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(parent_department_id)
        .bind(code)
        .bind(name)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn list_departments(
        &self,
        tenant_id: Uuid,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            r#"SELECT id, tenant_id, parent_department_id, code, name, created_at
               FROM departments
               WHERE tenant_id = $1
                 AND ($2::text = '' OR code ILIKE '%' || $2 || '%' OR name ILIKE '%' || $2 || '%')
               ORDER BY name
               LIMIT $3 OFFSET $4"#,
        )
        .bind(tenant_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.get_pool())
        .await
    }

    pub async fn count_departments(
        &self,
        tenant_id: Uuid,
        search: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM departments
               WHERE tenant_id = $1
                 AND ($2::text = '' OR code ILIKE '%' || $2 || '%' OR name ILIKE '%' || $2 || '%')"#,
        )
        .bind(tenant_id)
        .bind(search)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn get_department(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Department, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            r#"SELECT id, tenant_id, parent_department_id, code, name, created_at
               FROM departments WHERE tenant_id = $1 AND id = $2"#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_one(self.pool.get_pool())
        .await
    }

    // ============ JOB TITLES ============

    pub async fn create_job_title(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        code: &str,
        name: &str,
        grade: Option<&str>,
    ) -> Result<JobTitle, sqlx::Error> {
        sqlx::query_as::<_, JobTitle>(
            r#"INSERT INTO job_titles (id, tenant_id, code, name, grade)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, tenant_id, code, name, grade, created_at"#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(code)
        .bind(name)
        .bind(grade)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn list_job_titles(
        &self,
        tenant_id: Uuid,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobTitle>, sqlx::Error> {
        sqlx::query_as::<_, JobTitle>(
            r#"SELECT id, tenant_id, code, name, grade, created_at
               FROM job_titles
               WHERE tenant_id = $1
                 AND ($2::text = '' OR code ILIKE '%' || $2 || '%' OR name ILIKE '%' || $2 || '%')
               ORDER BY code
               LIMIT $3 OFFSET $4"#,
        )
        .bind(tenant_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.get_pool())
        .await
    }

    pub async fn count_job_titles(
        &self,
        tenant_id: Uuid,
        search: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM job_titles
               WHERE tenant_id = $1
                 AND ($2::text = '' OR code ILIKE '%' || $2 || '%' OR name ILIKE '%' || $2 || '%')"#,
        )
        .bind(tenant_id)
        .bind(search)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn get_job_title(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<JobTitle, sqlx::Error> {
        sqlx::query_as::<_, JobTitle>(
            r#"SELECT id, tenant_id, code, name, grade, created_at
               FROM job_titles WHERE tenant_id = $1 AND id = $2"#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_one(self.pool.get_pool())
        .await
    }

    // ============ EMPLOYEES ============

    pub async fn create_employee(
        &self,
        tenant_id: Uuid,
        emp: &NewEmployee,
    ) -> Result<Employee, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"INSERT INTO employees (
                id, tenant_id, employee_no, first_name, last_name, display_name,
                work_email, business_unit_id, department_id, job_title_id, manager_id
               )
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING id, tenant_id, employee_no, first_name, last_name, display_name,
                         work_email, business_unit_id, department_id, job_title_id,
                         manager_id, status, is_active, created_at, updated_at"#,
        )
        .bind(emp.id)
        .bind(tenant_id)
        .bind(&emp.employee_no)
        .bind(&emp.first_name)
        .bind(&emp.last_name)
        .bind(&emp.display_name)
        .bind(&emp.work_email)
        .bind(emp.business_unit_id)
        .bind(emp.department_id)
        .bind(emp.job_title_id)
        .bind(emp.manager_id)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn get_employee(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Employee, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"SELECT id, tenant_id, employee_no, first_name, last_name, display_name,
                      work_email, business_unit_id, department_id, job_title_id,
                      manager_id, status, is_active, created_at, updated_at
               FROM employees WHERE tenant_id = $1 AND id = $2"#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn list_employees(
        &self,
        tenant_id: Uuid,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"SELECT id, tenant_id, employee_no, first_name, last_name, display_name,
                      work_email, business_unit_id, department_id, job_title_id,
                      manager_id, status, is_active, created_at, updated_at
               FROM employees
               WHERE tenant_id = $1
                 AND ($2::text = ''
                      OR employee_no ILIKE '%' || $2 || '%'
                      OR first_name ILIKE '%' || $2 || '%'
                      OR last_name ILIKE '%' || $2 || '%'
                      OR display_name ILIKE '%' || $2 || '%')
               ORDER BY employee_no
               LIMIT $3 OFFSET $4"#,
        )
        .bind(tenant_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.get_pool())
        .await
    }

    pub async fn count_employees(
        &self,
        tenant_id: Uuid,
        search: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM employees
               WHERE tenant_id = $1
                 AND ($2::text = ''
                      OR employee_no ILIKE '%' || $2 || '%'
                      OR first_name ILIKE '%' || $2 || '%'
                      OR last_name ILIKE '%' || $2 || '%'
                      OR display_name ILIKE '%' || $2 || '%')"#,
        )
        .bind(tenant_id)
        .bind(search)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn get_employee_with_details(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<EmployeeWithDetails, sqlx::Error> {
        #[derive(FromRow)]
        struct DetailRow {
            id: Uuid,
            tenant_id: Uuid,
            employee_no: String,
            first_name: String,
            last_name: String,
            display_name: Option<String>,
            work_email: Option<String>,
            status: String,
            is_active: bool,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
            business_unit_id: Option<Uuid>,
            business_unit_code: Option<String>,
            business_unit_name: Option<String>,
            department_id: Option<Uuid>,
            department_code: Option<String>,
            department_name: Option<String>,
            job_title_id: Option<Uuid>,
            job_title_code: Option<String>,
            job_title_name: Option<String>,
            job_title_grade: Option<String>,
            manager_id: Option<Uuid>,
            manager_employee_no: Option<String>,
            manager_first_name: Option<String>,
            manager_last_name: Option<String>,
            manager_display_name: Option<String>,
        }

        let row = sqlx::query_as::<_, DetailRow>(
            r#"SELECT
                e.id, e.tenant_id, e.employee_no, e.first_name, e.last_name,
                e.display_name, e.work_email, e.status, e.is_active,
                e.created_at, e.updated_at,
                e.business_unit_id, bu.code AS business_unit_code, bu.name AS business_unit_name,
                e.department_id, d.code AS department_code, d.name AS department_name,
                e.job_title_id, jt.code AS job_title_code, jt.name AS job_title_name,
                jt.grade AS job_title_grade,
                e.manager_id, m.employee_no AS manager_employee_no,
                m.first_name AS manager_first_name, m.last_name AS manager_last_name,
                m.display_name AS manager_display_name
               FROM employees e
               LEFT JOIN business_units bu ON bu.id = e.business_unit_id
               LEFT JOIN departments d ON d.id = e.department_id
               LEFT JOIN job_titles jt ON jt.id = e.job_title_id
               LEFT JOIN employees m ON m.id = e.manager_id
               WHERE e.tenant_id = $1 AND e.id = $2"#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_one(self.pool.get_pool())
        .await?;

        Ok(EmployeeWithDetails {
            id: row.id,
            tenant_id: row.tenant_id,
            employee_no: row.employee_no,
            first_name: row.first_name,
            last_name: row.last_name,
            display_name: row.display_name,
            work_email: row.work_email,
            status: row.status,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            business_unit: row.business_unit_id.map(|id| CodeNameSummary {
                id,
                code: row.business_unit_code,
                name: row.business_unit_name,
            }),
            department: row.department_id.map(|id| CodeNameSummary {
                id,
                code: row.department_code,
                name: row.department_name,
            }),
            job_title: row.job_title_id.map(|id| JobTitleSummary {
                id,
                code: row.job_title_code,
                name: row.job_title_name,
                grade: row.job_title_grade,
            }),
            manager: row.manager_id.map(|id| ManagerSummary {
                id,
                employee_no: row.manager_employee_no,
                first_name: row.manager_first_name,
                last_name: row.manager_last_name,
                display_name: row.manager_display_name,
            }),
        })
    }

    /// Employee plus all transitive reports, walking `manager_id` down.
    pub async fn get_employee_hierarchy(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"WITH RECURSIVE reports AS (
                 SELECT e.id, e.tenant_id, e.employee_no, e.first_name, e.last_name,
                        e.display_name, e.work_email, e.business_unit_id, e.department_id,
                        e.job_title_id, e.manager_id, e.status, e.is_active,
                        e.created_at, e.updated_at
                 FROM employees e
                 WHERE e.tenant_id = $1 AND e.id = $2
                 UNION ALL
                 SELECT e.id, e.tenant_id, e.employee_no, e.first_name, e.last_name,
                        e.display_name, e.work_email, e.business_unit_id, e.department_id,
                        e.job_title_id, e.manager_id, e.status, e.is_active,
                        e.created_at, e.updated_at
                 FROM employees e
                 JOIN reports r ON e.manager_id = r.id
                 WHERE e.tenant_id = $1
               )
               SELECT * FROM reports"#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_all(self.pool.get_pool())
        .await
    }

    // ============ USERS ============

    pub async fn create_user(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        employee_id: Uuid,
        email: &str,
        display_name: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, tenant_id, employee_id, email, display_name, password_hash)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, tenant_id, employee_id, email, display_name, password_hash,
                         created_at, updated_at"#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(employee_id)
        .bind(email)
        .bind(display_name)
        .bind(password_hash)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn get_user(&self, tenant_id: Uuid, id: Uuid) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, tenant_id, employee_id, email, display_name, password_hash,
                      created_at, updated_at
               FROM users WHERE tenant_id = $1 AND id = $2"#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_one(self.pool.get_pool())
        .await
    }

    /// Login lookup is by email alone: the email resolves the identity
    /// (and with it the tenant) before any tenant context exists.
    pub async fn get_user_for_login(&self, email: &str) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, tenant_id, employee_id, email, display_name, password_hash,
                      created_at, updated_at
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn list_users(
        &self,
        tenant_id: Uuid,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, tenant_id, employee_id, email, display_name, password_hash,
                      created_at, updated_at
               FROM users
               WHERE tenant_id = $1
                 AND ($2::text = '' OR email ILIKE '%' || $2 || '%' OR display_name ILIKE '%' || $2 || '%')
               ORDER BY email
               LIMIT $3 OFFSET $4"#,
        )
        .bind(tenant_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.get_pool())
        .await
    }

    pub async fn count_users(&self, tenant_id: Uuid, search: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM users
               WHERE tenant_id = $1
                 AND ($2::text = '' OR email ILIKE '%' || $2 || '%' OR display_name ILIKE '%' || $2 || '%')"#,
        )
        .bind(tenant_id)
        .bind(search)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn get_user_role_codes(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"SELECT r.code
               FROM user_roles ur
               JOIN rbac_roles r ON r.id = ur.role_id
               WHERE ur.tenant_id = $1 AND ur.user_id = $2
               ORDER BY r.code"#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(self.pool.get_pool())
        .await
    }

    // ============ ROLES ============

    pub async fn create_role(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Role, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            r#"INSERT INTO rbac_roles (id, tenant_id, code, name, description)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, tenant_id, code, name, description, created_at"#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(code)
        .bind(name)
        .bind(description)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn list_roles(&self, tenant_id: Uuid) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            r#"SELECT id, tenant_id, code, name, description, created_at
               FROM rbac_roles WHERE tenant_id = $1 ORDER BY code"#,
        )
        .bind(tenant_id)
        .fetch_all(self.pool.get_pool())
        .await
    }

    pub async fn get_role(&self, tenant_id: Uuid, id: Uuid) -> Result<Role, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            r#"SELECT id, tenant_id, code, name, description, created_at
               FROM rbac_roles WHERE tenant_id = $1 AND id = $2"#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_one(self.pool.get_pool())
        .await
    }

    pub async fn assign_user_role(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
        business_unit_id: Option<Uuid>,
        department_id: Option<Uuid>,
        granted_by_user_id: Option<Uuid>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO user_roles
                (tenant_id, user_id, role_id, business_unit_id, department_id, granted_by_user_id)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(role_id)
        .bind(business_unit_id)
        .bind(department_id)
        .bind(granted_by_user_id)
        .execute(self.pool.get_pool())
        .await?;
        Ok(())
    }

    pub async fn revoke_user_role(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "DELETE FROM user_roles WHERE tenant_id = $1 AND user_id = $2 AND role_id = $3",
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(role_id)
        .execute(self.pool.get_pool())
        .await?;
        Ok(())
    }

    // ============ ONBOARDING ============

    /// The full onboarding sequence in one transaction. The transaction
    /// guard rolls back on every early-return path; only the final commit
    /// makes any of it visible.
    pub async fn execute_onboarding(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        input: &NewOnboarding,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.get_pool().begin().await?;

        // Manager reference must resolve inside this tenant.
        if let Some(manager_id) = input.employee.manager_id {
            sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM employees WHERE tenant_id = $1 AND id = $2",
            )
            .bind(tenant_id)
            .bind(manager_id)
            .fetch_one(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"INSERT INTO employees (
                id, tenant_id, employee_no, first_name, last_name, display_name,
                work_email, business_unit_id, department_id, job_title_id, manager_id
               )
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(input.employee.id)
        .bind(tenant_id)
        .bind(&input.employee.employee_no)
        .bind(&input.employee.first_name)
        .bind(&input.employee.last_name)
        .bind(&input.employee.display_name)
        .bind(&input.employee.work_email)
        .bind(input.employee.business_unit_id)
        .bind(input.employee.department_id)
        .bind(input.employee.job_title_id)
        .bind(input.employee.manager_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"INSERT INTO users (id, tenant_id, employee_id, email, display_name, password_hash)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(input.user_id)
        .bind(tenant_id)
        .bind(input.employee.id)
        .bind(&input.email)
        .bind(&input.employee.display_name)
        .bind(&input.password_hash)
        .execute(&mut *tx)
        .await?;

        // Role ids arrive from client input; resolving the role scoped by
        // tenant stops a grant from referencing another tenant's role.
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM rbac_roles WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(input.initial_role_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"INSERT INTO user_roles
                (tenant_id, user_id, role_id, business_unit_id, department_id, granted_by_user_id)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(tenant_id)
        .bind(input.user_id)
        .bind(input.initial_role_id)
        .bind(input.employee.business_unit_id)
        .bind(input.employee.department_id)
        .bind(actor_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(
            "Onboarded employee {} / user {} in tenant {}",
            input.employee.id, input.user_id, tenant_id
        );
        Ok(())
    }

    // ============ AUDIT LOGS ============

    pub async fn insert_audit_log(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: Uuid,
        changes: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO audit_logs (id, tenant_id, actor_id, action, entity_type, entity_id, changes)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(Uuid::new_v4())
        .bind(tenant_id)
        .bind(actor_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(changes)
        .execute(self.pool.get_pool())
        .await?;
        Ok(())
    }

    pub async fn list_audit_logs(
        &self,
        tenant_id: Uuid,
        filter: &AuditLogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        sqlx::query_as::<_, AuditLog>(
            r#"SELECT id, tenant_id, actor_id, action, entity_type, entity_id, changes, created_at
               FROM audit_logs
               WHERE tenant_id = $1
                 AND ($2::text = '' OR entity_type = $2)
                 AND ($3::text = '' OR action = $3)
               ORDER BY created_at DESC
               LIMIT $4 OFFSET $5"#,
        )
        .bind(tenant_id)
        .bind(filter.entity_type.as_deref().unwrap_or(""))
        .bind(filter.action.as_deref().unwrap_or(""))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.get_pool())
        .await
    }

    pub async fn count_audit_logs(
        &self,
        tenant_id: Uuid,
        filter: &AuditLogFilter,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM audit_logs
               WHERE tenant_id = $1
                 AND ($2::text = '' OR entity_type = $2)
                 AND ($3::text = '' OR action = $3)"#,
        )
        .bind(tenant_id)
        .bind(filter.entity_type.as_deref().unwrap_or(""))
        .bind(filter.action.as_deref().unwrap_or(""))
        .fetch_one(self.pool.get_pool())
        .await
    }
}
