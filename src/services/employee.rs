use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::employee::{CreateEmployee, Employee, EmployeeDetails};

pub struct EmployeeService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> EmployeeService<'_, T>
where
    T: ApiProvider,
{
    pub async fn list(&self) -> Result<Vec<Employee>, ApiError> {
        self.client.get("/employee/employees").await
    }

    pub async fn create(&self, payload: &CreateEmployee) -> Result<Employee, ApiError> {
        tracing::info!(username = %payload.user.username, "creating employee account");
        self.client.post("/employee/create", payload).await
    }

    pub async fn update(&self, id: i64, payload: &EmployeeDetails) -> Result<Employee, ApiError> {
        self.client
            .put(&format!("/employee/update/{id}"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/employee/delete/{id}")).await
    }
}
