pub mod area;
pub mod asset;
pub mod auth;
pub mod coordinates;
pub mod document;
pub mod employee;
pub mod land;
pub mod owner;
pub mod region;
pub mod task;

use crate::api::{ApiClient, ApiProvider};

pub use area::AreaService;
pub use asset::AssetService;
pub use auth::AuthService;
pub use coordinates::LandCoordinateService;
pub use document::TaskDocumentService;
pub use employee::EmployeeService;
pub use land::LandService;
pub use owner::OwnerService;
pub use region::RegionService;
pub use task::TaskService;

impl<T> ApiClient<T>
where
    T: ApiProvider,
{
    pub fn auth(&self) -> AuthService<'_, T> {
        AuthService { client: self }
    }

    pub fn regions(&self) -> RegionService<'_, T> {
        RegionService { client: self }
    }

    pub fn lands(&self) -> LandService<'_, T> {
        LandService { client: self }
    }

    pub fn land_coordinates(&self) -> LandCoordinateService<'_, T> {
        LandCoordinateService { client: self }
    }

    pub fn areas(&self) -> AreaService<'_, T> {
        AreaService { client: self }
    }

    pub fn owners(&self) -> OwnerService<'_, T> {
        OwnerService { client: self }
    }

    pub fn employees(&self) -> EmployeeService<'_, T> {
        EmployeeService { client: self }
    }

    pub fn tasks(&self) -> TaskService<'_, T> {
        TaskService { client: self }
    }

    pub fn task_documents(&self) -> TaskDocumentService<'_, T> {
        TaskDocumentService { client: self }
    }

    pub fn assets(&self) -> AssetService<'_, T> {
        AssetService { client: self }
    }
}
