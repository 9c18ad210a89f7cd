use crate::error::FormError;
use crate::models::area::{Area, AreaClassification, AreaStatus, CreateArea, UpdateArea};
use crate::models::asset::{Asset, CreateAsset, PlantInfo, WateringFrequency, WateringSchedule};
use crate::models::auth::LoginRequest;
use crate::models::document::{DocumentUpload, TaskDocument, UpdateTaskDocument};
use crate::models::employee::{CreateEmployee, Employee, EmployeeDetails};
use crate::models::land::{CreateLand, Land, LandOwner, LandRegion, UpdateLand};
use crate::models::owner::{Owner, OwnerPayload};
use crate::models::region::{Region, RegionPayload};
use crate::models::task::Task;
use crate::utils::coordinates::{
    compute_center, default_view_state, to_wire, Point, Polygon, ViewState, MAX_ZOOM, MIN_ZOOM,
};
use serde::Deserialize;

/// The three map inputs every drawing form submits.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MapFields {
    #[serde(default)]
    pub polygon: String,
    #[serde(default)]
    pub center: String,
    #[serde(default)]
    pub zoom: String,
}

impl MapFields {
    /// An empty drawing is replaced by the default polygon, a blank center by
    /// the polygon's mean and a blank zoom by the default zoom. Zoom is
    /// clamped into 1..=20.
    pub fn view_state(&self) -> Result<ViewState, FormError> {
        let fallback = default_view_state();

        let polygon = match self.polygon.trim() {
            "" => Polygon::default(),
            raw => serde_json::from_str::<Polygon>(raw).map_err(|e| FormError::Invalid {
                field: "polygon",
                reason: e.to_string(),
            })?,
        };
        let polygon = if polygon.is_empty() {
            fallback.polygon
        } else {
            polygon
        };

        let center = match self.center.trim() {
            "" => compute_center(&polygon.points),
            raw => parse_point(raw).ok_or_else(|| FormError::Invalid {
                field: "center",
                reason: format!("expected \"lat,lng\", got {raw:?}"),
            })?,
        };

        let zoom = match self.zoom.trim() {
            "" => fallback.zoom,
            raw => raw
                .parse::<f64>()
                .ok()
                .filter(|z| z.is_finite())
                .map(|z| z.round().clamp(f64::from(MIN_ZOOM), f64::from(MAX_ZOOM)) as u8)
                .ok_or_else(|| FormError::Invalid {
                    field: "zoom",
                    reason: format!("{raw:?} is not a number"),
                })?,
        };

        Ok(ViewState {
            polygon,
            center,
            zoom,
        })
    }
}

impl From<&ViewState> for MapFields {
    fn from(view_state: &ViewState) -> Self {
        Self {
            polygon: serde_json::to_string(&view_state.polygon).unwrap_or_else(|_| "[]".to_string()),
            center: view_state.center.to_string(),
            zoom: view_state.zoom.to_string(),
        }
    }
}

pub fn parse_point(raw: &str) -> Option<Point> {
    let (lat, lng) = raw.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lng = lng.trim().parse::<f64>().ok()?;
    (lat.is_finite() && lng.is_finite()).then_some(Point::new(lat, lng))
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(value.to_string())
    }
}

fn number(value: &str, field: &'static str) -> Result<f64, FormError> {
    let value = required(value, field)?;
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| FormError::Invalid {
            field,
            reason: format!("{value:?} is not a non-negative number"),
        })
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn optional_number(value: &str, field: &'static str) -> Result<Option<f64>, FormError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        number(value, field).map(Some)
    }
}

fn optional_id(value: &str, field: &'static str) -> Result<Option<i64>, FormError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        id(value, field).map(Some)
    }
}

/// Blank counts as zero.
fn count(value: &str, field: &'static str) -> Result<u32, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<u32>().map_err(|_| FormError::Invalid {
        field,
        reason: format!("{value:?} is not a whole number"),
    })
}

fn id(value: &str, field: &'static str) -> Result<i64, FormError> {
    let value = required(value, field)?;
    value
        .parse::<i64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| FormError::Invalid {
            field,
            reason: format!("{value:?} is not an id"),
        })
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        Ok(LoginRequest {
            username: required(&self.username, "username")?,
            password: required(&self.password, "password")?,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LandForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub region_id: String,
    #[serde(flatten)]
    pub map: MapFields,
}

impl LandForm {
    pub fn from_land(land: &Land) -> Self {
        Self {
            name: land.name.clone(),
            address: land.address.clone(),
            area: land.area.to_string(),
            price: land.price.to_string(),
            location: land.location.clone(),
            owner_id: land.owner.id.to_string(),
            region_id: land.region.id.to_string(),
            map: MapFields::from(&land.view_state()),
        }
    }

    /// Attribute changes, plus the boundary which is saved on its own.
    pub fn validate_update(&self) -> Result<(UpdateLand, ViewState), FormError> {
        let land = self.validate()?;
        let view_state = self.map.view_state()?;
        let update = UpdateLand {
            name: Some(land.name),
            address: Some(land.address),
            area: Some(land.area),
            price: Some(land.price),
            location: Some(land.location),
            owner: Some(land.owner),
            region: Some(land.region),
            ..UpdateLand::default()
        };
        Ok((update, view_state))
    }

    pub fn validate(&self) -> Result<CreateLand, FormError> {
        let view_state = self.map.view_state()?;
        Ok(CreateLand {
            name: required(&self.name, "name")?,
            address: required(&self.address, "address")?,
            area: number(&self.area, "area")?,
            price: number(&self.price, "price")?,
            location: self.location.trim().to_string(),
            area_count: 0,
            properties: CreateLand::default_properties(),
            coordinate: to_wire(&view_state),
            planning_map_url: String::new(),
            google_map_url: String::new(),
            owner: LandOwner {
                id: id(&self.owner_id, "owner")?,
                ..LandOwner::default()
            },
            region: LandRegion {
                id: id(&self.region_id, "region")?,
                ..LandRegion::default()
            },
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AreaForm {
    #[serde(default)]
    pub land_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub area_name: String,
    #[serde(default)]
    pub land_plot: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub classification: String,
    #[serde(flatten)]
    pub map: MapFields,
}

impl AreaForm {
    pub fn from_area(area: &Area, land_id: i64) -> Self {
        Self {
            land_id: land_id.to_string(),
            name: area.name.clone(),
            area_name: area.area_name.clone(),
            land_plot: area.land_plot.clone(),
            status: area.status.clone(),
            area: area.area.to_string(),
            usage: area.usage.clone(),
            classification: area.classification.as_str().to_string(),
            map: MapFields::from(&area.view_state()),
        }
    }

    pub fn validate_update(&self) -> Result<UpdateArea, FormError> {
        let area = self.validate()?;
        Ok(UpdateArea {
            name: Some(area.name),
            area_name: Some(area.area_name),
            land_plot: Some(area.land_plot),
            status: Some(area.status),
            area: Some(area.area),
            usage: Some(area.usage),
            coordinates: Some(area.coordinates),
            classification: Some(area.classification),
        })
    }

    pub fn validate(&self) -> Result<CreateArea, FormError> {
        let view_state = self.map.view_state()?;
        let status = required(&self.status, "status")?;
        let status = AreaStatus::parse(&status).ok_or_else(|| FormError::Invalid {
            field: "status",
            reason: format!("unknown status {status:?}"),
        })?;
        let classification = match self.classification.trim() {
            "" | "plant" => AreaClassification::Plant,
            _ => AreaClassification::Other,
        };

        Ok(CreateArea {
            name: required(&self.name, "name")?,
            area_name: self.area_name.trim().to_string(),
            land_plot: self.land_plot.trim().to_string(),
            status,
            area: number(&self.area, "area")?,
            usage: self.usage.trim().to_string(),
            land_id: id(&self.land_id, "land")?,
            coordinates: to_wire(&view_state),
            classification,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RegionForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl RegionForm {
    pub fn from_region(region: &Region) -> Self {
        Self {
            name: region.name.clone(),
            description: region.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<RegionPayload, FormError> {
        Ok(RegionPayload {
            name: required(&self.name, "name")?,
            description: required(&self.description, "description")?,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OwnerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub identity_number: String,
    #[serde(default)]
    pub description: String,
}

impl OwnerForm {
    pub fn from_owner(owner: &Owner) -> Self {
        Self {
            name: owner.name.clone(),
            phone: owner.phone.clone(),
            address: owner.address.clone(),
            email: owner.email.clone().unwrap_or_default(),
            identity_number: owner.identity_number.clone().unwrap_or_default(),
            description: owner.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<OwnerPayload, FormError> {
        let email = required(&self.email, "email")?;
        if !email.contains('@') {
            return Err(FormError::Invalid {
                field: "email",
                reason: format!("{email:?} is not an address"),
            });
        }
        Ok(OwnerPayload {
            name: required(&self.name, "name")?,
            phone: required(&self.phone, "phone")?,
            address: required(&self.address, "address")?,
            email: Some(email),
            identity_number: optional(&self.identity_number),
            description: optional(&self.description),
        })
    }
}

/// Account roles offered when an employee is created.
pub const EMPLOYEE_ROLES: [(i64, &str); 3] = [(1, "Admin"), (2, "Manager"), (3, "Employee")];

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub area_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role_id: String,
}

impl EmployeeForm {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            position: employee.position.clone().unwrap_or_default(),
            phone: employee.phone.clone().unwrap_or_default(),
            email: employee.email.clone().unwrap_or_default(),
            area_id: employee.area_id.map(|id| id.to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn details(&self) -> Result<EmployeeDetails, FormError> {
        Ok(EmployeeDetails {
            name: required(&self.name, "name")?,
            position: Some(required(&self.position, "position")?),
            phone: optional(&self.phone),
            email: optional(&self.email),
            area_id: optional_id(&self.area_id, "area")?,
        })
    }

    /// A new employee also needs login details; the username may be left
    /// blank when an email is given.
    pub fn validate_new(&self) -> Result<CreateEmployee, FormError> {
        let details = self.details()?;
        let username = optional(&self.username);
        if username.is_none() && details.email.is_none() {
            return Err(FormError::Missing("username"));
        }
        let password = required(&self.password, "password")?;
        let role_id = id(&self.role_id, "role")?;
        if !EMPLOYEE_ROLES.iter().any(|(id, _)| *id == role_id) {
            return Err(FormError::Invalid {
                field: "role",
                reason: format!("unknown role {role_id}"),
            });
        }
        Ok(CreateEmployee::new(details, username, password, role_id))
    }
}

pub const TASK_STATUSES: [(&str, &str); 3] = [
    ("TODO", "To do"),
    ("IN_PROGRESS", "In progress"),
    ("COMPLETED", "Completed"),
];

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignee_id: String,
    #[serde(default)]
    pub approver_id: String,
    #[serde(default)]
    pub area_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_recurring: Option<String>,
    #[serde(default)]
    pub recurrence_pattern: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub actual_cost: String,
    #[serde(default)]
    pub end_date: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        let id = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();
        let amount = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            assignee_id: id(task.assignee_id),
            approver_id: id(task.approver_id),
            area_id: id(task.area_id),
            status: task.status.clone().unwrap_or_default(),
            is_recurring: task.is_recurring.then(|| "on".to_string()),
            recurrence_pattern: task.recurrence_pattern.clone().unwrap_or_default(),
            cost: amount(task.cost),
            actual_cost: amount(task.actual_cost),
            end_date: task.end_date.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<Task, FormError> {
        let title = required(&self.title, "title")?;
        let status = required(&self.status, "status")?;
        if !TASK_STATUSES.iter().any(|(value, _)| *value == status) {
            return Err(FormError::Invalid {
                field: "status",
                reason: format!("unknown status {status:?}"),
            });
        }
        let is_recurring = self.is_recurring.is_some();

        Ok(Task {
            title,
            description: optional(&self.description),
            assignee_id: optional_id(&self.assignee_id, "assignee")?,
            approver_id: optional_id(&self.approver_id, "approver")?,
            is_recurring,
            recurrence_pattern: is_recurring
                .then(|| optional(&self.recurrence_pattern))
                .flatten(),
            cost: optional_number(&self.cost, "cost")?,
            actual_cost: optional_number(&self.actual_cost, "actual cost")?,
            area_id: optional_id(&self.area_id, "area")?,
            status: Some(status),
            end_date: optional(&self.end_date),
            ..Task::default()
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AssignEmployeeForm {
    #[serde(default)]
    pub employee_id: String,
}

impl AssignEmployeeForm {
    pub fn validate(&self) -> Result<i64, FormError> {
        id(&self.employee_id, "employee")
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AssetForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub r#type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub area_id: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub watering_frequency: String,
    #[serde(default)]
    pub watering_amount: String,
    #[serde(default)]
    pub watering_description: String,
}

fn watering_frequency(value: &str) -> Result<WateringFrequency, FormError> {
    match value.trim() {
        "daily" => Ok(WateringFrequency::Daily),
        "" | "weekly" => Ok(WateringFrequency::Weekly),
        "monthly" => Ok(WateringFrequency::Monthly),
        other => Err(FormError::Invalid {
            field: "watering frequency",
            reason: format!("unknown frequency {other:?}"),
        }),
    }
}

impl AssetForm {
    pub fn from_asset(asset: &Asset) -> Self {
        let schedule = asset.plant_info.as_ref().map(|info| &info.watering_schedule);
        Self {
            name: asset.name.clone(),
            description: asset.description.clone().unwrap_or_default(),
            r#type: asset.r#type.clone(),
            status: asset.status.clone(),
            location: asset.location.clone().unwrap_or_default(),
            purchase_date: asset.purchase_date.clone().unwrap_or_default(),
            value: asset.value.map(|v| v.to_string()).unwrap_or_default(),
            category: asset.category.clone(),
            quantity: asset.quantity.to_string(),
            area_id: asset.area.as_ref().map(|a| a.id.to_string()).unwrap_or_default(),
            age: asset
                .plant_info
                .as_ref()
                .map(|info| info.age.to_string())
                .unwrap_or_default(),
            watering_frequency: schedule
                .map(|s| match s.frequency {
                    WateringFrequency::Daily => "daily",
                    WateringFrequency::Weekly => "weekly",
                    WateringFrequency::Monthly => "monthly",
                })
                .unwrap_or_default()
                .to_string(),
            watering_amount: schedule.map(|s| s.amount.to_string()).unwrap_or_default(),
            watering_description: schedule.map(|s| s.description.clone()).unwrap_or_default(),
        }
    }

    /// Plants carry a watering schedule once an age is given. Blank type,
    /// status, category and quantity are filled in by the asset service.
    pub fn validate(&self) -> Result<CreateAsset, FormError> {
        let r#type = self.r#type.trim().to_string();
        let plant_info = if r#type == "plant" && !self.age.trim().is_empty() {
            Some(PlantInfo {
                age: count(&self.age, "age")?,
                watering_schedule: WateringSchedule {
                    frequency: watering_frequency(&self.watering_frequency)?,
                    amount: optional_number(&self.watering_amount, "watering amount")?
                        .unwrap_or_default(),
                    description: self.watering_description.trim().to_string(),
                },
            })
        } else {
            None
        };

        Ok(CreateAsset {
            name: required(&self.name, "name")?,
            description: optional(&self.description),
            r#type,
            status: self.status.trim().to_string(),
            location: optional(&self.location),
            purchase_date: optional(&self.purchase_date),
            value: optional_number(&self.value, "value")?.unwrap_or_default(),
            category: self.category.trim().to_string(),
            quantity: count(&self.quantity, "quantity")?,
            properties: vec![],
            land_id: None,
            area_id: optional_id(&self.area_id, "area")?,
            plant_info,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocumentForm {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub description: String,
}

impl DocumentForm {
    pub fn from_document(document: &TaskDocument) -> Self {
        Self {
            file_name: document.file_name.clone(),
            description: document.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<UpdateTaskDocument, FormError> {
        Ok(UpdateTaskDocument {
            file_name: Some(required(&self.file_name, "file name")?),
            description: optional(&self.description),
            task_id: None,
        })
    }
}

/// The parts of a document upload form, gathered from multipart fields.
#[derive(Clone, Debug, Default)]
pub struct UploadFields {
    pub file_name: String,
    pub data: Vec<u8>,
    pub task_id: String,
    pub description: String,
}

impl UploadFields {
    pub fn validate(self) -> Result<DocumentUpload, FormError> {
        let file_name = required(&self.file_name, "file")?;
        if self.data.is_empty() {
            return Err(FormError::Invalid {
                field: "file",
                reason: "the file is empty".to_string(),
            });
        }
        Ok(DocumentUpload {
            file_name,
            data: self.data,
            task_id: Some(id(&self.task_id, "task")?),
            description: optional(&self.description),
        })
    }
}
