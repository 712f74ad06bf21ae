//! DTOs for users_sea adapter.

/// DTO for registering a directory user locally.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub azure_id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub cost_centre: Option<String>,
    pub department: Option<String>,
}

impl UserCreate {
    pub fn new(azure_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            azure_id: azure_id.into(),
            email: email.into(),
            name: None,
            role: None,
            cost_centre: None,
            department: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}
