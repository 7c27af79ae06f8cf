use serde::Serialize;

/// A local profile owning shifts, workplaces and preferences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String, // ISO8601
}
