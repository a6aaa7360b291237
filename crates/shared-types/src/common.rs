use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A party to one or more legal cases. Shared by reference across domains:
/// deleting a case never deletes a person, only the rows linking to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub contact_info: Option<String>,
}

/// An immovable property referenced by civil and property-law cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct PropertyDetail {
    pub id: Uuid,
    pub address: Option<String>,
    pub value: Option<f64>,
}

/// A minor involved in a custody matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct ChildDetail {
    pub id: Uuid,
    pub age: i32,
}

// ── Export shapes ──────────────────────────────────────────────────
// Shared entities nest inside case exports without their internal ids.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonExport {
    pub name: String,
    pub contact_info: Option<String>,
}

impl From<Person> for PersonExport {
    fn from(p: Person) -> Self {
        Self {
            name: p.name,
            contact_info: p.contact_info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDetailExport {
    pub address: Option<String>,
    pub value: Option<f64>,
}

impl From<PropertyDetail> for PropertyDetailExport {
    fn from(p: PropertyDetail) -> Self {
        Self {
            address: p.address,
            value: p.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildDetailExport {
    pub age: i32,
}

impl From<ChildDetail> for ChildDetailExport {
    fn from(c: ChildDetail) -> Self {
        Self { age: c.age }
    }
}
