use shared_types::{AppError, ChildDetail, Person, PropertyDetail};
use sqlx::{Pool, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

// Shared entities are persisted independently of any case. Insert functions
// take a connection so they compose into a case's transaction; lookups read
// from the pool.

/// Insert a person and return the stored record.
pub async fn insert_person(
    conn: &mut SqliteConnection,
    name: &str,
    contact_info: Option<&str>,
) -> Result<Person, AppError> {
    let person = Person {
        id: Uuid::new_v4(),
        name: name.to_string(),
        contact_info: contact_info.map(str::to_string),
    };
    sqlx::query("INSERT INTO persons (id, name, contact_info) VALUES ($1, $2, $3)")
        .bind(person.id)
        .bind(&person.name)
        .bind(&person.contact_info)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(person)
}

/// Find a person by id.
pub async fn find_person(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<Person>, AppError> {
    sqlx::query_as::<_, Person>("SELECT id, name, contact_info FROM persons WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Insert a property record and return it.
pub async fn insert_property_detail(
    conn: &mut SqliteConnection,
    address: Option<&str>,
    value: Option<f64>,
) -> Result<PropertyDetail, AppError> {
    let property = PropertyDetail {
        id: Uuid::new_v4(),
        address: address.map(str::to_string),
        value,
    };
    sqlx::query("INSERT INTO property_details (id, address, value) VALUES ($1, $2, $3)")
        .bind(property.id)
        .bind(&property.address)
        .bind(property.value)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(property)
}

/// Find a property record by id.
pub async fn find_property_detail(
    pool: &Pool<Sqlite>,
    id: Uuid,
) -> Result<Option<PropertyDetail>, AppError> {
    sqlx::query_as::<_, PropertyDetail>(
        "SELECT id, address, value FROM property_details WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Insert a child record and return it.
pub async fn insert_child_detail(
    conn: &mut SqliteConnection,
    age: i32,
) -> Result<ChildDetail, AppError> {
    let child = ChildDetail {
        id: Uuid::new_v4(),
        age,
    };
    sqlx::query("INSERT INTO child_details (id, age) VALUES ($1, $2)")
        .bind(child.id)
        .bind(child.age)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(child)
}
