use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// User row, keyed by the identity provider's user id.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: String,
    pub clerk_id: String,
    pub email: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub id: String,
    pub clerk_id: String,
    pub email: String,
}
