use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::models::User;

/// A company a user follows. Rows are only ever inserted.
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(table_name = crate::schema::stocks)]
#[diesel(belongs_to(User))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Stock {
    pub id: i32,
    pub company_name: String,
    pub ticker: String,
    pub logo_url: String,
    pub user_id: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::stocks)]
pub struct NewStock {
    pub company_name: String,
    pub ticker: String,
    pub logo_url: String,
    pub user_id: String,
}
