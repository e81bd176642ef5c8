//! Relational entity for the indexed backend's `entry` table.

use sea_orm::entity::prelude::*;

/// One stored entry: a namespace, a key, and the JSON-encoded value.
///
/// The composite primary key `(namespace, key)` is what makes single-row
/// upserts and deletes possible.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub namespace: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
