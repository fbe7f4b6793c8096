//! Tender lot entity (`lots` table, populated by the ingestion pipeline).

use sea_orm::entity::prelude::*;

use crate::domain::Lot;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub lot_number: String,
    pub original_name: String,
    pub simplified_name: Option<String>,
    pub tender_price: Option<f64>,
    pub quantity: Option<f64>,
    pub created_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Lot {
    fn from(model: Model) -> Self {
        Lot {
            id: model.id,
            lot_number: model.lot_number,
            original_name: model.original_name,
            simplified_name: model.simplified_name,
            tender_price: model.tender_price,
            quantity: model.quantity,
            created_at: model.created_at,
        }
    }
}
