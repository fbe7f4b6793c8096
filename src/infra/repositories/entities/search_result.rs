//! Matched marketplace offer entity (`search_results` table).
//!
//! `lot_number` is a weak reference to `lots.lot_number`; no foreign key.

use sea_orm::entity::prelude::*;

use crate::domain::Product;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "search_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub lot_number: String,
    pub marketplace: String,
    pub product_name: Option<String>,
    /// Raw scraped price, may carry currency glyphs and separators
    pub product_price: Option<String>,
    pub product_url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            lot_number: model.lot_number,
            marketplace: model.marketplace,
            product_name: model.product_name,
            product_price: model.product_price,
            product_url: model.product_url,
            image_url: model.image_url,
        }
    }
}
