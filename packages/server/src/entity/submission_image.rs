use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One image attached to a submission. Exactly one of
/// `image_data_url` / `image_url` is set.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission_image")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub submission_id: i32,
    #[sea_orm(
        belongs_to,
        from = "submission_id",
        to = "id",
        on_delete = "Cascade"
    )]
    pub submission: HasOne<super::submission::Entity>,

    /// Inline `data:image/...` payload.
    #[sea_orm(column_type = "Text", nullable)]
    pub image_data_url: Option<String>,

    /// Link to an externally hosted image.
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
