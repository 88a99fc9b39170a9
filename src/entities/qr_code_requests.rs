use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "qr_code_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Anonymous `/generate` calls are stored without an owner.
    pub user_id: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub data: String,

    pub data_type: String,

    /// Edge length in pixels
    pub size: i32,

    /// Hex color of the dark modules
    pub color: String,

    pub logo: Option<String>,

    pub error_correction: String,

    pub format: String,

    pub batch_request_id: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::batch_requests::Entity",
        from = "Column::BatchRequestId",
        to = "super::batch_requests::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    BatchRequest,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::batch_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
