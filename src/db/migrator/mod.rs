use sea_orm_migration::prelude::*;

mod m20240101_initial;
mod m20240215_preference_unique_key;
mod m20240301_preference_user_fk;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_initial::Migration),
            Box::new(m20240215_preference_unique_key::Migration),
            Box::new(m20240301_preference_user_fk::Migration),
        ]
    }
}
