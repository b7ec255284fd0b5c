use sea_orm_migration::prelude::*;

mod m20260815_000001_create_users;
mod m20260815_000002_create_tasks;
mod m20260815_000003_create_tips;
mod m20260815_000004_create_comments;
mod m20260815_000005_create_likes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_users::Migration),
            Box::new(m20260815_000002_create_tasks::Migration),
            Box::new(m20260815_000003_create_tips::Migration),
            Box::new(m20260815_000004_create_comments::Migration),
            Box::new(m20260815_000005_create_likes::Migration),
        ]
    }
}
