use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCommentRepository, DbLikeRepository, DbTaskRepository, DbTipRepository, DbUserRepository,
};
use crate::infra::storage::FsPictureStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub pictures: FsPictureStore,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn task_repo(&self) -> DbTaskRepository {
        DbTaskRepository {
            db: self.db.clone(),
        }
    }

    pub fn tip_repo(&self) -> DbTipRepository {
        DbTipRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }

    pub fn like_repo(&self) -> DbLikeRepository {
        DbLikeRepository {
            db: self.db.clone(),
        }
    }
}
