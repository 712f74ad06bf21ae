use std::future::Future;
use std::pin::Pin;

use actix_web::HttpRequest;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::debug;

use super::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future borrowed from the transaction it runs on.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + 'a>>;

/// Run `f` in its own transaction: commit on `Ok`, roll back on `Err`.
///
/// Callers write `with_txn(Some(&req), &state, |txn| Box::pin(async move { ... }))`.
/// The request, when given, only labels the rollback log line.
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let txn = require_db(state)?.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            debug!(
                path = req.map(HttpRequest::path).unwrap_or("-"),
                code = err.code().as_str(),
                "rolling back transaction"
            );
            // The handler's error wins over a failed rollback.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use sea_orm::{ConnectionTrait, Statement};

    use super::*;
    use crate::config::app::AppConfig;
    use crate::config::db::DbKind;
    use crate::domain::order_email::OrderEmail;
    use crate::errors::domain::DomainError;
    use crate::infra::db::connect_db;
    use crate::mailer::{MailReceipt, OrderMailer};

    struct NoMail;

    #[async_trait]
    impl OrderMailer for NoMail {
        async fn send(&self, _: &str, _: &str, _: &OrderEmail) -> Result<MailReceipt, DomainError> {
            unreachable!("no mail in this test")
        }
    }

    async fn state_with_table() -> AppState {
        let db = connect_db(DbKind::SqliteMemory).await.unwrap();
        db.execute_unprepared("CREATE TABLE marks (v INTEGER NOT NULL)")
            .await
            .unwrap();
        AppState::new(db, AppConfig::default(), Arc::new(NoMail))
    }

    async fn mark_count(state: &AppState) -> i64 {
        let db = state.db().unwrap();
        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM marks",
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get("", "n").unwrap()
    }

    #[tokio::test]
    async fn ok_commits() {
        let state = state_with_table().await;
        let out = with_txn(None, &state, |txn| {
            Box::pin(async move {
                txn.execute_unprepared("INSERT INTO marks (v) VALUES (1)").await?;
                Ok(7)
            })
        })
        .await
        .unwrap();
        assert_eq!(out, 7);
        assert_eq!(mark_count(&state).await, 1);
    }

    #[tokio::test]
    async fn err_rolls_back() {
        let state = state_with_table().await;
        let err = with_txn(None, &state, |txn| {
            Box::pin(async move {
                txn.execute_unprepared("INSERT INTO marks (v) VALUES (1)").await?;
                Err::<(), _>(AppError::from(DomainError::not_found(
                    crate::errors::domain::NotFoundKind::Request,
                    "gone",
                )))
            })
        })
        .await
        .unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::NOT_FOUND);
        assert_eq!(mark_count(&state).await, 0);
    }
}
