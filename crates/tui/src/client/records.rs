//! [`RecordStore`] over the REST collection of expense rows.
//!
//! Every request carries the user id filter explicitly; the backend's row
//! level policies are not relied upon for scoping.

use api_types::expense::{ExpenseInsert, ExpenseRow, ExpenseUpdate, TABLE};
use engine::{Category, Expense, ExpensePatch, Money, NewExpense, RecordStore, Session, StoreError};
use reqwest::RequestBuilder;

use super::{Client, ClientError};

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized(_) | ClientError::Forbidden => StoreError::Unauthorized,
            ClientError::NotFound => StoreError::NotFound("expense".to_string()),
            ClientError::Conflict(message)
            | ClientError::Validation(message)
            | ClientError::Server(message) => StoreError::Rejected(message),
            ClientError::Transport(err) => StoreError::Transport(err.to_string()),
        }
    }
}

/// Maps a backend row onto the engine record.
///
/// Rows whose amount is not a finite number within [`Money::MAX`] are
/// rejected rather than clamped.
pub(crate) fn expense_from_row(row: ExpenseRow) -> Result<Expense, StoreError> {
    let amount = Money::from_f64(row.amount).ok_or_else(|| {
        StoreError::Rejected(format!("amount {} of row {} is out of range", row.amount, row.id))
    })?;
    let category = Category::from_stored(&row.category);
    if category.as_str() != row.category {
        tracing::warn!(id = %row.id, category = %row.category, "unknown category, shown as other");
    }
    Ok(Expense {
        is_paid: row.is_paid.unwrap_or(!category.is_debt()),
        id: row.id,
        user_id: row.user_id,
        amount,
        category,
        payee: row.payee,
        notes: row.notes,
        date: row.date,
        created_at: row.created_at,
    })
}

pub(crate) fn insert_body(record: &NewExpense) -> ExpenseInsert {
    ExpenseInsert {
        user_id: record.user_id.clone(),
        amount: record.amount.to_f64(),
        category: record.category.as_str().to_string(),
        payee: record.payee.clone(),
        notes: record.notes.clone(),
        date: record.date,
        is_paid: record.is_paid,
    }
}

pub(crate) fn update_body(patch: &ExpensePatch) -> ExpenseUpdate {
    ExpenseUpdate {
        amount: patch.amount.map(Money::to_f64),
        category: patch.category.map(|c| c.as_str().to_string()),
        payee: patch.payee.clone(),
        notes: patch.notes.clone(),
        date: patch.date,
        is_paid: patch.is_paid,
    }
}

impl Client {
    fn rest(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
    }

    fn rows_url(&self) -> Result<reqwest::Url, StoreError> {
        Ok(self.endpoint(&format!("rest/v1/{TABLE}"))?)
    }

    async fn first_row(res: reqwest::Response) -> Result<Expense, StoreError> {
        if !res.status().is_success() {
            return Err(ClientError::from_response(res).await.into());
        }
        let rows = res
            .json::<Vec<ExpenseRow>>()
            .await
            .map_err(ClientError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound("expense".to_string()))?;
        expense_from_row(row)
    }
}

impl RecordStore for Client {
    async fn list(&self, session: &Session) -> Result<Vec<Expense>, StoreError> {
        let url = self.rows_url()?;
        let user_filter = format!("eq.{}", session.user_id);
        let res = self
            .rest(self.http.get(url), session)
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "date.desc"),
            ])
            .send()
            .await
            .map_err(ClientError::from)?;

        if !res.status().is_success() {
            return Err(ClientError::from_response(res).await.into());
        }
        let rows = res
            .json::<Vec<ExpenseRow>>()
            .await
            .map_err(ClientError::from)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                expense_from_row(row)
                    .inspect_err(|err| tracing::warn!("skipping expense row: {err}"))
                    .ok()
            })
            .collect())
    }

    async fn insert(&self, session: &Session, record: &NewExpense) -> Result<Expense, StoreError> {
        let url = self.rows_url()?;
        let res = self
            .rest(self.http.post(url), session)
            .header("Prefer", "return=representation")
            .json(&insert_body(record))
            .send()
            .await
            .map_err(ClientError::from)?;
        Self::first_row(res).await
    }

    async fn update(
        &self,
        session: &Session,
        id: &str,
        patch: &ExpensePatch,
    ) -> Result<Expense, StoreError> {
        let url = self.rows_url()?;
        let id_filter = format!("eq.{id}");
        let user_filter = format!("eq.{}", session.user_id);
        let res = self
            .rest(self.http.patch(url), session)
            .query(&[("id", id_filter.as_str()), ("user_id", user_filter.as_str())])
            .header("Prefer", "return=representation")
            .json(&update_body(patch))
            .send()
            .await
            .map_err(ClientError::from)?;
        Self::first_row(res).await
    }

    async fn delete(&self, session: &Session, id: &str) -> Result<(), StoreError> {
        let url = self.rows_url()?;
        let id_filter = format!("eq.{id}");
        let user_filter = format!("eq.{}", session.user_id);
        let res = self
            .rest(self.http.delete(url), session)
            .query(&[("id", id_filter.as_str()), ("user_id", user_filter.as_str())])
            .send()
            .await
            .map_err(ClientError::from)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(ClientError::from_response(res).await.into())
    }
}
