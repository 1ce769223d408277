use sqlx::{PgPool, Postgres};
use veritas_core::models::MediaItem;
use veritas_core::AppError;

/// Category value meaning "no category restriction"; never used as a predicate.
pub const CATEGORY_ALL: &str = "ALL";

const COLUMNS: &str = "id, title, category, file_path, uploaded_at";

/// Build the list query for the given optional filters.
///
/// Predicates are conjunctive. Returns the SQL text plus the bind values in
/// positional order. The `ALL` category sentinel produces no predicate.
fn build_list_query(q: Option<&str>, category: Option<&str>) -> (String, Vec<String>) {
    let mut sql = format!("SELECT {} FROM media_items", COLUMNS);
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(category) = category {
        if category != CATEGORY_ALL {
            params.push(category.to_string());
            conditions.push(format!("category = ${}", params.len()));
        }
    }

    if let Some(q) = q {
        params.push(format!("%{}%", q));
        conditions.push(format!("title ILIKE ${}", params.len()));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    (sql, params)
}

/// Build the partial update for the supplied fields, or None when neither
/// field is present. The item id binds after the assignment values.
fn build_update_query(
    title: Option<&str>,
    category: Option<&str>,
) -> Option<(String, Vec<String>)> {
    let mut assignments: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(title) = title {
        params.push(title.to_string());
        assignments.push(format!("title = ${}", params.len()));
    }

    if let Some(category) = category {
        params.push(category.to_string());
        assignments.push(format!("category = ${}", params.len()));
    }

    if assignments.is_empty() {
        return None;
    }

    let sql = format!(
        "UPDATE media_items SET {} WHERE id = ${} RETURNING {}",
        assignments.join(", "),
        params.len() + 1,
        COLUMNS
    );

    Some((sql, params))
}

/// Repository for media item rows.
#[derive(Clone)]
pub struct MediaItemRepository {
    pool: PgPool,
}

impl MediaItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new row; the store assigns `id` and `uploaded_at`.
    #[tracing::instrument(skip(self), fields(db.table = "media_items", db.operation = "insert"))]
    pub async fn insert(
        &self,
        title: &str,
        category: &str,
        file_path: &str,
    ) -> Result<MediaItem, AppError> {
        let item = sqlx::query_as::<Postgres, MediaItem>(
            r#"
            INSERT INTO media_items (title, category, file_path)
            VALUES ($1, $2, $3)
            RETURNING id, title, category, file_path, uploaded_at
            "#,
        )
        .bind(title)
        .bind(category)
        .bind(file_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media_items", db.operation = "select"))]
    pub async fn get_by_id(&self, id: i32) -> Result<Option<MediaItem>, AppError> {
        let item = sqlx::query_as::<Postgres, MediaItem>(&format!(
            "SELECT {} FROM media_items WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// List rows matching the optional free-text query and category filter.
    /// Rows come back in the store's natural order.
    #[tracing::instrument(skip(self), fields(db.table = "media_items", db.operation = "select"))]
    pub async fn list(
        &self,
        q: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<MediaItem>, AppError> {
        let (sql, params) = build_list_query(q, category);

        let mut query = sqlx::query_as::<Postgres, MediaItem>(&sql);
        for param in &params {
            query = query.bind(param);
        }

        let items = query.fetch_all(&self.pool).await?;
        Ok(items)
    }

    /// Apply a partial update touching only the supplied fields. With neither
    /// field supplied this degenerates to a plain fetch.
    /// Returns None when the row does not exist.
    #[tracing::instrument(skip(self), fields(db.table = "media_items", db.operation = "update"))]
    pub async fn update_fields(
        &self,
        id: i32,
        title: Option<&str>,
        category: Option<&str>,
    ) -> Result<Option<MediaItem>, AppError> {
        let Some((sql, params)) = build_update_query(title, category) else {
            return self.get_by_id(id).await;
        };

        let mut query = sqlx::query_as::<Postgres, MediaItem>(&sql);
        for param in &params {
            query = query.bind(param);
        }
        let item = query.bind(id).fetch_optional(&self.pool).await?;

        Ok(item)
    }

    /// Delete a row. Returns false when no row matched.
    #[tracing::instrument(skip(self), fields(db.table = "media_items", db.operation = "delete"))]
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_no_filters() {
        let (sql, params) = build_list_query(None, None);
        assert_eq!(
            sql,
            "SELECT id, title, category, file_path, uploaded_at FROM media_items"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn test_list_query_category_only() {
        let (sql, params) = build_list_query(None, Some("legal"));
        assert!(sql.ends_with("WHERE category = $1"));
        assert_eq!(params, vec!["legal".to_string()]);
    }

    #[test]
    fn test_list_query_all_sentinel_matches_no_filter() {
        let unfiltered = build_list_query(None, None);
        let sentinel = build_list_query(None, Some(CATEGORY_ALL));
        assert_eq!(unfiltered, sentinel);
    }

    #[test]
    fn test_list_query_text_only() {
        let (sql, params) = build_list_query(Some("report"), None);
        assert!(sql.ends_with("WHERE title ILIKE $1"));
        assert_eq!(params, vec!["%report%".to_string()]);
    }

    #[test]
    fn test_list_query_both_filters_are_conjunctive() {
        let (sql, params) = build_list_query(Some("report"), Some("legal"));
        assert!(sql.ends_with("WHERE category = $1 AND title ILIKE $2"));
        assert_eq!(params, vec!["legal".to_string(), "%report%".to_string()]);
    }

    #[test]
    fn test_list_query_all_sentinel_with_text() {
        let (sql, params) = build_list_query(Some("report"), Some(CATEGORY_ALL));
        assert!(sql.ends_with("WHERE title ILIKE $1"));
        assert_eq!(params, vec!["%report%".to_string()]);
    }

    #[test]
    fn test_list_query_never_inlines_values() {
        // A hostile query string must end up in the params, not the SQL text.
        let (sql, params) = build_list_query(Some("'; DROP TABLE media_items;--"), None);
        assert!(!sql.contains("DROP TABLE"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_update_query_title_only() {
        let (sql, params) = build_update_query(Some("New title"), None).unwrap();
        assert_eq!(
            sql,
            "UPDATE media_items SET title = $1 WHERE id = $2 \
             RETURNING id, title, category, file_path, uploaded_at"
        );
        assert_eq!(params, vec!["New title".to_string()]);
    }

    #[test]
    fn test_update_query_category_only() {
        let (sql, params) = build_update_query(None, Some("finance")).unwrap();
        assert!(sql.starts_with("UPDATE media_items SET category = $1 WHERE id = $2"));
        assert_eq!(params, vec!["finance".to_string()]);
    }

    #[test]
    fn test_update_query_both_fields() {
        let (sql, params) = build_update_query(Some("t"), Some("c")).unwrap();
        assert!(sql.starts_with("UPDATE media_items SET title = $1, category = $2 WHERE id = $3"));
        assert_eq!(params, vec!["t".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_update_query_no_fields() {
        assert!(build_update_query(None, None).is_none());
    }
}
