use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde::Serialize;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 1000;

pub trait CursorKey {
    fn cursor_key(&self) -> i32;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageParams {
    pub limit: u64,
    pub cursor: Option<i32>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, cursor: None }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub has_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i32>,
}

impl PageMeta {
    pub fn new(total: u64, params: PageParams, has_next: bool, next_cursor: Option<i32>) -> Self {
        Self {
            total,
            limit: params.limit,
            total_pages: total.div_ceil(params.limit.max(1)),
            has_previous_page: params.cursor.is_some(),
            has_next_page: has_next,
            has_next,
            next_cursor,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page { data: self.data.into_iter().map(f).collect(), meta: self.meta }
    }
}

/// Rows come back id descending, strictly below the cursor. `select` carries
/// the resource filters and is also what gets counted.
pub async fn paginate<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    id_column: E::Column,
    params: PageParams,
) -> Result<Page<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: CursorKey + FromQueryResult + Send + Sync + 'static,
{
    let limit = params.limit.clamp(1, MAX_LIMIT);

    let mut rows_query = select.clone();
    if let Some(cursor) = params.cursor {
        rows_query = rows_query.filter(id_column.lt(cursor));
    }
    let rows_query = rows_query.order_by_desc(id_column).limit(limit + 1);

    let (total, mut rows) = futures::try_join!(select.count(db), rows_query.all(db))?;

    let has_next = rows.len() as u64 > limit;
    rows.truncate(limit as usize);
    let next_cursor = if has_next { rows.last().map(CursorKey::cursor_key) } else { None };

    let meta = PageMeta::new(total, PageParams { limit, ..params }, has_next, next_cursor);
    Ok(Page { data: rows, meta })
}
