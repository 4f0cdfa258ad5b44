use crate::core::catalog::{CategoryFilter, EXCHANGE_COLUMNS, MATERIAL_COLUMNS};
use crate::core::table::{self, SortState};
use crate::core::text::category_slug;
use crate::web::error::PageError;
use crate::web::views;
use crate::web::views::materials::{self as listing, CategoryLinks, ListingContext};
use crate::web::AppState;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect},
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShippingQuery {
    pub username: Option<String>,
}

pub async fn home() -> Html<String> {
    Html(views::home::render())
}

pub async fn health() -> &'static str {
    "OK"
}

/// Material catalogue, no exchange data.
pub async fn materials(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> Result<Html<String>, PageError> {
    let category = query.category.as_deref().map(str::to_lowercase);
    let filter = CategoryFilter::from_query(category.as_deref());
    let rows = state.catalog.load_materials(&filter).await?;

    let sort = SortState::parse(query.sort.as_deref(), &MATERIAL_COLUMNS);
    let needle = query.q.as_deref().unwrap_or_default();
    let visible = table::apply(&rows, &MATERIAL_COLUMNS, needle, &sort);

    let ctx = ListingContext {
        base_path: "/materials",
        category_param: category.as_deref().filter(|c| !c.trim().is_empty()),
        filter: needle,
        sort: &sort,
    };
    let mut body = String::from("<h1>Materials</h1>");
    body.push_str(&listing::render_category_buttons(
        CategoryLinks::Query,
        "/materials",
        ctx.category_param,
        &ctx,
    ));
    body.push_str(&listing::render_table(
        &MATERIAL_COLUMNS,
        &visible,
        &ctx,
        listing::render_material_cell,
    ));

    Ok(Html(views::page("Prun Tools", &body)))
}

/// Materials joined with the exchange board; category comes from the query string.
pub async fn stocks(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> Result<Html<String>, PageError> {
    let category = query.category.as_deref().map(str::to_lowercase);
    let filter = CategoryFilter::from_query(category.as_deref());
    let rows = state.catalog.load_materials_with_exchange(&filter).await?;

    let sort = SortState::parse(query.sort.as_deref(), &EXCHANGE_COLUMNS);
    let needle = query.q.as_deref().unwrap_or_default();
    let visible = table::apply(&rows, &EXCHANGE_COLUMNS, needle, &sort);

    let ctx = ListingContext {
        base_path: "/stocks",
        category_param: category.as_deref().filter(|c| !c.trim().is_empty()),
        filter: needle,
        sort: &sort,
    };
    let mut body = String::from("<h1>Stock Exchange</h1>");
    body.push_str(&listing::render_category_buttons(
        CategoryLinks::Query,
        "/stocks",
        ctx.category_param,
        &ctx,
    ));
    body.push_str(&listing::render_table(
        &EXCHANGE_COLUMNS,
        &visible,
        &ctx,
        listing::render_material_cell,
    ));

    Ok(Html(views::page("Stock Exchange", &body)))
}

/// `/exchange` and `/exchange/` both land on the all-categories view.
pub async fn exchange_redirect() -> Redirect {
    Redirect::to("/exchange/all")
}

/// Same table as `/stocks`, with the category in the path (`Ship+Parts`).
pub async fn exchange_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<TableQuery>,
) -> Result<Html<String>, PageError> {
    let filter = CategoryFilter::from_path_segment(&category);
    let rows = state.catalog.load_materials_with_exchange(&filter).await?;

    let sort = SortState::parse(query.sort.as_deref(), &EXCHANGE_COLUMNS);
    let needle = query.q.as_deref().unwrap_or_default();
    let visible = table::apply(&rows, &EXCHANGE_COLUMNS, needle, &sort);

    let base_path = format!("/exchange/{}", category_slug(&category));
    let ctx = ListingContext {
        base_path: &base_path,
        category_param: None,
        filter: needle,
        sort: &sort,
    };
    let mut body = String::from("<h1>Stock Exchange</h1>");
    body.push_str(&listing::render_category_buttons(
        CategoryLinks::Path,
        "/exchange",
        Some(category.as_str()),
        &ctx,
    ));
    body.push_str(&listing::render_table(
        &EXCHANGE_COLUMNS,
        &visible,
        &ctx,
        listing::render_material_cell,
    ));

    Ok(Html(views::page("Stock Exchange", &body)))
}

/// Fleet of `username`, fetched with the viewer's key when one is saved.
pub async fn shipping(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ShippingQuery>,
) -> Result<impl IntoResponse, PageError> {
    let username = query
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_lowercase);

    let Some(username) = username else {
        return Ok(Html(views::shipping::render(None, None, Utc::now())));
    };

    let viewer = headers
        .get(&*state.identity_header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let fleet = state
        .shipping
        .load_fleet(&username, viewer)
        .await
        .map_err(|err| PageError::for_user(err, &username))?;

    Ok(Html(views::shipping::render(
        Some(&username),
        Some(&fleet),
        Utc::now(),
    )))
}
