use super::{escape, link, optional};
use crate::core::catalog::CATEGORIES;
use crate::core::table::{Column, SortDirection, SortState, TableRow};
use crate::core::text::category_slug;
use crate::domain::model::{ExchangeQuote, MaterialRow};
use std::fmt::Write;

/// Where the category lives in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryLinks {
    /// `/exchange/{Category+Name}`
    Path,
    /// `{base}?category={category name}` lower-cased
    Query,
}

/// Request-derived state shared by every listing page.
#[derive(Debug, Clone)]
pub struct ListingContext<'a> {
    pub base_path: &'a str,
    pub category_param: Option<&'a str>,
    pub filter: &'a str,
    pub sort: &'a SortState,
}

impl ListingContext<'_> {
    fn href(&self, sort: &SortState) -> String {
        link(
            self.base_path,
            &[
                ("category", self.category_param.unwrap_or_default()),
                ("q", self.filter),
                ("sort", &sort.to_query()),
            ],
        )
    }
}

/// Category buttons. `current` is the active path segment or query value.
pub fn render_category_buttons(
    mode: CategoryLinks,
    base_path: &str,
    current: Option<&str>,
    ctx: &ListingContext<'_>,
) -> String {
    let keep = |category: &str| {
        link(
            base_path,
            &[
                ("category", category),
                ("q", ctx.filter),
                ("sort", &ctx.sort.to_query()),
            ],
        )
    };

    let mut html = String::from(r#"<div class="buttons">"#);
    let (all_href, all_active) = match mode {
        CategoryLinks::Path => (
            link(&format!("{}/all", base_path), &[("q", ctx.filter), ("sort", &ctx.sort.to_query())]),
            current.map_or(true, |c| c.eq_ignore_ascii_case("all")),
        ),
        CategoryLinks::Query => (keep(""), current.is_none()),
    };
    let _ = write!(
        html,
        r#"<a class="button{}" href="{}">All</a>"#,
        if all_active { " active" } else { "" },
        escape(&all_href)
    );

    for category in CATEGORIES {
        let (href, active) = match mode {
            CategoryLinks::Path => {
                let slug = category_slug(category);
                let href = link(
                    &format!("{}/{}", base_path, slug),
                    &[("q", ctx.filter), ("sort", &ctx.sort.to_query())],
                );
                (href, current == Some(slug.as_str()))
            }
            CategoryLinks::Query => {
                let value = category.to_lowercase();
                (keep(&value), current == Some(value.as_str()))
            }
        };
        let _ = write!(
            html,
            r#"<a class="button{}" href="{}">{}</a>"#,
            if active { " active" } else { "" },
            escape(&href),
            escape(category)
        );
    }
    html.push_str("</div>");
    html
}

/// Search box plus sortable table. `render_cell` produces the HTML of one cell.
pub fn render_table<R, F>(
    columns: &[Column],
    rows: &[&R],
    ctx: &ListingContext<'_>,
    render_cell: F,
) -> String
where
    R: TableRow,
    F: Fn(&R, &Column) -> String,
{
    let mut html = String::from(r#"<div class="table">"#);

    let _ = write!(
        html,
        r#"<form method="get" action="{action}">{category}<input type="hidden" name="sort" value="{sort}"><input type="search" name="q" value="{q}" placeholder="Search..." data-debounce="500"{autofocus}></form>"#,
        action = escape(ctx.base_path),
        category = ctx
            .category_param
            .map(|c| format!(
                r#"<input type="hidden" name="category" value="{}">"#,
                escape(c)
            ))
            .unwrap_or_default(),
        sort = escape(&ctx.sort.to_query()),
        q = escape(ctx.filter),
        autofocus = if ctx.filter.is_empty() { "" } else { " autofocus" },
    );

    html.push_str("<table><thead><tr>");
    for column in columns {
        if column.sortable {
            let arrow = match ctx.sort.direction_of(column.key) {
                Some(SortDirection::Asc) => " ↑",
                Some(SortDirection::Desc) => " ↓",
                None => " ↕",
            };
            let _ = write!(
                html,
                r#"<th><a href="{}">{}{}</a><a class="then-by" href="{}" title="Add to sort">+</a></th>"#,
                escape(&ctx.href(&ctx.sort.toggled(column.key))),
                escape(column.header),
                arrow,
                escape(&ctx.href(&ctx.sort.then_by(column.key))),
            );
        } else {
            let _ = write!(html, "<th>{}</th>", escape(column.header));
        }
    }
    html.push_str("</tr></thead><tbody>");

    if rows.is_empty() {
        let _ = write!(
            html,
            r#"<tr><td class="empty" colspan="{}">No results.</td></tr>"#,
            columns.len()
        );
    }
    for row in rows {
        html.push_str("<tr>");
        for column in columns {
            let _ = write!(html, "<td>{}</td>", render_cell(*row, column));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

pub fn render_material_cell(row: &MaterialRow, column: &Column) -> String {
    match column.key {
        "exchange" => render_exchange_cell(&row.exchange),
        "CategoryName" => escape(&row.material.category_name),
        "Name" => escape(&row.material.name),
        "Ticker" => escape(&row.material.ticker),
        "Weight" => row.material.weight.to_string(),
        "Volume" => row.material.volume.to_string(),
        _ => String::new(),
    }
}

pub fn render_exchange_cell(quotes: &[ExchangeQuote]) -> String {
    let mut html = String::new();
    for quote in quotes {
        let _ = write!(html, "<p>EX: {}</p>", escape(&quote.exchange_code));
        let _ = write!(html, "<p>Price Average: {}</p>", quote.price_average);
        let _ = write!(html, "<p>Bid: {}</p>", optional(quote.bid));
        let _ = write!(html, "<p>Bid Qty: {}</p>", optional(quote.bid_count));
        let _ = write!(html, "<p>Ask: {}</p>", optional(quote.ask));
        let _ = write!(html, "<p>Ask Qty: {}</p>", optional(quote.ask_count));
        if let Some(mm_buy) = quote.mm_buy.filter(|v| *v != 0.0) {
            let _ = write!(html, "<p>Market Maker Buy: {}</p>", mm_buy);
        }
        if let Some(mm_sell) = quote.mm_sell.filter(|v| *v != 0.0) {
            let _ = write!(html, "<p>Market Maker Sell: {}</p>", mm_sell);
        }
        let _ = write!(html, "<p>Supply: {}</p>", quote.supply);
        let _ = write!(html, "<p>Demand: {}</p>", quote.demand);
        html.push_str("<hr>");
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::EXCHANGE_COLUMNS;
    use crate::domain::model::Material;

    fn row(ticker: &str, quotes: Vec<ExchangeQuote>) -> MaterialRow {
        MaterialRow {
            material: Material {
                material_id: "m".to_string(),
                category_name: "Metals".to_string(),
                category_id: "c".to_string(),
                name: "<Iron>".to_string(),
                ticker: ticker.to_string(),
                weight: 7.8,
                volume: 1.0,
                user_name_submitted: String::new(),
                timestamp: String::new(),
            },
            exchange: quotes,
        }
    }

    fn quote(mm_buy: Option<f64>) -> ExchangeQuote {
        ExchangeQuote {
            material_ticker: "FE".to_string(),
            exchange_code: "NC1".to_string(),
            mm_buy,
            mm_sell: Some(0.0),
            price_average: 98.5,
            ask_count: None,
            ask: None,
            supply: 10,
            bid_count: Some(3),
            bid: Some(97.0),
            demand: 4,
        }
    }

    #[test]
    fn test_exchange_cell_hides_empty_market_maker_lines() {
        let html = render_exchange_cell(&[quote(Some(120.0))]);
        assert!(html.contains("<p>Market Maker Buy: 120</p>"));
        assert!(!html.contains("Market Maker Sell"));
        assert!(html.contains("<p>Ask: </p>"));
        assert!(html.contains("<p>Price Average: 98.5</p>"));

        let html = render_exchange_cell(&[quote(None)]);
        assert!(!html.contains("Market Maker"));
    }

    #[test]
    fn test_table_renders_no_results_row() {
        let sort = SortState::default();
        let ctx = ListingContext {
            base_path: "/stocks",
            category_param: None,
            filter: "zzz",
            sort: &sort,
        };
        let rows: Vec<&MaterialRow> = Vec::new();
        let html = render_table(&EXCHANGE_COLUMNS, &rows, &ctx, render_material_cell);
        assert!(html.contains(r#"colspan="4">No results.</td>"#));
        assert!(html.contains(r#"value="zzz""#));
        assert!(html.contains(r#"data-debounce="500""#));
    }

    #[test]
    fn test_table_escapes_cells_and_links_sorting() {
        let sort = SortState::parse(Some("Ticker"), &EXCHANGE_COLUMNS);
        let ctx = ListingContext {
            base_path: "/stocks",
            category_param: Some("metals"),
            filter: "",
            sort: &sort,
        };
        let data = row("FE", vec![]);
        let rows = vec![&data];
        let html = render_table(&EXCHANGE_COLUMNS, &rows, &ctx, render_material_cell);

        assert!(html.contains("&lt;Iron&gt;"));
        assert!(html.contains(r#"href="/stocks?category=metals&amp;sort=-Ticker""#));
        assert!(html.contains(r#"href="/stocks?category=metals&amp;sort=Ticker%2CName""#));
        assert!(html.contains("<th>Exchange</th>"));
    }

    #[test]
    fn test_category_buttons_mark_active() {
        let sort = SortState::default();
        let ctx = ListingContext {
            base_path: "/exchange",
            category_param: None,
            filter: "",
            sort: &sort,
        };
        let html = render_category_buttons(CategoryLinks::Path, "/exchange", Some("Ship+Parts"), &ctx);
        assert!(html.contains(r#"<a class="button active" href="/exchange/Ship+Parts">Ship Parts</a>"#));
        assert!(html.contains(r#"<a class="button" href="/exchange/all">All</a>"#));

        let html = render_category_buttons(CategoryLinks::Query, "/stocks", None, &ctx);
        assert!(html.contains(r#"<a class="button active" href="/stocks">All</a>"#));
        assert!(html.contains(r#"href="/stocks?category=ship+parts">Ship Parts</a>"#));
    }
}
