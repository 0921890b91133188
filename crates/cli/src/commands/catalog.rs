//! Catalog listings: blogs, courses, events and products.

use edumall_client::AppState;
use edumall_client::api::Page;
use edumall_client::hooks;
use edumall_core::format::format_vnd;

use super::{CliError, print_json};

pub async fn blogs(
    state: &AppState,
    keyword: Option<&str>,
    page: u32,
    page_size: u32,
) -> Result<(), CliError> {
    let page = Page::new(page, page_size);
    let blogs = hooks::blog::use_blogs(state, keyword, page).await?;
    tracing::info!(total = blogs.pagination.total_items, "Fetched blogs");
    if blogs.pagination.has_next() {
        tracing::info!(next = page.next().index, "More posts available with --page");
    }
    print_json(&*blogs)
}

pub async fn courses(
    state: &AppState,
    keyword: Option<&str>,
    page: u32,
    page_size: u32,
) -> Result<(), CliError> {
    let courses = hooks::course::use_courses(state, keyword, Page::new(page, page_size)).await?;
    for course in &courses.data {
        tracing::debug!(
            id = %course.id,
            duration = %course.display_duration(),
            price = %format_vnd(course.effective_price().amount()),
            "Course"
        );
    }
    print_json(&*courses)
}

pub async fn events(state: &AppState, page: u32, page_size: u32) -> Result<(), CliError> {
    let events = hooks::event::use_events(state, Page::new(page, page_size)).await?;
    print_json(&*events)
}

pub async fn products(state: &AppState) -> Result<(), CliError> {
    let products = hooks::product::use_products(state).await?;
    let in_stock = products.data.iter().filter(|p| p.in_stock()).count();
    tracing::info!(count = products.data.len(), in_stock, "Fetched products");
    print_json(&*products)
}
