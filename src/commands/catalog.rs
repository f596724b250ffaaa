//! Catalog Commands

use shopping_list_lib::domain::MIN_SEARCH_LEN;
use shopping_list_lib::AppState;

use crate::view;

pub fn search(state: &AppState, query: &str) {
    if query.chars().count() < MIN_SEARCH_LEN {
        println!("Type at least {} characters to search", MIN_SEARCH_LEN);
        return;
    }
    print!("{}", view::render_entries(&state.catalog.search(query)));
}

pub fn browse(state: &AppState, query: Option<&str>) {
    let categories = state.catalog.filter(query.unwrap_or_default());
    print!("{}", view::render_catalog(&categories));
}
