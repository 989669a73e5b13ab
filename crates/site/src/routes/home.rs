//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::categories::CategoryRepository;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryCardView {
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Vec<CategoryCardView>,
}

/// Display the home page with the category grid.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;

    let categories = categories
        .into_iter()
        .map(|c| CategoryCardView {
            name: c.name,
            slug: c.slug,
            image_url: c.image_url,
        })
        .collect();

    Ok(HomeTemplate { categories })
}
