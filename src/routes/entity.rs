//! Entity CRUD routes: one resource per DTO under `/api/public`.

use crate::dto::{Dto, MovieDto, RatingDto, TagDto, UserDto};
use crate::handlers::entity::{create, delete as delete_handler, list, partial_update, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub const API_PREFIX: &str = "/api/public";

/// Collection and item routes for one resource. Methods not listed answer 405.
fn resource<D: Dto>(router: Router<AppState>, base: &str) -> Router<AppState> {
    let base = format!("{}/{}", API_PREFIX, base);
    router.route(&base, get(list::<D>).post(create::<D>)).route(
        &format!("{}/:id", base),
        get(read::<D>)
            .put(update::<D>)
            .patch(partial_update::<D>)
            .delete(delete_handler::<D>),
    )
}

pub fn entity_routes(state: AppState) -> Router {
    let router = Router::new();
    let router = resource::<UserDto>(router, "movie-users");
    let router = resource::<MovieDto>(router, "movies");
    let router = resource::<RatingDto>(router, "movie-ratings");
    let router = resource::<TagDto>(router, "movie-tags");
    router.with_state(state)
}
