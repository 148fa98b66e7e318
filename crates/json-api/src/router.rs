//! App Router

use salvo::Router;

use crate::{auth, cart, orders, products, session};

/// Assemble the application routes.
///
/// The session middleware runs on everything so even anonymous browsing
/// accumulates a cart. Catalog reads are public; catalog mutations, the
/// cart, and orders require an authenticated principal (bearer token or
/// logged-in session).
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(session::middleware)
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler))
                .push(Router::with_path("logout").post(auth::logout::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler))
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("cart")
                .hoop(auth::middleware::handler)
                .get(cart::get::handler)
                .delete(cart::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(cart::add_item::handler)
                        .put(cart::update_item::handler)
                        .push(Router::with_path("{product}").delete(cart::remove_item::handler)),
                ),
        )
        .push(
            Router::with_path("orders")
                .hoop(auth::middleware::handler)
                .get(orders::index::handler)
                .post(orders::place::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
}
