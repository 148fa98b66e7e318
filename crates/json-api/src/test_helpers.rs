//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        orders::MockOrdersService,
        products::{MockProductsService, models::Product},
    },
    sessions::MemorySessionStore,
};

use crate::{extensions::*, state::State};

/// Session UUID every handler test runs under.
pub(crate) const TEST_SESSION_UUID: Uuid = Uuid::nil();

/// Middleware standing in for the session and auth middleware in handler
/// tests: deposits a fixed session UUID and principal.
#[salvo::handler]
pub(crate) async fn inject_identity(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session_uuid(TEST_SESSION_UUID);
    depot.insert_principal(Principal {
        user_uuid: Uuid::nil(),
        username: "tester".to_string(),
    });

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_product(uuid: Uuid, price: u64) -> Product {
    Product {
        uuid,
        name: "Mug".to_string(),
        description: "A mug".to_string(),
        category: "kitchen".to_string(),
        price,
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Assemble a state from mock services. Unexpected calls on any mock
/// panic, which keeps each handler test pinned to the service it covers.
pub(crate) fn make_state(
    products: MockProductsService,
    carts: MockCartsService,
    orders: MockOrdersService,
    auth: MockAuthService,
) -> Arc<State> {
    Arc::new(State::new(AppContext::from_parts(
        Arc::new(products),
        Arc::new(carts),
        Arc::new(orders),
        Arc::new(auth),
        Arc::new(MemorySessionStore::new()),
    )))
}

fn service_with_identity(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_identity)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service_with_identity(
        make_state(
            products,
            MockCartsService::new(),
            MockOrdersService::new(),
            MockAuthService::new(),
        ),
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service_with_identity(
        make_state(
            MockProductsService::new(),
            carts,
            MockOrdersService::new(),
            MockAuthService::new(),
        ),
        route,
    )
}

pub(crate) fn products_and_carts_service(
    products: MockProductsService,
    carts: MockCartsService,
    route: Router,
) -> Service {
    service_with_identity(
        make_state(
            products,
            carts,
            MockOrdersService::new(),
            MockAuthService::new(),
        ),
        route,
    )
}

pub(crate) fn orders_service(
    carts: MockCartsService,
    orders: MockOrdersService,
    route: Router,
) -> Service {
    service_with_identity(
        make_state(
            MockProductsService::new(),
            carts,
            orders,
            MockAuthService::new(),
        ),
        route,
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(
        MockProductsService::new(),
        MockCartsService::new(),
        MockOrdersService::new(),
        auth,
    )
}

/// Auth routes are anonymous but need the real session middleware, so
/// the login/register handlers have a session to bind the user to.
pub(crate) fn auth_service_with_state(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(crate::session::middleware)
            .push(route),
    )
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    auth_service_with_state(state_with_auth(auth), route)
}
