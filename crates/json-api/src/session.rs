//! Session cookie middleware.
//!
//! Every request gets a session UUID: either the one carried by the
//! session cookie, or a freshly minted one that is set on the response.
//! Handlers read it from the depot; cart state and the cookie-scheme user
//! binding are keyed by it in the session store.

use salvo::{http::cookie::Cookie, prelude::*};
use uuid::Uuid;

use crate::extensions::*;

/// Name of the cookie carrying the session identifier.
pub(crate) const SESSION_COOKIE: &str = "sf_session";

#[salvo::handler]
pub(crate) async fn middleware(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let existing = req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::try_parse(cookie.value()).ok());

    let session = match existing {
        Some(session) => session,
        None => {
            let session = Uuid::now_v7();

            res.add_cookie(
                Cookie::build((SESSION_COOKIE, session.to_string()))
                    .path("/")
                    .http_only(true)
                    .build(),
            );

            session
        }
    };

    depot.insert_session_uuid(session);

    ctrl.call_next(req, depot, res).await;
}
