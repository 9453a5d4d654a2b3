//! Application router component.
//!
//! Hash-based routing on native hashchange events instead of a router
//! crate: the URL hash is the source of truth, the navbar never
//! re-renders on navigation, and browser back/forward work for free.

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::components::banner::NetworkBanner;
use crate::components::navbar::Navbar;
use crate::models::Route;
use crate::pages::{Convert, Dashboard, History, Login, Rewards, Send};

/// Main application router.
///
/// Renders the stable chrome (navbar, network banner) above whichever
/// page the current hash selects.
#[component]
pub fn AppRouter() -> impl IntoView {
    let route = RwSignal::new(Route::current());

    // hashchange listener, registered once for the page lifetime
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let closure = Closure::wrap(Box::new(move || {
            route.set(Route::current());
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    let route_memo = Memo::new(move |_| route.get());

    view! {
        <Navbar route=route_memo />
        <NetworkBanner />
        <main class="page">
            {move || match route_memo.get() {
                Route::Dashboard => view! { <Dashboard /> }.into_any(),
                Route::Login => view! { <Login /> }.into_any(),
                Route::Send => view! { <Send /> }.into_any(),
                Route::History => view! { <History /> }.into_any(),
                Route::Rewards => view! { <Rewards /> }.into_any(),
                Route::Convert => view! { <Convert /> }.into_any(),
            }}
        </main>
    }
}
