//! Top navigation bar with the wallet connect control.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::models::Route;
use crate::utils::format;

/// Navigation links plus the connect/disconnect control and the
/// signed-in account chip.
#[component]
pub fn Navbar(route: Memo<Route>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let nav_links = move || {
        Route::NAV
            .into_iter()
            .map(|target| {
                let active = move || route.get() == target;
                view! {
                    <a href=target.to_hash() class:active=active>
                        {target.label()}
                    </a>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <header class="navbar">
            <span class="brand">{crate::config::APP_NAME}</span>
            <nav>{nav_links}</nav>
            <a class="session" href=Route::Login.to_hash()>
                {move || ctx.auth.get().display_name().to_string()}
            </a>
            <ConnectControl />
        </header>
    }
}

/// Connect button that becomes the address chip once connected.
#[component]
fn ConnectControl() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let wallet = ctx.wallet;

    view! {
        <div class="connect-control">
            <Show
                when=move || wallet.with(|w| w.connected)
                fallback=move || {
                    view! {
                        <button
                            disabled=move || wallet.with(|w| w.connecting)
                            on:click=move |_| ctx.connect()
                        >
                            {move || {
                                if wallet.with(|w| w.connecting) {
                                    "Connecting..."
                                } else {
                                    "Connect Wallet"
                                }
                            }}
                        </button>
                    }
                }
            >
                <span class="address" title=move || wallet.with(|w| w.account.clone())>
                    {move || {
                        wallet.with(|w| w.account.as_deref().map(format::short_address))
                    }}
                </span>
                <span class="balance">
                    {move || {
                        wallet
                            .with(|w| w.balance.clone())
                            .map(|b| format!("{b} {}", crate::config::TARGET_CHAIN.currency_symbol))
                    }}
                </span>
                <button on:click=move |_| ctx.disconnect()>"Disconnect"</button>
            </Show>
            <Show when=move || wallet.with(|w| w.error.is_some())>
                <span class="wallet-error" on:click=move |_| ctx.clear_error()>
                    {move || wallet.with(|w| w.error.clone())}
                </span>
            </Show>
        </div>
    }
}
