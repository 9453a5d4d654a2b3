//! Dashboard page: balance card, network status and quick links.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::config::TARGET_CHAIN;
use crate::models::Route;
use crate::utils::{format, url};

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let wallet = ctx.wallet;

    let balance_label = move || {
        wallet.with(|w| match &w.balance {
            Some(balance) => format!("{balance} {}", TARGET_CHAIN.currency_symbol),
            None if w.connected => "loading...".to_string(),
            None => "--".to_string(),
        })
    };

    let network_label = move || {
        wallet.with(|w| {
            if !w.connected {
                "not connected".to_string()
            } else if w.target_network {
                TARGET_CHAIN.name.to_string()
            } else {
                format!("wrong network ({})", w.chain_id.as_deref().unwrap_or("unknown"))
            }
        })
    };

    view! {
        <section class="dashboard">
            <div class="card balance-card">
                <h2>"Balance"</h2>
                <p class="amount">{balance_label}</p>
                <Show when=move || wallet.with(|w| w.connected)>
                    <p class="account">
                        <a
                            href=move || {
                                wallet
                                    .with(|w| w.account.as_deref().map(url::explorer_address_url))
                                    .unwrap_or_default()
                            }
                            target="_blank"
                        >
                            {move || wallet.with(|w| w.account.as_deref().map(format::short_address))}
                        </a>
                    </p>
                    <button on:click=move |_| ctx.refresh_balance()>"Refresh"</button>
                </Show>
                <Show when=move || wallet.with(|w| !w.connected && !w.connecting)>
                    <button on:click=move |_| ctx.connect()>"Connect Wallet"</button>
                </Show>
            </div>

            <div class="card network-card">
                <h2>"Network"</h2>
                <p>{network_label}</p>
            </div>

            <nav class="quick-links">
                <a href=Route::Send.to_hash()>"Send"</a>
                <a href=Route::History.to_hash()>"History"</a>
                <a href=Route::Rewards.to_hash()>"Rewards"</a>
                <a href=Route::Convert.to_hash()>"Convert"</a>
            </nav>
        </section>
    }
}
