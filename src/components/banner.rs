//! Wrong-network warning strip.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::config::TARGET_CHAIN;

/// Shown while a connected wallet reports a chain other than the
/// target. The button retries the switch; reconciliation is best-effort
/// so the banner only disappears once the provider actually reports the
/// target chain.
#[component]
pub fn NetworkBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let wallet = ctx.wallet;
    let mismatched = move || wallet.with(|w| w.connected && !w.target_network);

    view! {
        <Show when=mismatched>
            <div class="network-banner">
                <span>{format!("Wrong network. This app requires {}.", TARGET_CHAIN.name)}</span>
                <button on:click=move |_| ctx.switch_network()>
                    {format!("Switch to {}", TARGET_CHAIN.name)}
                </button>
            </div>
        </Show>
    }
}
