//! Root application module.
//!
//! Contains the main App component, the AppContext signals, and the
//! UI-side wallet operations that bridge components to the async flows
//! in [`crate::core::wallet`].

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::AppRouter;
use crate::core::auth;
use crate::core::provider::{self, EventSubscription};
use crate::core::session::{self, LocalStore};
use crate::core::wallet;
use crate::models::{AuthState, ConnectionState};
use crate::utils::url;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree; any child component can
/// reach it with `use_context::<AppContext>()`. Both fields hold whole
/// records that are replaced, never field-patched, on update.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals, which
/// are cheap to copy (they're just pointers to the reactive state).
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Wallet connection state machine record.
    pub wallet: RwSignal<ConnectionState>,
    /// Backend session mirror.
    pub auth: RwSignal<AuthState>,
}

impl AppContext {
    /// Creates the context with everything disconnected / signed out.
    pub fn new() -> Self {
        Self {
            wallet: RwSignal::new(ConnectionState::default()),
            auth: RwSignal::new(AuthState::default()),
        }
    }

    /// Explicit user connect.
    ///
    /// No-op while a connect is already in flight or a session exists;
    /// a missing provider short-circuits to the not-installed state
    /// without spawning anything.
    pub fn connect(&self) {
        let signal = self.wallet;
        let Some(pending) = signal.get_untracked().begin_connect() else {
            return;
        };
        let Some(provider) = provider::get_provider() else {
            signal.set(wallet::provider_missing_state());
            return;
        };
        signal.set(pending.clone());
        spawn_local(async move {
            let settled = wallet::connect_flow(&provider, &LocalStore, &pending).await;
            signal.set(settled);
        });
    }

    /// Explicit disconnect; local only and synchronous.
    pub fn disconnect(&self) {
        self.wallet.set(wallet::disconnect(&LocalStore));
    }

    /// Retry getting the wallet onto the target chain.
    pub fn switch_network(&self) {
        let signal = self.wallet;
        let Some(provider) = provider::get_provider() else {
            signal.set(wallet::provider_missing_state());
            return;
        };
        let prev = signal.get_untracked();
        spawn_local(async move {
            let settled = wallet::switch_network_flow(&provider, &prev).await;
            signal.set(settled);
        });
    }

    /// Refresh the displayed balance; silently no-ops when it can't.
    pub fn refresh_balance(&self) {
        let signal = self.wallet;
        let Some(provider) = provider::get_provider() else {
            return;
        };
        let prev = signal.get_untracked();
        if prev.account.is_none() {
            return;
        }
        spawn_local(async move {
            let settled = wallet::refresh_balance_flow(&provider, &prev).await;
            signal.set(settled);
        });
    }

    /// Dismiss the surfaced error message.
    pub fn clear_error(&self) {
        self.wallet.update(|state| *state = state.without_error());
    }

    /// Drop the backend session.
    pub fn sign_out(&self) {
        auth::sign_out(&LocalStore);
        self.auth.set(AuthState::default());
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Boot
// ============================================================================

/// One-time work on mount: referral capture, session restore and a
/// silent wallet re-check when the user has not opted out.
fn restore_on_boot(ctx: AppContext) {
    if let Some(code) = url::current_query_param("ref") {
        session::store_referral(&LocalStore, &code);
    }

    ctx.auth.set(auth::load_auth_state(&LocalStore));

    let Some(provider) = provider::get_provider() else {
        return;
    };
    if session::manually_disconnected(&LocalStore) {
        return;
    }
    let signal = ctx.wallet;
    spawn_local(async move {
        let prev = signal.get_untracked();
        let settled = wallet::recheck_flow(&provider, &LocalStore, &prev).await;
        signal.set(settled);
    });
}

/// Register provider event listeners for the lifetime of the tree.
///
/// Both handlers spawn the matching flow against a snapshot of the
/// current state; the flow's full-record write is what lands in the
/// signal. Tokens go back to the caller so teardown can deregister.
fn setup_wallet_events(ctx: AppContext) -> Vec<EventSubscription> {
    let Some(provider) = provider::get_provider() else {
        return Vec::new();
    };
    let mut subscriptions = Vec::new();

    let signal = ctx.wallet;
    let accounts_provider = provider.clone();
    match provider.on_accounts_changed(move |accounts| {
        let provider = accounts_provider.clone();
        spawn_local(async move {
            let prev = signal.get_untracked();
            let settled =
                wallet::accounts_changed_flow(&provider, &LocalStore, &prev, accounts).await;
            signal.set(settled);
        });
    }) {
        Ok(token) => subscriptions.push(token),
        Err(err) => log::warn!("accountsChanged subscription failed: {err}"),
    }

    let chain_provider = provider.clone();
    match provider.on_chain_changed(move |chain_hex| {
        // Reflect the new chain immediately, then re-derive the rest.
        signal.update(|state| *state = wallet::apply_chain_changed(state, &chain_hex));
        let provider = chain_provider.clone();
        spawn_local(async move {
            let prev = signal.get_untracked();
            let settled = wallet::recheck_flow(&provider, &LocalStore, &prev).await;
            signal.set(settled);
        });
    }) {
        Ok(token) => subscriptions.push(token),
        Err(err) => log::warn!("chainChanged subscription failed: {err}"),
    }

    subscriptions
}

// ============================================================================
// App Component
// ============================================================================

/// Root application component with error boundary.
///
/// Creates and provides the global AppContext, runs the boot restore
/// once, wires the provider event listeners (released on cleanup), and
/// keeps the balance fresh on an interval while connected.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    let booted = StoredValue::new(false);
    let subscriptions = StoredValue::new_local(Vec::<EventSubscription>::new());
    Effect::new(move || {
        if !booted.get_value() {
            booted.set_value(true);
            restore_on_boot(ctx);
            subscriptions.set_value(setup_wallet_events(ctx));
        }
    });
    on_cleanup(move || {
        subscriptions.update_value(|tokens| {
            for token in tokens.drain(..) {
                token.unsubscribe();
            }
        });
    });

    #[cfg(target_arch = "wasm32")]
    gloo_timers::callback::Interval::new(crate::config::BALANCE_REFRESH_MS, move || {
        ctx.refresh_balance();
    })
    .forget();

    view! {
        <ErrorBoundary fallback=|errors| {
            view! {
                <div class="fatal">
                    <h1>"Something went wrong"</h1>
                    <p>"An unexpected error occurred. Please try reloading the page."</p>
                    <ul>
                        {move || {
                            errors
                                .get()
                                .into_iter()
                                .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                    <button on:click=move |_| {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }>"Reload Page"</button>
                </div>
            }
        }>
            <AppRouter />
        </ErrorBoundary>
    }
}
