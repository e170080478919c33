//! Popup composer: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `PopupComposer`).
//! - Provide the `Component` implementation that delegates to `update::update`
//!   and `view::view`.
//! - On first render, fetch the stored popups; the update logic picks the
//!   initial screen from the result.

use yew::prelude::*;

mod helpers;
mod messages;
mod state;
mod update;
mod view;

use helpers::fetch_popups;
pub use messages::Msg;
pub use state::PopupComposer;

impl Component for PopupComposer {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        PopupComposer::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            fetch_popups(ctx.link().clone());
        }
    }
}
