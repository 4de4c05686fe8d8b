//! Modal form shared by every schema-driven resource.
//!
//! The component is generic over the [`FormFamily`]: the expectation,
//! destination, data source and sampling modals are all
//! `SchemaModal<Family>` with a different family value. The parent opens it
//! by passing `mode`, and hears back through `on_submitted` and `on_close`.

use common::form::family::FormFamily;
use common::form::ModalEvent;
use yew::prelude::*;

pub(crate) mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::SchemaModalProps;
pub use state::SchemaModal;

impl<F> Component for SchemaModal<F>
where
    F: FormFamily + Clone + PartialEq + 'static,
{
    type Message = Msg;
    type Properties = SchemaModalProps<F>;

    fn create(ctx: &Context<Self>) -> Self {
        let mut component = SchemaModal::new(ctx.props().family.clone());
        if let Some(mode) = ctx.props().mode.clone() {
            let effects = component.modal.handle(ModalEvent::Open(mode));
            update::run_effects(ctx, effects);
        }
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.family != old_props.family && !self.modal.is_open() {
            self.modal = common::form::ModalState::new(props.family.clone());
        }
        if old_props.mode.is_none() {
            if let Some(mode) = props.mode.clone() {
                let effects = self.modal.handle(ModalEvent::Open(mode));
                update::run_effects(ctx, effects);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
