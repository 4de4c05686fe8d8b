use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

const SHOW_CLASS: &str = "show";
const SLIDE_DELAY_MS: u32 = 50;

/// Sheet sliding down from the top of the page. Hosts every modal form.
pub struct TopSheet {
    pub id: String,
    node_ref: NodeRef,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub open: bool,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
            node_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().open != old_props.open {
            set_shown(self.node_ref.clone(), ctx.props().open);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={self.node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && ctx.props().open {
            set_shown(self.node_ref.clone(), true);
        }
    }
}

/// Toggles the slide-in class after a short delay so the CSS transition runs
/// on freshly mounted content.
fn set_shown(sheet_ref: NodeRef, shown: bool) {
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(SLIDE_DELAY_MS).await;
        if let Some(sheet) = sheet_ref.cast::<web_sys::HtmlElement>() {
            let classes = sheet.class_list();
            let result = if shown {
                classes.add_1(SHOW_CLASS)
            } else {
                classes.remove_1(SHOW_CLASS)
            };
            if let Err(err) = result {
                log::warn!("top sheet {}: {err:?}", sheet.id());
            }
        }
    });
}
