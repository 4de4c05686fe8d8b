use common::model::user::User;
use common::routes::Route;
use yew::prelude::*;

use super::helpers::icon_button;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub route: Route,
    pub user: User,
    pub on_navigate: Callback<Route>,
    pub on_sign_out: Callback<()>,
}

/// Top navigation bar. The settings entry is only offered to superusers.
#[function_component(NavBar)]
pub fn nav_bar(props: &Props) -> Html {
    let mut routes = vec![Route::Dashboard, Route::DataSources, Route::Datasets, Route::Destinations];
    if props.user.is_superuser {
        routes.push(Route::Settings);
    }
    let current = props.route.title();
    let on_sign_out = props.on_sign_out.clone();

    html! {
        <nav class="navbar">
            <span class="brand">{ "Swiple" }</span>
            { for routes.into_iter().map(|route| {
                let on_navigate = props.on_navigate.clone();
                let href = route.href();
                let active = route.title() == current;
                let title = route.title();
                let onclick = Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    on_navigate.emit(route.clone());
                });
                html! {
                    <a class={classes!("nav-link", active.then_some("active"))} {href} {onclick}>{ title }</a>
                }
            }) }
            <span class="nav-user">{ props.user.email.clone() }</span>
            { icon_button("logout", "Sign out", Callback::from(move |_| on_sign_out.emit(())), false) }
        </nav>
    }
}
