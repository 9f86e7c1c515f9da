use std::time::Duration;

use dioxus::prelude::*;
use gamerecord::app::form::{TextField, AGE_MAX_LEN};
use gamerecord::app::games::Platform;
use gamerecord::app::{App, Event};
use gamerecord::config::Config;

const UPDATE_PERIOD: Duration = Duration::from_millis(50);

#[derive(Props, PartialEq)]
pub struct CreateRecordProps {
    pub config: Config,
}

#[allow(non_snake_case)]
pub fn CreateRecord(cx: Scope<CreateRecordProps>) -> Element {
    let app = use_ref(cx, || match App::new(&cx.props.config) {
        Ok(app) => Some(app),
        Err(e) => {
            log::error!("Cannot start: {e:#}");
            None
        }
    });

    use_future(cx, (), |_| {
        let app = app.clone();
        async move {
            loop {
                tokio::time::sleep(UPDATE_PERIOD).await;

                let changed = match app.write_silent().as_mut() {
                    Some(app) => app.update(),
                    None => break,
                };

                if changed {
                    app.needs_update();
                }
            }
        }
    });

    let dispatch = move |event: Event| {
        if let Some(app) = app.write().as_mut() {
            app.handle(event);
        }
    };

    let (name, age, platform, game_id, games, alert) = match app.read().as_ref() {
        Some(app) => {
            let screen = app.screen();
            let form = screen.form();
            let games: Vec<(i64, String)> = screen
                .games()
                .filtered()
                .iter()
                .map(|g| (g.value, g.label.clone()))
                .collect();
            (
                form.name.clone(),
                form.age.clone(),
                form.platform,
                form.game_id.clone(),
                games,
                screen.alert().map(|alert| alert.to_string()),
            )
        }
        None => return cx.render(rsx!(Header {}, div { class: "container", "unavailable" })),
    };

    cx.render(rsx!(
        Header {},
        div {
            class: "container",
            input {
                class: "input-text",
                placeholder: "Nome",
                value: "{name}",
                oninput: move |evt| dispatch(Event::TextChanged(TextField::Name, evt.value.clone())),
            },
            input {
                class: "input-text",
                placeholder: "Idade",
                inputmode: "numeric",
                pattern: "[0-9]*",
                maxlength: "{AGE_MAX_LEN}",
                value: "{age}",
                oninput: move |evt| dispatch(Event::TextChanged(TextField::Age, evt.value.clone())),
            },
            div {
                class: "platform-container",
                Platform::ALL.iter().map(|&p| rsx!(
                    PlatformCard {
                        key: "{p:?}",
                        platform: p,
                        icon: platform_icon(p),
                        active: platform == Some(p),
                        onchange: move |selected: Platform| dispatch(Event::PlatformSelected(selected)),
                    }
                )),
            },
            select {
                class: "picker",
                value: "{game_id}",
                onchange: move |evt| dispatch(Event::GameSelected(evt.value.clone())),
                option { value: "", "Selecione o game" },
                games.iter().map(|(value, label)| rsx!(
                    option { key: "{value}", value: "{value}", "{label}" }
                )),
            },
            div {
                class: "footer",
                button {
                    class: "button",
                    onclick: move |_| dispatch(Event::Submit),
                    "Salvar"
                },
            },
        },
        alert.map(|message| rsx!(
            div {
                class: "alert-backdrop",
                div {
                    class: "alert",
                    p { "{message}" },
                    button {
                        class: "button",
                        onclick: move |_| dispatch(Event::AlertDismissed),
                        "OK"
                    },
                },
            }
        )),
    ))
}

fn platform_icon(platform: Platform) -> &'static str {
    match platform {
        Platform::Pc => "laptop",
        Platform::Xbox => "xbox",
        Platform::Playstation => "playstation",
    }
}

#[allow(non_snake_case)]
pub fn Header(cx: Scope) -> Element {
    cx.render(rsx!(
        div {
            class: "header",
            div {
                class: "header-title",
                "THE BIG GAME ",
                span { class: "highlight", "SURVEY" },
            },
        }
    ))
}

#[derive(Props)]
pub struct PlatformCardProps<'a> {
    platform: Platform,
    icon: &'static str,
    active: bool,
    onchange: EventHandler<'a, Platform>,
}

#[allow(non_snake_case)]
pub fn PlatformCard<'a>(cx: Scope<'a, PlatformCardProps<'a>>) -> Element<'a> {
    let platform = cx.props.platform;
    let icon = cx.props.icon;
    let label = platform.as_str();
    let class = if cx.props.active {
        "platform-card active"
    } else {
        "platform-card"
    };

    cx.render(rsx!(
        button {
            class: "{class}",
            onclick: move |_| cx.props.onchange.call(platform),
            span { class: "icon", "{icon}" },
            span { "{label}" },
        }
    ))
}
