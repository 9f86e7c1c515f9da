#![allow(non_snake_case)]

use dioxus_desktop::Config as DesktopConfig;
use gamerecord::config::Config;
use gamerecord_ui::app::{CreateRecord, CreateRecordProps};

fn main() {
    env_logger::init();

    let config = Config::from_env_var();
    log::info!("Backend: {}", config.base_url);

    let style = format!("<style>{}</style>", include_str!("../assets/style.css"));
    let desktop_config = DesktopConfig::default().with_custom_head(style);

    dioxus_desktop::launch_with_props(CreateRecord, CreateRecordProps { config }, desktop_config);
}
