use crate::web::templates::components::{footer_section, nav_section};
use crate::web::templates::styles::get_styles;
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub fn base_template(title: &str, signed_in: bool, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            (head_section(title))
            body {
                @if signed_in {
                    (nav_section())
                }
                main.center {
                    (content)
                }
                (footer_section())
                (get_styles())
            }
        }
    }
}

fn head_section(title: &str) -> Markup {
    html! {
        head {
            title { (title) " | Land console" }
            meta name="viewport" content="width=device-width";
            link rel="icon" type="image/x-icon" href="favicon.ico";
            (leaflet_resources())
            (console_script())
        }
    }
}

fn leaflet_resources() -> Markup {
    html! {
        link rel="stylesheet"
            href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
            integrity="sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY="
            crossorigin="";
        link rel="stylesheet"
            href="https://unpkg.com/leaflet-draw@1.0.4/dist/leaflet.draw.css";
        script type="text/javascript"
            src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"
            integrity="sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo="
            crossorigin=""{}
        script type="text/javascript"
            src="https://unpkg.com/leaflet-draw@1.0.4/dist/leaflet.draw.js"{}
    }
}

fn console_script() -> Markup {
    html! {
        script {
            (PreEscaped(include_str!("../js/console.js")))
        }
    }
}
