use maud::{html, Markup};

pub fn nav_section() -> Markup {
    html! {
        nav {
            span.heading { a href="/" { "Land console" } }
            ul {
                li { a href="/regions" { "Regions" } }
                li { a href="/lands" { "Lands" } }
                li { a href="/owners" { "Owners" } }
                li { a href="/employees" { "Employees" } }
                li { a href="/tasks" { "Tasks" } }
                li { a href="/assets" { "Assets" } }
            }
            form method="post" action="/logout" {
                button type="submit" { "Log out" }
            }
        }
    }
}

pub fn header_section(heading: &str, subheading: Option<&str>) -> Markup {
    html! {
        span.heading { (heading) }
        @if let Some(subheading) = subheading {
            span.subheading { (subheading) }
        }
    }
}

/// Shown once per failed request or rejected form.
pub fn notice_section(notice: Option<&str>) -> Markup {
    html! {
        @if let Some(notice) = notice {
            div #notice .notice role="alert" { (notice) }
        }
    }
}

/// A plain table; the caller renders each cell.
pub fn table_section(headers: &[&str], rows: Vec<Vec<Markup>>) -> Markup {
    html! {
        @if rows.is_empty() {
            p.empty { "Nothing here yet." }
        } @else {
            table {
                thead {
                    tr {
                        @for header in headers {
                            th { (header) }
                        }
                    }
                }
                tbody {
                    @for row in rows {
                        tr {
                            @for cell in row {
                                td { (cell) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// A one-button form posting to `action`, optionally carrying one hidden field.
pub fn delete_button(action: &str, hidden: Option<(&str, String)>) -> Markup {
    html! {
        form.inline method="post" action=(action) onsubmit="return confirm('Delete this record?');" {
            @if let Some((name, value)) = hidden {
                input type="hidden" name=(name) value=(value);
            }
            button.danger type="submit" { "Delete" }
        }
    }
}

/// A labelled input. `kind` is the HTML input type.
pub fn input_field(label: &str, kind: &str, name: &str, value: &str, required: bool) -> Markup {
    html! {
        label {
            (label)
            input type=(kind) name=(name) value=(value) step=[(kind == "number").then_some("any")] required[required];
        }
    }
}

/// A labelled select over `(value, text)` options, with a leading blank choice
/// unless the field is required.
pub fn select_field(
    label: &str,
    name: &str,
    options: &[(String, String)],
    selected: &str,
    required: bool,
) -> Markup {
    html! {
        label {
            (label)
            select name=(name) required[required] {
                @if !required {
                    option value="" { "-" }
                }
                @for (value, text) in options {
                    option value=(value) selected[value == selected] { (text) }
                }
            }
        }
    }
}

pub fn footer_section() -> Markup {
    html! {
        footer.attribution {
            "Map data © OpenStreetMap contributors"
        }
    }
}
