use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub fn icon_calculator() -> Html {
    icon_base("M5 2h14v20H5zM8 6h8M8 11h2M14 11h2M8 15h2M14 15h2M8 19h2M14 19h2")
}
pub fn icon_file_text() -> Html {
    icon_base("M14 2H6v20h12V6zM14 2v4h4M8 13h8M8 17h8")
}
pub fn icon_tags() -> Html {
    icon_base("M20.6 13.4l-7.2 7.2a2 2 0 01-2.8 0L2 12V2h10l8.6 8.6a2 2 0 010 2.8zM7 7h.01")
}
pub fn icon_settings() -> Html {
    icon_base("M12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_x() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6")
}
pub fn icon_edit() -> Html {
    icon_base("M12 20h9M16.5 3.5a2.1 2.1 0 013 3L7 19l-4 1 1-4z")
}
pub fn icon_calendar() -> Html {
    icon_base("M3 4h18v18H3zM16 2v4M8 2v4M3 10h18")
}
pub fn icon_arrow_left() -> Html {
    icon_base("M19 12H5M12 19l-7-7 7-7")
}
pub fn icon_arrow_up_down() -> Html {
    icon_base("M7 4v16M3 8l4-4 4 4M17 20V4M13 16l4 4 4-4")
}
pub fn icon_check() -> Html {
    icon_base("M20 6L9 17l-5-5")
}
pub fn icon_database() -> Html {
    icon_base("M3 5c0-1.7 4-3 9-3s9 1.3 9 3-4 3-9 3-9-1.3-9-3zM3 5v14c0 1.7 4 3 9 3s9-1.3 9-3V5M3 12c0 1.7 4 3 9 3s9-1.3 9-3")
}
pub fn icon_bookmark() -> Html {
    icon_base("M19 21l-7-5-7 5V5a2 2 0 012-2h10a2 2 0 012 2z")
}
pub fn icon_clock() -> Html {
    icon_base("M12 12m-10 0a10 10 0 1020 0 10 10 0 10-20 0M12 6v6l4 2")
}
