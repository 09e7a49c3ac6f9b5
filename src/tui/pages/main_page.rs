use iocraft::prelude::*;

use crate::tui::components::input_section::InputSection;
use crate::tui::components::status_line::StatusLine;

#[derive(Default, Props)]
pub struct MainPageProps {
    pub is_loading: bool,
}

/// Main page: status line + research form, pushed to the bottom.
#[component]
pub fn MainPage(props: &MainPageProps) -> impl Into<AnyElement<'static>> {
    element! {
        View(
            flex_direction: FlexDirection::Column,
            height: 100pct,
            width: 100pct,
            padding: 1,
            justify_content: JustifyContent::End,
        ) {
            StatusLine
            InputSection(is_loading: props.is_loading)
        }
    }
}
