use dioxus::prelude::{use_signal, Signal};

use crate::config::ViewerConfig;
use crate::domain::entities::edit::CellKey;
use crate::domain::entities::filter::FilterCondition;
use crate::ui::state::notice::Notices;
use crate::usecase::session::ViewerSession;

pub struct AppState {
    pub session: Signal<ViewerSession>,
    pub notices: Signal<Notices>,
    pub busy: Signal<bool>,
    pub search_input: Signal<String>,
    pub filter_column: Signal<Option<String>>,
    pub filter_condition: Signal<FilterCondition>,
    pub filter_value: Signal<String>,
    pub editing_cell: Signal<Option<CellKey>>,
    pub editing_value: Signal<String>,
    pub paste_text: Signal<String>,
    pub share_input: Signal<String>,
    pub share_link: Signal<Option<String>>,
    pub show_chart: Signal<bool>,
}

impl AppState {
    pub fn new(config: &ViewerConfig) -> Self {
        let session_config = config.clone();
        let notice_ttl = config.notice_ttl;
        Self {
            session: use_signal(move || ViewerSession::in_memory(&session_config)),
            notices: use_signal(move || Notices::new(notice_ttl)),
            busy: use_signal(|| false),
            search_input: use_signal(String::new),
            filter_column: use_signal(|| None::<String>),
            filter_condition: use_signal(|| FilterCondition::Contains),
            filter_value: use_signal(String::new),
            editing_cell: use_signal(|| None::<CellKey>),
            editing_value: use_signal(String::new),
            paste_text: use_signal(String::new),
            share_input: use_signal(String::new),
            share_link: use_signal(|| None::<String>),
            show_chart: use_signal(|| true),
        }
    }
}
