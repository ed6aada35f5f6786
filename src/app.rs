use std::collections::BTreeSet;

use chrono::Local;
use dioxus::prelude::*;

use crate::config::ViewerConfig;
use crate::domain::entities::dataset::{PageResult, SortState};
use crate::domain::entities::edit::CellKey;
use crate::domain::entities::filter::{FilterCondition, FilterPredicate, FilterSet};
use crate::domain::error::ViewerError;
use crate::platform::{pick_csv_file, save_export, sleep, startup_link};
use crate::ui::state::app_state::AppState;
use crate::ui::state::notice::Notices;
use crate::usecase::services::export_service::ExportFormat;
use crate::usecase::session::ViewerSession;

const NONE_OPTION_VALUE: &str = "__none__";

fn table_header_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 6px; background: #f4f4f4; cursor: pointer; user-select: none; white-space: nowrap;"
}

fn table_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 4px;"
}

fn toolbar_style() -> &'static str {
    "display: flex; gap: 8px; align-items: center; flex-wrap: wrap; margin: 8px 0;"
}

fn header_label(header: &str, sort: &SortState) -> String {
    match sort.direction_for(header) {
        Some(direction) => format!("{header} {}", direction.arrow()),
        None => header.to_string(),
    }
}

fn report(mut notices: Signal<Notices>, result: Result<(), ViewerError>) {
    if let Err(err) = result {
        notices.write().error(err.to_string());
    }
}

fn selected_option(value: String) -> Option<String> {
    (value != NONE_OPTION_VALUE).then_some(value)
}

#[component]
fn NoticeList(mut notices: Signal<Notices>) -> Element {
    // Re-runs on every change to the list and wakes up when the oldest notice expires.
    use_effect(move || {
        let Some(wait) = notices.read().next_expiry(Local::now()) else {
            return;
        };
        spawn(async move {
            sleep(wait).await;
            notices.write().prune(Local::now());
        });
    });

    let active = notices.read().active(Local::now());

    rsx! {
        div {
            style: "position: fixed; right: 16px; bottom: 16px; display: flex; flex-direction: column; gap: 6px; z-index: 1200;",
            {active.into_iter().map(|notice| {
                let id = notice.id;
                rsx!(
                    div {
                        key: "{id}",
                        style: "{notice.level.style()} padding: 8px 12px; border-radius: 6px; min-width: 240px; display: flex; gap: 12px; justify-content: space-between;",
                        span { "{notice.message}" }
                        button {
                            style: "border: none; background: transparent; cursor: pointer;",
                            onclick: move |_| notices.write().dismiss(id),
                            "✕"
                        }
                    }
                )
            })}
        }
    }
}

#[component]
fn FilterEditor(
    mut session: Signal<ViewerSession>,
    notices: Signal<Notices>,
    headers: Vec<String>,
    filters: FilterSet,
    mut filter_column: Signal<Option<String>>,
    mut filter_condition: Signal<FilterCondition>,
    mut filter_value: Signal<String>,
) -> Element {
    let selected_column = filter_column();
    let active_filters = filters.clone();

    rsx! {
        div { style: "{toolbar_style()}",
            span { "Filter" }
            select {
                onchange: move |event| {
                    let column = selected_option(event.value());
                    if let Some(active) = column.as_deref().and_then(|column| active_filters.get(column)) {
                        filter_condition.set(active.condition);
                        filter_value.set(active.value.clone());
                    }
                    filter_column.set(column);
                },
                option { value: NONE_OPTION_VALUE, selected: selected_column.is_none(), "(column)" }
                for header in headers.iter() {
                    option {
                        value: "{header}",
                        selected: selected_column.as_deref() == Some(header.as_str()),
                        "{header}"
                    }
                }
            }
            select {
                onchange: move |event| {
                    if let Some(condition) = FilterCondition::parse(&event.value()) {
                        filter_condition.set(condition);
                    }
                },
                for condition in FilterCondition::ALL {
                    option {
                        value: condition.as_str(),
                        selected: filter_condition() == condition,
                        "{condition.label()}"
                    }
                }
            }
            input {
                placeholder: "value",
                value: filter_value(),
                oninput: move |event| filter_value.set(event.value()),
            }
            button {
                disabled: selected_column.is_none(),
                onclick: move |_| {
                    let Some(column) = filter_column() else {
                        return;
                    };
                    let predicate = FilterPredicate::new(filter_condition(), filter_value());
                    let result = session.write().set_filter(column, predicate);
                    report(notices, result);
                },
                "Apply filter"
            }
            if !filters.is_empty() {
                button {
                    onclick: move |_| {
                        let result = session.write().clear_filters();
                        report(notices, result);
                    },
                    "Clear filters"
                }
            }
        }
        if !filters.is_empty() {
            div { style: "{toolbar_style()}",
                {filters.iter().map(|(column, predicate)| {
                    let column = column.clone();
                    let label = format!("{column} {} \"{}\"", predicate.condition.label(), predicate.value);
                    rsx!(
                        span {
                            key: "{column}",
                            style: "background: #eef4ff; border: 1px solid #9ab; border-radius: 12px; padding: 2px 10px;",
                            "{label} "
                            button {
                                style: "border: none; background: transparent; cursor: pointer;",
                                onclick: move |_| {
                                    let result = session.write().clear_filter(&column);
                                    report(notices, result);
                                },
                                "✕"
                            }
                        }
                    )
                })}
            }
        }
    }
}

#[component]
fn ColumnVisibility(
    mut session: Signal<ViewerSession>,
    headers: Vec<String>,
    hidden: BTreeSet<String>,
) -> Element {
    rsx! {
        div { style: "{toolbar_style()}",
            span { "Columns" }
            {headers.into_iter().map(|header| {
                let checked = !hidden.contains(&header);
                let column = header.clone();
                rsx!(
                    label {
                        key: "{header}",
                        style: "display: inline-flex; align-items: center; gap: 4px;",
                        input {
                            r#type: "checkbox",
                            checked: checked,
                            onclick: move |_| {
                                session.write().toggle_column(&column);
                            }
                        }
                        span { "{header}" }
                    }
                )
            })}
        }
    }
}

#[component]
fn ScatterChart(
    mut session: Signal<ViewerSession>,
    numeric_columns: Vec<String>,
    #[props(!optional)] x: Option<String>,
    #[props(!optional)] y: Option<String>,
) -> Element {
    if numeric_columns.len() < 2 {
        return rsx! {
            p { style: "color: #666;", "The chart needs at least two numeric columns." }
        };
    }

    let chart = session.read().chart_svg();
    let x_for_y = x.clone();
    let y_for_x = y.clone();

    rsx! {
        div { style: "{toolbar_style()}",
            span { "X axis" }
            select {
                onchange: move |event| {
                    session.write().set_chart_axes(selected_option(event.value()), y_for_x.clone());
                },
                option { value: NONE_OPTION_VALUE, selected: x.is_none(), "(none)" }
                for column in numeric_columns.iter() {
                    option {
                        value: "{column}",
                        selected: x.as_deref() == Some(column.as_str()),
                        "{column}"
                    }
                }
            }
            span { "Y axis" }
            select {
                onchange: move |event| {
                    session.write().set_chart_axes(x_for_y.clone(), selected_option(event.value()));
                },
                option { value: NONE_OPTION_VALUE, selected: y.is_none(), "(none)" }
                for column in numeric_columns.iter() {
                    option {
                        value: "{column}",
                        selected: y.as_deref() == Some(column.as_str()),
                        "{column}"
                    }
                }
            }
        }
        {match chart {
            Some(Ok(svg)) => rsx! {
                div { dangerous_inner_html: "{svg}" }
            },
            Some(Err(err)) => rsx! {
                p { style: "color: #b22;", "Chart unavailable: {err}" }
            },
            None => rsx! {
                p { style: "color: #666;", "Pick two numeric columns to plot." }
            },
        }}
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(ViewerConfig::from_env);

    let AppState {
        mut session,
        mut notices,
        mut busy,
        mut search_input,
        filter_column,
        filter_condition,
        filter_value,
        mut editing_cell,
        mut editing_value,
        mut paste_text,
        mut share_input,
        mut share_link,
        mut show_chart,
    } = AppState::new(&config);

    // A shared link or token passed on the command line restores that view.
    use_effect(move || {
        spawn(async move {
            let Some(link) = startup_link().await else {
                return;
            };
            if let Err(err) = session.write().apply_shared_link(&link) {
                notices
                    .write()
                    .warn(format!("Ignoring shared view: {err}"));
                return;
            }
            search_input.set(session.read().state().search.clone());
        });
    });

    let (page, headers, numeric_columns, state, loaded): (
        PageResult,
        Vec<String>,
        Vec<String>,
        _,
        bool,
    ) = {
        let current = session.read();
        (
            current.current_page(),
            current.headers(),
            current.numeric_columns(),
            current.state().clone(),
            current.is_loaded(),
        )
    };
    let editing_snapshot = editing_cell();
    let visible_columns = page.columns.clone();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px; background: #fff; min-height: 100vh;",

            h2 { "{config.window_title}" }

            div { style: "{toolbar_style()}",
                if cfg!(feature = "desktop") {
                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            if busy() {
                                return;
                            }
                            let Some(path) = pick_csv_file() else {
                                return;
                            };
                            busy.set(true);
                            let result = session.write().load_file(&path);
                            match result {
                                Ok(summary) => {
                                    editing_cell.set(None);
                                    search_input.set(session.read().state().search.clone());
                                    notices.write().info(format!(
                                        "Loaded {} rows from {}",
                                        summary.row_count,
                                        path.display()
                                    ));
                                }
                                Err(err) => {
                                    notices.write().error(format!("Upload rejected: {err:#}"));
                                }
                            }
                            busy.set(false);
                        },
                        "Open CSV…"
                    }
                }
                textarea {
                    rows: "2",
                    cols: "40",
                    placeholder: "…or paste CSV text here",
                    value: paste_text(),
                    oninput: move |event| paste_text.set(event.value()),
                }
                button {
                    disabled: busy() || paste_text().trim().is_empty(),
                    onclick: move |_| {
                        busy.set(true);
                        let text = paste_text();
                        let result = session.write().load_csv(&text);
                        match result {
                            Ok(summary) => {
                                editing_cell.set(None);
                                search_input.set(session.read().state().search.clone());
                                paste_text.set(String::new());
                                notices
                                    .write()
                                    .info(format!("Loaded {} rows", summary.row_count));
                            }
                            Err(err) => {
                                notices.write().error(format!("Upload rejected: {err}"));
                            }
                        }
                        busy.set(false);
                    },
                    "Load pasted CSV"
                }
            }

            div { style: "{toolbar_style()}",
                input {
                    placeholder: "Search all columns",
                    value: search_input(),
                    disabled: !loaded,
                    oninput: move |event| {
                        let term = event.value();
                        search_input.set(term.clone());
                        let result = session.write().set_search(term);
                        report(notices, result);
                    },
                }
                span { "{page.total_rows} matching rows" }
            }

            if loaded {
                FilterEditor {
                    session: session,
                    notices: notices,
                    headers: headers.clone(),
                    filters: state.filters.clone(),
                    filter_column: filter_column,
                    filter_condition: filter_condition,
                    filter_value: filter_value,
                }
                ColumnVisibility {
                    session: session,
                    headers: headers.clone(),
                    hidden: state.hidden_columns.clone(),
                }
            }

            table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                thead {
                    tr {
                        {visible_columns.iter().map(|header| {
                            let label = header_label(header, &state.sort);
                            let column = header.clone();
                            rsx!(
                                th {
                                    key: "{header}",
                                    style: "{table_header_cell_style()}",
                                    onclick: move |_| {
                                        let result = session.write().toggle_sort(&column);
                                        report(notices, result);
                                    },
                                    "{label}"
                                }
                            )
                        })}
                    }
                }
                tbody {
                    {page.rows.iter().map(|(row_idx, record)| {
                        let row_idx = *row_idx;
                        let record = record.clone();
                        let columns = visible_columns.clone();
                        let editing_snapshot = editing_snapshot.clone();
                        rsx!(
                            tr { key: "{row_idx}",
                                {columns.into_iter().map(|column| {
                                    let value = record.value(&column).to_string();
                                    let cell_key = CellKey {
                                        row_idx,
                                        column: column.clone(),
                                    };
                                    if editing_snapshot.as_ref() == Some(&cell_key) {
                                        rsx!(
                                            td { style: "{table_cell_style()}",
                                                input {
                                                    value: editing_value(),
                                                    oninput: move |event| editing_value.set(event.value()),
                                                    onkeydown: move |event| {
                                                        if event.key() == Key::Enter {
                                                            let next_value = editing_value();
                                                            let result = session
                                                                .write()
                                                                .edit_cell(row_idx, &column, next_value);
                                                            editing_cell.set(None);
                                                            editing_value.set(String::new());
                                                            report(notices, result);
                                                        } else if event.key() == Key::Escape {
                                                            editing_cell.set(None);
                                                            editing_value.set(String::new());
                                                        }
                                                    }
                                                }
                                            }
                                        )
                                    } else {
                                        let shown = value.clone();
                                        rsx!(
                                            td {
                                                style: "{table_cell_style()}",
                                                ondoubleclick: move |_| {
                                                    editing_cell.set(Some(cell_key.clone()));
                                                    editing_value.set(value.clone());
                                                },
                                                "{shown}"
                                            }
                                        )
                                    }
                                })}
                            }
                        )
                    })}
                }
            }

            if loaded && page.total_rows == 0 {
                p { style: "color: #666;", "No rows match the current filters." }
            }

            if page.total_pages > 0 {
                div { style: "{toolbar_style()}",
                    button {
                        disabled: page.page <= 1,
                        onclick: move |_| {
                            session.write().prev_page();
                        },
                        "Previous"
                    }
                    span { "Page" }
                    input {
                        r#type: "number",
                        style: "width: 4em;",
                        min: "1",
                        max: "{page.total_pages}",
                        value: "{page.page}",
                        onchange: move |event| {
                            if let Ok(target) = event.value().trim().parse::<usize>() {
                                session.write().go_to_page(target);
                            }
                        },
                    }
                    span { "of {page.total_pages}" }
                    button {
                        disabled: page.page >= page.total_pages,
                        onclick: move |_| {
                            session.write().next_page();
                        },
                        "Next"
                    }
                }
            }

            if loaded {
                div { style: "{toolbar_style()}",
                    span { "Export" }
                    for format in ExportFormat::ALL {
                        button {
                            onclick: move |_| {
                                let exported = session.read().export(format);
                                match exported.and_then(|file| save_export(&file)) {
                                    Ok(Some(path)) => {
                                        notices.write().info(format!("Saved {}", path.display()));
                                    }
                                    Ok(None) => {}
                                    Err(err) => {
                                        notices.write().error(format!("Export failed: {err:#}"));
                                    }
                                }
                            },
                            "{format.label()}"
                        }
                    }
                }
            }

            div { style: "{toolbar_style()}",
                button {
                    onclick: move |_| share_link.set(Some(session.read().share_link())),
                    "Share view"
                }
                if let Some(link) = share_link() {
                    input { readonly: true, size: "60", value: "{link}" }
                }
            }
            div { style: "{toolbar_style()}",
                input {
                    placeholder: "Paste a shared link or token",
                    size: "60",
                    value: share_input(),
                    oninput: move |event| share_input.set(event.value()),
                }
                button {
                    disabled: share_input().trim().is_empty(),
                    onclick: move |_| {
                        let link = share_input();
                        let result = session.write().apply_shared_link(&link);
                        match result {
                            Ok(()) => {
                                search_input.set(session.read().state().search.clone());
                                share_input.set(String::new());
                                notices.write().info("Shared view applied");
                            }
                            Err(err) => {
                                notices.write().warn(format!("Ignoring shared view: {err}"));
                            }
                        }
                    },
                    "Open shared view"
                }
            }

            if loaded {
                div {
                    label {
                        input {
                            r#type: "checkbox",
                            checked: show_chart(),
                            onclick: move |_| show_chart.toggle(),
                        }
                        " Scatter chart"
                    }
                    if show_chart() {
                        ScatterChart {
                            session: session,
                            numeric_columns: numeric_columns.clone(),
                            x: state.chart.x.clone(),
                            y: state.chart.y.clone(),
                        }
                    }
                }
            }

            NoticeList { notices: notices }
        }
    }
}
