pub mod config;
pub mod data;
pub mod matchflow;
pub mod pool;
pub mod ranking;
pub mod session;
pub mod storage;
pub mod sync;

use config::AppConfig;
use data::{fetch_app_config, load_session, HttpBackend};
use log::info;
use pool::{Item, ItemId};
use rand::{thread_rng, Rng};
use session::{Effect, Event, Phase, RankingSession, SelectionError, SessionTarget};
use std::ops::Deref;
use storage::{clear, snapshot, LocalSnapshotStore};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement};
use yew::prelude::*;

const SWIPE_THRESHOLD: f64 = 80.0;
const TAP_SLOP: f64 = 6.0;

#[derive(Clone, PartialEq)]
struct DragState {
    pointer_id: i32,
    start_x: f64,
    current_x: f64,
}

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

#[derive(PartialEq, Clone)]
enum SaveStatus {
    Idle,
    Saving,
    Saved(String),
    Error(String),
}

impl SaveStatus {
    /// The session is frozen while a commit is in flight.
    fn locks_session(&self) -> bool {
        matches!(self, Self::Saving)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PairSide {
    Left,
    Right,
}

#[derive(Clone, PartialEq)]
enum MetaField {
    Name(String),
    Description(String),
    Public(bool),
}

/// `?album=<id>` or `?ranking=<id>`; a ranking id wins when both are given.
pub fn parse_target(query: &str) -> Option<SessionTarget> {
    let mut album = None;
    let mut ranking = None;
    for pair in query.trim_start_matches('?').split('&') {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default().trim();
        if value.is_empty() {
            continue;
        }
        match key {
            "album" => album = Some(value.to_string()),
            "ranking" => ranking = Some(value.to_string()),
            _ => {}
        }
    }
    ranking
        .map(SessionTarget::Ranking)
        .or_else(|| album.map(SessionTarget::Album))
}

/// Toggle `id` in `picks`, never holding more than `limit` picks. With a limit
/// of one the new pick replaces the old one.
pub fn toggle_pick(picks: &[ItemId], id: &ItemId, limit: usize) -> Vec<ItemId> {
    if picks.contains(id) {
        return picks.iter().filter(|pick| *pick != id).cloned().collect();
    }
    if limit == 1 {
        return vec![id.clone()];
    }
    let mut next = picks.to_vec();
    if next.len() < limit {
        next.push(id.clone());
    }
    next
}

/// Apply `event` to a copy of `current`. `None` while a save is pending.
fn step_session<R: Rng + ?Sized>(
    current: &RankingSession,
    save_status: &SaveStatus,
    event: Event,
    rng: &mut R,
) -> Option<Result<(RankingSession, Vec<Effect>), SelectionError>> {
    if save_status.locks_session() {
        return None;
    }
    let mut next = current.clone();
    Some(next.apply(event, rng).map(|effects| (next, effects)))
}

fn apply_effects(target: &SessionTarget, session: &RankingSession, effects: &[Effect]) {
    let store = LocalSnapshotStore;
    for effect in effects {
        match effect {
            Effect::Snapshot => snapshot(&store, target, session),
            Effect::ClearSnapshot => clear(&store, target),
            Effect::Promoted(ids) => {
                let (ranked, total) = session.progress();
                info!("Promoted {} image(s), {}/{} ranked", ids.len(), ranked, total);
            }
            Effect::Completed => {
                info!("Every image of album {} is ranked", session.meta().album_id)
            }
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let target = use_state(|| {
        window()
            .and_then(|window| window.location().search().ok())
            .and_then(|query| parse_target(&query))
    });
    let app_config = use_state(AppConfig::default);
    let load_status = use_state(|| FetchStatus::Loading);
    let load_attempt = use_state(|| 0u32);
    let session = use_state(|| None::<RankingSession>);
    let picks = use_state(Vec::<ItemId>::new);
    let selection_error = use_state(|| None::<String>);
    let save_status = use_state(|| SaveStatus::Idle);
    let drag_state = use_state(|| None::<DragState>);
    let menu_open = use_state(|| false);
    let show_reset_confirm = use_state(|| false);

    {
        let load_status = load_status.clone();
        let app_config = app_config.clone();
        let session = session.clone();
        let picks = picks.clone();

        use_effect_with_deps(
            move |(target, _attempt): &(Option<SessionTarget>, u32)| {
                match target.clone() {
                    None => {
                        load_status.set(FetchStatus::Error(
                            "Open the editor with ?album=<id> or ?ranking=<id>.".to_string(),
                        ));
                    }
                    Some(target) => {
                        load_status.set(FetchStatus::Loading);
                        session.set(None);
                        picks.set(Vec::new());

                        let load_status = load_status.clone();
                        let app_config = app_config.clone();
                        let session = session.clone();

                        spawn_local(async move {
                            let config = fetch_app_config().await;
                            let backend = HttpBackend::new(config.api_base.clone());
                            let store = LocalSnapshotStore;
                            let mut rng = thread_rng();

                            match load_session(&backend, &store, &target, &config.ranking, &mut rng)
                                .await
                            {
                                Ok(loaded) => {
                                    snapshot(&store, &target, &loaded);
                                    session.set(Some(loaded));
                                    load_status.set(FetchStatus::Idle);
                                }
                                Err(err) => {
                                    load_status.set(FetchStatus::Error(err.to_string()));
                                }
                            }
                            app_config.set(config);
                        });
                    }
                }

                || ()
            },
            ((*target).clone(), *load_attempt),
        );
    }

    let dispatch = {
        let target = target.clone();
        let session = session.clone();
        let picks = picks.clone();
        let selection_error = selection_error.clone();
        let drag_state = drag_state.clone();
        let save_status = save_status.clone();

        Callback::from(move |event: Event| {
            drag_state.set(None);
            let Some(target) = (*target).clone() else {
                return;
            };
            let Some(current) = (*session).as_ref() else {
                return;
            };

            let mut rng = thread_rng();
            match step_session(current, &save_status, event, &mut rng) {
                Some(Ok((next, effects))) => {
                    apply_effects(&target, &next, &effects);
                    session.set(Some(next));
                    picks.set(Vec::new());
                    selection_error.set(None);
                }
                Some(Err(err)) => selection_error.set(Some(err.to_string())),
                None => {}
            }
        })
    };

    let on_toggle_pick = {
        let picks = picks.clone();
        let session = session.clone();
        let save_status = save_status.clone();
        Callback::from(move |id: ItemId| {
            if save_status.locks_session() {
                return;
            }
            let limit = (*session)
                .as_ref()
                .map(RankingSession::max_selectable)
                .unwrap_or(0);
            picks.set(toggle_pick(&picks, &id, limit));
        })
    };

    let on_confirm = {
        let dispatch = dispatch.clone();
        let picks = picks.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(Event::Select((*picks).clone())))
    };

    let on_pass = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(Event::Pass))
    };

    let on_pair_pick = {
        let dispatch = dispatch.clone();
        let session = session.clone();
        Callback::from(move |side: PairSide| {
            let Some(current) = (*session).as_ref() else {
                return;
            };
            let shown = current.displayed_items();
            let chosen = match side {
                PairSide::Left => shown.first(),
                PairSide::Right => shown.get(1),
            };
            if let Some(item) = chosen {
                dispatch.emit(Event::Select(vec![item.id.clone()]));
            }
        })
    };

    let on_save = {
        let target = target.clone();
        let session = session.clone();
        let save_status = save_status.clone();
        let app_config = app_config.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(target) = (*target).clone() else {
                return;
            };
            let Some(mut current) = (*session).clone() else {
                return;
            };
            if save_status.locks_session() {
                return;
            }

            save_status.set(SaveStatus::Saving);
            let backend = HttpBackend::new(app_config.api_base.clone());
            let session = session.clone();
            let save_status = save_status.clone();

            spawn_local(async move {
                match sync::commit(&backend, &LocalSnapshotStore, &target, &mut current).await {
                    Ok(ranking_id) => {
                        session.set(Some(current));
                        save_status.set(SaveStatus::Saved(ranking_id));
                    }
                    Err(err) => save_status.set(SaveStatus::Error(err.to_string())),
                }
            });
        })
    };

    let on_meta_change = {
        let target = target.clone();
        let session = session.clone();
        let save_status = save_status.clone();
        Callback::from(move |field: MetaField| {
            if save_status.locks_session() {
                return;
            }
            let Some(target) = (*target).clone() else {
                return;
            };
            let Some(mut current) = (*session).clone() else {
                return;
            };
            let meta = current.meta_mut();
            match field {
                MetaField::Name(name) => meta.name = name,
                MetaField::Description(description) => meta.description = description,
                MetaField::Public(is_public) => meta.is_public = is_public,
            }
            snapshot(&LocalSnapshotStore, &target, &current);
            session.set(Some(current));
        })
    };

    let on_retry_load = {
        let load_attempt = load_attempt.clone();
        Callback::from(move |_: MouseEvent| load_attempt.set(*load_attempt + 1))
    };

    let toggle_menu_button = {
        let menu_open = menu_open.clone();
        let show_reset_confirm = show_reset_confirm.clone();
        Callback::from(move |_: MouseEvent| {
            let next = !*menu_open;
            menu_open.set(next);
            if !next {
                show_reset_confirm.set(false);
            }
        })
    };

    let menu_close_callback = {
        let menu_open = menu_open.clone();
        let show_reset_confirm = show_reset_confirm.clone();
        Callback::from(move |_| {
            if *menu_open {
                menu_open.set(false);
                show_reset_confirm.set(false);
            }
        })
    };

    {
        let drag_state = drag_state.clone();
        use_effect_with_deps(
            move |state: &Option<DragState>| {
                let background = state
                    .as_ref()
                    .and_then(|drag| pick_glow(drag.current_x - drag.start_x));
                if let Some(body) = window()
                    .and_then(|window| window.document())
                    .and_then(|document| document.body())
                {
                    let style = body.style();
                    let _ = style.set_property("transition", "background 120ms linear");
                    match background {
                        Some(gradient) => {
                            let _ = style.set_property("background", &gradient);
                            let _ = style.set_property("background-image", &gradient);
                        }
                        None => {
                            let _ = style.remove_property("background");
                            let _ = style.remove_property("background-image");
                        }
                    }
                }
                || ()
            },
            (*drag_state).clone(),
        );
    }

    let request_reset = {
        let show_reset_confirm = show_reset_confirm.clone();
        Callback::from(move |_| show_reset_confirm.set(true))
    };

    let cancel_reset = {
        let show_reset_confirm = show_reset_confirm.clone();
        Callback::from(move |_| show_reset_confirm.set(false))
    };

    let confirm_reset = {
        let dispatch = dispatch.clone();
        let show_reset_confirm = show_reset_confirm.clone();
        let save_status = save_status.clone();
        Callback::from(move |_| {
            if save_status.locks_session() {
                return;
            }
            dispatch.emit(Event::Reset);
            save_status.set(SaveStatus::Idle);
            show_reset_confirm.set(false);
        })
    };

    let saving = save_status.locks_session();

    let menu_markup = render_menu(
        *menu_open,
        *show_reset_confirm,
        saving,
        &session,
        menu_close_callback,
        on_meta_change,
        request_reset,
        cancel_reset,
        confirm_reset,
    );

    html! {
        <div class="app-container">
            <button class={classes!("hamburger-button", if *menu_open { "open" } else { "" })}
                onclick={toggle_menu_button}>
                <span></span>
                <span></span>
                <span></span>
            </button>
            { menu_markup }
            <main class="content single-column">
                {
                    match &*load_status {
                        FetchStatus::Loading => html! { <p>{ "Loading album…" }</p> },
                        FetchStatus::Error(message) => html! {
                            <div class="load-error">
                                <p class="error">{ message }</p>
                                <button class="retry" onclick={on_retry_load}>{ "Try again" }</button>
                            </div>
                        },
                        FetchStatus::Idle => render_round_area(
                            &session,
                            &picks,
                            &selection_error,
                            &save_status,
                            &drag_state,
                            &on_toggle_pick,
                            &on_pair_pick,
                            on_confirm,
                            on_pass,
                            on_save,
                        ),
                    }
                }
            </main>
        </div>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_menu(
    menu_open: bool,
    show_reset_confirm: bool,
    saving: bool,
    session: &UseStateHandle<Option<RankingSession>>,
    on_close: Callback<()>,
    on_meta_change: Callback<MetaField>,
    on_request_reset: Callback<()>,
    on_cancel_reset: Callback<()>,
    on_confirm_reset: Callback<()>,
) -> Html {
    let overlay_classes = classes!("menu-overlay", if menu_open { Some("open") } else { None });
    let panel_classes = classes!("menu-panel", if menu_open { Some("open") } else { None });
    let stop_click = Callback::from(|event: MouseEvent| event.stop_propagation());
    let close_click = {
        let on_close = on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let request_reset_click = Callback::from(move |_: MouseEvent| on_request_reset.emit(()));
    let cancel_reset_click = Callback::from(move |_: MouseEvent| on_cancel_reset.emit(()));
    let confirm_reset_click = Callback::from(move |_: MouseEvent| on_confirm_reset.emit(()));

    let Some(current) = session.deref().as_ref() else {
        return html! {
            <div class={overlay_classes} onclick={close_click.clone()}>
                <aside class={panel_classes} onclick={stop_click}>
                    <p class="menu-placeholder">{ "The ranking will appear once an album is loaded." }</p>
                </aside>
            </div>
        };
    };

    let meta = current.meta();
    let on_name = {
        let on_meta_change = on_meta_change.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_meta_change.emit(MetaField::Name(input.value()));
        })
    };
    let on_description = {
        let on_meta_change = on_meta_change.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_meta_change.emit(MetaField::Description(input.value()));
        })
    };
    let on_public = Callback::from(move |event: web_sys::Event| {
        let input: HtmlInputElement = event.target_unchecked_into();
        on_meta_change.emit(MetaField::Public(input.checked()));
    });

    let (ranked_count, total) = current.progress();
    let ranked = current.ranked_items();
    let rankings = if ranked.is_empty() {
        html! { <p class="menu-placeholder">{ "Nothing ranked yet." }</p> }
    } else {
        html! {
            <ol class="menu-ranking-list">
                { for ranked.into_iter().map(render_ranked_entry) }
            </ol>
        }
    };

    html! {
        <div class={overlay_classes} onclick={close_click.clone()}>
            <aside class={panel_classes} onclick={stop_click}>
                <div class="menu-header">
                    <h2>{ "Ranking" }</h2>
                    <button class="menu-close" onclick={close_click}>{ "×" }</button>
                </div>

                <div class="menu-section details">
                    <label>
                        { "Name" }
                        <input type="text" value={meta.name.clone()} oninput={on_name} disabled={saving} />
                    </label>
                    <label>
                        { "Description" }
                        <input type="text" value={meta.description.clone()} oninput={on_description} disabled={saving} />
                    </label>
                    <label class="checkbox">
                        <input type="checkbox" checked={meta.is_public} onchange={on_public} disabled={saving} />
                        { "Public" }
                    </label>
                </div>

                <div class="menu-section">
                    {
                        if show_reset_confirm {
                            html! {
                                <div class="reset-confirm">
                                    <p>{ "Start this ranking over? All picks are lost." }</p>
                                    <div class="confirm-actions">
                                        <button class="confirm-yes" onclick={confirm_reset_click}>{ "Yes" }</button>
                                        <button class="confirm-no" onclick={cancel_reset_click}>{ "No" }</button>
                                    </div>
                                </div>
                            }
                        } else {
                            html! {
                                <button class="menu-action reset" onclick={request_reset_click} disabled={saving}>
                                    { "Reset Ranking" }
                                </button>
                            }
                        }
                    }
                </div>

                <div class="menu-section rankings">
                    <div class="menu-section-header">
                        <h3>{ "Current Ranking" }</h3>
                        <span class="matches-count">{ format!("Ranked {ranked_count} of {total}") }</span>
                    </div>
                    <div class="ranking-scroll">
                        { rankings }
                    </div>
                </div>
            </aside>
        </div>
    }
}

fn render_ranked_entry(item: &Item) -> Html {
    html! {
        <li key={item.id.to_string()}>
            <img class="thumb" src={item.display_ref.clone()} alt={item.name.clone()} />
            <span class="item-label">{ &item.name }</span>
            <span class="item-rating">{ format!("#{}", item.rank().unwrap_or_default()) }</span>
        </li>
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::InitialSweep => "Pick your favourites",
        Phase::Qualification => "Final picks",
        Phase::Complete => "Ranking complete",
    }
}

#[allow(clippy::too_many_arguments)]
fn render_round_area(
    session: &UseStateHandle<Option<RankingSession>>,
    picks: &UseStateHandle<Vec<ItemId>>,
    selection_error: &UseStateHandle<Option<String>>,
    save_status: &UseStateHandle<SaveStatus>,
    drag_state: &UseStateHandle<Option<DragState>>,
    on_toggle_pick: &Callback<ItemId>,
    on_pair_pick: &Callback<PairSide>,
    on_confirm: Callback<MouseEvent>,
    on_pass: Callback<MouseEvent>,
    on_save: Callback<MouseEvent>,
) -> Html {
    let Some(current) = session.deref().as_ref() else {
        return html! { <p>{ "Nothing to rank." }</p> };
    };

    let saving = save_status.locks_session();
    let (ranked_count, total) = current.progress();
    let save_note = match &**save_status {
        SaveStatus::Idle => html! {},
        SaveStatus::Saving => html! { <span class="save-note">{ "Saving…" }</span> },
        SaveStatus::Saved(id) => html! { <span class="save-note ok">{ format!("Saved as ranking {id}") }</span> },
        SaveStatus::Error(message) => html! {
            <span class="save-note error">{ format!("Could not save: {message}. Try again.") }</span>
        },
    };

    let board = if current.is_complete() {
        html! {
            <ol class="final-ranking">
                { for current.ranked_items().into_iter().map(render_ranked_entry) }
            </ol>
        }
    } else {
        let shown = current.displayed_items();
        if shown.len() == 2 && current.max_selectable() == 1 {
            render_pair(shown[0], shown[1], saving, drag_state, on_pair_pick)
        } else {
            html! {
                <div class="card-grid">
                    { for shown.into_iter().map(|item| render_card(item, picks.contains(&item.id), saving, on_toggle_pick)) }
                </div>
            }
        }
    };

    let pick_hint = if current.is_complete() {
        String::new()
    } else {
        format!(
            "{} of {} picked (round {})",
            picks.len(),
            current.max_selectable(),
            current.round() + 1
        )
    };

    html! {
        <div class="ranking-wrapper">
            <div class="ranking-header">
                <h1>{ &current.meta().name }</h1>
                <span class="phase">{ phase_label(current.phase()) }</span>
                <span class="progress">{ format!("{ranked_count} / {total} ranked") }</span>
            </div>
            { board }
            {
                match &**selection_error {
                    Some(message) => html! { <p class="error">{ message }</p> },
                    None => html! {},
                }
            }
            <div class="round-actions">
                <span class="pick-hint">{ pick_hint }</span>
                <button class="confirm" onclick={on_confirm}
                    disabled={saving || picks.is_empty() || current.is_complete()}>
                    { "Confirm" }
                </button>
                <button class="pass" onclick={on_pass} disabled={saving || current.is_complete()}>
                    { "Skip" }
                </button>
                <button class="save" onclick={on_save} disabled={saving}>{ "Save" }</button>
                { save_note }
            </div>
        </div>
    }
}

fn render_card(
    item: &Item,
    picked: bool,
    locked: bool,
    on_toggle_pick: &Callback<ItemId>,
) -> Html {
    let onclick = {
        let on_toggle_pick = on_toggle_pick.clone();
        let id = item.id.clone();
        Callback::from(move |_: MouseEvent| on_toggle_pick.emit(id.clone()))
    };

    html! {
        <button key={item.id.to_string()} class={classes!("card", picked.then_some("picked"))} {onclick} disabled={locked}>
            <img src={item.display_ref.clone()} alt={item.name.clone()} />
            <p class="card-title">{ &item.name }</p>
        </button>
    }
}

fn render_pair(
    left_item: &Item,
    right_item: &Item,
    locked: bool,
    drag_state: &UseStateHandle<Option<DragState>>,
    on_pair_pick: &Callback<PairSide>,
) -> Html {
    let lean = drag_state
        .deref()
        .as_ref()
        .and_then(|d| swipe_lean(d.current_x - d.start_x));
    let offset = lean.map_or(0.0, |(side, strength)| match side {
        PairSide::Left => -strength * SWIPE_THRESHOLD,
        PairSide::Right => strength * SWIPE_THRESHOLD,
    });
    let slide_style = format!(
        "transform: translate3d({:.0}px, 0, 0); transition: transform {};",
        offset,
        if drag_state.deref().is_some() {
            "0ms"
        } else {
            "180ms ease-out"
        }
    );
    let leaning = |side: PairSide| lean.map_or(false, |(toward, _)| toward == side);

    let pointer_down = {
        let drag_state = drag_state.clone();
        Callback::from(move |event: PointerEvent| {
            event.prevent_default();
            if locked || drag_state.deref().is_some() {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            drag_state.set(Some(DragState {
                pointer_id: event.pointer_id(),
                start_x: event.client_x() as f64,
                current_x: event.client_x() as f64,
            }));
        })
    };

    let pointer_move = {
        let drag_state = drag_state.clone();
        Callback::from(move |event: PointerEvent| {
            if let Some(mut state) = drag_state.deref().clone() {
                if state.pointer_id == event.pointer_id() {
                    event.prevent_default();
                    state.current_x = event.client_x() as f64;
                    drag_state.set(Some(state));
                }
            }
        })
    };

    let pointer_end = {
        let drag_state = drag_state.clone();
        let on_pair_pick = on_pair_pick.clone();
        Callback::from(move |event: PointerEvent| {
            if let Some(state) = drag_state.deref().clone() {
                if state.pointer_id == event.pointer_id() {
                    release_pointer(&event);
                    let delta = state.current_x - state.start_x;
                    if delta.abs() > SWIPE_THRESHOLD {
                        let side = if delta > 0.0 {
                            PairSide::Right
                        } else {
                            PairSide::Left
                        };
                        on_pair_pick.emit(side);
                    } else if delta.abs() < TAP_SLOP {
                        if let Some(side) = tapped_side(&event) {
                            on_pair_pick.emit(side);
                        }
                    }
                    drag_state.set(None);
                }
            }
        })
    };

    let pointer_cancel = {
        let drag_state = drag_state.clone();
        Callback::from(move |event: PointerEvent| {
            if let Some(state) = drag_state.deref().clone() {
                if state.pointer_id == event.pointer_id() {
                    release_pointer(&event);
                    drag_state.set(None);
                }
            }
        })
    };

    html! {
        <div class="card-container">
            <div class="matchup swipe-enabled"
                style={slide_style}
                onpointerdown={pointer_down}
                onpointermove={pointer_move}
                onpointerup={pointer_end}
                onpointercancel={pointer_cancel}>
                <div class={classes!("card", "left-card", leaning(PairSide::Left).then_some("leaning"))}>
                    <img src={left_item.display_ref.clone()} alt={left_item.name.clone()} />
                    <p class="card-title">{ &left_item.name }</p>
                    <p class="swipe-hint">{ "Swipe left" }</p>
                </div>
                <span class="vs-label">{ "vs" }</span>
                <div class={classes!("card", "right-card", leaning(PairSide::Right).then_some("leaning"))}>
                    <img src={right_item.display_ref.clone()} alt={right_item.name.clone()} />
                    <p class="card-title">{ &right_item.name }</p>
                    <p class="swipe-hint">{ "Swipe right" }</p>
                </div>
            </div>
        </div>
    }
}

fn tapped_side(event: &PointerEvent) -> Option<PairSide> {
    let element = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let inside = |selector: &str| matches!(element.closest(selector), Ok(Some(_)));
    if inside(".left-card") {
        Some(PairSide::Left)
    } else if inside(".right-card") {
        Some(PairSide::Right)
    } else {
        None
    }
}

fn release_pointer(event: &PointerEvent) {
    if let Some(target) = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    {
        let _ = target.release_pointer_capture(event.pointer_id());
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(target_arch = "wasm32")]
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

/// Which card a drag is heading for, with how far along the swipe is (0..=1).
fn swipe_lean(delta: f64) -> Option<(PairSide, f64)> {
    let strength = (delta.abs() / SWIPE_THRESHOLD).min(1.0);
    if strength < 0.05 {
        return None;
    }
    let side = if delta < 0.0 {
        PairSide::Left
    } else {
        PairSide::Right
    };
    Some((side, strength))
}

/// Page glow on the side of the card about to be picked.
fn pick_glow(delta: f64) -> Option<String> {
    let (side, strength) = swipe_lean(delta)?;
    let direction = match side {
        PairSide::Left => "to left",
        PairSide::Right => "to right",
    };
    Some(format!(
        "linear-gradient({direction}, rgba(74, 144, 226, 0), rgba(74, 144, 226, {:.2}))",
        0.45 * strength
    ))
}
