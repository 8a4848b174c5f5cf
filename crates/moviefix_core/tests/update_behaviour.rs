use std::sync::Once;

use moviefix_core::{
    update, AppState, Category, CategoryLoad, Effect, FilterKey, Item, LoadError, Msg,
    PageRequest,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(moviefix_logging::initialize_for_tests);
}

fn movie(id: i64, release_date: &str, category_ids: &[i64]) -> Item {
    Item {
        id,
        title: format!("Movie {id}"),
        release_date: release_date.to_string(),
        category_ids: category_ids.to_vec(),
        poster_path: String::new(),
        score: 8.1,
    }
}

fn request_next(state: AppState) -> (AppState, PageRequest) {
    let (state, effects) = update(state, Msg::LoadNextRequested);
    match effects.as_slice() {
        [Effect::FetchPage(request)] => {
            let request = request.clone();
            (state, request)
        }
        other => panic!("expected one FetchPage effect, got {other:?}"),
    }
}

fn with_categories(state: AppState) -> AppState {
    let (state, _) = update(state, Msg::CategoriesRequested);
    let (state, _) = update(
        state,
        Msg::CategoriesLoaded(Ok(vec![
            Category {
                id: 28,
                name: "Action".into(),
            },
            Category {
                id: 35,
                name: "Comedy".into(),
            },
        ])),
    );
    state
}

#[test]
fn load_next_emits_fetch_for_page_one() {
    init_logging();
    let state = AppState::with_filter(FilterKey::new(Some(2022), [28]));
    let (mut state, request) = request_next(state);

    assert_eq!(request.page, 1);
    assert_eq!(request.filter, FilterKey::new(Some(2022), [28]));
    assert!(state.view().page.loading);
    assert!(state.consume_dirty());
}

#[test]
fn second_load_while_loading_is_ignored() {
    init_logging();
    let (state, _request) = request_next(AppState::new());
    let (mut state, effects) = update(state, Msg::LoadNextRequested);

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let (mut state, effects) = update(state, Msg::LoadNextRequested);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn loaded_pages_regroup_buckets() {
    init_logging();
    let state = with_categories(AppState::new());
    let (state, request) = request_next(state);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Ok(vec![
                movie(1, "2014-05-01", &[28]),
                movie(2, "2022-01-01", &[35, 999]),
            ]),
        },
    );
    let (state, request) = request_next(state);
    assert_eq!(request.page, 2);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Ok(vec![movie(3, "", &[]), movie(4, "2022-07-04", &[28, 35])]),
        },
    );

    let view = state.view();
    let layout: Vec<(String, Vec<(i64, String)>)> = view
        .buckets
        .iter()
        .map(|bucket| {
            (
                bucket.year.clone(),
                bucket
                    .items
                    .iter()
                    .map(|entry| (entry.item.id, entry.genre_label.clone()))
                    .collect(),
            )
        })
        .collect();

    assert_eq!(
        layout,
        vec![
            (
                "2022".to_string(),
                vec![
                    (2, "Comedy".to_string()),
                    (4, "Action, Comedy".to_string())
                ]
            ),
            ("2014".to_string(), vec![(1, "Action".to_string())]),
            ("<invalid>".to_string(), vec![(3, String::new())]),
        ]
    );
    assert_eq!(view.page.items.len(), 4);
    assert_eq!(view.page.next_page, 3);
    assert!(view.page.has_more);
}

#[test]
fn stale_page_is_discarded_after_filter_change() {
    init_logging();
    let (state, in_flight) = request_next(AppState::with_filter(FilterKey::new(None, [28])));
    let (state, _) = update(state, Msg::FiltersChanged(FilterKey::new(None, [35])));
    let (mut state, _) = update(state, Msg::CategoryToggled(12));
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::PageLoaded {
            request: in_flight,
            result: Ok(vec![movie(1, "2020-01-01", &[28])]),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    let view = state.view();
    assert!(view.page.items.is_empty());
    assert!(!view.page.loading);
    assert_eq!(view.page.filter, FilterKey::new(None, [12, 35]));
}

#[test]
fn failed_page_surfaces_error_and_can_retry() {
    init_logging();
    let (state, request) = request_next(AppState::new());
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Err(LoadError::Api {
                status: 401,
                message: "Invalid API key".into(),
            }),
        },
    );

    let view = state.view();
    assert_eq!(view.page.error.as_ref().and_then(LoadError::status), Some(401));
    assert!(view.page.has_more);

    let (_state, retry) = request_next(state);
    assert_eq!(retry.page, 1);
}

#[test]
fn year_selection_resets_pages() {
    init_logging();
    let (state, request) = request_next(AppState::new());
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Ok(vec![movie(1, "2020-01-01", &[])]),
        },
    );

    let (mut state, _) = update(state, Msg::YearSelected(Some(2020)));
    assert!(state.consume_dirty());
    assert_eq!(state.view().page.page_count, 0);
    assert_eq!(state.filter().year(), Some(2020));

    let (mut state, _) = update(state, Msg::YearSelected(Some(2020)));
    assert!(!state.consume_dirty());
}

#[test]
fn category_toggle_marks_chips_and_ignores_unknown_ids() {
    init_logging();
    let state = with_categories(AppState::new());
    let (state, _) = update(state, Msg::CategoryToggled(35));
    let (mut state, _) = update(state, Msg::CategoryToggled(999));

    let chips: Vec<(i64, bool)> = state
        .view()
        .chips
        .iter()
        .map(|chip| (chip.id, chip.selected))
        .collect();
    assert_eq!(chips, vec![(28, false), (35, true)]);
    assert_eq!(state.filter(), &FilterKey::new(None, [35]));
    assert!(state.consume_dirty());

    let (state, _) = update(state, Msg::CategoryToggled(35));
    assert_eq!(state.filter(), &FilterKey::default());
}

#[test]
fn categories_are_requested_once() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CategoriesRequested);
    assert_eq!(effects, vec![Effect::FetchCategories]);
    assert!(state.view().categories_loading);

    let (state, effects) = update(state, Msg::CategoriesRequested);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::CategoriesLoaded(Err(LoadError::Network("dns failure".into()))),
    );
    assert!(matches!(state.category_load(), CategoryLoad::Failed(_)));
    assert_eq!(
        state.view().categories_error,
        Some(LoadError::Network("dns failure".into()))
    );

    let (_state, effects) = update(state, Msg::CategoriesRequested);
    assert_eq!(effects, vec![Effect::FetchCategories]);
}

#[test]
fn unsolicited_category_response_changes_nothing() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::CategoriesLoaded(Ok(vec![Category {
            id: 28,
            name: "Action".into(),
        }])),
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let loaded = with_categories(AppState::new());
    let (next, effects) = update(
        loaded.clone(),
        Msg::CategoriesLoaded(Err(LoadError::Network("late failure".into()))),
    );
    assert_eq!(next, loaded);
    assert!(effects.is_empty());
}
